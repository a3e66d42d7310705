use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;

use crate::error::ClientError;

/// Caller-side description of a request, kept around so it can be replayed
/// after a token refresh.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn post<T: Serialize + ?Sized>(body: &T) -> Result<Self, ClientError> {
        Self::new(Method::POST).with_json(body)
    }

    pub fn put<T: Serialize + ?Sized>(body: &T) -> Result<Self, ClientError> {
        Self::new(Method::PUT).with_json(body)
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Builds the outgoing header set.
///
/// Caller headers override the JSON default. `Authorization` always reflects
/// `token`: a caller-supplied value is discarded, and no header is sent
/// without a token.
pub fn compose_headers(caller: &HeaderMap, token: Option<&str>) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.extend(caller.clone());
    headers.remove(AUTHORIZATION);
    if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

pub fn resolve_url(addr: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }
    format!(
        "{}/{}",
        addr.trim_end_matches('/'),
        target.trim_start_matches('/')
    )
}

pub fn ensure_secure_addr(addr: &str, allow_insecure: bool) -> Result<(), ClientError> {
    if addr.starts_with("https://") {
        return Ok(());
    }
    if !addr.starts_with("http://") {
        return Err(ClientError::InvalidUrl(addr.to_string()));
    }
    if !allow_insecure {
        return Err(ClientError::InsecureAddress(addr.to_string()));
    }
    Ok(())
}

pub fn build_params<const N: usize>(
    pairs: [Option<(String, String)>; N],
) -> Vec<(String, String)> {
    pairs.into_iter().flatten().collect()
}

pub fn opt_param(key: &str, value: Option<String>) -> Option<(String, String)> {
    value.map(|value| (key.to_string(), value))
}

pub fn append_params(url: &mut String, params: Vec<(String, String)>) {
    if params.is_empty() {
        return;
    }
    let query = params
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<String>>()
        .join("&");
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&query);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_headers_defaults_to_json() -> Result<(), ClientError> {
        let headers = compose_headers(&HeaderMap::new(), None)?;
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert!(headers.get(AUTHORIZATION).is_none());
        Ok(())
    }

    #[test]
    fn caller_headers_win_except_authorization() -> Result<(), ClientError> {
        let mut caller = HeaderMap::new();
        caller.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        caller.insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
        caller.insert("x-request-id", HeaderValue::from_static("abc"));

        let headers = compose_headers(&caller, Some("fresh"))?;
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/csv")
        );
        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer fresh")
        );
        assert_eq!(
            headers.get("x-request-id").and_then(|v| v.to_str().ok()),
            Some("abc")
        );
        Ok(())
    }

    #[test]
    fn caller_authorization_dropped_without_token() -> Result<(), ClientError> {
        let mut caller = HeaderMap::new();
        caller.insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
        let headers = compose_headers(&caller, None)?;
        assert!(headers.get(AUTHORIZATION).is_none());
        Ok(())
    }

    #[test]
    fn resolve_url_joins_paths() {
        assert_eq!(
            resolve_url("https://api.example/", "/timesheets/"),
            "https://api.example/timesheets/"
        );
        assert_eq!(
            resolve_url("https://api.example", "http://other/x"),
            "http://other/x"
        );
    }

    #[test]
    fn insecure_addr_is_refused() {
        assert!(matches!(
            ensure_secure_addr("http://localhost:8000", false),
            Err(ClientError::InsecureAddress(_))
        ));
        assert!(ensure_secure_addr("http://localhost:8000", true).is_ok());
        assert!(ensure_secure_addr("https://localhost:8000", false).is_ok());
    }

    #[test]
    fn addr_without_http_scheme_is_invalid() {
        for addr in ["localhost:8000", "ftp://files.example/api", ""] {
            assert!(matches!(
                ensure_secure_addr(addr, true),
                Err(ClientError::InvalidUrl(_))
            ));
        }
    }

    #[test]
    fn append_params_encodes_values() {
        let mut url = "https://api.example/timesheets/my-timesheets/".to_string();
        let params = build_params([
            opt_param("date_from", Some("2026-10-12".to_string())),
            opt_param("date_to", None),
            opt_param("q", Some("a b".to_string())),
        ]);
        append_params(&mut url, params);
        assert_eq!(
            url,
            "https://api.example/timesheets/my-timesheets/?date_from=2026-10-12&q=a%20b"
        );
    }
}
