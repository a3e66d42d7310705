use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Pulls a readable message out of an error body.
///
/// The backend answers with `{"error": ...}`; DRF defaults use `detail`, and
/// validation failures are field maps which are passed through as raw JSON.
pub(crate) fn error_message_from_body(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    for key in ["error", "detail", "message"] {
        if let Some(message) = value.get(key).and_then(|value| value.as_str()) {
            return message.to_string();
        }
    }
    value.to_string()
}

pub(crate) async fn http_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ClientError::Http {
        status,
        message: error_message_from_body(&body),
    }
}

pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(http_error(response).await);
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn ensure_success(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(http_error(response).await);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_is_preferred() {
        assert_eq!(
            error_message_from_body(r#"{"error": "Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(
            error_message_from_body(r#"{"detail": "Not found."}"#),
            "Not found."
        );
    }

    #[test]
    fn field_errors_and_plain_text_pass_through() {
        assert_eq!(
            error_message_from_body(r#"{"email":["already taken"]}"#),
            r#"{"email":["already taken"]}"#
        );
        assert_eq!(error_message_from_body(" bad gateway \n"), "bad gateway");
    }
}
