//! Bearer-authenticated HTTP client with single-flight token refresh.
//!
//! Every request carries the access token currently in the [`TokenStore`].
//! When the backend answers 401, one caller becomes the refresh owner and
//! exchanges the refresh token; callers that hit 401 while that refresh is in
//! flight are parked in a FIFO queue. Once the new token is stored the parked
//! requests are replayed by a spawned task, so they settle even if the owner
//! goes away. A failed refresh rejects every parked caller and tears the
//! session down.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use futures::future::join_all;
use reqwest::{Response, StatusCode};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TOKEN_REFRESH_PATH};
use crate::error::{ClientError, TokenStoreError};
use crate::models::{RefreshRequest, RefreshResponse};
use crate::request::{compose_headers, ensure_secure_addr, resolve_url, RequestOptions};
use crate::response::http_error;
use crate::session::{LogTerminator, SessionTerminator, TerminationReason};
use crate::store::TokenStore;

pub type RequestResult = Result<Response, ClientError>;

struct PendingRequest {
    url: String,
    options: RequestOptions,
    responder: oneshot::Sender<RequestResult>,
}

#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    queue: VecDeque<PendingRequest>,
}

enum Recovery {
    Queued(oneshot::Receiver<RequestResult>),
    Replay(String, RequestOptions),
    Refresh(String, RequestOptions),
}

/// Resets the refresh state if the future driving the refresh or the queue
/// drain is dropped before it finishes.
///
/// Dropping the queue drops every responder, so parked callers wake up with
/// a refresh failure instead of waiting forever.
struct RefreshGuard {
    state: Arc<Mutex<RefreshState>>,
    armed: bool,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let abandoned = state.queue.len();
        state.refreshing = false;
        state.queue.clear();
        warn!(abandoned, "token refresh abandoned");
    }
}

#[derive(Clone)]
pub struct AuthenticatedRequestClient {
    http: reqwest::Client,
    addr: String,
    allow_insecure: bool,
    store: Arc<dyn TokenStore>,
    terminator: Arc<dyn SessionTerminator>,
    refresh: Arc<Mutex<RefreshState>>,
}

impl AuthenticatedRequestClient {
    pub fn new(http: reqwest::Client, addr: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            addr: addr.into(),
            allow_insecure: false,
            store,
            terminator: Arc::new(LogTerminator),
            refresh: Arc::new(Mutex::new(RefreshState::default())),
        }
    }

    pub fn with_terminator(mut self, terminator: Arc<dyn SessionTerminator>) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn allow_insecure(mut self, allow_insecure: bool) -> Self {
        self.allow_insecure = allow_insecure;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub fn url(&self, target: &str) -> String {
        resolve_url(&self.addr, target)
    }

    pub fn refresh_in_progress(&self) -> bool {
        self.state().refreshing
    }

    pub fn queued_requests(&self) -> usize {
        self.state().queue.len()
    }

    /// Sends a request with the current bearer token, refreshing the session
    /// once on 401.
    ///
    /// Any status other than 401 is returned untouched. A 401 on the retried
    /// request comes back as [`ClientError::Http`] and is never refreshed a
    /// second time.
    pub async fn request(&self, target: &str, options: RequestOptions) -> RequestResult {
        let url = self.url(target);
        let sent_token = self.store.access_token()?;
        let response = self.send_once(&url, &options, sent_token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        info!(
            method = %options.method,
            url = %url,
            "http request unauthorized; attempting token refresh"
        );

        let Some(refresh_token) = self.store.refresh_token()? else {
            let _ = self.terminate_session(TerminationReason::MissingRefreshToken);
            return Err(ClientError::AuthenticationExpired);
        };

        match self.claim_recovery(url, options, sent_token.as_deref())? {
            Recovery::Queued(settled) => settled
                .await
                .unwrap_or_else(|_| Err(ClientError::refresh_failed("refresh abandoned"))),
            Recovery::Replay(url, options) => self.replay(&url, &options).await,
            Recovery::Refresh(url, options) => {
                self.refresh_and_replay(&refresh_token, url, options).await
            }
        }
    }

    /// Sends without a token and without 401 handling (login, register).
    pub async fn send_unauthenticated(
        &self,
        target: &str,
        options: RequestOptions,
    ) -> RequestResult {
        let url = self.url(target);
        self.send_once(&url, &options, None).await
    }

    /// Clears the stored credentials and notifies the terminator.
    ///
    /// The terminator is notified even when clearing the store fails; the
    /// store error is returned afterwards.
    pub fn terminate_session(&self, reason: TerminationReason) -> Result<(), TokenStoreError> {
        let cleared = self.store.clear();
        if let Err(err) = &cleared {
            warn!(error = %err, "failed to clear token store");
        }
        self.terminator.terminate(&reason);
        cleared
    }

    fn state(&self) -> MutexGuard<'_, RefreshState> {
        self.refresh.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decides, under the refresh lock, what this 401 caller does next.
    fn claim_recovery(
        &self,
        url: String,
        options: RequestOptions,
        sent_token: Option<&str>,
    ) -> Result<Recovery, ClientError> {
        let mut state = self.state();
        if state.refreshing {
            let (responder, settled) = oneshot::channel();
            state.queue.push_back(PendingRequest {
                url,
                options,
                responder,
            });
            debug!(queued = state.queue.len(), "refresh in progress; request queued");
            return Ok(Recovery::Queued(settled));
        }

        // A refresh finished while this request was in flight.
        let current = self.store.access_token()?;
        if current.is_some() && current.as_deref() != sent_token {
            debug!(url = %url, "access token already rotated; replaying request");
            return Ok(Recovery::Replay(url, options));
        }

        state.refreshing = true;
        Ok(Recovery::Refresh(url, options))
    }

    async fn refresh_and_replay(
        &self,
        refresh_token: &str,
        url: String,
        options: RequestOptions,
    ) -> RequestResult {
        let mut guard = RefreshGuard {
            state: Arc::clone(&self.refresh),
            armed: true,
        };

        if let Err(err) = self.refresh_access_token(refresh_token).await {
            let reason = match err {
                ClientError::TokenRefreshFailed { reason } => reason,
                other => other.to_string(),
            };
            warn!(reason = %reason, "token refresh failed; ending session");
            // `refreshing` stays set until the store is cleared, so nobody
            // starts a second refresh with the rejected token.
            let rejected = std::mem::take(&mut self.state().queue);
            reject_all(rejected, &reason);
            let _ = self.terminate_session(TerminationReason::RefreshFailed(reason.clone()));
            let late = {
                let mut state = self.state();
                state.refreshing = false;
                guard.armed = false;
                std::mem::take(&mut state.queue)
            };
            reject_all(late, &reason);
            return Err(ClientError::refresh_failed(reason));
        }

        guard.armed = false;
        let drain = tokio::spawn(self.clone().drain_queue());
        if let Err(err) = drain.await {
            warn!(error = %err, "queued request replay task failed");
        }

        self.replay(&url, &options).await
    }

    /// Replays parked requests in FIFO batches until the queue stays empty,
    /// then clears `refreshing`.
    async fn drain_queue(self) {
        let client = &self;
        let mut guard = RefreshGuard {
            state: Arc::clone(&self.refresh),
            armed: true,
        };
        loop {
            let batch: Vec<PendingRequest> = {
                let mut state = self.state();
                if state.queue.is_empty() {
                    state.refreshing = false;
                    guard.armed = false;
                    break;
                }
                state.queue.drain(..).collect()
            };
            debug!(count = batch.len(), "replaying queued requests");
            join_all(batch.into_iter().map(|pending| async move {
                let result = client.replay(&pending.url, &pending.options).await;
                let _ = pending.responder.send(result);
            }))
            .await;
        }
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<(), ClientError> {
        let url = self.url(TOKEN_REFRESH_PATH);
        ensure_secure_addr(&url, self.allow_insecure)?;
        let payload = RefreshRequest {
            refresh: refresh_token.to_string(),
        };
        let start = Instant::now();
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ClientError::refresh_failed(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::refresh_failed(format!("{status} {body}")));
        }
        let tokens: RefreshResponse = response
            .json()
            .await
            .map_err(|err| ClientError::refresh_failed(err.to_string()))?;

        self.store.set(ACCESS_TOKEN_KEY, &tokens.access)?;
        if let Some(rotated) = tokens.refresh.as_deref() {
            self.store.set(REFRESH_TOKEN_KEY, rotated)?;
        }
        info!(
            elapsed_ms = start.elapsed().as_millis(),
            rotated = tokens.refresh.is_some(),
            "access token refreshed"
        );
        Ok(())
    }

    /// Re-issues a request once with the token now in the store.
    async fn replay(&self, url: &str, options: &RequestOptions) -> RequestResult {
        let token = self.store.access_token()?;
        let response = self.send_once(url, options, token.as_deref()).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(method = %options.method, url = %url, "request still unauthorized after refresh");
            return Err(http_error(response).await);
        }
        Ok(response)
    }

    async fn send_once(
        &self,
        url: &str,
        options: &RequestOptions,
        token: Option<&str>,
    ) -> RequestResult {
        ensure_secure_addr(url, self.allow_insecure)?;
        let headers = compose_headers(&options.headers, token)?;
        let mut builder = self
            .http
            .request(options.method.clone(), url)
            .headers(headers);
        if let Some(body) = options.body.as_ref() {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        debug!(method = %options.method, url = %url, "http request");
        let start = Instant::now();
        let response = builder.send().await?;
        debug!(
            method = %options.method,
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        Ok(response)
    }
}

fn reject_all(pending: VecDeque<PendingRequest>, reason: &str) {
    for request in pending {
        let _ = request
            .responder
            .send(Err(ClientError::refresh_failed(reason)));
    }
}
