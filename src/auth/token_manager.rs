use std::sync::Arc;

use chrono::Duration;
use http::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::api::endpoints::AUTH_TOKEN;
use crate::api::envelope;
use crate::auth::credentials::Credentials;
use crate::auth::token::Token;
use crate::error::{ClientError, Result};
use crate::helpers::time::{now_utc, parse_expiry};
use crate::observability::metrics::ClientMetrics;
use crate::transport::{HttpRequest, HttpTransport};
use crate::utils::constants::{HEADER_CLIENT_ID, HEADER_CLIENT_SECRET};

/// Owns the credential pair and the one bearer token shared by every
/// operation of a client.
///
/// Readers check the cached token under a shared lock. A caller that finds
/// it empty or expired takes the exclusive lock, checks again, and only then
/// calls `auth/token`; everyone queued behind it sees the fresh token on
/// their own re-check. At most one refresh is in flight per manager.
pub struct TokenManager<T> {
    credentials: Credentials,
    auth_url: String,
    skew: Duration,
    transport: Arc<T>,
    token: RwLock<Token>,
    metrics: ClientMetrics,
}

impl<T: HttpTransport> TokenManager<T> {
    pub fn new(
        credentials: Credentials,
        base_url: &str,
        skew: Duration,
        transport: Arc<T>,
        metrics: ClientMetrics,
    ) -> Self {
        Self {
            credentials,
            auth_url: format!("{}{}", base_url, AUTH_TOKEN.path),
            skew,
            transport,
            token: RwLock::new(Token::empty()),
            metrics,
        }
    }

    /// Return the cached token if it is still valid, refreshing it otherwise.
    pub async fn get_valid_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            if token.is_valid_at(now_utc(), self.skew) {
                debug!("using cached bearer token");
                return Ok(token.value.clone());
            }
        }

        let mut token = self.token.write().await;
        // another caller may have refreshed while we waited for the lock
        if token.is_valid_at(now_utc(), self.skew) {
            debug!("bearer token refreshed by a concurrent caller");
            return Ok(token.value.clone());
        }

        let fresh = self.refresh().await?;
        let value = fresh.value.clone();
        *token = fresh;
        Ok(value)
    }

    /// Snapshot of the cached token.
    pub async fn cached_token(&self) -> Token {
        self.token.read().await.clone()
    }

    /// Forget the cached token; the next call refreshes.
    pub async fn invalidate(&self) {
        *self.token.write().await = Token::empty();
        self.metrics.token_expiry_unix.set(0);
    }

    /// Call `auth/token`. Runs with the write lock held by the caller.
    async fn refresh(&self) -> Result<Token> {
        self.metrics.auth_refreshes.inc();

        let request = self.auth_request()?;
        let response = self.transport.execute(request).await.map_err(|e| {
            self.metrics.auth_failures.inc();
            error!(error = %e, "token request failed");
            ClientError::Transport(e)
        })?;

        if !envelope::is_success(response.status) {
            self.metrics.auth_failures.inc();
            let message = envelope::decode_message(AUTH_TOKEN.path, &response.body)?;
            error!(status = response.status.as_u16(), message = %message, "token request rejected");
            return Err(ClientError::Auth {
                status: response.status.as_u16(),
                message,
            });
        }

        let body = envelope::decode_auth_body(AUTH_TOKEN.path, &response.body).inspect_err(|_| {
            self.metrics.auth_failures.inc();
        })?;

        let expires_at = match parse_expiry(&body.expires) {
            Ok(expires_at) => Some(expires_at),
            Err(e) => {
                warn!(expires = %body.expires, error = %e, "could not parse token expiry, token will be refreshed on next use");
                None
            }
        };

        self.metrics
            .token_expiry_unix
            .set(expires_at.map(|e| e.timestamp()).unwrap_or(0));
        info!(expires_at = ?expires_at, "bearer token refreshed");

        Ok(Token::new(body.token, expires_at))
    }

    fn auth_request(&self) -> Result<HttpRequest> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(HEADER_CLIENT_ID),
            header_value(HEADER_CLIENT_ID, &self.credentials.client_id)?,
        );
        headers.insert(
            HeaderName::from_static(HEADER_CLIENT_SECRET),
            header_value(HEADER_CLIENT_SECRET, &self.credentials.client_secret)?,
        );

        let mut request = HttpRequest::new(AUTH_TOKEN.method.clone(), self.auth_url.clone());
        request.headers = headers;
        Ok(request)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|_| ClientError::InvalidArgument(format!("{name} is not a valid header value")))?;
    value.set_sensitive(true);
    Ok(value)
}
