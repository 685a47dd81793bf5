use std::sync::{Arc, OnceLock};

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::HeaderValue;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::endpoints::Endpoint;
use crate::api::envelope;
use crate::api::params::validate_identifier;
use crate::auth::TokenManager;
use crate::error::{ClientError, Result};
use crate::helpers::time::get_instant;
use crate::observability::metrics::ClientMetrics;
use crate::transport::{HttpRequest, HttpTransport};
use crate::utils::constants::BEARER_PREFIX;

/// Body type for endpoints that send none.
pub type NoBody = ();

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([a-zA-Z0-9_]+)\}").expect("placeholder pattern is valid"))
}

/// Runs one authenticated call described by an `Endpoint` row.
pub struct Executor<T> {
    base_url: String,
    transport: Arc<T>,
    tokens: Arc<TokenManager<T>>,
    metrics: ClientMetrics,
}

impl<T: HttpTransport> Executor<T> {
    pub fn new(
        base_url: String,
        transport: Arc<T>,
        tokens: Arc<TokenManager<T>>,
        metrics: ClientMetrics,
    ) -> Self {
        Self { base_url, transport, tokens, metrics }
    }

    pub fn tokens(&self) -> &Arc<TokenManager<T>> {
        &self.tokens
    }

    /// Execute `endpoint` and decode its payload as `R`.
    ///
    /// Path params and the body are checked before the token is fetched, so
    /// a rejected argument never costs a network call.
    pub async fn call<B, R>(&self, endpoint: &Endpoint, params: &[(&str, &str)], body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let start = get_instant();
        let result = self.call_inner(endpoint, params, body).await;

        self.metrics.requests.with_label_values(&[endpoint.name]).inc();
        self.metrics
            .request_duration
            .with_label_values(&[endpoint.name])
            .observe(start.elapsed().as_secs_f64());
        if let Err(e) = &result {
            self.metrics
                .request_failures
                .with_label_values(&[endpoint.name, e.kind()])
                .inc();
            warn!(operation = endpoint.name, error = %e, "operation failed");
        }
        result
    }

    async fn call_inner<B, R>(&self, endpoint: &Endpoint, params: &[(&str, &str)], body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let path = render_path(endpoint, params)?;
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ClientError::InvalidArgument(format!("request body for {} could not be encoded: {e}", endpoint.name)))?;

        let token = self.tokens.get_valid_token().await?;

        let mut request = HttpRequest::new(endpoint.method.clone(), format!("{}{}", self.base_url, path));
        let mut authorization = HeaderValue::from_str(&format!("{BEARER_PREFIX}{token}"))
            .map_err(|_| ClientError::decode("auth/token", "token is not a valid header value"))?;
        authorization.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, authorization);
        if body.is_some() {
            request.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        request.body = body;

        debug!(operation = endpoint.name, method = %endpoint.method, path = %path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(operation = endpoint.name, status = response.status.as_u16(), "response received");

        if !envelope::is_success(response.status) {
            let message = envelope::decode_message(&path, &response.body)?;
            return Err(ClientError::Api {
                status: response.status.as_u16(),
                message,
            });
        }

        envelope::decode_payload(&path, &response.body, endpoint.payload)
    }
}

/// Fill `{name}` placeholders of the endpoint path from `params`.
pub(crate) fn render_path(endpoint: &Endpoint, params: &[(&str, &str)]) -> Result<String> {
    let mut failure: Option<ClientError> = None;
    let rendered = placeholder_regex().replace_all(endpoint.path, |caps: &Captures| {
        let key = &caps[1];
        let value = params.iter().find(|(name, _)| *name == key).map(|(_, value)| *value);
        match value {
            Some(value) => match validate_identifier(key, value) {
                Ok(()) => value.to_owned(),
                Err(e) => {
                    failure.get_or_insert(e);
                    String::new()
                }
            },
            None => {
                failure.get_or_insert_with(|| {
                    ClientError::InvalidArgument(format!("missing path parameter `{key}` for {}", endpoint.name))
                });
                String::new()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(rendered.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::{CRYPTO_ADDRESS_TRANSACTIONS, WALLETS_GET, WALLETS_LIST};

    #[test]
    fn fills_placeholders() {
        assert_eq!(render_path(&WALLETS_GET, &[("currency", "UGX")]).unwrap(), "wallets/UGX");
        assert_eq!(
            render_path(&CRYPTO_ADDRESS_TRANSACTIONS, &[("address", "0xabc")]).unwrap(),
            "crypto/addresses/0xabc/transactions"
        );
        assert_eq!(render_path(&WALLETS_LIST, &[]).unwrap(), "wallets");
    }

    #[test]
    fn missing_or_bad_params_are_invalid_arguments() {
        let err = render_path(&WALLETS_GET, &[]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(ref m) if m.contains("currency")));

        let err = render_path(&WALLETS_GET, &[("currency", "")]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));

        let err = render_path(&WALLETS_GET, &[("currency", "UGX/../../account")]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));

        for dots in ["..", ".", "%2e%2e"] {
            let err = render_path(&CRYPTO_ADDRESS_TRANSACTIONS, &[("address", dots)]).unwrap_err();
            assert!(matches!(err, ClientError::InvalidArgument(_)), "{dots}: {err:?}");
        }
    }
}
