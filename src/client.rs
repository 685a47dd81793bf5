use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::api::Executor;
use crate::auth::{Credentials, TokenManager};
use crate::config::settings::ClientSettings;
use crate::error::{ClientError, Result};
use crate::observability::metrics::ClientMetrics;
use crate::resources::{Account, Beneficiaries, Crypto, Exchange, Payouts, Wallets};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::utils::constants::DEFAULT_BASE_URL;

/// Eversend API client.
///
/// Cloning is cheap and clones share one token. Two clients built separately
/// keep separate tokens even for the same credentials.
pub struct EversendClient<T = ReqwestTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    executor: Executor<T>,
    metrics: ClientMetrics,
}

impl<T> Clone for EversendClient<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl EversendClient<ReqwestTransport> {
    /// Client against the production API with default settings.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    pub fn builder(credentials: Credentials) -> EversendClientBuilder<ReqwestTransport> {
        EversendClientBuilder::new(credentials)
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Self::builder(Credentials::new(
            settings.client_id.clone(),
            settings.client_secret.clone(),
        ))
        .base_url(settings.base_url.clone())
        .expiry_skew(Duration::from_secs(settings.expiry_skew_seconds));
        if let Some(timeout_ms) = settings.request_timeout_ms {
            builder = builder.request_timeout(Duration::from_millis(timeout_ms));
        }
        builder.build()
    }
}

impl<T: HttpTransport> EversendClient<T> {
    pub fn account(&self) -> Account<'_, T> {
        Account::new(&self.inner.executor)
    }

    pub fn wallets(&self) -> Wallets<'_, T> {
        Wallets::new(&self.inner.executor)
    }

    pub fn exchange(&self) -> Exchange<'_, T> {
        Exchange::new(&self.inner.executor)
    }

    pub fn payouts(&self) -> Payouts<'_, T> {
        Payouts::new(&self.inner.executor)
    }

    pub fn beneficiaries(&self) -> Beneficiaries<'_, T> {
        Beneficiaries::new(&self.inner.executor)
    }

    pub fn crypto(&self) -> Crypto<'_, T> {
        Crypto::new(&self.inner.executor)
    }

    pub fn token_manager(&self) -> &TokenManager<T> {
        self.inner.executor.tokens()
    }

    pub fn metrics(&self) -> &ClientMetrics {
        &self.inner.metrics
    }
}

pub struct EversendClientBuilder<T> {
    credentials: Credentials,
    base_url: String,
    request_timeout: Option<Duration>,
    expiry_skew: Duration,
    transport: Option<T>,
}

impl<T> EversendClientBuilder<T> {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout: None,
            expiry_skew: Duration::ZERO,
            transport: None,
        }
    }

    /// Base URL every endpoint path is appended to. A trailing `/` is added if missing.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Upper bound for every HTTP call. Only used by the default transport.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Treat the token as expired this long before the server-declared expiry.
    pub fn expiry_skew(mut self, skew: Duration) -> Self {
        self.expiry_skew = skew;
        self
    }

    /// Use a custom HTTP collaborator.
    pub fn transport<U: HttpTransport>(self, transport: U) -> EversendClientBuilder<U> {
        EversendClientBuilder {
            credentials: self.credentials,
            base_url: self.base_url,
            request_timeout: self.request_timeout,
            expiry_skew: self.expiry_skew,
            transport: Some(transport),
        }
    }
}

impl EversendClientBuilder<ReqwestTransport> {
    pub fn build(mut self) -> Result<EversendClient<ReqwestTransport>> {
        if self.transport.is_none() {
            let transport = ReqwestTransport::new(self.request_timeout)
                .map_err(|e| ClientError::Configuration(e.to_string()))?;
            self.transport = Some(transport);
        }
        self.build_with_transport()
    }
}

impl<T: HttpTransport> EversendClientBuilder<T> {
    /// Finish a builder that was given a transport through [`EversendClientBuilder::transport`].
    pub fn build_with_transport(self) -> Result<EversendClient<T>> {
        let transport = self
            .transport
            .ok_or_else(|| ClientError::Configuration("no transport configured".to_owned()))?;
        let base_url = normalize_base_url(&self.base_url)?;
        let skew = chrono::Duration::from_std(self.expiry_skew)
            .map_err(|e| ClientError::Configuration(format!("expiry skew out of range: {e}")))?;
        let metrics = ClientMetrics::new().map_err(|e| ClientError::Configuration(e.to_string()))?;

        let transport = Arc::new(transport);
        let tokens = Arc::new(TokenManager::new(
            self.credentials,
            &base_url,
            skew,
            Arc::clone(&transport),
            metrics.clone(),
        ));
        debug!(base_url = %base_url, "eversend client ready");

        Ok(EversendClient {
            inner: Arc::new(ClientInner {
                executor: Executor::new(base_url, transport, tokens, metrics.clone()),
                metrics,
            }),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let mut url = reqwest::Url::parse(raw.trim())
        .map_err(|e| ClientError::Configuration(format!("invalid base url '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Configuration(format!("base url '{raw}' cannot carry paths")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url.to_string())
}
