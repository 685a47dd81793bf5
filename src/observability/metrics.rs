use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Metrics owned by a single client instance.
///
/// Each client has its own registry so that several clients in one process
/// never collide on metric names. Embedders that want process-wide export can
/// gather from `registry` themselves.
#[derive(Clone)]
pub struct ClientMetrics {
    pub registry: Registry,

    // Auth metrics
    pub auth_refreshes: IntCounter,
    pub auth_failures: IntCounter,
    pub token_expiry_unix: IntGauge,

    // Request metrics
    pub requests: IntCounterVec,
    pub request_failures: IntCounterVec,
    pub request_duration: HistogramVec,
}

impl ClientMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("eversend".into()), None)?;

        let metrics = Self {
            // Auth
            auth_refreshes: IntCounter::new("auth_refreshes_total", "Token refresh calls issued")?,
            auth_failures: IntCounter::new("auth_failures_total", "Token refresh calls that failed")?,
            token_expiry_unix: IntGauge::new("token_expiry_unix_seconds", "Expiry of the cached token, 0 if unknown")?,

            // Requests
            requests: IntCounterVec::new(Opts::new("requests_total", "Resource operations issued"), &["operation"])?,
            request_failures: IntCounterVec::new(Opts::new("request_failures_total", "Resource operation failures by kind"), &["operation", "kind"])?,
            request_duration: HistogramVec::new(HistogramOpts::new("request_duration_seconds", "Resource operation duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["operation"])?,

            registry,
        };

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.auth_refreshes.clone()))?;
        reg.register(Box::new(metrics.auth_failures.clone()))?;
        reg.register(Box::new(metrics.token_expiry_unix.clone()))?;
        reg.register(Box::new(metrics.requests.clone()))?;
        reg.register(Box::new(metrics.request_failures.clone()))?;
        reg.register(Box::new(metrics.request_duration.clone()))?;

        Ok(metrics)
    }

    /// Prometheus text exposition of everything in this registry.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
