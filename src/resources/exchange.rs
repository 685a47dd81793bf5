use serde::Serialize;

use crate::api::endpoints::{EXCHANGE_CREATE, EXCHANGE_QUOTATION};
use crate::api::executor::Executor;
use crate::api::params::serialize_amount;
use crate::error::Result;
use crate::resources::JsonObject;
use crate::transport::HttpTransport;

#[derive(Debug, Serialize)]
struct QuotationBody<'a> {
    from: &'a str,
    #[serde(serialize_with = "serialize_amount")]
    amount: f64,
    to: &'a str,
}

#[derive(Debug, Serialize)]
struct ExchangeBody<'a> {
    token: &'a str,
}

pub struct Exchange<'a, T> {
    executor: &'a Executor<T>,
}

impl<'a, T: HttpTransport> Exchange<'a, T> {
    pub(crate) fn new(executor: &'a Executor<T>) -> Self {
        Self { executor }
    }

    /// Price converting `amount` of `from` into `to`. The returned object
    /// carries the quotation `token` accepted by [`Exchange::create_exchange`].
    pub async fn create_quotation(&self, from: &str, amount: f64, to: &str) -> Result<JsonObject> {
        let body = QuotationBody { from, amount, to };
        self.executor.call(&EXCHANGE_QUOTATION, &[], Some(&body)).await
    }

    /// Execute a previously quoted exchange.
    pub async fn create_exchange(&self, quotation_token: &str) -> Result<JsonObject> {
        let body = ExchangeBody { token: quotation_token };
        self.executor.call(&EXCHANGE_CREATE, &[], Some(&body)).await
    }
}
