use serde_json::Value;

use crate::api::endpoints::{WALLETS_GET, WALLETS_LIST};
use crate::api::executor::{Executor, NoBody};
use crate::error::Result;
use crate::resources::JsonObject;
use crate::transport::HttpTransport;

pub struct Wallets<'a, T> {
    executor: &'a Executor<T>,
}

impl<'a, T: HttpTransport> Wallets<'a, T> {
    pub(crate) fn new(executor: &'a Executor<T>) -> Self {
        Self { executor }
    }

    /// All wallets with their balances.
    pub async fn list(&self) -> Result<Vec<Value>> {
        self.executor.call::<NoBody, _>(&WALLETS_LIST, &[], None).await
    }

    /// Wallet for one currency, e.g. `"UGX"`.
    pub async fn get(&self, currency: &str) -> Result<JsonObject> {
        self.executor
            .call::<NoBody, _>(&WALLETS_GET, &[("currency", currency)], None)
            .await
    }
}
