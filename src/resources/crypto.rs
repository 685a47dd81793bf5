use serde::Serialize;

use crate::api::endpoints::{
    CRYPTO_ADDRESSES, CRYPTO_ADDRESS_TRANSACTIONS, CRYPTO_ASSET_CHAINS, CRYPTO_CREATE_ADDRESS,
    CRYPTO_TRANSACTIONS,
};
use crate::api::executor::{Executor, NoBody};
use crate::error::Result;
use crate::resources::JsonObject;
use crate::transport::HttpTransport;

/// Parameters for a new deposit address.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddress {
    /// Asset id as listed by [`Crypto::asset_chains`].
    pub asset_id: String,
    pub owner_name: String,
    pub destination_address_description: String,
    pub purpose: String,
}

pub struct Crypto<'a, T> {
    executor: &'a Executor<T>,
}

impl<'a, T: HttpTransport> Crypto<'a, T> {
    pub(crate) fn new(executor: &'a Executor<T>) -> Self {
        Self { executor }
    }

    /// Chains supported for a coin, e.g. `"USDT"`. Returns the full envelope.
    pub async fn asset_chains(&self, coin: &str) -> Result<JsonObject> {
        self.executor
            .call::<NoBody, _>(&CRYPTO_ASSET_CHAINS, &[("coin", coin)], None)
            .await
    }

    /// Saved addresses. Returns the full envelope.
    pub async fn addresses(&self) -> Result<JsonObject> {
        self.executor.call::<NoBody, _>(&CRYPTO_ADDRESSES, &[], None).await
    }

    pub async fn create_address(&self, address: &CreateAddress) -> Result<JsonObject> {
        self.executor.call(&CRYPTO_CREATE_ADDRESS, &[], Some(address)).await
    }

    pub async fn transactions(&self) -> Result<JsonObject> {
        self.executor.call::<NoBody, _>(&CRYPTO_TRANSACTIONS, &[], None).await
    }

    /// Transactions received on one address.
    pub async fn address_transactions(&self, address: &str) -> Result<JsonObject> {
        self.executor
            .call::<NoBody, _>(&CRYPTO_ADDRESS_TRANSACTIONS, &[("address", address)], None)
            .await
    }
}
