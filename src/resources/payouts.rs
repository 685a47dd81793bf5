use serde::Serialize;
use serde_json::Value;

use crate::api::endpoints::{
    PAYOUTS_BANKS, PAYOUTS_COUNTRIES, PAYOUTS_CREATE, PAYOUTS_QUOTATION, PAYOUTS_TRANSACTION,
};
use crate::api::executor::{Executor, NoBody};
use crate::api::params::{amount_type_or_default, serialize_amount};
use crate::error::Result;
use crate::resources::JsonObject;
use crate::transport::HttpTransport;

/// Payout quotation parameters.
///
/// `transaction_type` is `"bank"` or `"momo"`. `amount_type` is `"SOURCE"`
/// (amount is what leaves the wallet) or `"DESTINATION"` (amount is what the
/// recipient gets); an empty value means `"SOURCE"`.
#[derive(Debug, Clone, Default)]
pub struct PayoutQuotation {
    pub source_wallet: String,
    pub amount: f64,
    pub transaction_type: String,
    pub destination_country: String,
    pub destination_currency: String,
    pub amount_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuotationBody<'a> {
    source_wallet: &'a str,
    #[serde(serialize_with = "serialize_amount")]
    amount: f64,
    #[serde(rename = "type")]
    transaction_type: &'a str,
    destination_country: &'a str,
    destination_currency: &'a str,
    amount_type: &'a str,
}

impl<'a> From<&'a PayoutQuotation> for QuotationBody<'a> {
    fn from(quotation: &'a PayoutQuotation) -> Self {
        Self {
            source_wallet: &quotation.source_wallet,
            amount: quotation.amount,
            transaction_type: &quotation.transaction_type,
            destination_country: &quotation.destination_country,
            destination_currency: &quotation.destination_currency,
            amount_type: amount_type_or_default(&quotation.amount_type),
        }
    }
}

/// Mobile money payout against an accepted quotation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomoPayout {
    /// Quotation token.
    pub token: String,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    /// Alpha-2 country code, e.g. `"UG"`.
    pub country: String,
}

/// Bank payout against an accepted quotation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankPayout {
    pub token: String,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub bank_name: String,
    pub bank_account_name: String,
    /// Code as listed by [`Payouts::delivery_banks`].
    pub bank_code: String,
    pub bank_account_number: String,
}

pub struct Payouts<'a, T> {
    executor: &'a Executor<T>,
}

impl<'a, T: HttpTransport> Payouts<'a, T> {
    pub(crate) fn new(executor: &'a Executor<T>) -> Self {
        Self { executor }
    }

    /// Countries payouts can be delivered to.
    pub async fn delivery_countries(&self) -> Result<Vec<Value>> {
        self.executor.call::<NoBody, _>(&PAYOUTS_COUNTRIES, &[], None).await
    }

    /// Banks available in a country.
    pub async fn delivery_banks(&self, country_code: &str) -> Result<Vec<Value>> {
        self.executor
            .call::<NoBody, _>(&PAYOUTS_BANKS, &[("countryCode", country_code)], None)
            .await
    }

    pub async fn create_quotation(&self, quotation: &PayoutQuotation) -> Result<JsonObject> {
        let body = QuotationBody::from(quotation);
        self.executor.call(&PAYOUTS_QUOTATION, &[], Some(&body)).await
    }

    pub async fn momo_payout(&self, payout: &MomoPayout) -> Result<JsonObject> {
        self.executor.call(&PAYOUTS_CREATE, &[], Some(payout)).await
    }

    pub async fn bank_payout(&self, payout: &BankPayout) -> Result<JsonObject> {
        self.executor.call(&PAYOUTS_CREATE, &[], Some(payout)).await
    }

    /// Status of a payout transaction.
    pub async fn transaction(&self, transaction_id: &str) -> Result<JsonObject> {
        self.executor
            .call::<NoBody, _>(&PAYOUTS_TRANSACTION, &[("id", transaction_id)], None)
            .await
    }
}
