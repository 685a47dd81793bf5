use serde::Serialize;
use serde_json::Value;

use crate::api::endpoints::{BENEFICIARIES_CREATE, BENEFICIARIES_GET, BENEFICIARIES_LIST};
use crate::api::executor::{Executor, NoBody};
use crate::error::Result;
use crate::resources::JsonObject;
use crate::transport::HttpTransport;

/// Mobile money beneficiary.
#[derive(Debug, Clone, Default)]
pub struct MomoBeneficiary {
    pub first_name: String,
    pub last_name: String,
    /// Alpha-2 country code, e.g. `"UG"`.
    pub country: String,
    pub phone_number: String,
}

/// Bank account beneficiary.
#[derive(Debug, Clone, Default)]
pub struct BankBeneficiary {
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub phone_number: Option<String>,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_code: String,
    pub bank_account_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BeneficiaryBody<'a> {
    first_name: &'a str,
    last_name: &'a str,
    country: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_account_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_account_number: Option<&'a str>,
    is_bank: bool,
    is_momo: bool,
}

impl<'a> From<&'a MomoBeneficiary> for BeneficiaryBody<'a> {
    fn from(b: &'a MomoBeneficiary) -> Self {
        Self {
            first_name: &b.first_name,
            last_name: &b.last_name,
            country: &b.country,
            phone_number: Some(&b.phone_number),
            bank_name: None,
            bank_account_name: None,
            bank_code: None,
            bank_account_number: None,
            is_bank: false,
            is_momo: true,
        }
    }
}

impl<'a> From<&'a BankBeneficiary> for BeneficiaryBody<'a> {
    fn from(b: &'a BankBeneficiary) -> Self {
        Self {
            first_name: &b.first_name,
            last_name: &b.last_name,
            country: &b.country,
            phone_number: b.phone_number.as_deref(),
            bank_name: Some(&b.bank_name),
            bank_account_name: Some(&b.bank_account_name),
            bank_code: Some(&b.bank_code),
            bank_account_number: Some(&b.bank_account_number),
            is_bank: true,
            is_momo: true,
        }
    }
}

pub struct Beneficiaries<'a, T> {
    executor: &'a Executor<T>,
}

impl<'a, T: HttpTransport> Beneficiaries<'a, T> {
    pub(crate) fn new(executor: &'a Executor<T>) -> Self {
        Self { executor }
    }

    pub async fn create_momo(&self, beneficiary: &MomoBeneficiary) -> Result<JsonObject> {
        let body = BeneficiaryBody::from(beneficiary);
        self.executor.call(&BENEFICIARIES_CREATE, &[], Some(&body)).await
    }

    pub async fn create_bank(&self, beneficiary: &BankBeneficiary) -> Result<JsonObject> {
        let body = BeneficiaryBody::from(beneficiary);
        self.executor.call(&BENEFICIARIES_CREATE, &[], Some(&body)).await
    }

    /// Saved beneficiaries, unwrapped from `data.beneficiaries`.
    pub async fn list(&self) -> Result<Vec<Value>> {
        self.executor.call::<NoBody, _>(&BENEFICIARIES_LIST, &[], None).await
    }

    pub async fn get(&self, beneficiary_id: &str) -> Result<JsonObject> {
        self.executor
            .call::<NoBody, _>(&BENEFICIARIES_GET, &[("id", beneficiary_id)], None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn momo_body_flags() {
        let beneficiary = MomoBeneficiary {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            country: "UG".into(),
            phone_number: "+256700000000".into(),
        };
        let body = serde_json::to_value(BeneficiaryBody::from(&beneficiary)).unwrap();
        assert_eq!(
            body,
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "country": "UG",
                "phoneNumber": "+256700000000",
                "isBank": false,
                "isMomo": true
            })
        );
    }

    #[test]
    fn bank_body_flags_and_fields() {
        let beneficiary = BankBeneficiary {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            country: "NG".into(),
            phone_number: None,
            bank_name: "Access Bank".into(),
            bank_account_name: "Jane Doe".into(),
            bank_code: "044".into(),
            bank_account_number: "0123456789".into(),
        };
        let body = serde_json::to_value(BeneficiaryBody::from(&beneficiary)).unwrap();
        assert_eq!(body["isBank"], true);
        assert_eq!(body["isMomo"], true);
        assert_eq!(body["bankCode"], "044");
        assert!(body.get("phoneNumber").is_none());
    }
}
