//! Local checks on caller-supplied parameters, applied before any network call.

use serde::ser::Error as _;
use serde::Serializer;

use crate::error::{ClientError, Result};
use crate::utils::constants::AMOUNT_TYPE_SOURCE;

// 2^53, largest range where every integer is exactly representable in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(ClientError::InvalidArgument(format!("amount must be a finite number, got {amount}")));
    }
    if amount < 0.0 {
        return Err(ClientError::InvalidArgument(format!("amount cannot be negative, got {amount}")));
    }
    Ok(())
}

/// Path identifiers are opaque, but they have to stay a single path segment.
///
/// URL parsing treats `\` like `/` and collapses `.` and `..` segments;
/// percent escapes are rejected so neither can be spelled encoded.
pub fn validate_identifier(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidArgument(format!("{name} must not be empty")));
    }
    if value.contains(['/', '\\', '?', '#', '%']) {
        return Err(ClientError::InvalidArgument(format!(
            "{name} must not contain '/', '\\', '?', '#' or '%'"
        )));
    }
    if value == "." || value == ".." {
        return Err(ClientError::InvalidArgument(format!("{name} must not be a dot segment")));
    }
    Ok(())
}

/// Empty amount type falls back to `SOURCE`.
pub fn amount_type_or_default(amount_type: &str) -> &str {
    if amount_type.trim().is_empty() {
        AMOUNT_TYPE_SOURCE
    } else {
        amount_type
    }
}

/// Whole amounts go out as JSON integers (`1000`, not `1000.0`).
///
/// Negative and non-finite amounts fail to serialize, which the executor
/// reports as `InvalidArgument` before any network call.
pub fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if let Err(e) = validate_amount(*amount) {
        return Err(S::Error::custom(match e {
            ClientError::InvalidArgument(reason) => reason,
            other => other.to_string(),
        }));
    }
    if amount.fract() == 0.0 && amount.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Wrapper {
        #[serde(serialize_with = "serialize_amount")]
        amount: f64,
    }

    #[test]
    fn negative_and_non_finite_amounts_rejected() {
        assert!(matches!(validate_amount(-1.0), Err(ClientError::InvalidArgument(_))));
        assert!(matches!(validate_amount(f64::NAN), Err(ClientError::InvalidArgument(_))));
        assert!(matches!(validate_amount(f64::INFINITY), Err(ClientError::InvalidArgument(_))));
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(1000.5).is_ok());
    }

    #[test]
    fn whole_amounts_serialize_as_integers() {
        assert_eq!(serde_json::to_value(Wrapper { amount: 1000.0 }).unwrap(), json!({"amount": 1000}));
        assert_eq!(serde_json::to_value(Wrapper { amount: 12.5 }).unwrap(), json!({"amount": 12.5}));
    }

    #[test]
    fn invalid_amounts_fail_to_serialize() {
        let err = serde_json::to_vec(&Wrapper { amount: -1.0 }).unwrap_err();
        assert!(err.to_string().contains("cannot be negative"), "{err}");
        assert!(serde_json::to_vec(&Wrapper { amount: f64::NAN }).is_err());
    }

    #[test]
    fn identifiers_stay_one_segment() {
        assert!(validate_identifier("currency", "UGX").is_ok());
        assert!(validate_identifier("currency", "").is_err());
        assert!(validate_identifier("currency", "  ").is_err());
        assert!(validate_identifier("id", "../account").is_err());
        assert!(validate_identifier("id", "abc?x=1").is_err());
        assert!(validate_identifier("id", "..").is_err());
        assert!(validate_identifier("id", ".").is_err());
        assert!(validate_identifier("id", "%2e%2e").is_err());
        assert!(validate_identifier("id", "%2E.").is_err());
        assert!(validate_identifier("id", "..\\account").is_err());
        assert!(validate_identifier("address", "0x1f..ab").is_ok());
    }

    #[test]
    fn amount_type_defaults_to_source() {
        assert_eq!(amount_type_or_default(""), "SOURCE");
        assert_eq!(amount_type_or_default("DESTINATION"), "DESTINATION");
    }
}
