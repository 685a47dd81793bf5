//! Shared constants and invariants

pub const DEFAULT_BASE_URL: &str = "https://api.eversend.co/v1/";

// `http` header names are stored lowercase; the API matches them case-insensitively
pub const HEADER_CLIENT_ID: &str = "clientid";
pub const HEADER_CLIENT_SECRET: &str = "clientsecret";

pub const BEARER_PREFIX: &str = "Bearer ";

// Payout quotation parameters
pub const AMOUNT_TYPE_SOURCE: &str = "SOURCE";
pub const AMOUNT_TYPE_DESTINATION: &str = "DESTINATION";
pub const PAYOUT_TYPE_BANK: &str = "bank";
pub const PAYOUT_TYPE_MOMO: &str = "momo";

// Environment variables read by `config::loader::settings_from_env`
pub const ENV_CLIENT_ID: &str = "EVERSEND_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "EVERSEND_CLIENT_SECRET";
pub const ENV_BASE_URL: &str = "EVERSEND_BASE_URL";
