//! Declarative table of every remote endpoint the client calls.
//!
//! Resource groupings never build requests themselves; they pick a row from
//! here and hand it to the executor together with path params and an
//! optional body.

use http::Method;

/// Which part of a success envelope is the operation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// `data`
    Data,
    /// `data.<key>`
    DataField(&'static str),
    /// The whole `{data, message}` envelope.
    Envelope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// `clientId` / `clientSecret` headers.
    ClientCredentials,
    /// `Authorization: Bearer <token>`.
    Bearer,
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Stable operation name, used in logs and metric labels.
    pub name: &'static str,
    pub method: Method,
    /// Path relative to the base URL; `{name}` placeholders are filled from params.
    pub path: &'static str,
    pub payload: Payload,
    pub auth: Auth,
}

const fn bearer(name: &'static str, method: Method, path: &'static str, payload: Payload) -> Endpoint {
    Endpoint { name, method, path, payload, auth: Auth::Bearer }
}

pub const AUTH_TOKEN: Endpoint = Endpoint {
    name: "auth.token",
    method: Method::GET,
    path: "auth/token",
    payload: Payload::Envelope,
    auth: Auth::ClientCredentials,
};

// account
pub const ACCOUNT_PROFILE: Endpoint = bearer("account.profile", Method::GET, "account", Payload::Data);

// wallets
pub const WALLETS_LIST: Endpoint = bearer("wallets.list", Method::GET, "wallets", Payload::Data);
pub const WALLETS_GET: Endpoint = bearer("wallets.get", Method::GET, "wallets/{currency}", Payload::Data);

// exchange
pub const EXCHANGE_QUOTATION: Endpoint = bearer("exchange.create_quotation", Method::POST, "exchanges/quotation", Payload::Data);
pub const EXCHANGE_CREATE: Endpoint = bearer("exchange.create_exchange", Method::POST, "exchanges", Payload::Data);

// payouts
pub const PAYOUTS_COUNTRIES: Endpoint = bearer("payouts.delivery_countries", Method::GET, "payouts/countries", Payload::DataField("countries"));
pub const PAYOUTS_BANKS: Endpoint = bearer("payouts.delivery_banks", Method::GET, "payouts/banks/{countryCode}", Payload::Data);
pub const PAYOUTS_QUOTATION: Endpoint = bearer("payouts.create_quotation", Method::POST, "payouts/quotation", Payload::Data);
pub const PAYOUTS_CREATE: Endpoint = bearer("payouts.create_payout", Method::POST, "payouts", Payload::Data);
pub const PAYOUTS_TRANSACTION: Endpoint = bearer("payouts.transaction", Method::GET, "transactions/{id}", Payload::Data);

// beneficiaries
pub const BENEFICIARIES_CREATE: Endpoint = bearer("beneficiaries.create", Method::POST, "beneficiaries", Payload::Data);
pub const BENEFICIARIES_LIST: Endpoint = bearer("beneficiaries.list", Method::GET, "beneficiaries", Payload::DataField("beneficiaries"));
pub const BENEFICIARIES_GET: Endpoint = bearer("beneficiaries.get", Method::GET, "beneficiaries/{id}", Payload::Data);

// crypto
pub const CRYPTO_ASSET_CHAINS: Endpoint = bearer("crypto.asset_chains", Method::GET, "crypto/assets/{coin}", Payload::Envelope);
pub const CRYPTO_ADDRESSES: Endpoint = bearer("crypto.addresses", Method::GET, "crypto/addresses", Payload::Envelope);
pub const CRYPTO_CREATE_ADDRESS: Endpoint = bearer("crypto.create_address", Method::POST, "crypto/addresses", Payload::Data);
pub const CRYPTO_TRANSACTIONS: Endpoint = bearer("crypto.transactions", Method::GET, "crypto/transactions", Payload::Data);
pub const CRYPTO_ADDRESS_TRANSACTIONS: Endpoint = bearer("crypto.address_transactions", Method::GET, "crypto/addresses/{address}/transactions", Payload::Data);

/// All resource endpoints, in the order they appear in the API reference.
pub const RESOURCE_ENDPOINTS: [Endpoint; 18] = [
    ACCOUNT_PROFILE,
    WALLETS_LIST,
    WALLETS_GET,
    EXCHANGE_QUOTATION,
    EXCHANGE_CREATE,
    PAYOUTS_COUNTRIES,
    PAYOUTS_BANKS,
    PAYOUTS_QUOTATION,
    PAYOUTS_CREATE,
    PAYOUTS_TRANSACTION,
    BENEFICIARIES_CREATE,
    BENEFICIARIES_LIST,
    BENEFICIARIES_GET,
    CRYPTO_ASSET_CHAINS,
    CRYPTO_ADDRESSES,
    CRYPTO_CREATE_ADDRESS,
    CRYPTO_TRANSACTIONS,
    CRYPTO_ADDRESS_TRANSACTIONS,
];
