//! Resource groupings.
//!
//! Each grouping is a borrowed handle over the client's executor. Methods
//! only pick an endpoint row, validate their arguments, and shape the
//! request body; the executor does the rest.

use serde_json::{Map, Value};

pub mod account;
pub mod beneficiaries;
pub mod crypto;
pub mod exchange;
pub mod payouts;
pub mod wallets;

pub use account::Account;
pub use beneficiaries::{BankBeneficiary, Beneficiaries, MomoBeneficiary};
pub use crypto::{CreateAddress, Crypto};
pub use exchange::Exchange;
pub use payouts::{BankPayout, MomoPayout, PayoutQuotation, Payouts};
pub use wallets::Wallets;

/// JSON object payload as returned by the API.
pub type JsonObject = Map<String, Value>;
