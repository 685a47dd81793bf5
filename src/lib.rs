//! # Eversend API client
//!
//! Typed access to the Eversend API: account, wallets, currency exchange,
//! payouts, beneficiaries and crypto addresses.
//!
//! A client authenticates with its client id and secret, caches the bearer
//! token it gets back, and refreshes it when it expires. Concurrent calls
//! share one token and trigger at most one refresh at a time.
//!
//! ```rust,no_run
//! use eversend_client::{Credentials, EversendClient};
//!
//! # async fn run() -> eversend_client::Result<()> {
//! let client = EversendClient::new(Credentials::new("client-id", "client-secret"))?;
//! let wallets = client.wallets().list().await?;
//! let quote = client.exchange().create_quotation("UGX", 1000.0, "KES").await?;
//! # Ok(())
//! # }
//! ```
//!
//! Modules:
//! - `auth`: credentials, bearer token, token manager
//! - `api`: endpoint table, envelope decoding, request executor
//! - `resources`: typed resource groupings
//! - `transport`: HTTP collaborator seam and its reqwest implementation
//! - `config`: settings loading (YAML / environment)

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod resources;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::auth::{Credentials, Token, TokenManager, TokenState};
pub use crate::client::{EversendClient, EversendClientBuilder};
pub use crate::config::settings::ClientSettings;
pub use crate::error::{ClientError, Result, TransportError};
pub use crate::resources::JsonObject;
pub use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
