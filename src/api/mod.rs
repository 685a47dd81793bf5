//! Request/response plumbing shared by every resource operation.

pub mod endpoints;
pub mod envelope;
pub mod executor;
pub mod params;

pub use endpoints::{Endpoint, Payload};
pub use executor::Executor;
