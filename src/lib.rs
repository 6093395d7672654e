//! Client library for the SporeStack VPS provisioning API.
//!
//! The crate exposes [`Client`], which owns the authenticated HTTP
//! transport (bearer credential, bounded retry with backoff, optional
//! Tor routing) and hands out borrow-scoped sub-clients for server
//! lifecycle and token account operations.
//!
//! ```no_run
//! use sporestack::{Client, LaunchRequest};
//!
//! # async fn example() -> Result<(), sporestack::ApiClientError> {
//! let client = Client::new("my-account-token")?;
//! let launched = client
//!     .servers()
//!     .launch(
//!         &LaunchRequest::builder()
//!             .flavor("vps-1")
//!             .region("us-east")
//!             .days(7)
//!             .build(),
//!     )
//!     .await?;
//! let balance = client.token_info().get().await?;
//! assert!(!launched.machine_id.is_empty());
//! assert!(!balance.balance_usd.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod server;
pub mod test_support;
pub mod token;

pub use client::{Client, RetryPolicy, TOR_PROXY_ENV};
pub use error::ApiClientError;
pub use server::{
    Flavor, LaunchRequest, LaunchRequestBuilder, LaunchResponse, Machine, QuoteResponse,
    ServerClient, TopUpRequest, UpdateRequest,
};
pub use token::{Payment, TokenClient, TokenInfo};
