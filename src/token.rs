//! Token account operations: balance and invoice lookups.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiClientError;

/// Point-in-time balance and usage snapshot for an account token.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TokenInfo {
    /// Remaining balance in cents.
    pub balance_cents: u32,
    /// Remaining balance formatted as US dollars.
    pub balance_usd: String,
    /// Daily spend in cents across all running servers.
    pub burn_rate_cents: u32,
    /// Daily spend formatted as US dollars.
    pub burn_rate_usd: String,
    /// Days until the balance runs out at the current burn rate.
    pub days_remaining: u32,
    /// Servers currently attached to the token.
    pub servers: u32,
    /// Servers with autorenew enabled.
    pub autorenew_servers: u32,
    /// Servers currently suspended.
    pub suspended_servers: u32,
}

/// A cryptocurrency invoice or payment record tied to a token.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payment {
    /// URI to pay, wallet-openable.
    pub payment_uri: String,
    /// Cryptocurrency the invoice is denominated in.
    pub cryptocurrency: String,
    /// Amount due in the currency's smallest unit.
    pub amount: u64,
    /// Fiat exchange rate at invoice time.
    pub fiat_per_coin: String,
    /// Creation timestamp, seconds since the epoch.
    pub created: u64,
    /// Expiry timestamp, seconds since the epoch.
    pub expires: u64,
    /// Payment timestamp, zero until paid.
    pub paid: u64,
    /// Transaction identifier once broadcast.
    pub txid: String,
    /// Affiliate token credited for the payment; absent when none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_token: Option<String>,
    /// Invoice identifier.
    pub id: String,
    /// Whether the invoice expired unpaid.
    pub expired: bool,
}

/// Token account operations scoped to the owning client's token.
#[derive(Clone, Copy, Debug)]
pub struct TokenClient<'a> {
    client: &'a Client,
}

impl<'a> TokenClient<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches the balance and usage snapshot for the account token.
    ///
    /// # Errors
    ///
    /// Returns any transport error raised by the client.
    pub async fn get(&self) -> Result<TokenInfo, ApiClientError> {
        let token = self.client.token();
        let req = self
            .client
            .request(Method::GET, &format!("/token/{token}/info"), None)?;
        self.client.execute(req).await
    }

    /// Fetches the latest invoice recorded for the account token.
    ///
    /// # Errors
    ///
    /// Returns any transport error raised by the client.
    pub async fn invoices(&self) -> Result<Payment, ApiClientError> {
        let token = self.client.token();
        let req = self
            .client
            .request(Method::GET, &format!("/token/{token}/invoices"), None)?;
        self.client.execute(req).await
    }
}
