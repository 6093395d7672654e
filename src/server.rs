//! Server lifecycle operations and their wire model.

mod types;

use reqwest::Method;
use serde::Serialize;

use crate::client::Client;
use crate::error::ApiClientError;

pub use types::{
    Flavor, LaunchRequest, LaunchRequestBuilder, LaunchResponse, Machine, QuoteResponse,
    TopUpRequest, UpdateRequest,
};

/// Server lifecycle operations scoped to the owning client's token.
///
/// Every method serializes a payload (when there is one), forms a
/// request against a fixed path, and decodes the response. All semantic
/// behaviour — pricing, quotas, provisioning side effects — lives on
/// the remote service.
#[derive(Clone, Copy, Debug)]
pub struct ServerClient<'a> {
    client: &'a Client,
}

fn encode<T: Serialize>(payload: &T) -> Result<Vec<u8>, ApiClientError> {
    serde_json::to_vec(payload).map_err(|err| ApiClientError::Build {
        message: err.to_string(),
    })
}

impl<'a> ServerClient<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Launches a new server owned by the account token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Build`] when the payload cannot be
    /// serialized, or any transport error raised by the client.
    pub async fn launch(&self, request: &LaunchRequest) -> Result<LaunchResponse, ApiClientError> {
        let body = encode(request)?;
        let token = self.client.token();
        let req = self
            .client
            .request(Method::POST, &format!("/token/{token}/servers"), Some(body))?;
        self.client.execute(req).await
    }

    /// Lists every server launched by the account token, deleted and
    /// forgotten ones included.
    ///
    /// # Errors
    ///
    /// Returns any transport error raised by the client.
    pub async fn list(&self) -> Result<Vec<Machine>, ApiClientError> {
        let token = self.client.token();
        // The deployed route really has no separator before "servers".
        let req = self
            .client
            .request(Method::GET, &format!("/token{token}/servers"), None)?;
        self.client.execute(req).await
    }

    /// Prices a new server without launching it.
    ///
    /// # Errors
    ///
    /// Returns any transport error raised by the client.
    pub async fn quote(
        &self,
        days: u32,
        flavor_slug: &str,
        provider: &str,
    ) -> Result<QuoteResponse, ApiClientError> {
        let req = self.client.request(
            Method::GET,
            &format!("/server/quote?days={days}&flavor_slug={flavor_slug}&provider={provider}"),
            None,
        )?;
        self.client.execute(req).await
    }

    /// Renews an existing server for `days` more days. Consider
    /// autorenew instead for long-lived machines.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Build`] when the payload cannot be
    /// serialized, or any transport error raised by the client.
    pub async fn topup(&self, machine_id: &str, days: u32) -> Result<String, ApiClientError> {
        let payload = TopUpRequest {
            days,
            token: Some(self.client.token().to_owned()),
        };
        let body = encode(&payload)?;
        let req = self.client.request(
            Method::POST,
            &format!("/server/{machine_id}/topup"),
            Some(body),
        )?;
        self.client.execute(req).await
    }

    /// Updates the hostname and autorenew flag of a server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Build`] when the payload cannot be
    /// serialized, or any transport error raised by the client.
    pub async fn update(
        &self,
        machine_id: &str,
        hostname: &str,
        autorenew: bool,
    ) -> Result<String, ApiClientError> {
        let payload = UpdateRequest {
            hostname: hostname.to_owned(),
            autorenew,
        };
        let body = encode(&payload)?;
        let req = self
            .client
            .request(Method::PATCH, &format!("/server/{machine_id}"), Some(body))?;
        self.client.execute(req).await
    }

    /// Deletes a server and refunds the approximate remaining balance
    /// to the associated token.
    ///
    /// # Errors
    ///
    /// Returns any transport error raised by the client.
    pub async fn delete(&self, machine_id: &str) -> Result<String, ApiClientError> {
        let req = self
            .client
            .request(Method::DELETE, &format!("/server/{machine_id}"), None)?;
        self.client.execute(req).await
    }

    /// Forgets a deleted server so it no longer appears in listings.
    ///
    /// # Errors
    ///
    /// Returns any transport error raised by the client.
    pub async fn forget(&self, machine_id: &str) -> Result<String, ApiClientError> {
        self.action(machine_id, "forget").await
    }

    /// Rebuilds a server with the operating system and SSH key provided
    /// at launch. Deletes all data on the machine; takes a couple of
    /// minutes to complete after the request is accepted.
    ///
    /// # Errors
    ///
    /// Returns any transport error raised by the client.
    pub async fn rebuild(&self, machine_id: &str) -> Result<String, ApiClientError> {
        self.action(machine_id, "rebuild").await
    }

    /// Immediately powers off a server.
    ///
    /// # Errors
    ///
    /// Returns any transport error raised by the client.
    pub async fn stop(&self, machine_id: &str) -> Result<String, ApiClientError> {
        self.action(machine_id, "stop").await
    }

    async fn action(&self, machine_id: &str, action: &str) -> Result<String, ApiClientError> {
        let req = self.client.request(
            Method::POST,
            &format!("/server/{machine_id}/{action}"),
            None,
        )?;
        self.client.execute(req).await
    }
}
