//! Wire types for the server endpoints.
//!
//! Field-for-field mirrors of the remote JSON objects; none carry
//! behaviour. Nullable event fields use `Option` so that absence
//! round-trips as absence rather than as an empty value.

use serde::{Deserialize, Serialize};

/// A provisioned server, owned by the account token that launched it.
///
/// Mutated only by server-side state transitions reflected through
/// re-fetch, never locally.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Machine {
    /// 32-character machine identifier.
    pub machine_id: String,
    /// Creation timestamp, seconds since the epoch.
    pub created_at: u64,
    /// Expiration timestamp, seconds since the epoch.
    pub expiration: u64,
    /// Account token that owns the machine.
    pub token: String,
    /// Region the machine was deployed in.
    pub region: String,
    /// Public IPv4 address.
    pub ipv4: String,
    /// Public IPv6 address.
    pub ipv6: String,
    /// Deletion timestamp, zero until the machine is deleted.
    pub deleted_at: u64,
    /// Who deleted the machine; absent while it is alive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
    /// When the machine was forgotten; absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forgotten_at: Option<String>,
    /// When the machine was suspended; absent unless suspended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended_at: Option<String>,
    /// Hosting provider the machine runs on.
    pub provider: String,
    /// Whether the machine is currently powered on.
    pub running: bool,
    /// Whether outbound SMTP is blocked.
    pub deny_smtp: bool,
    /// Slug of the flavor the machine was launched with.
    pub flavor_slug: String,
    /// Operating system installed at launch.
    pub operating_system: String,
    /// Caller-chosen hostname, possibly empty.
    pub hostname: String,
    /// Whether the machine renews itself from the token balance.
    pub autorenew: bool,
    /// Embedded flavor record, when the service includes it.
    #[serde(default)]
    pub flavor: Option<Flavor>,
}

/// A hardware and pricing class. Immutable reference data.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Flavor {
    /// Identifier used when launching and quoting.
    pub slug: String,
    /// CPU core count.
    pub cores: u32,
    /// Memory in megabytes.
    pub memory: u32,
    /// Disk in gigabytes.
    pub disk: u32,
    /// Price in cents per day.
    pub price: u32,
    /// IPv4 connectivity class.
    pub ipv4: String,
    /// IPv6 connectivity class.
    pub ipv6: String,
    /// Bandwidth in gigabytes per month.
    pub bandwidth: u32,
    /// Bandwidth allowance per month, fractional.
    pub bandwidth_per_month: f64,
    /// Provider slug the flavor belongs to.
    pub provider_slug: String,
    /// Human-readable provider name.
    pub provider: String,
}

/// Parameters for launching a new server.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LaunchRequest {
    /// Flavor slug to launch.
    pub flavor: String,
    /// SSH public key installed for root access.
    pub ssh_key: String,
    /// Operating system to install.
    pub operating_system: String,
    /// Hosting provider to launch on.
    pub provider: String,
    /// Whether the machine renews itself from the token balance.
    pub autorenew: bool,
    /// Days of runtime to pay for up front.
    pub days: u32,
    /// Region to deploy in.
    pub region: String,
    /// Hostname to assign, possibly empty.
    pub hostname: String,
    /// Cloud-init user data, possibly empty.
    pub user_data: String,
}

impl LaunchRequest {
    /// Starts a builder for a [`LaunchRequest`].
    #[must_use]
    pub fn builder() -> LaunchRequestBuilder {
        LaunchRequestBuilder::new()
    }
}

/// Builder for [`LaunchRequest`]; unset fields stay empty or false, and
/// the remote service applies its own defaults and validation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LaunchRequestBuilder {
    flavor: String,
    ssh_key: String,
    operating_system: String,
    provider: String,
    autorenew: bool,
    days: u32,
    region: String,
    hostname: String,
    user_data: String,
}

impl LaunchRequestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flavor slug.
    #[must_use]
    pub fn flavor(mut self, value: impl Into<String>) -> Self {
        self.flavor = value.into();
        self
    }

    /// Sets the SSH public key.
    #[must_use]
    pub fn ssh_key(mut self, value: impl Into<String>) -> Self {
        self.ssh_key = value.into();
        self
    }

    /// Sets the operating system.
    #[must_use]
    pub fn operating_system(mut self, value: impl Into<String>) -> Self {
        self.operating_system = value.into();
        self
    }

    /// Sets the hosting provider.
    #[must_use]
    pub fn provider(mut self, value: impl Into<String>) -> Self {
        self.provider = value.into();
        self
    }

    /// Sets the autorenew flag.
    #[must_use]
    pub const fn autorenew(mut self, value: bool) -> Self {
        self.autorenew = value;
        self
    }

    /// Sets the prepaid runtime in days.
    #[must_use]
    pub const fn days(mut self, value: u32) -> Self {
        self.days = value;
        self
    }

    /// Sets the deployment region.
    #[must_use]
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.region = value.into();
        self
    }

    /// Sets the hostname.
    #[must_use]
    pub fn hostname(mut self, value: impl Into<String>) -> Self {
        self.hostname = value.into();
        self
    }

    /// Sets the cloud-init user data.
    #[must_use]
    pub fn user_data(mut self, value: impl Into<String>) -> Self {
        self.user_data = value.into();
        self
    }

    /// Finalises the request.
    #[must_use]
    pub fn build(self) -> LaunchRequest {
        LaunchRequest {
            flavor: self.flavor,
            ssh_key: self.ssh_key,
            operating_system: self.operating_system,
            provider: self.provider,
            autorenew: self.autorenew,
            days: self.days,
            region: self.region,
            hostname: self.hostname,
            user_data: self.user_data,
        }
    }
}

/// Reply to a successful launch.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LaunchResponse {
    /// 32-character identifier of the new machine.
    pub machine_id: String,
}

/// Price estimate for a prospective server.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct QuoteResponse {
    /// Price in cents.
    pub cents: u32,
    /// Price formatted as US dollars.
    pub usd: String,
}

/// Payload for renewing a server.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TopUpRequest {
    /// Days of runtime to add.
    pub days: u32,
    /// Account token billed for the renewal; the service also accepts
    /// null and falls back to the bearer credential.
    pub token: Option<String>,
}

/// Payload for updating mutable server settings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpdateRequest {
    /// New hostname.
    pub hostname: String,
    /// New autorenew flag.
    pub autorenew: bool,
}
