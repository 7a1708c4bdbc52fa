//! Client configuration.
//!
//! Configuration is layered with `figment`: a TOML file first, then
//! `DATAVERSE_*` environment variables, which win.
//!
//! ```toml
//! server = "https://demo.dataverse.org"
//! token = "api-token"
//! timeout_secs = 30
//! ```

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::effects::Transport;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Server base, e.g. `https://demo.dataverse.org`.
    pub server: String,

    #[serde(default)]
    pub token: Option<String>,

    /// User that signed URLs are issued for.
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub admin_api_key: Option<String>,

    #[serde(default)]
    pub unblock_key: Option<String>,

    /// Per-request timeout of the HTTP transport.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub const ENV_PREFIX: &'static str = "DATAVERSE_";

    /// Load `path`, overridden by `DATAVERSE_*` environment variables.
    ///
    /// A missing file is not an error as long as the environment supplies
    /// `server`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(path.as_ref()))
                .merge(Env::prefixed(Self::ENV_PREFIX)),
        )
    }

    /// Extract from a caller-assembled figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply the configured credentials to `client`.
    ///
    /// Signing is configured only when user, admin key and unblock key are
    /// all set and non-empty, the same rule as [`Client::with_url_signing`].
    pub fn apply<T: Transport>(&self, mut client: Client<T>) -> Client<T> {
        if let Some(token) = &self.token {
            client = client.with_token_auth(token.as_str());
        }
        if let (Some(user), Some(key), Some(unblock)) =
            (&self.user, &self.admin_api_key, &self.unblock_key)
        {
            client = client.with_url_signing(user.as_str(), key.as_str(), unblock.as_str());
        }
        client
    }
}
