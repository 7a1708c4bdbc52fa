use std::fmt;

/// Elevated credentials used to request signed URLs.
///
/// A value only exists when all three parts are non-empty. Partial
/// configuration is not an error, it simply yields no credentials and the
/// request falls back to the token header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    api_key: String,
    unblock_key: String,
}

impl Credentials {
    /// Build signing credentials, or `None` if any part is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataverse_api::data::Credentials;
    ///
    /// assert!(Credentials::from_parts("alice", "admin-key", "unblock").is_some());
    /// assert!(Credentials::from_parts("alice", "", "unblock").is_none());
    /// ```
    pub fn from_parts(
        user: impl Into<String>,
        api_key: impl Into<String>,
        unblock_key: impl Into<String>,
    ) -> Option<Self> {
        let (user, api_key, unblock_key) = (user.into(), api_key.into(), unblock_key.into());
        if user.is_empty() || api_key.is_empty() || unblock_key.is_empty() {
            return None;
        }
        Some(Self {
            user,
            api_key,
            unblock_key,
        })
    }

    /// The user the signed URL is issued for.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Admin API key sent to the signing service.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn unblock_key(&self) -> &str {
        &self.unblock_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_key", &"***")
            .field("unblock_key", &"***")
            .finish()
    }
}

/// How a request is authenticated.
///
/// The two modes are mutually exclusive for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// The client token, if any, travels in the `X-Dataverse-key` header.
    TokenHeader,
    /// The URL carries a signature obtained from the signing service.
    SignedUrl,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::TokenHeader => write!(f, "token-header"),
            AuthMode::SignedUrl => write!(f, "signed-url"),
        }
    }
}
