use std::sync::Arc;

use http::Method;
use serde::de::DeserializeOwned;

use crate::data::{Credentials, Request};
use crate::effects::{self, ResolvedUrl, ResponseStream, Transport};
use crate::error::Result;

#[cfg(feature = "reqwest")]
use crate::{config::ClientConfig, effects::ReqwestTransport};

/// Entry point for talking to one Dataverse server.
///
/// A client holds the server base, at most one credential shape and the
/// transport. It is immutable once configured; clones share the transport
/// and may be used from many tasks at once.
///
/// # Examples
///
/// ```
/// use dataverse_api::Client;
///
/// let public = Client::new("https://demo.dataverse.org");
/// let token = Client::with_token("https://demo.dataverse.org", "api-token");
/// let signing = Client::url_signing("https://demo.dataverse.org", "alice", "admin-key", "unblock");
///
/// assert!(public.credentials().is_none());
/// assert_eq!(token.token(), Some("api-token"));
/// assert_eq!(signing.credentials().map(|c| c.user()), Some("alice"));
/// ```
pub struct Client<T> {
    server: String,
    token: Option<String>,
    credentials: Option<Credentials>,
    transport: Arc<T>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            server: self.server.clone(),
            token: self.token.clone(),
            credentials: self.credentials.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("server", &self.server)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
    /// Anonymous access.
    pub fn new(server: impl Into<String>) -> Self {
        Self::with_transport(server, ReqwestTransport::new())
    }

    /// Token access: the token is sent in the `X-Dataverse-key` header.
    pub fn with_token(server: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(server).with_token_auth(token)
    }

    /// URL signing on behalf of `user`.
    ///
    /// Signing only applies when all three values are non-empty; otherwise
    /// the client behaves as an anonymous one.
    pub fn url_signing(
        server: impl Into<String>,
        user: impl Into<String>,
        admin_api_key: impl Into<String>,
        unblock_key: impl Into<String>,
    ) -> Self {
        Self::new(server).with_url_signing(user, admin_api_key, unblock_key)
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut transport = ReqwestTransport::new();
        if let Some(timeout) = config.timeout() {
            transport = transport.with_timeout(timeout);
        }
        config.apply(Self::with_transport(config.server.clone(), transport))
    }
}

impl<T: Transport> Client<T> {
    /// Anonymous client over a caller-supplied transport.
    pub fn with_transport(server: impl Into<String>, transport: T) -> Self {
        Self {
            server: server.into(),
            token: None,
            credentials: None,
            transport: Arc::new(transport),
        }
    }

    /// Send `token` with every request that is not URL-signed.
    ///
    /// An empty token is the same as no token.
    #[must_use]
    pub fn with_token_auth(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|token| !token.is_empty());
        self
    }

    /// Sign every request URL on behalf of `user`.
    ///
    /// Has no effect unless all three values are non-empty.
    #[must_use]
    pub fn with_url_signing(
        mut self,
        user: impl Into<String>,
        admin_api_key: impl Into<String>,
        unblock_key: impl Into<String>,
    ) -> Self {
        self.credentials = Credentials::from_parts(user, admin_api_key, unblock_key);
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Signing credentials embedded in every new request, if complete.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe a call to `path`.
    ///
    /// `path` is relative to the server base, or a full URL starting with it.
    pub fn request(&self, method: Method, path: impl Into<String>) -> Request {
        Request::new(
            self.server.clone(),
            path.into(),
            method,
            self.token.clone(),
            self.credentials.clone(),
        )
    }

    /// Send `request` and decode the JSON response into `R`.
    ///
    /// Use `serde_json::Value` for responses without a declared shape.
    pub async fn execute<R: DeserializeOwned>(&self, request: Request) -> Result<R> {
        effects::send(self.transport.as_ref(), request).await
    }

    /// Send `request` and return the live response body.
    ///
    /// Meant for large or binary payloads such as file downloads.
    pub async fn execute_stream(&self, request: Request) -> Result<ResponseStream> {
        effects::send_stream(self.transport.as_ref(), request).await
    }

    /// Resolve the URL `request` would be sent to, signing it if the client
    /// holds signing credentials.
    ///
    /// Useful for handing out time-limited download links.
    pub async fn resolve_url(&self, request: &Request) -> Result<ResolvedUrl> {
        effects::sign_url(self.transport.as_ref(), request).await
    }
}
