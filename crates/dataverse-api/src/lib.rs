//! Request layer for the Dataverse HTTP API.
//!
//! Builds outgoing requests with the right authentication, dispatches them
//! over an injectable [`Transport`] and decodes JSON responses, releasing the
//! response stream on every path.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable request descriptors, credentials and wire types
//! - [`core`] - Pure transformations of the signing protocol
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Authentication
//!
//! - **Token header**: the client token travels in `X-Dataverse-key`.
//! - **Signed URL**: with a user, an admin API key and an unblock key, each
//!   request URL is signed by the server's signing service and carries its
//!   own time-limited authorization. No header is added.
//!
//! # Example
//!
//! ```no_run
//! use dataverse_api::Client;
//! use http::Method;
//! use serde_json::Value;
//!
//! # async fn run() -> dataverse_api::Result<()> {
//! let client = Client::with_token("https://demo.dataverse.org", "api-token");
//!
//! let request = client.request(Method::GET, "/api/v1/info/version");
//! let version: Value = client.execute(request).await?;
//!
//! let download = client.request(Method::GET, "/api/v1/access/datafile/42");
//! let bytes = client.execute_stream(download).await?.bytes().await?;
//! # let _ = (version, bytes);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use client::Client;
pub use config::ClientConfig;
pub use data::{AuthMode, Credentials, Request, RequestBody, TOKEN_HEADER, json_content_header};
pub use effects::{HttpRequest, HttpResponse, ResolvedUrl, ResponseStream, Transport};
pub use error::{BoxError, Error, Result};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestTransport;
