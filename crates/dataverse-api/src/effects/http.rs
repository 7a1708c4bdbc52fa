use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;
use http::{HeaderMap, Method, StatusCode};

use crate::data::RequestBody;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// A fully resolved outgoing HTTP request.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: Method,
    /// The fully qualified URL, signature included when signing applies.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

/// Response head plus a live body stream.
///
/// Dropping the body releases the underlying connection.
pub struct HttpResponse<E> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: BoxStream<'static, Result<Bytes, E>>,
}

/// Asynchronous HTTP transport.
///
/// Owned by the [`Client`](crate::Client) so tests can substitute an
/// in-memory implementation. Implementations must not inspect the status
/// code or follow any retry policy; they return whatever the server sent.
///
/// # Implementations
///
/// - [`ReqwestTransport`]: production implementation using `reqwest`
/// - In-memory fakes for testing
pub trait Transport: Send + Sync {
    /// Error type for transport operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send `request` and return the response head with a streaming body.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be built or sent (DNS,
    /// connect, TLS, timeout). HTTP error statuses are not errors.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::time::Duration;

    use reqwest::Client;

    use super::*;

    /// Production transport backed by a shared [`reqwest::Client`].
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: Client,
        timeout: Option<Duration>,
    }

    impl ReqwestTransport {
        /// Create a transport with default configuration.
        pub fn new() -> Self {
            Self::default()
        }

        /// Use an existing [`reqwest::Client`], e.g. one with proxies configured.
        pub fn from_client(client: Client) -> Self {
            Self {
                client,
                timeout: None,
            }
        }

        /// Abort any request that takes longer than `timeout`.
        #[must_use]
        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = Some(timeout);
            self
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn send(&self, request: HttpRequest) -> Result<HttpResponse<Self::Error>, Self::Error> {
            let mut builder = self
                .client
                .request(request.method, &request.url)
                .headers(request.headers);

            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }

            builder = match request.body {
                Some(RequestBody::Bytes(bytes)) => builder.body(bytes),
                Some(RequestBody::Stream(stream)) => {
                    builder.body(reqwest::Body::wrap_stream(stream))
                }
                None => builder,
            };

            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes_stream();

            Ok(HttpResponse {
                status,
                headers,
                body: Box::pin(body),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;
