use http::HeaderMap;
use http::header::HeaderValue;
use serde::de::DeserializeOwned;

use super::http::{HttpRequest, Transport};
use super::signer::sign_url;
use super::stream::{ResponseStream, decode_and_close};
use crate::data::request::append_all;
use crate::data::{AuthMode, Request, TOKEN_HEADER};
use crate::error::{Error, Result};

/// Send `request` and hand back the live response body.
///
/// The caller owns the returned stream. The status code is not inspected
/// and nothing is retried: a signing or transport failure is returned as is.
pub async fn send_stream<T: Transport>(transport: &T, mut request: Request) -> Result<ResponseStream> {
    let resolved = sign_url(transport, &request).await?;

    let mut headers = HeaderMap::new();
    if resolved.mode == AuthMode::TokenHeader
        && let Some(token) = request.token()
    {
        let value = HeaderValue::from_str(token)
            .map_err(|_| Error::InvalidRequest("API token is not a valid header value".into()))?;
        headers.append(TOKEN_HEADER, value);
    }

    append_all(&mut headers, request.take_headers());

    tracing::debug!(
        method = %request.method(),
        url = %strip_query(&resolved.url),
        mode = %resolved.mode,
        "dispatching request"
    );

    let response = transport
        .send(HttpRequest {
            method: request.method().clone(),
            url: resolved.url,
            headers,
            body: request.take_body(),
        })
        .await
        .map_err(|e| Error::Transport(Box::new(e)))?;

    Ok(ResponseStream::from_response(response))
}

/// Send `request` and decode the JSON response body into `T`.
///
/// Nothing is decoded when sending fails. The response stream is closed on
/// every path.
pub async fn send<T: Transport, R: DeserializeOwned>(transport: &T, request: Request) -> Result<R> {
    let stream = send_stream(transport, request).await?;
    decode_and_close(stream).await
}

/// The URL up to its query string, which may carry a signature.
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
