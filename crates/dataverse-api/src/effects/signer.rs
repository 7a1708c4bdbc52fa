use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, Method};

use super::http::{HttpRequest, Transport};
use super::stream::{ResponseStream, decode_and_close};
use crate::core;
use crate::data::{AuthMode, Credentials, Request, SignedUrlResponse, SigningRequest, TOKEN_HEADER};
use crate::error::{Error, Result};

/// Lifetime requested for every signed URL, in seconds.
pub const SIGNED_URL_EXPIRY_SECS: u64 = 500;

/// The URL to call and how to authenticate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub url: String,
    pub mode: AuthMode,
}

/// Resolve the final URL of `request`.
///
/// Without complete signing credentials this is the unsigned target and
/// [`AuthMode::TokenHeader`]. Otherwise the signing service is asked for a
/// signature, the returned claims are validated and appended to the unsigned
/// target, and the mode is [`AuthMode::SignedUrl`].
pub async fn sign_url<T: Transport>(transport: &T, request: &Request) -> Result<ResolvedUrl> {
    let url = core::resolve_target(request.server(), request.path());
    let Some(credentials) = request.credentials() else {
        return Ok(ResolvedUrl {
            url,
            mode: AuthMode::TokenHeader,
        });
    };

    let unescaped = core::query_unescape(&url)?;
    let response = request_signed_url(transport, request, credentials, &unescaped).await?;

    if !response.is_ok() {
        tracing::warn!(
            user = credentials.user(),
            status = %response.status,
            "signing service rejected request"
        );
        return Err(Error::SigningRejected(response.message));
    }

    let claims = core::extract_claims(response.signed_url(), credentials.user())?;
    tracing::debug!(
        user = %claims.user,
        method = %claims.method,
        until = %claims.until,
        "obtained signed URL"
    );

    Ok(ResolvedUrl {
        url: core::append_signature(&url, &claims),
        mode: AuthMode::SignedUrl,
    })
}

/// Call the signing service directly, bypassing the dispatcher.
async fn request_signed_url<T: Transport>(
    transport: &T,
    request: &Request,
    credentials: &Credentials,
    url: &str,
) -> Result<SignedUrlResponse> {
    let body = serde_json::to_vec(&SigningRequest {
        url,
        expiry_seconds: SIGNED_URL_EXPIRY_SECS,
        user: credentials.user(),
        http_method: request.method().as_str(),
    })
    .map_err(Error::Encode)?;

    let mut headers = HeaderMap::new();
    let api_key = HeaderValue::from_str(credentials.api_key())
        .map_err(|_| Error::InvalidRequest("admin API key is not a valid header value".into()))?;
    headers.append(TOKEN_HEADER, api_key);
    headers.append(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let signing_url = core::signing_service_url(request.server(), credentials.unblock_key());
    tracing::debug!(
        user = credentials.user(),
        method = %request.method(),
        "requesting signed URL"
    );

    let response = transport
        .send(HttpRequest {
            method: Method::POST,
            url: signing_url,
            headers,
            body: Some(Bytes::from(body).into()),
        })
        .await
        .map_err(|e| Error::SigningTransport(Box::new(e)))?;

    decode_and_close(ResponseStream::from_response(response)).await
}
