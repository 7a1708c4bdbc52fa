use percent_encoding::percent_decode_str;

use crate::data::SignatureClaims;
use crate::error::{Error, Result};

/// Path of the signing service, relative to the server base.
const SIGNING_SERVICE_PATH: &str = "/api/v1/admin/requestSignedUrl";

/// Compute the unsigned target URL.
///
/// A path that already starts with the server base is taken as absolute and
/// returned unchanged. This is a plain prefix check on the raw strings.
///
/// # Examples
///
/// ```
/// use dataverse_api::core::resolve_target;
///
/// let server = "https://demo.dataverse.org";
/// assert_eq!(
///     resolve_target(server, "/api/v1/info/version"),
///     "https://demo.dataverse.org/api/v1/info/version"
/// );
/// assert_eq!(
///     resolve_target(server, "https://demo.dataverse.org/api/v1/info/version"),
///     "https://demo.dataverse.org/api/v1/info/version"
/// );
/// ```
pub fn resolve_target(server: &str, path: &str) -> String {
    if path.starts_with(server) {
        path.to_owned()
    } else {
        format!("{server}{path}")
    }
}

/// URL of the signing endpoint for `server`.
pub fn signing_service_url(server: &str, unblock_key: &str) -> String {
    format!("{server}{SIGNING_SERVICE_PATH}?unblock-key={unblock_key}")
}

/// Decode a query-escaped string: `+` becomes a space and `%XX` sequences
/// are decoded.
///
/// Fails only on a `%` that is not followed by two hex digits. Decoded bytes
/// that are not UTF-8 are replaced with U+FFFD.
pub fn query_unescape(input: &str) -> Result<String> {
    if let Some(escape) = invalid_escape(input) {
        return Err(Error::UrlDecode(escape));
    }
    let spaced = input.replace('+', " ");
    Ok(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

/// The first `%` sequence in `input` not followed by two hex digits.
pub(super) fn invalid_escape(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                let end = (i + 3).min(bytes.len());
                return Some(String::from_utf8_lossy(&bytes[i..end]).into_owned());
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    None
}

/// Append the signature parameters to the unsigned URL.
///
/// Parameters are always written in the order `until`, `user`, `method`,
/// `token`, with their values as extracted from the signed URL.
pub fn append_signature(url: &str, claims: &SignatureClaims) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{url}{separator}until={}&user={}&method={}&token={}",
        claims.until, claims.user, claims.method, claims.token
    )
}
