use url::Url;

use super::target::invalid_escape;
use crate::data::SignatureClaims;
use crate::error::{Error, Result};

/// Base that relative signed URLs are resolved against. Only the query of
/// the result is used.
const RELATIVE_BASE: &str = "http://localhost/";

/// Extract and validate the signature parameters of `signed_url`.
///
/// `signed_url` may be relative or empty, in which case it simply carries no
/// claims. `user` must appear exactly once and equal `expected_user`;
/// `until`, `method` and `token` must each appear exactly once. The identity
/// check runs first.
pub fn extract_claims(signed_url: &str, expected_user: &str) -> Result<SignatureClaims> {
    let base = Url::parse(RELATIVE_BASE)?;
    let parsed = Url::options().base_url(Some(&base)).parse(signed_url)?;
    if let Some(query) = parsed.query() {
        check_query(query)?;
    }
    let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();

    let user = single(&pairs, "user")
        .filter(|user| *user == expected_user)
        .ok_or_else(|| Error::UnknownUser(expected_user.to_owned()))?;

    let until = single(&pairs, "until");
    let method = single(&pairs, "method");
    let token = single(&pairs, "token");

    match (until, method, token) {
        (Some(until), Some(method), Some(token)) => Ok(SignatureClaims {
            until: until.to_owned(),
            user: user.to_owned(),
            method: method.to_owned(),
            token: token.to_owned(),
        }),
        _ => {
            let missing = [("until", until), ("method", method), ("token", token)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(name, _)| name)
                .collect();
            Err(Error::MissingSignatureFields(missing))
        }
    }
}

/// Reject a query with a malformed escape or a `;` separator.
fn check_query(query: &str) -> Result<()> {
    if query.contains(';') {
        return Err(Error::MalformedSignatureQuery(
            "invalid semicolon separator in query".to_owned(),
        ));
    }
    match invalid_escape(query) {
        Some(escape) => Err(Error::MalformedSignatureQuery(format!(
            "invalid URL escape {escape:?}"
        ))),
        None => Ok(()),
    }
}

/// The value of `key` if it occurs exactly once.
fn single<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str());
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}
