//! Wire types of the signing service.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/admin/requestSignedUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRequest<'a> {
    pub url: &'a str,
    pub expiry_seconds: u64,
    pub user: &'a str,
    pub http_method: &'a str,
}

/// Response envelope of the signing service.
///
/// Only `status == "OK"` is a success; any other status carries the reason
/// in `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignedUrlResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<SignedUrlData>,
}

impl SignedUrlResponse {
    pub const STATUS_OK: &'static str = "OK";

    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }

    /// The signed URL, empty when the service sent none.
    pub fn signed_url(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|data| data.signed_url.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlData {
    #[serde(default)]
    pub signed_url: Option<String>,
}

/// Signature parameters carried by a signed URL, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureClaims {
    pub until: String,
    pub user: String,
    pub method: String,
    pub token: String,
}
