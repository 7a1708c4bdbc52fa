//! Pure transformations used by URL signing.
//!
//! These functions perform no I/O, so every rule of the signing protocol
//! that does not involve the network is tested here in isolation.

mod claims;
mod target;

pub use claims::extract_claims;
pub use target::{append_signature, query_unescape, resolve_target, signing_service_url};
