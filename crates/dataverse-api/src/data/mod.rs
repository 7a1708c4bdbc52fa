//! Immutable values describing a single API call.
//!
//! Nothing in this module performs I/O. A [`Request`] is built once from a
//! [`Client`](crate::Client), handed to the dispatcher and consumed there.

pub mod body;
pub mod credentials;
pub mod request;
pub mod signing;

pub use body::{BodyStream, RequestBody};
pub use credentials::{AuthMode, Credentials};
pub use request::{Request, TOKEN_HEADER, json_content_header};
pub use signing::{SignatureClaims, SignedUrlData, SignedUrlResponse, SigningRequest};
