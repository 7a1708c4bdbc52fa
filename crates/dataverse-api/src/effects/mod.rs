//! I/O: the transport seam, URL signing, dispatch and response decoding.

mod dispatch;
mod http;
mod signer;
mod stream;

pub use dispatch::{send, send_stream};
pub use self::http::{BoxStream, HttpRequest, HttpResponse, Transport};
pub use signer::{ResolvedUrl, SIGNED_URL_EXPIRY_SECS, sign_url};
pub use stream::{ResponseStream, decode_and_close};

#[cfg(feature = "reqwest")]
pub use self::http::ReqwestTransport;
