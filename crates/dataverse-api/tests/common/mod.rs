//! Shared in-memory transports for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use bytes::Bytes;
use dataverse_api::{Client, HttpRequest, HttpResponse, Transport};
use futures_util::Stream;
use http::{HeaderMap, Method, StatusCode};

pub const SERVER: &str = "https://demo.dataverse.org";
pub const SIGNING_URL: &str =
    "https://demo.dataverse.org/api/v1/admin/requestSignedUrl?unblock-key=unblock";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestError(pub String);

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TestError {}

/// A request as seen by the fake transport, body fully read.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.to_str().unwrap())
    }
}

/// Scripted response: status plus body chunks, any of which may fail.
pub struct Reply {
    pub status: StatusCode,
    pub chunks: Vec<Result<Bytes, TestError>>,
}

impl Reply {
    pub fn json(value: serde_json::Value) -> Self {
        Self::text(value.to_string())
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            chunks: vec![Ok(Bytes::from(body.into()))],
        }
    }

    pub fn chunks(chunks: Vec<Result<Bytes, TestError>>) -> Self {
        Self {
            status: StatusCode::OK,
            chunks,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn signed(signed_url: &str) -> Self {
        Self::json(serde_json::json!({
            "status": "OK",
            "data": { "signedUrl": signed_url },
        }))
    }
}

type Handler = Box<dyn Fn(&Recorded) -> Result<Reply, TestError> + Send + Sync>;

/// In-memory transport that records every request and counts how many
/// response bodies were released.
pub struct FakeTransport {
    handler: Handler,
    requests: Mutex<Vec<Recorded>>,
    closed: Arc<AtomicUsize>,
}

impl FakeTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Recorded) -> Result<Reply, TestError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer every request with `body`.
    pub fn replying(body: serde_json::Value) -> Self {
        Self::new(move |_| Ok(Reply::json(body.clone())))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Transport for FakeTransport {
    type Error = TestError;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse<TestError>, TestError> {
        let body = match request.body {
            Some(body) => body.into_bytes().await.map_err(|e| TestError(e.to_string()))?,
            None => Bytes::new(),
        };
        let recorded = Recorded {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body,
        };
        let reply = (self.handler)(&recorded);
        self.requests.lock().unwrap().push(recorded);
        let reply = reply?;

        Ok(HttpResponse {
            status: reply.status,
            headers: HeaderMap::new(),
            body: Box::pin(TrackedBody {
                chunks: reply.chunks.into(),
                closed: Arc::clone(&self.closed),
            }),
        })
    }
}

/// Body stream that bumps a counter when dropped.
struct TrackedBody {
    chunks: VecDeque<Result<Bytes, TestError>>,
    closed: Arc<AtomicUsize>,
}

impl Stream for TrackedBody {
    type Item = Result<Bytes, TestError>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.chunks.pop_front())
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Transport whose requests never complete; counts aborted requests.
#[derive(Default)]
pub struct PendingTransport {
    aborted: Arc<AtomicUsize>,
}

impl PendingTransport {
    pub fn aborted(&self) -> usize {
        self.aborted.load(Ordering::SeqCst)
    }
}

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl Transport for PendingTransport {
    type Error = TestError;

    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse<TestError>, TestError> {
        let _in_flight = InFlight(Arc::clone(&self.aborted));
        std::future::pending::<()>().await;
        Err(TestError("unreachable".to_owned()))
    }
}

pub fn token_client(transport: FakeTransport) -> Client<FakeTransport> {
    Client::with_transport(SERVER, transport).with_token_auth("user-token")
}

pub fn signing_client(transport: FakeTransport) -> Client<FakeTransport> {
    Client::with_transport(SERVER, transport)
        .with_token_auth("user-token")
        .with_url_signing("alice", "admin", "unblock")
}
