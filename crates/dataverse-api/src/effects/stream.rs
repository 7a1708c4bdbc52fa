use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use super::http::{BoxStream, HttpResponse};
use crate::error::{BoxError, Error, Result};

/// Live body of an HTTP response.
///
/// Whoever holds the value owns the connection. It is released when the
/// stream is [closed](ResponseStream::close) or dropped, which happens
/// exactly once because the value cannot be shared or cloned.
pub struct ResponseStream {
    status: StatusCode,
    headers: HeaderMap,
    body: BoxStream<'static, std::result::Result<Bytes, BoxError>>,
}

impl ResponseStream {
    pub(crate) fn from_response<E>(response: HttpResponse<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let body = response
            .body
            .map(|chunk| chunk.map_err(|e| Box::new(e) as BoxError));
        Self {
            status: response.status,
            headers: response.headers,
            body: Box::pin(body),
        }
    }

    /// Response status. Never checked by the dispatcher.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Read the next body chunk, `None` at end of body.
    pub async fn next_chunk(&mut self) -> Option<Result<Bytes>> {
        self.body.next().await.map(|chunk| chunk.map_err(Error::Read))
    }

    /// Read the remaining body into memory and close the stream.
    pub async fn bytes(mut self) -> Result<Bytes> {
        let read = self.read_to_end().await;
        self.close();
        read
    }

    /// Release the connection without reading further.
    pub fn close(self) {
        tracing::trace!(status = %self.status, "response stream closed");
    }

    async fn read_to_end(&mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl Stream for ResponseStream {
    type Item = std::result::Result<Bytes, BoxError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.body.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &"{ ... }")
            .finish()
    }
}

/// Read `stream` to the end, close it, then decode the bytes as JSON.
///
/// The stream is closed before decoding and also when reading fails.
/// Unknown fields in the body are ignored unless `T` forbids them.
pub async fn decode_and_close<T: DeserializeOwned>(stream: ResponseStream) -> Result<T> {
    let bytes = stream.bytes().await?;
    serde_json::from_slice(&bytes).map_err(Error::Decode)
}
