// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Destinations the [`Renderer`](crate::Renderer) writes responses to.

use std::convert::Infallible;

use bytes::{Bytes, BytesMut};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Response, StatusCode};

/// Something an HTTP response can be written to.
///
/// Headers are set before the status, the status is written once, then body bytes follow.
/// Implement this over the response writer of the HTTP server in use; [`BufferedResponse`]
/// collects everything into an [`http::Response`].
pub trait ResponseSink {
    /// Error returned when body bytes cannot be written.
    type Error;

    /// Sets a response header, replacing any previous value.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Writes the response status.
    fn write_status(&mut self, status: StatusCode);

    /// Writes a chunk of the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk could not be written.
    fn write_body(&mut self, chunk: &[u8]) -> Result<(), Self::Error>;
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    type Error = S::Error;

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        (**self).set_header(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        (**self).write_status(status);
    }

    fn write_body(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
        (**self).write_body(chunk)
    }
}

/// Collects a response in memory.
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use whoops::{BufferedResponse, ResponseSink};
///
/// let mut sink = BufferedResponse::new();
/// sink.write_status(StatusCode::ACCEPTED);
/// sink.write_body(b"queued").unwrap();
///
/// let response = sink.into_response();
/// assert_eq!(response.status(), StatusCode::ACCEPTED);
/// assert_eq!(response.body().as_ref(), b"queued");
/// ```
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl BufferedResponse {
    /// Creates an empty response buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Headers set so far.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body bytes written so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Converts the buffer into an [`http::Response`]. A response without a status is `200 OK`.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let mut response = Response::new(self.body.freeze());
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for BufferedResponse {
    type Error = Infallible;

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        if let Some(written) = self.status {
            tracing::event!(
                name: "whoops.superfluous_status",
                tracing::Level::WARN,
                written = written.as_u16(),
                ignored = status.as_u16(),
                "response status already written"
            );
            return;
        }
        self.status = Some(status);
    }

    fn write_body(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(chunk);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;

    use super::*;

    #[test]
    fn buffered_collects_everything() {
        let mut sink = BufferedResponse::new();
        sink.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        sink.write_status(StatusCode::BAD_REQUEST);
        sink.write_body(b"bad ").unwrap();
        sink.write_body(b"input").unwrap();

        assert_eq!(sink.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(sink.body(), b"bad input");

        let response = sink.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(response.body().as_ref(), b"bad input");
    }

    #[test]
    fn buffered_status_is_written_once() {
        let mut sink = BufferedResponse::new();
        sink.write_status(StatusCode::CONFLICT);
        sink.write_status(StatusCode::OK);

        assert_eq!(sink.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn buffered_body_first_implies_ok() {
        let mut sink = BufferedResponse::new();
        sink.write_body(b"hi").unwrap();
        sink.write_status(StatusCode::NOT_FOUND);

        assert_eq!(sink.into_response().status(), StatusCode::OK);
    }

    fn accept<S: ResponseSink>(mut sink: S) {
        sink.write_status(StatusCode::ACCEPTED);
    }

    #[test]
    fn mutable_reference_is_a_sink() {
        let mut sink = BufferedResponse::new();
        accept(&mut sink);
        assert_eq!(sink.status(), Some(StatusCode::ACCEPTED));
    }
}
