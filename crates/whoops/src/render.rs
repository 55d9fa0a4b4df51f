// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::sync::LazyLock;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Response, StatusCode};

use crate::{BoxError, BufferedResponse, Probe, ResponseSink};

/// Body sent when no error in the chain provides show text.
pub const FALLBACK_BODY: &str = "internal error";

static DEFAULT_RENDERER: LazyLock<Renderer> = LazyLock::new(Renderer::new);

/// Turns an error chain into an HTTP response and a log line.
///
/// The status, body and correlation ID come from the first providers of [`Coder`](crate::Coder),
/// [`Shower`](crate::Shower) and [`IDer`](crate::IDer) in the chain. The full error text is
/// logged; only the show text and the ID reach the caller.
#[derive(Debug, Clone)]
pub struct Renderer {
    probe: Probe,
    fallback: Cow<'static, str>,
}

impl Renderer {
    /// Creates a renderer with the default [`Probe`] and fallback body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            probe: Probe::default(),
            fallback: Cow::Borrowed(FALLBACK_BODY),
        }
    }

    /// Creates a new [`RendererBuilder`].
    #[must_use]
    pub fn builder() -> RendererBuilder {
        RendererBuilder::new()
    }

    /// Returns the probe used to discover capabilities.
    #[must_use]
    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    /// Renders `err` to `sink`.
    ///
    /// With `None` nothing is written and nothing is logged. Otherwise one `ERROR` event carrying
    /// the full error text is emitted, the content type is set to plain text, the status is
    /// written, and the body (show text or fallback) is followed by ` [ID:<id>]` when the chain
    /// carries a correlation ID.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`ResponseSink::write_body`]. Nothing is written after
    /// a failed write and the failure is not logged.
    pub fn render<S>(&self, sink: &mut S, err: Option<&(dyn StdError + 'static)>) -> Result<(), S::Error>
    where
        S: ResponseSink + ?Sized,
    {
        let Some(err) = err else {
            return Ok(());
        };

        tracing::event!(name: "whoops.render", tracing::Level::ERROR, "Error: {err}");

        sink.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        sink.write_status(self.probe.find_code(err).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));

        let body = self
            .probe
            .find_show(err)
            .filter(|show| !show.is_empty())
            .unwrap_or(&*self.fallback);
        sink.write_body(body.as_bytes())?;

        if let Some(id) = self.probe.find_id(err) {
            sink.write_body(format!(" [ID:{id}]").as_bytes())?;
        }

        Ok(())
    }

    /// Renders the error side of `result`; `Ok` renders nothing.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`ResponseSink::write_body`].
    pub fn render_result<S, T, E>(&self, sink: &mut S, result: Result<T, E>) -> Result<(), S::Error>
    where
        S: ResponseSink + ?Sized,
        E: Into<BoxError>,
    {
        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let err: BoxError = err.into();
                self.render(sink, Some(err.as_ref()))
            }
        }
    }

    /// Renders `err` into an in-memory [`http::Response`].
    #[must_use]
    pub fn to_response(&self, err: &(dyn StdError + 'static)) -> Response<Bytes> {
        let mut sink = BufferedResponse::new();
        match self.render(&mut sink, Some(err)) {
            Ok(()) => sink.into_response(),
            Err(never) => match never {},
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Renderer`].
///
/// # Examples
///
/// ```rust
/// use whoops::{Probe, Renderer};
///
/// let renderer = Renderer::builder()
///     .fallback("something went wrong")
///     .probe(Probe::default())
///     .build();
///
/// let response = renderer.to_response(&std::io::Error::other("disk full"));
/// assert_eq!(response.body().as_ref(), b"something went wrong");
/// ```
#[derive(Debug, Clone)]
pub struct RendererBuilder {
    probe: Probe,
    fallback: Cow<'static, str>,
}

impl RendererBuilder {
    /// Creates a builder with the default probe and fallback body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            probe: Probe::default(),
            fallback: Cow::Borrowed(FALLBACK_BODY),
        }
    }

    /// Sets the probe used to discover capabilities.
    #[must_use]
    pub fn probe(mut self, probe: Probe) -> Self {
        self.probe = probe;
        self
    }

    /// Sets the body sent when the chain has no show text.
    #[must_use]
    pub fn fallback(mut self, fallback: impl Into<Cow<'static, str>>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Builds the renderer.
    #[must_use]
    pub fn build(self) -> Renderer {
        Renderer {
            probe: self.probe,
            fallback: self.fallback,
        }
    }
}

impl Default for RendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `err` to `sink` with the default [`Renderer`].
///
/// See [`Renderer::render`].
///
/// # Errors
///
/// Returns the first error reported by [`ResponseSink::write_body`].
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use whoops::{BufferedResponse, wrap_code_showf};
///
/// let err = wrap_code_showf!(StatusCode::BAD_REQUEST, "bad input: {}", "x");
///
/// let mut sink = BufferedResponse::new();
/// whoops::render(&mut sink, Some(&err)).unwrap();
///
/// assert_eq!(sink.status(), Some(StatusCode::BAD_REQUEST));
/// assert_eq!(sink.body(), format!("bad input: x [ID:{}]", err.id()).as_bytes());
/// ```
pub fn render<S>(sink: &mut S, err: Option<&(dyn StdError + 'static)>) -> Result<(), S::Error>
where
    S: ResponseSink + ?Sized,
{
    DEFAULT_RENDERER.render(sink, err)
}

/// Renders the error side of `result` with the default [`Renderer`].
///
/// # Errors
///
/// Returns the first error reported by [`ResponseSink::write_body`].
pub fn render_result<S, T, E>(sink: &mut S, result: Result<T, E>) -> Result<(), S::Error>
where
    S: ResponseSink + ?Sized,
    E: Into<BoxError>,
{
    DEFAULT_RENDERER.render_result(sink, result)
}
