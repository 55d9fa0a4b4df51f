// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use http::StatusCode;

use crate::annotated::Inner;
use crate::id::global_id_source;
use crate::{Annotated, BoxError, CorrelationId, IdSource, Location, Message};

/// Builder for [`Annotated`] errors.
///
/// Unlike [`Annotated::wrap`], building always creates a new annotation layer, even when the cause
/// is itself an [`Annotated`].
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use whoops::{Annotated, SeededIds};
///
/// let ids = SeededIds::new(42);
/// let err = Annotated::builder()
///     .code(StatusCode::SERVICE_UNAVAILABLE)
///     .show("try again later")
///     .cause(std::io::Error::other("upstream timed out"))
///     .id_source(&ids)
///     .build();
///
/// assert_eq!(err.code(), Some(StatusCode::SERVICE_UNAVAILABLE));
/// ```
#[derive(Debug, Default)]
pub struct AnnotatedBuilder<'a> {
    code: Option<StatusCode>,
    show: Option<String>,
    cause: Option<BoxError>,
    id_source: Option<&'a dyn IdSource>,
}

impl<'a> AnnotatedBuilder<'a> {
    /// Creates a builder with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP status code.
    #[must_use]
    pub fn code(mut self, code: StatusCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Sets the text that may be shown to the HTTP caller.
    #[must_use]
    pub fn show(mut self, show: impl Into<String>) -> Self {
        self.show = Some(show.into());
        self
    }

    /// Sets the wrapped cause.
    #[must_use]
    pub fn cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Sets the wrapped cause if there is one.
    ///
    /// Without a cause, [`build`](Self::build) wraps a [`Message`] holding the show text.
    #[must_use]
    pub fn maybe_cause<E: Into<BoxError>>(mut self, cause: Option<E>) -> Self {
        self.cause = cause.map(Into::into);
        self
    }

    /// Draws the correlation ID from `source` instead of the process-wide source.
    #[must_use]
    pub fn id_source(mut self, source: &'a dyn IdSource) -> Self {
        self.id_source = Some(source);
        self
    }

    /// Builds the error, recording the caller's location and drawing a fresh correlation ID.
    #[must_use]
    #[track_caller]
    pub fn build(self) -> Annotated {
        let location = Location::caller();
        let show = self.show.unwrap_or_default();
        let cause = match self.cause {
            Some(cause) => cause,
            None => Box::new(Message::new(show.clone())),
        };
        let source = match self.id_source {
            Some(source) => source,
            None => global_id_source(),
        };

        Annotated::from_inner(Inner {
            cause,
            location,
            id: CorrelationId::generate(source),
            code: self.code,
            show,
        })
    }
}
