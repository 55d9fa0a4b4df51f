// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

use crate::capability::{Coder, IDer, Locer, Shower};
use crate::{AnnotatedBuilder, BoxError, CorrelationId, Location};

/// Annotation data, boxed so that `Result<T, Annotated>` stays pointer-sized on the error side.
#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) cause: BoxError,
    pub(crate) location: Location,
    pub(crate) id: CorrelationId,
    pub(crate) code: Option<StatusCode>,
    pub(crate) show: String,
}

/// An error annotated with the call site that produced it, a correlation ID, and optionally an
/// HTTP status code and text that may be shown to the caller.
///
/// All four are exposed through the [capabilities](crate::capability), so the
/// [`Renderer`](crate::Renderer) finds them wherever this error sits in a chain. The wrapped
/// cause is returned by [`source`](StdError::source).
///
/// An `Annotated` is immutable once built. Create one with [`Annotated::wrap`],
/// [`Annotated::builder`], or the [`wrapf!`](crate::wrapf) family of macros.
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use whoops::{Annotated, Coder, Shower};
///
/// let err = Annotated::builder()
///     .code(StatusCode::BAD_REQUEST)
///     .show("name must not be empty")
///     .build();
///
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.show_text(), "name must not be empty");
/// ```
pub struct Annotated {
    data: Box<Inner>,
}

impl Annotated {
    pub(crate) fn from_inner(inner: Inner) -> Self {
        Self { data: Box::new(inner) }
    }

    /// Annotates `cause` with the caller's location and a fresh correlation ID.
    ///
    /// If `cause` already is an `Annotated` it is returned as-is, keeping its location and ID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whoops::Annotated;
    ///
    /// let once = Annotated::wrap("disk full");
    /// let id = once.id().clone();
    ///
    /// let twice = Annotated::wrap(once);
    /// assert_eq!(twice.id(), &id);
    /// ```
    #[must_use]
    #[track_caller]
    pub fn wrap(cause: impl Into<BoxError>) -> Self {
        match cause.into().downcast::<Self>() {
            Ok(annotated) => *annotated,
            Err(cause) => Self::builder().cause(cause).build(),
        }
    }

    /// Creates a new [`AnnotatedBuilder`].
    #[must_use]
    pub fn builder<'a>() -> AnnotatedBuilder<'a> {
        AnnotatedBuilder::new()
    }

    /// Returns the wrapped cause.
    #[must_use]
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.data.cause.as_ref()
    }

    /// Unwraps the cause, discarding the annotation.
    #[must_use]
    pub fn into_cause(self) -> BoxError {
        self.data.cause
    }

    /// Returns where the error was annotated.
    #[must_use]
    pub fn location(&self) -> Location {
        self.data.location
    }

    /// Returns the correlation ID.
    #[must_use]
    pub fn id(&self) -> &CorrelationId {
        &self.data.id
    }

    /// Returns the status code, or `None` if it was never set.
    ///
    /// [`Coder::status_code`] reports an unset code as `500 Internal Server Error`.
    #[must_use]
    pub fn code(&self) -> Option<StatusCode> {
        self.data.code
    }

    /// Returns the text that may be shown to the caller; empty if none was set.
    #[must_use]
    pub fn show(&self) -> &str {
        &self.data.show
    }
}

impl fmt::Debug for Annotated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotated")
            .field("id", &self.data.id)
            .field("code", &self.data.code)
            .field("show", &self.data.show)
            .field("location", &self.data.location)
            .field("cause", &self.data.cause)
            .finish()
    }
}

impl fmt::Display for Annotated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Inner {
            cause,
            location,
            id,
            code,
            show,
        } = self.data.as_ref();

        write!(f, "id={id} code=")?;
        match code {
            Some(code) => write!(f, "{}", code.as_u16())?,
            None => f.write_str("unset")?,
        }
        write!(f, " show={show:?} loc={location}: {cause}")
    }
}

impl StdError for Annotated {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.data.cause.as_ref())
    }
}

impl Coder for Annotated {
    fn status_code(&self) -> StatusCode {
        self.data.code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl Shower for Annotated {
    fn show_text(&self) -> &str {
        &self.data.show
    }
}

impl IDer for Annotated {
    fn error_id(&self) -> &str {
        self.data.id.as_str()
    }
}

impl Locer for Annotated {
    fn error_location(&self) -> Location {
        self.data.location
    }
}
