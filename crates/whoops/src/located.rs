// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use crate::{BoxError, Location};

/// Error whose text is prefixed with the `file:line` that wrapped it.
///
/// Unlike [`Annotated`](crate::Annotated), a `Located` error exposes no capabilities; the renderer
/// treats it as a plain error and only the log line benefits from the location.
#[derive(Debug)]
pub struct Located {
    location: Location,
    source: BoxError,
}

impl Located {
    /// Returns where the error was wrapped.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Unwraps the original error.
    #[must_use]
    pub fn into_source(self) -> BoxError {
        self.source
    }
}

/// Prefixes `err` with the location of the caller.
///
/// The original error stays reachable through [`source`](StdError::source).
///
/// # Examples
///
/// ```rust
/// use std::error::Error;
///
/// let err = whoops::locate(std::io::Error::other("disk gone"));
/// assert!(err.to_string().ends_with(" :: disk gone"));
/// assert!(err.source().is_some());
/// ```
#[must_use]
#[track_caller]
pub fn locate(err: impl Into<BoxError>) -> Located {
    Located {
        location: Location::caller(),
        source: err.into(),
    }
}

impl fmt::Display for Located {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.location, self.source)
    }
}

impl StdError for Located {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}
