// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use crate::BoxError;

/// Error built from formatted text, optionally wrapping the error that caused it.
///
/// This is what [`wrapf!`](crate::wrapf) and friends put underneath an [`Annotated`](crate::Annotated).
/// When a cause is present its text is appended after a colon, and [`source`](StdError::source)
/// returns it.
#[derive(Debug)]
pub struct Message {
    text: String,
    cause: Option<BoxError>,
}

impl Message {
    /// Creates a message error with no cause.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cause: None,
        }
    }

    /// Creates a message error that wraps `cause`.
    #[must_use]
    pub fn caused_by(text: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            text: text.into(),
            cause: Some(cause.into()),
        }
    }

    /// Returns the message text without the cause.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {cause}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

impl StdError for Message {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|cause| cause.as_ref() as &(dyn StdError + 'static))
    }
}
