// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{Annotated, BoxError, Located, locate};

/// Annotation helpers for `Result`.
///
/// `Ok` values pass through untouched, so a call can be appended to any fallible expression.
///
/// # Examples
///
/// ```rust
/// use whoops::{Annotated, ResultExt};
///
/// fn read_config() -> Result<String, Annotated> {
///     std::fs::read_to_string("/definitely/not/here.toml").annotate()
/// }
///
/// let err = read_config().unwrap_err();
/// assert!(err.location().file.ends_with(".rs"));
/// ```
pub trait ResultExt<T> {
    /// Annotates the error with the caller's location and a correlation ID.
    ///
    /// An error that already is an [`Annotated`] keeps its annotation.
    ///
    /// # Errors
    ///
    /// Returns the annotated error if `self` is `Err`.
    #[track_caller]
    fn annotate(self) -> Result<T, Annotated>;

    /// Prefixes the error with the caller's location.
    ///
    /// # Errors
    ///
    /// Returns the located error if `self` is `Err`.
    #[track_caller]
    fn locate(self) -> Result<T, Located>;
}

impl<T, E: Into<BoxError>> ResultExt<T> for Result<T, E> {
    #[track_caller]
    fn annotate(self) -> Result<T, Annotated> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Annotated::wrap(err)),
        }
    }

    #[track_caller]
    fn locate(self) -> Result<T, Located> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(locate(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn failing() -> Result<u32, io::Error> {
        Err(io::Error::other("nope"))
    }

    #[test]
    fn ok_passes_through() {
        assert_eq!(Ok::<_, io::Error>(5).annotate().unwrap(), 5);
        assert_eq!(Ok::<_, io::Error>(6).locate().unwrap(), 6);
    }

    #[test]
    fn annotate_records_call_site() {
        let err = failing().annotate().unwrap_err();
        let line = line!() - 1;

        assert_eq!(err.location().line, line);
        assert_eq!(err.cause().to_string(), "nope");
    }

    #[test]
    fn annotate_keeps_existing_annotation() {
        let first = failing().annotate().unwrap_err();
        let id = first.id().clone();

        let again = Err::<(), _>(first).annotate().unwrap_err();
        assert_eq!(again.id(), &id);
    }

    #[test]
    fn locate_records_call_site() {
        let err = failing().locate().unwrap_err();
        let line = line!() - 1;

        assert_eq!(err.location().line, line);
        assert!(err.to_string().ends_with(" :: nope"));
    }
}
