// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Formatting constructors for [`Annotated`](crate::Annotated) errors.
//!
//! Every macro records the location of its invocation and draws a fresh correlation ID. A cause
//! is passed as a leading `cause = expr` argument.

/// Builds an [`Annotated`](crate::Annotated) error from a format string.
///
/// The formatted text becomes a [`Message`](crate::Message) that is logged but never shown to the
/// HTTP caller. With `cause = err`, the message wraps `err`: its text is followed by the cause's
/// text and `err` stays reachable through [`source`](std::error::Error::source).
///
/// # Examples
///
/// ```rust
/// use whoops::wrapf;
///
/// let attempt = 3;
/// let err = wrapf!("fail {attempt}");
/// assert_eq!(err.cause().to_string(), "fail 3");
///
/// let io = std::io::Error::other("connection reset");
/// let err = wrapf!(cause = io, "calling billing (attempt {})", attempt);
/// assert_eq!(err.cause().to_string(), "calling billing (attempt 3): connection reset");
/// ```
#[macro_export]
macro_rules! wrapf {
    (cause = $cause:expr, $($fmt:tt)+) => {
        $crate::Annotated::builder()
            .cause($crate::Message::caused_by(::std::format!($($fmt)+), $cause))
            .build()
    };
    ($($fmt:tt)+) => {
        $crate::Annotated::builder()
            .cause($crate::Message::new(::std::format!($($fmt)+)))
            .build()
    };
}

/// Like [`wrapf!`](crate::wrapf) but also sets the HTTP status code.
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use whoops::{Coder, wrap_codef};
///
/// let err = wrap_codef!(StatusCode::NOT_FOUND, "no user {}", 17);
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// assert_eq!(err.show(), "");
/// ```
#[macro_export]
macro_rules! wrap_codef {
    ($code:expr, cause = $cause:expr, $($fmt:tt)+) => {
        $crate::Annotated::builder()
            .code($code)
            .cause($crate::Message::caused_by(::std::format!($($fmt)+), $cause))
            .build()
    };
    ($code:expr, $($fmt:tt)+) => {
        $crate::Annotated::builder()
            .code($code)
            .cause($crate::Message::new(::std::format!($($fmt)+)))
            .build()
    };
}

/// Builds an [`Annotated`](crate::Annotated) error whose formatted text is shown to the HTTP caller.
///
/// With `cause = err` the error wraps `err` as-is, even if it is already annotated. Without a
/// cause, the shown text doubles as the cause.
///
/// # Examples
///
/// ```rust
/// use whoops::{Shower, wrap_showf};
///
/// let err = wrap_showf!(cause = std::io::Error::other("disk full"), "msg {}", 7);
/// assert_eq!(err.show_text(), "msg 7");
/// assert_eq!(err.cause().to_string(), "disk full");
/// ```
#[macro_export]
macro_rules! wrap_showf {
    (cause = $cause:expr, $($fmt:tt)+) => {
        $crate::Annotated::builder()
            .show(::std::format!($($fmt)+))
            .cause($cause)
            .build()
    };
    ($($fmt:tt)+) => {
        $crate::Annotated::builder()
            .show(::std::format!($($fmt)+))
            .build()
    };
}

/// Combination of [`wrap_codef!`](crate::wrap_codef) and [`wrap_showf!`](crate::wrap_showf).
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use whoops::wrap_code_showf;
///
/// let original = std::io::Error::other("unexpected token");
/// let err = wrap_code_showf!(StatusCode::BAD_REQUEST, cause = original, "bad input: {}", "x");
///
/// assert_eq!(err.code(), Some(StatusCode::BAD_REQUEST));
/// assert_eq!(err.show(), "bad input: x");
/// ```
#[macro_export]
macro_rules! wrap_code_showf {
    ($code:expr, cause = $cause:expr, $($fmt:tt)+) => {
        $crate::Annotated::builder()
            .code($code)
            .show(::std::format!($($fmt)+))
            .cause($cause)
            .build()
    };
    ($code:expr, $($fmt:tt)+) => {
        $crate::Annotated::builder()
            .code($code)
            .show(::std::format!($($fmt)+))
            .build()
    };
}
