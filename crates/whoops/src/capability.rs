// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Optional capabilities an error may expose to the renderer.
//!
//! Each capability is a narrow trait. Any error type may implement any subset of them; the
//! [`Probe`](crate::Probe) discovers them by walking the error chain. The marker types [`Code`],
//! [`Show`], [`Id`] and [`Loc`] name a capability when asking the probe for it.

use http::StatusCode;

use crate::Location;

/// Error that carries the HTTP status code to respond with.
pub trait Coder {
    /// Returns the status code.
    fn status_code(&self) -> StatusCode;
}

/// Error that carries text which is safe to show to the HTTP caller.
pub trait Shower {
    /// Returns the user-visible text. Empty text means the renderer falls back to a generic message.
    fn show_text(&self) -> &str;
}

/// Error that carries a correlation ID linking a response to the log.
pub trait IDer {
    /// Returns the correlation ID.
    fn error_id(&self) -> &str;
}

/// Error that knows the `file:line` where it was annotated.
pub trait Locer {
    /// Returns the location.
    fn error_location(&self) -> Location;
}

/// A capability that can be looked up in an error chain.
///
/// `Provider` is the trait object a matching chain link is viewed through.
pub trait Capability: 'static {
    /// Trait object type of the capability.
    type Provider: ?Sized + 'static;
}

/// Names the [`Coder`] capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Code;

/// Names the [`Shower`] capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Show;

/// Names the [`IDer`] capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id;

/// Names the [`Locer`] capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Loc;

impl Capability for Code {
    type Provider = dyn Coder;
}

impl Capability for Show {
    type Provider = dyn Shower;
}

impl Capability for Id {
    type Provider = dyn IDer;
}

impl Capability for Loc {
    type Provider = dyn Locer;
}
