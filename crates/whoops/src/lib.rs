// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Error annotation and HTTP error rendering.
//!
//! Whoops attaches the context an HTTP service needs to an error at the point it is created or
//! first observed, then turns that error into a response that reveals only what is safe to show.
//!
//! # Key Features
//!
//! - [**`Annotated`**](Annotated): Error wrapper that records the call site, a correlation ID, and
//!   optionally a status code and user-visible text
//! - [**`wrapf!`**](wrapf) and friends: Formatting constructors for annotated errors
//! - [**`locate`**](locate): Lightweight wrapper that only prefixes an error with its call site
//! - [**Capabilities**](capability): Narrow traits through which any error type can provide a
//!   status code, show text, correlation ID or location
//! - [**`Renderer`**](Renderer): Logs the full error chain and writes a plain-text response with
//!   status, show text and correlation ID
//!
//! # Quick Start
//!
//! ```rust
//! use http::StatusCode;
//! use whoops::{Annotated, BufferedResponse, wrap_code_showf};
//!
//! fn parse_age(raw: &str) -> Result<u8, Annotated> {
//!     raw.parse()
//!         .map_err(|e| wrap_code_showf!(StatusCode::BAD_REQUEST, cause = e, "invalid age: {raw}"))
//! }
//!
//! let err = parse_age("ancient").unwrap_err();
//!
//! let mut sink = BufferedResponse::new();
//! whoops::render(&mut sink, Some(&err)).unwrap();
//!
//! assert_eq!(sink.status(), Some(StatusCode::BAD_REQUEST));
//! assert_eq!(sink.body(), format!("invalid age: ancient [ID:{}]", err.id()).as_bytes());
//! ```
//!
//! # Show Text and Log Text
//!
//! Every error has two faces. Its [`Display`](std::fmt::Display) output, including every cause in
//! the chain, is logged by the renderer. Only the show text set with [`wrap_showf!`] or
//! [`AnnotatedBuilder::show`] is sent to the caller; when the chain has none, a generic
//! [`FALLBACK_BODY`] is sent instead. The correlation ID in the response lets an operator find the
//! matching log line.
//!
//! ```rust
//! use whoops::wrapf;
//!
//! let err = wrapf!(cause = std::io::Error::other("password rejected for admin"), "db login");
//! let response = whoops::Renderer::new().to_response(&err);
//!
//! assert!(response.body().starts_with(b"internal error [ID:"));
//! ```
//!
//! # Annotating Once
//!
//! [`Annotated::wrap`] and [`ResultExt::annotate`] leave an error that is already annotated
//! untouched, so an error can be annotated at every layer it passes through while keeping the
//! innermost location and ID. The builder and the macros always add a new layer.
//!
//! ```rust
//! use whoops::{Annotated, ResultExt};
//!
//! fn inner() -> Result<(), Annotated> {
//!     Err(Annotated::wrap("disk full"))
//! }
//!
//! fn outer() -> Result<(), Annotated> {
//!     inner().annotate()
//! }
//!
//! // the location recorded inside `inner` survives
//! assert_eq!(outer().unwrap_err().location(), inner().unwrap_err().location());
//! ```
//!
//! # Correlation IDs
//!
//! IDs are random 63-bit values printed as uppercase hex. The process-wide source can be replaced
//! once with [`set_id_source`], for example with [`SeededIds`] for reproducible output.
//!
//! # Features
//!
//! - `test-util`: exposes `whoops::testing::LogCapture` for asserting on log output.

pub mod capability;

mod annotated;
mod builder;
mod id;
mod located;
mod location;
mod macros;
mod message;
mod probe;
mod render;
mod result_ext;
mod sink;

#[cfg(any(feature = "test-util", test))]
pub mod testing;

/// Boxed error accepted as a cause everywhere in this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub use annotated::Annotated;
pub use builder::AnnotatedBuilder;
pub use capability::{Coder, IDer, Locer, Shower};
pub use id::{CorrelationId, FastRandIds, IdSource, IdSourceAlreadySet, SeededIds, set_id_source};
pub use located::{Located, locate};
pub use location::Location;
pub use message::Message;
pub use probe::{Extractor, Probe};
pub use render::{FALLBACK_BODY, Renderer, RendererBuilder, render, render_result};
pub use result_ext::ResultExt;
pub use sink::{BufferedResponse, ResponseSink};
