// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt::{self, Debug};
use std::sync::Arc;

use http::StatusCode;

use crate::capability::{Capability, Code, Coder, IDer, Id, Loc, Locer, Show, Shower};
use crate::{Annotated, Location};

/// Views one link of an error chain as the provider of a capability, if it is one.
pub type Extractor<P> = for<'a> fn(&'a (dyn StdError + 'static)) -> Option<&'a P>;

/// Finds the first error in a chain that provides a given capability.
///
/// Rust offers no way to ask a `&dyn Error` whether its concrete type implements a trait, so the
/// probe keeps a list of extractors that recognize concrete types. [`Probe::default`] recognizes
/// [`Annotated`]; register your own error types with [`with_coder`](Self::with_coder) and
/// friends, or with a hand-written [`Extractor`] through [`with`](Self::with).
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use whoops::{Coder, Probe};
///
/// #[derive(Debug)]
/// struct NotFound;
///
/// impl std::fmt::Display for NotFound {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("not found")
///     }
/// }
///
/// impl std::error::Error for NotFound {}
///
/// impl Coder for NotFound {
///     fn status_code(&self) -> StatusCode {
///         StatusCode::NOT_FOUND
///     }
/// }
///
/// let probe = Probe::default().with_coder::<NotFound>();
/// let err = whoops::locate(NotFound);
/// assert_eq!(probe.find_code(&err), Some(StatusCode::NOT_FOUND));
/// ```
#[derive(Clone)]
pub struct Probe {
    extractors: Vec<Arc<dyn Any + Send + Sync>>,
}

impl Probe {
    /// Creates a probe that recognizes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self { extractors: Vec::new() }
    }

    /// Registers an extractor for capability `C`.
    ///
    /// Extractors are consulted in registration order for every link of the chain.
    #[must_use]
    pub fn with<C: Capability>(mut self, extractor: Extractor<C::Provider>) -> Self {
        self.extractors.push(Arc::new(extractor));
        self
    }

    /// Registers `T` as a provider of [`Coder`].
    #[must_use]
    pub fn with_coder<T: StdError + Coder + 'static>(self) -> Self {
        self.with::<Code>(as_coder::<T>)
    }

    /// Registers `T` as a provider of [`Shower`].
    #[must_use]
    pub fn with_shower<T: StdError + Shower + 'static>(self) -> Self {
        self.with::<Show>(as_shower::<T>)
    }

    /// Registers `T` as a provider of [`IDer`].
    #[must_use]
    pub fn with_ider<T: StdError + IDer + 'static>(self) -> Self {
        self.with::<Id>(as_ider::<T>)
    }

    /// Registers `T` as a provider of [`Locer`].
    #[must_use]
    pub fn with_locer<T: StdError + Locer + 'static>(self) -> Self {
        self.with::<Loc>(as_locer::<T>)
    }

    /// Walks `err` and its [`source`](StdError::source) chain, returning the first link that
    /// provides capability `C`.
    ///
    /// `err` itself is the first link inspected.
    #[must_use]
    pub fn find<'e, C: Capability>(&self, err: &'e (dyn StdError + 'static)) -> Option<&'e C::Provider> {
        let mut link = Some(err);
        while let Some(current) = link {
            for extractor in &self.extractors {
                if let Some(extract) = extractor.downcast_ref::<Extractor<C::Provider>>()
                    && let Some(provider) = extract(current)
                {
                    return Some(provider);
                }
            }
            link = current.source();
        }
        None
    }

    /// Status code of the first [`Coder`] in the chain.
    #[must_use]
    pub fn find_code(&self, err: &(dyn StdError + 'static)) -> Option<StatusCode> {
        self.find::<Code>(err).map(Coder::status_code)
    }

    /// Text of the first [`Shower`] in the chain.
    #[must_use]
    pub fn find_show<'e>(&self, err: &'e (dyn StdError + 'static)) -> Option<&'e str> {
        self.find::<Show>(err).map(Shower::show_text)
    }

    /// ID of the first [`IDer`] in the chain.
    #[must_use]
    pub fn find_id<'e>(&self, err: &'e (dyn StdError + 'static)) -> Option<&'e str> {
        self.find::<Id>(err).map(IDer::error_id)
    }

    /// Location of the first [`Locer`] in the chain.
    #[must_use]
    pub fn find_location(&self, err: &(dyn StdError + 'static)) -> Option<Location> {
        self.find::<Loc>(err).map(Locer::error_location)
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self::empty()
            .with_coder::<Annotated>()
            .with_shower::<Annotated>()
            .with_ider::<Annotated>()
            .with_locer::<Annotated>()
    }
}

impl Debug for Probe {
    #[cfg_attr(test, mutants::skip)] // Extractors are opaque, only the count is printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe").field("extractors", &self.extractors.len()).finish()
    }
}

macro_rules! provider_fn {
    ($name:ident, $provider:ident) => {
        fn $name<'a, T: StdError + $provider + 'static>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn $provider + 'static)> {
            err.downcast_ref::<T>().map(|found| found as &(dyn $provider + 'static))
        }
    };
}

provider_fn!(as_coder, Coder);
provider_fn!(as_shower, Shower);
provider_fn!(as_ider, IDer);
provider_fn!(as_locer, Locer);
