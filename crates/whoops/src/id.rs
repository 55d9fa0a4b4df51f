// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Correlation IDs and the random sources they are drawn from.

use std::fmt::{self, Debug};
use std::sync::OnceLock;

use parking_lot::Mutex;

/// Keeps generated values in the non-negative range of an `i64`.
const ID_MASK: u64 = u64::MAX >> 1;

static ID_SOURCE: OnceLock<Box<dyn IdSource>> = OnceLock::new();

/// Source of raw values for [`CorrelationId`]s.
///
/// Implementations are **not** required to be cryptographically secure. IDs exist so that a
/// message shown to a user can be matched to a log line, nothing more. Collisions are possible
/// and tolerated.
pub trait IdSource: Debug + Send + Sync {
    /// Returns the next raw value. Only the lower 63 bits are used.
    fn next_id(&self) -> u64;
}

/// Default [`IdSource`] backed by the thread-local `fastrand` generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastRandIds;

impl IdSource for FastRandIds {
    fn next_id(&self) -> u64 {
        fastrand::u64(..)
    }
}

/// [`IdSource`] with a fixed seed, producing the same sequence of IDs on every run.
#[derive(Debug)]
pub struct SeededIds {
    rng: Mutex<fastrand::Rng>,
}

impl SeededIds {
    /// Creates a source seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl IdSource for SeededIds {
    fn next_id(&self) -> u64 {
        self.rng.lock().u64(..)
    }
}

/// Returned by [`set_id_source`] when the process-wide source is already in place.
#[derive(Debug, thiserror::Error)]
#[error("a process-wide correlation id source is already installed")]
pub struct IdSourceAlreadySet;

/// Installs the process-wide [`IdSource`] used by every annotation that does not name its own.
///
/// Call this once at startup, before the first error is annotated. Without it, [`FastRandIds`]
/// is installed on first use.
///
/// # Errors
///
/// Returns [`IdSourceAlreadySet`] if a source was installed earlier, either explicitly or
/// because an ID has already been generated.
pub fn set_id_source(source: impl IdSource + 'static) -> Result<(), IdSourceAlreadySet> {
    if ID_SOURCE.set(Box::new(source)).is_err() {
        return Err(IdSourceAlreadySet);
    }
    Ok(())
}

pub(crate) fn global_id_source() -> &'static dyn IdSource {
    ID_SOURCE.get_or_init(|| Box::new(FastRandIds)).as_ref()
}

/// Random token attached to an annotated error so the user-visible response can be matched to
/// the log line.
///
/// Rendered as uppercase hexadecimal without zero padding, e.g. `3F9A1C07B2E4D51`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(Box<str>);

impl CorrelationId {
    /// Draws a new ID from `source`.
    #[must_use]
    pub fn generate(source: &dyn IdSource) -> Self {
        Self::from_raw(source.next_id())
    }

    /// Builds the ID for a raw value, discarding the top bit.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(format!("{:X}", raw & ID_MASK).into_boxed_str())
    }

    /// Returns the hexadecimal text of the ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CorrelationId").field(&self.as_str()).finish()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(u64);

    impl IdSource for Fixed {
        fn next_id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn hex_is_uppercase_and_unpadded() {
        assert_eq!(CorrelationId::from_raw(0xABC).as_str(), "ABC");
        assert_eq!(CorrelationId::from_raw(0).as_str(), "0");
    }

    #[test]
    fn top_bit_is_discarded() {
        let id = CorrelationId::generate(&Fixed(u64::MAX));
        assert_eq!(id.as_str(), "7FFFFFFFFFFFFFFF");
    }

    #[test]
    fn seeded_sources_repeat() {
        let a = SeededIds::new(7);
        let b = SeededIds::new(7);

        let first: Vec<_> = (0..4).map(|_| CorrelationId::generate(&a)).collect();
        let second: Vec<_> = (0..4).map(|_| CorrelationId::generate(&b)).collect();

        assert_eq!(first, second);
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn fastrand_ids_fit_in_sixteen_digits() {
        for _ in 0..64 {
            let id = CorrelationId::generate(&FastRandIds);
            assert!((1..=16).contains(&id.as_str().len()), "unexpected id {id}");
            assert!(id.as_str().chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn as_ref_matches_display() {
        fn header_text(id: impl AsRef<str>) -> String {
            format!("[ID:{}]", id.as_ref())
        }

        let id = CorrelationId::from_raw(0xBEEF);
        assert_eq!(header_text(&id), "[ID:BEEF]");
        assert_eq!(id.to_string(), "BEEF");
    }

    #[test]
    fn debug_shows_text() {
        assert_eq!(format!("{:?}", CorrelationId::from_raw(0x1F)), "CorrelationId(\"1F\")");
    }
}
