// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

/// Source location (file and line) of the code that annotated an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// File where the annotation happened
    pub file: &'static str,
    /// Line number where the annotation happened
    pub line: u32,
}

impl Location {
    /// Creates a new location with file and line information.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Captures the location of the caller.
    ///
    /// Inside a chain of `#[track_caller]` functions this resolves to the first caller outside the chain.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_file_colon_line() {
        let location = Location::new("src/handlers.rs", 42);
        assert_eq!(location.to_string(), "src/handlers.rs:42");
    }

    #[test]
    fn caller_points_at_this_file() {
        let location = Location::caller();
        let line = line!() - 1;

        assert!(location.file.ends_with("location.rs"));
        assert_eq!(location.line, line);
    }

    #[track_caller]
    fn tracked() -> Location {
        Location::caller()
    }

    #[test]
    fn caller_skips_tracked_frames() {
        let location = tracked();
        let line = line!() - 1;

        assert_eq!(location.line, line);
    }
}
