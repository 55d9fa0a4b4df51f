// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test utilities for the whoops crate.
//!
//! This module is only available when the `test-util` feature is enabled.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Collects formatted log output in memory.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # {
/// use whoops::testing::LogCapture;
///
/// let capture = LogCapture::new();
/// let _guard = tracing::subscriber::set_default(capture.subscriber());
///
/// let mut sink = whoops::BufferedResponse::new();
/// whoops::render(&mut sink, Some(&std::io::Error::other("boom"))).unwrap();
///
/// capture.assert_contains("Error: boom");
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything logged so far.
    #[must_use]
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Asserts that the captured output contains `expected`.
    ///
    /// # Panics
    ///
    /// Panics if `expected` was not logged.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn assert_contains(&self, expected: &str) {
        let output = self.output();
        assert!(output.contains(expected), "log output does not contain '{expected}', got:\n{output}");
    }

    /// Creates a subscriber writing to this buffer, for use with [`tracing::subscriber::set_default`].
    #[must_use]
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::registry().with(tracing_subscriber::fmt::layer().with_writer(self.clone()).with_ansi(false))
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

/// Writer handed out by [`LogCapture`]; appends to the shared buffer.
#[derive(Debug)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
