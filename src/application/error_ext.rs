//! Error conversion helpers for console I/O
//!
//! Provides an extension trait for attaching context to I/O failures.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// console.write_line("hello").with_context("write to console")?;
    /// ```
    fn with_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: action.to_string(),
            source: Box::new(e),
        })
    }
}
