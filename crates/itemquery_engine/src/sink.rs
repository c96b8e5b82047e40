//! Where resolution errors go.
//!
//! Resolution never fails outright. Problems with a query are reported to
//! an [`ErrorSink`] and the query yields nothing.

use tracing::warn;

/// Receives errors raised while resolving a query.
pub trait ErrorSink {
    /// Reports an error for the given query.
    fn report(&mut self, query: &str, message: &str);
}

impl<F: FnMut(&str, &str)> ErrorSink for F {
    fn report(&mut self, query: &str, message: &str) {
        self(query, message);
    }
}

/// One reported error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportedError {
    /// The query which failed.
    pub query: String,
    /// What went wrong.
    pub message: String,
}

/// Collects reported errors in order.
#[derive(Clone, Debug, Default)]
pub struct ErrorLog {
    entries: Vec<ReportedError>,
}

impl ErrorLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All reported errors.
    #[must_use]
    pub fn entries(&self) -> &[ReportedError] {
        &self.entries
    }

    /// Number of reported errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Error messages, in report order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ErrorSink for ErrorLog {
    fn report(&mut self, query: &str, message: &str) {
        self.entries.push(ReportedError {
            query: query.to_string(),
            message: message.to_string(),
        });
    }
}

/// Forwards errors to the `tracing` log at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&mut self, query: &str, message: &str) {
        warn!(query, "failed parsing item query: {message}");
    }
}
