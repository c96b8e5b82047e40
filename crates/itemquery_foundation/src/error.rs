//! Error types for the itemquery system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result type alias using the itemquery error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for itemquery operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unknown item error.
    #[must_use]
    pub fn unknown_item(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownItem(id.into()))
    }

    /// Creates an unknown item type error.
    #[must_use]
    pub fn unknown_item_type(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownItemType(id.into()))
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates an unknown flag error.
    #[must_use]
    pub fn unknown_flag(flag: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownFlag(flag.into()))
    }

    /// Creates a circular reference error from the chain of queries involved.
    #[must_use]
    pub fn circular_reference(chain: Vec<String>) -> Self {
        Self::new(ErrorKind::CircularReference(chain))
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Creates a data loading error.
    #[must_use]
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Data(message.into()))
    }

    /// Returns true if this error was caused by malformed query arguments.
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidArgument(_) | ErrorKind::UnknownFlag(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No item with this ID exists in any item type.
    #[error("unknown item ID '{0}'")]
    UnknownItem(String),

    /// No item type with this identifier is registered.
    #[error("unknown item type '{0}'")]
    UnknownItemType(String),

    /// Query arguments were malformed.
    #[error("invalid arguments: {0}")]
    InvalidArgument(String),

    /// A `@flag` token was not recognized by the resolver.
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),

    /// A query referenced itself through its chain of parent queries.
    #[error("circular item query reference: {}", .0.join(" -> "))]
    CircularReference(Vec<String>),

    /// A resolver with the same key is already registered.
    #[error("a resolver with key '{0}' is already registered")]
    DuplicateResolver(String),

    /// A resolver key was empty or whitespace.
    #[error("invalid resolver key '{0}'")]
    InvalidResolverKey(String),

    /// Semantic limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// Game data could not be loaded.
    #[error("data error: {0}")]
    Data(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Semantic limits that can be exceeded while resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Nested queries went deeper than the configured limit.
    MaxQueryDepth {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxQueryDepth { limit } => {
                write!(f, "max query depth ({limit}) exceeded")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The query or data file being processed.
    pub source: Option<String>,
    /// Chain of enclosing queries, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
