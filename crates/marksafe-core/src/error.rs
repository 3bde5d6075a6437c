//! Shared error type across marksafe crates.

use thiserror::Error;

/// Stable error codes for hosts that map failures onto their own surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid or missing declaration.
    Configuration,
    /// Dialect has no engine.
    UnsupportedDialect,
    /// Engine could not convert the input.
    MarkupEngine,
    /// Sanitizer or link marker failed.
    Sanitizer,
    /// Config file version mismatch.
    UnsupportedVersion,
    /// Anything else (I/O while loading config).
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and host error payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Configuration => "CONFIGURATION",
            ErrorCode::UnsupportedDialect => "UNSUPPORTED_DIALECT",
            ErrorCode::MarkupEngine => "MARKUP_ENGINE",
            ErrorCode::Sanitizer => "SANITIZER",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MarksafeError>;

/// Unified error type used by core and render.
#[derive(Debug, Error)]
pub enum MarksafeError {
    #[error("configuration: {0}")]
    Configuration(String),
    #[error("unsupported dialect: {0}")]
    UnsupportedDialect(String),
    #[error("markup engine: {0}")]
    MarkupEngine(String),
    #[error("sanitizer: {0}")]
    Sanitizer(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MarksafeError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MarksafeError::Configuration(_) => ErrorCode::Configuration,
            MarksafeError::UnsupportedDialect(_) => ErrorCode::UnsupportedDialect,
            MarksafeError::MarkupEngine(_) => ErrorCode::MarkupEngine,
            MarksafeError::Sanitizer(_) => ErrorCode::Sanitizer,
            MarksafeError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MarksafeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
