//! Error types for the Galaxy3D render core
//!
//! Configuration mistakes (e.g. a non-finite aspect ratio) are logged and
//! ignored so a frame loop stays alive. The errors below are reserved for
//! caller bugs: contract violations and lifecycle mistakes such as switching
//! to a context that was never registered.

use std::fmt;

/// Result type for render core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render core errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was out of range or otherwise unusable
    /// (unknown context key, texture unit past the limit, wrong state category...)
    InvalidArgument(String),

    /// A native resource handle was rejected (e.g. the reserved handle 0)
    InvalidResource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::InvalidArgument`
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("galaxy3d::ContextRegistry", "Unknown context {:?}", key));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::InvalidArgument(message)
    }};
}

/// Log an ERROR (with file:line) and return `Err(Error::InvalidArgument)`
/// from the enclosing function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
