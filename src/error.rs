//! Error types for lapack-ffi

use crate::attr::AttrKind;
use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using lapack-ffi's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while looking up, binding or dispatching handlers
///
/// A nonzero LAPACK `info` status is never reported here. Kernels write it
/// into the `info` result buffer and the caller interprets it.
#[derive(Error, Debug)]
pub enum Error {
    /// No handler is registered under the requested name
    #[error("Unknown handler '{name}'")]
    UnknownHandler {
        /// The requested handler name
        name: String,
    },

    /// Two handlers expanded to the same name
    #[error("Duplicate handler '{name}'")]
    DuplicateHandler {
        /// The colliding handler name
        name: String,
    },

    /// A call frame does not satisfy the handler's signature
    #[error("Invalid call to '{handler}': {reason}")]
    InvalidCall {
        /// The handler being called
        handler: String,
        /// What did not match
        reason: String,
    },

    /// A buffer was accessed as the wrong element type
    #[error("DType mismatch: expected {expected}, got {got}")]
    DTypeMismatch {
        /// The dtype requested by the caller
        expected: DType,
        /// The dtype the buffer holds
        got: DType,
    },

    /// A declared attribute was not supplied
    #[error("Missing attribute '{name}' in call to '{handler}'")]
    MissingAttribute {
        /// The handler being called
        handler: String,
        /// The attribute name
        name: String,
    },

    /// An attribute code is not a member of its enumeration
    #[error("Invalid value {code:#04x} for {kind} attribute '{name}' in '{handler}'")]
    InvalidAttribute {
        /// The handler being called
        handler: String,
        /// The attribute name
        name: String,
        /// The enumeration the attribute belongs to
        kind: AttrKind,
        /// The rejected wire code
        code: u8,
    },

    /// The handler exists but no kernel is bound to its entry point
    #[error("No kernel bound to '{symbol}' (required by '{handler}')")]
    KernelNotBound {
        /// The handler being called
        handler: String,
        /// The kernel entry point symbol
        symbol: String,
    },

    /// A kernel was bound twice to the same entry point
    #[error("Kernel '{symbol}' is already bound")]
    DuplicateKernel {
        /// The kernel entry point symbol
        symbol: String,
    },

    /// A kernel was bound to a symbol that no handler uses
    #[error("No handler uses kernel entry point '{symbol}'")]
    UnknownKernelSymbol {
        /// The kernel entry point symbol
        symbol: String,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A kernel failed for a reason other than its LAPACK status code
    #[error("Kernel error: {0}")]
    Kernel(String),
}

impl Error {
    /// Create an unknown handler error
    pub fn unknown_handler(name: impl Into<String>) -> Self {
        Self::UnknownHandler { name: name.into() }
    }

    /// Create an invalid call error
    pub fn invalid_call(handler: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCall {
            handler: handler.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a missing attribute error
    pub fn missing_attribute(handler: &str, name: &str) -> Self {
        Self::MissingAttribute {
            handler: handler.to_string(),
            name: name.to_string(),
        }
    }

    /// Create an invalid attribute error
    pub fn invalid_attribute(handler: &str, name: &str, kind: AttrKind, code: u8) -> Self {
        Self::InvalidAttribute {
            handler: handler.to_string(),
            name: name.to_string(),
            kind,
            code,
        }
    }

    /// Create a dtype mismatch error
    pub fn dtype_mismatch(expected: DType, got: DType) -> Self {
        Self::DTypeMismatch { expected, got }
    }
}
