//! Error types
//!
//! Failures fall into three groups:
//!
//! - [`GlfwError`]: reported by the native library through its error callback
//! - [`UsageError`]: programmer errors detected by the binding itself
//! - [`WindowError`]: the crate-wide error wrapping both, plus library
//!   loading, configuration and context negotiation failures

use std::ffi::c_int;

use thiserror::Error;

use crate::config::ConfigError;
use crate::native::consts::{
    GLFW_API_UNAVAILABLE, GLFW_FORMAT_UNAVAILABLE, GLFW_INVALID_ENUM, GLFW_INVALID_VALUE,
    GLFW_NOT_INITIALIZED, GLFW_NO_CURRENT_CONTEXT, GLFW_OUT_OF_MEMORY, GLFW_PLATFORM_ERROR,
    GLFW_VERSION_UNAVAILABLE,
};
use crate::session::CandidateFailure;

/// An error reported by the native library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlfwError {
    /// A call was made before initialization or after termination
    #[error("GLFW is not initialized: {0}")]
    NotInitialized(String),

    /// A context operation ran without a current context
    #[error("no current context: {0}")]
    NoCurrentContext(String),

    /// An enum argument was not valid for the call
    #[error("invalid enum: {0}")]
    InvalidEnum(String),

    /// An argument value was out of range
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A memory allocation failed
    #[error("out of memory: {0}")]
    OutOfMemory(String),

    /// The requested client API is not supported
    #[error("API unavailable: {0}")]
    ApiUnavailable(String),

    /// The requested context version is not available
    #[error("version unavailable: {0}")]
    VersionUnavailable(String),

    /// The windowing system reported an error
    #[error("platform error: {0}")]
    PlatformError(String),

    /// No pixel format matches the requested hints
    #[error("pixel format unavailable: {0}")]
    FormatUnavailable(String),

    /// A code this binding does not know
    #[error("GLFW error {code:#x}: {message}")]
    Unknown {
        /// Native error code
        code: c_int,
        /// Description from the library
        message: String,
    },
}

impl GlfwError {
    /// Map a native error code and description to its typed failure
    pub fn from_code(code: c_int, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            GLFW_NOT_INITIALIZED => Self::NotInitialized(message),
            GLFW_NO_CURRENT_CONTEXT => Self::NoCurrentContext(message),
            GLFW_INVALID_ENUM => Self::InvalidEnum(message),
            GLFW_INVALID_VALUE => Self::InvalidValue(message),
            GLFW_OUT_OF_MEMORY => Self::OutOfMemory(message),
            GLFW_API_UNAVAILABLE => Self::ApiUnavailable(message),
            GLFW_VERSION_UNAVAILABLE => Self::VersionUnavailable(message),
            GLFW_PLATFORM_ERROR => Self::PlatformError(message),
            GLFW_FORMAT_UNAVAILABLE => Self::FormatUnavailable(message),
            code => Self::Unknown { code, message },
        }
    }

    /// The native error code
    pub fn code(&self) -> c_int {
        match self {
            Self::NotInitialized(_) => GLFW_NOT_INITIALIZED,
            Self::NoCurrentContext(_) => GLFW_NO_CURRENT_CONTEXT,
            Self::InvalidEnum(_) => GLFW_INVALID_ENUM,
            Self::InvalidValue(_) => GLFW_INVALID_VALUE,
            Self::OutOfMemory(_) => GLFW_OUT_OF_MEMORY,
            Self::ApiUnavailable(_) => GLFW_API_UNAVAILABLE,
            Self::VersionUnavailable(_) => GLFW_VERSION_UNAVAILABLE,
            Self::PlatformError(_) => GLFW_PLATFORM_ERROR,
            Self::FormatUnavailable(_) => GLFW_FORMAT_UNAVAILABLE,
            Self::Unknown { code, .. } => *code,
        }
    }

    /// The description the library attached to the error
    pub fn message(&self) -> &str {
        match self {
            Self::NotInitialized(m)
            | Self::NoCurrentContext(m)
            | Self::InvalidEnum(m)
            | Self::InvalidValue(m)
            | Self::OutOfMemory(m)
            | Self::ApiUnavailable(m)
            | Self::VersionUnavailable(m)
            | Self::PlatformError(m)
            | Self::FormatUnavailable(m) => m,
            Self::Unknown { message, .. } => message,
        }
    }

    /// Whether context negotiation may move on to the next candidate
    pub fn is_negotiable(&self) -> bool {
        matches!(
            self,
            Self::PlatformError(_)
                | Self::VersionUnavailable(_)
                | Self::InvalidValue(_)
                | Self::InvalidEnum(_)
        )
    }
}

/// Misuse of the binding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UsageError {
    /// A second session was opened while one exists
    #[error("only one session can be active at a time")]
    SessionActive,

    /// `make_current` was called inside a scoped context
    #[error("make_current cannot be used while a scoped context is active on this thread")]
    ContextStackActive,

    /// Scoped contexts were released out of order
    #[error("corrupted context stack")]
    CorruptedContextStack,

    /// No callback kind has this name
    #[error("invalid callback \"{0}\"")]
    UnknownCallback(String),

    /// The window behind a handle no longer exists
    #[error("the window has been closed")]
    WindowClosed,

    /// GLFW was initialized twice on one thread
    #[error("GLFW is already initialized on this thread")]
    AlreadyInitialized,

    /// A frame limit that is zero, negative or not finite
    #[error("frame limit must be a positive, finite rate, got {0}")]
    InvalidFrameLimit(f64),

    /// Window creation failed without reporting why
    #[error("window creation returned no window and no error")]
    NullWindow,
}

/// Crate-wide error
#[derive(Error, Debug)]
pub enum WindowError {
    /// Reported by the library
    #[error(transparent)]
    Glfw(#[from] GlfwError),

    /// Misuse of the binding
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The shared library could not be loaded
    #[error("failed to load GLFW: {0}")]
    Library(String),

    /// Loading or saving settings failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every context candidate was rejected
    #[error("proper OpenGL context not found:{}", format_failures(.0))]
    NoContext(Vec<CandidateFailure>),
}

impl WindowError {
    /// The native failure, if this error carries one
    pub fn as_glfw(&self) -> Option<&GlfwError> {
        match self {
            Self::Glfw(e) => Some(e),
            _ => None,
        }
    }
}

fn format_failures(failures: &[CandidateFailure]) -> String {
    failures.iter().map(|f| format!("\n  {f}")).collect()
}

/// Result of fallible binding operations
pub type WindowResult<T> = Result<T, WindowError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ContextCandidate;

    #[test]
    fn test_every_known_code_round_trips() {
        let codes = [
            GLFW_NOT_INITIALIZED,
            GLFW_NO_CURRENT_CONTEXT,
            GLFW_INVALID_ENUM,
            GLFW_INVALID_VALUE,
            GLFW_OUT_OF_MEMORY,
            GLFW_API_UNAVAILABLE,
            GLFW_VERSION_UNAVAILABLE,
            GLFW_PLATFORM_ERROR,
            GLFW_FORMAT_UNAVAILABLE,
        ];
        for code in codes {
            let error = GlfwError::from_code(code, "boom");
            assert_eq!(error.code(), code);
            assert_eq!(error.message(), "boom");
            assert!(!matches!(error, GlfwError::Unknown { .. }));
        }
    }

    #[test]
    fn test_unknown_code_is_generic() {
        let error = GlfwError::from_code(0x0001_0042, "odd");
        assert_eq!(error, GlfwError::Unknown { code: 0x0001_0042, message: "odd".to_string() });
        assert!(error.to_string().contains("0x10042"));
    }

    #[test]
    fn test_negotiable_kinds() {
        assert!(GlfwError::PlatformError(String::new()).is_negotiable());
        assert!(GlfwError::VersionUnavailable(String::new()).is_negotiable());
        assert!(GlfwError::InvalidValue(String::new()).is_negotiable());
        assert!(GlfwError::InvalidEnum(String::new()).is_negotiable());
        assert!(!GlfwError::OutOfMemory(String::new()).is_negotiable());
        assert!(!GlfwError::NotInitialized(String::new()).is_negotiable());
    }

    #[test]
    fn test_no_context_lists_candidates() {
        let error = WindowError::NoContext(vec![
            CandidateFailure {
                candidate: ContextCandidate::core(3, 3),
                error: GlfwError::VersionUnavailable("3.3".to_string()),
            },
            CandidateFailure {
                candidate: ContextCandidate::compat(3, 0),
                error: GlfwError::PlatformError("no display".to_string()),
            },
        ]);
        let text = error.to_string();
        assert!(text.contains("3.3 CORE"));
        assert!(text.contains("3.0"));
        assert!(text.contains("no display"));
    }
}
