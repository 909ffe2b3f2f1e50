//! Error handling for coefficient queries
//!
//! Every failure is a usage error: the caller passed a parameter of the wrong
//! shape, a value outside the recognized set, or asked for a pair the table
//! does not carry. None of them are transient, so none are recoverable by
//! retrying with the same input.

use crate::types::{Bandwidth, BitrateMode, LossPattern};
use std::fmt;
use thiserror::Error;

/// Result type alias for coefficient queries
pub type Result<T> = std::result::Result<T, EModelError>;

/// Error type for coefficient queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EModelError {
    /// Bandwidth was absent or not textual
    #[error("Bandwidth parameter is required and must be a string")]
    MissingBandwidth,

    /// Mode was absent or not textual
    #[error("Mode parameter is required and must be a string")]
    MissingMode,

    /// Loss pattern was supplied but is not textual
    #[error("Loss type parameter must be a string")]
    InvalidLossTypeShape,

    /// Bandwidth text is not one of the recognized classes
    #[error("Invalid bandwidth: {value}. Must be one of: {}", Bandwidth::names())]
    UnsupportedBandwidth {
        /// Text as supplied by the caller
        value: String,
    },

    /// Mode text is not one of the recognized modes
    #[error("Invalid mode: {value}. Must be one of: {}", BitrateMode::names())]
    UnsupportedMode {
        /// Text as supplied by the caller
        value: String,
    },

    /// Loss pattern text is not one of the recognized patterns
    #[error("Invalid loss type: {value}. Must be one of: {} or undefined", LossPattern::names())]
    UnsupportedLossPattern {
        /// Text as supplied by the caller
        value: String,
    },

    /// Recognized pair without table entries (incomplete table)
    #[error("No configuration found for bandwidth: {bandwidth}, mode: {mode}")]
    ConfigurationNotFound {
        /// Requested bandwidth
        bandwidth: Bandwidth,
        /// Requested mode
        mode: BitrateMode,
    },
}

impl EModelError {
    /// Create a new unsupported bandwidth error
    pub fn unsupported_bandwidth(value: impl Into<String>) -> Self {
        Self::UnsupportedBandwidth {
            value: value.into(),
        }
    }

    /// Create a new unsupported mode error
    pub fn unsupported_mode(value: impl Into<String>) -> Self {
        Self::UnsupportedMode {
            value: value.into(),
        }
    }

    /// Create a new unsupported loss pattern error
    pub fn unsupported_loss_pattern(value: impl Into<String>) -> Self {
        Self::UnsupportedLossPattern {
            value: value.into(),
        }
    }

    /// Create a new configuration not found error
    pub fn configuration_not_found(bandwidth: Bandwidth, mode: BitrateMode) -> Self {
        Self::ConfigurationNotFound { bandwidth, mode }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingBandwidth => "INVALID_BANDWIDTH",
            Self::MissingMode => "INVALID_MODE",
            Self::InvalidLossTypeShape => "INVALID_LOSS_TYPE",
            Self::UnsupportedBandwidth { .. } => "UNSUPPORTED_BANDWIDTH",
            Self::UnsupportedMode { .. } => "UNSUPPORTED_MODE",
            Self::UnsupportedLossPattern { .. } => "UNSUPPORTED_LOSS_TYPE",
            Self::ConfigurationNotFound { .. } => "CONFIGURATION_NOT_FOUND",
        }
    }

    /// Check if this error is recoverable
    ///
    /// Always `false`: the same input fails the same way every time.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingBandwidth | Self::MissingMode | Self::InvalidLossTypeShape => {
                ErrorCategory::Shape
            }

            Self::UnsupportedBandwidth { .. }
            | Self::UnsupportedMode { .. }
            | Self::UnsupportedLossPattern { .. } => ErrorCategory::Value,

            Self::ConfigurationNotFound { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Required parameter missing or of the wrong kind
    Shape,
    /// Parameter present but not a recognized value
    Value,
    /// Recognized pair with no backing data
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape => write!(f, "Shape"),
            Self::Value => write!(f, "Value"),
            Self::Configuration => write!(f, "Configuration"),
        }
    }
}
