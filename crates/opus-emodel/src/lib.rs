//! # Opus E-model: Ie/Bpl coefficient lookup for Opus
//!
//! This library exposes the ITU-T G.107 E-model coefficients fitted for the
//! Opus codec: the equipment impairment factor (Ie) and the packet-loss
//! robustness factor (Bpl) for every supported bitrate, per audio bandwidth
//! and bitrate control mode. Hosts feed these values into their own R-factor
//! computation.
//!
//! ## Dimensions
//!
//! - **Bandwidth**: `swb` (super-wideband), `wb` (wideband), `nb` (narrowband)
//! - **Mode**: `vbr` (variable bitrate), `cbr` (constant bitrate)
//! - **Loss pattern**: `random`, `bursty`, or none for Ie-only queries (Bpl = 1)
//!
//! ## Usage
//!
//! Typed queries:
//!
//! ```rust
//! use opus_emodel::{Bandwidth, BitrateMode, LossPattern, QueryService};
//!
//! let service = QueryService::new();
//! let metric = service
//!     .metric_at_bitrate(Bandwidth::SuperWideband, BitrateMode::Variable, 25, Some(LossPattern::Random))?
//!     .expect("25 kbps is in the table");
//! assert_eq!(metric.impairment, 20.20905481);
//! assert_eq!(metric.loss_factor, 11.28);
//! # Ok::<(), opus_emodel::EModelError>(())
//! ```
//!
//! Untyped input, validated case-insensitively:
//!
//! ```rust
//! use serde_json::json;
//!
//! let metrics = opus_emodel::validation::list_metrics(Some(&json!("WB")), Some(&json!("cbr")), None)?;
//! assert_eq!(metrics.len(), 4);
//! assert!(metrics.iter().all(|m| m.loss_factor == 1.0));
//! # Ok::<(), opus_emodel::EModelError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod query;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{EModelError, ErrorCategory, Result};
pub use query::QueryService;
pub use store::CoefficientStore;
pub use types::{
    Bandwidth, BitrateMode, CoefficientEntry, ConfigurationInfo, LossPattern, QualityMetric,
    Selection, DEFAULT_LOSS_FACTOR,
};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging and verify the coefficient table
///
/// Safe to call multiple times; an already-installed subscriber is kept.
///
/// # Errors
///
/// Returns [`EModelError::ConfigurationNotFound`] for the first pair the
/// shipped table does not carry.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let store = CoefficientStore::global();
    let service = QueryService::with_store(store);
    for bandwidth in Bandwidth::ALL {
        for mode in BitrateMode::ALL {
            service.ensure_configured(bandwidth, mode)?;
        }
    }
    if !store.is_consistent() {
        tracing::warn!("Coefficient table has unsorted bitrates or non-positive coefficients");
    }

    tracing::info!("Opus E-model v{} initialized", VERSION);
    tracing::debug!("{} coefficient rows loaded", store.len());

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    let store = CoefficientStore::global();
    LibraryInfo {
        version: VERSION,
        configurations: store.pairs().count(),
        entries: store.len(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Number of (bandwidth, mode) pairs in the table
    pub configurations: usize,
    /// Number of (pair, bitrate) rows in the table
    pub entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
        assert!(init().is_ok());
    }

    #[test]
    fn test_info() {
        let info = info();
        assert_eq!(info.version, VERSION);
        assert_eq!(info.configurations, 6);
        assert_eq!(info.entries, 37);
    }

    #[test]
    fn test_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoefficientStore>();
        assert_send_sync::<QueryService>();
        assert_send_sync::<QualityMetric>();
        assert_send_sync::<ConfigurationInfo>();
        assert_send_sync::<EModelError>();
    }
}
