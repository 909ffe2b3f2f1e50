//! Typed queries over the coefficient table
//!
//! [`QueryService`] takes already-validated enumerations and shapes table rows
//! into [`QualityMetric`]s. Every call builds a fresh, owned result.

use crate::error::{EModelError, Result};
use crate::store::{CoefficientStore, Row};
use crate::types::{Bandwidth, BitrateMode, ConfigurationInfo, LossPattern, QualityMetric};
use tracing::{debug, trace};

/// Query front-end bound to a coefficient store
#[derive(Debug, Clone, Copy)]
pub struct QueryService {
    store: &'static CoefficientStore,
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryService {
    /// Service over the shipped table
    pub fn new() -> Self {
        Self::with_store(CoefficientStore::global())
    }

    /// Service over a caller-provided table
    pub fn with_store(store: &'static CoefficientStore) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &'static CoefficientStore {
        self.store
    }

    /// Rows for a pair, failing if the table carries none
    pub fn ensure_configured(
        &self,
        bandwidth: Bandwidth,
        mode: BitrateMode,
    ) -> Result<&'static [Row]> {
        self.store
            .configuration(bandwidth, mode)
            .ok_or_else(|| EModelError::configuration_not_found(bandwidth, mode))
    }

    /// Metrics for every bitrate of a pair, ascending by bitrate
    pub fn list_metrics(
        &self,
        bandwidth: Bandwidth,
        mode: BitrateMode,
        loss: Option<LossPattern>,
    ) -> Result<Vec<QualityMetric>> {
        let rows = self.ensure_configured(bandwidth, mode)?;
        let metrics: Vec<_> = rows
            .iter()
            .map(|(bitrate, entry)| QualityMetric::from_entry(*bitrate, entry, loss))
            .collect();

        trace!(
            "Listed {} metrics for {}/{} (loss: {:?})",
            metrics.len(),
            bandwidth,
            mode,
            loss
        );
        Ok(metrics)
    }

    /// Metric for one bitrate, `Ok(None)` if the pair has no such bitrate
    pub fn metric_at_bitrate(
        &self,
        bandwidth: Bandwidth,
        mode: BitrateMode,
        bitrate: u32,
        loss: Option<LossPattern>,
    ) -> Result<Option<QualityMetric>> {
        self.ensure_configured(bandwidth, mode)?;

        let metric = self
            .store
            .entry(bandwidth, mode, bitrate)
            .map(|entry| QualityMetric::from_entry(bitrate, entry, loss));

        if metric.is_none() {
            debug!("No coefficients for {}/{} at {} kbps", bandwidth, mode, bitrate);
        }
        Ok(metric)
    }

    /// Bitrates available for a pair, ascending
    pub fn supported_bitrates(&self, bandwidth: Bandwidth, mode: BitrateMode) -> Result<Vec<u32>> {
        let rows = self.ensure_configured(bandwidth, mode)?;
        Ok(rows.iter().map(|(bitrate, _)| *bitrate).collect())
    }

    /// One descriptor per populated pair
    pub fn available_configurations(&self) -> Vec<ConfigurationInfo> {
        self.store
            .pairs()
            .map(|(bandwidth, mode, rows)| ConfigurationInfo {
                bandwidth,
                mode,
                bitrates: rows.iter().map(|(bitrate, _)| *bitrate).collect(),
            })
            .collect()
    }
}
