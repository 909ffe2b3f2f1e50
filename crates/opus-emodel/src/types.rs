//! Core types for coefficient queries
//!
//! Enumerations for the three query dimensions, the coefficient record held by
//! the store and the shapes returned to callers.

use crate::error::{EModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `lossFactor` reported when no packet loss pattern is requested
pub const DEFAULT_LOSS_FACTOR: f64 = 1.0;

/// Audio bandwidth class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bandwidth {
    /// Super-wideband
    #[serde(rename = "swb")]
    SuperWideband,
    /// Wideband
    #[serde(rename = "wb")]
    Wideband,
    /// Narrowband
    #[serde(rename = "nb")]
    Narrowband,
}

impl Bandwidth {
    /// Every bandwidth class in canonical order
    pub const ALL: [Bandwidth; 3] = [Self::SuperWideband, Self::Wideband, Self::Narrowband];

    /// Canonical lower-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperWideband => "swb",
            Self::Wideband => "wb",
            Self::Narrowband => "nb",
        }
    }

    /// Recognized names, comma separated
    pub fn names() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bandwidth {
    type Err = EModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "swb" => Ok(Self::SuperWideband),
            "wb" => Ok(Self::Wideband),
            "nb" => Ok(Self::Narrowband),
            _ => Err(EModelError::unsupported_bandwidth(s)),
        }
    }
}

/// Bitrate control mode of the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BitrateMode {
    /// Variable bitrate
    #[serde(rename = "vbr")]
    Variable,
    /// Constant bitrate
    #[serde(rename = "cbr")]
    Constant,
}

impl BitrateMode {
    /// Every mode in canonical order
    pub const ALL: [BitrateMode; 2] = [Self::Variable, Self::Constant];

    /// Canonical lower-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Variable => "vbr",
            Self::Constant => "cbr",
        }
    }

    /// Recognized names, comma separated
    pub fn names() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for BitrateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BitrateMode {
    type Err = EModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "vbr" => Ok(Self::Variable),
            "cbr" => Ok(Self::Constant),
            _ => Err(EModelError::unsupported_mode(s)),
        }
    }
}

/// Packet loss distribution used to pick the Bpl coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossPattern {
    /// Independent (random) packet loss
    Random,
    /// Bursty packet loss
    Bursty,
}

impl LossPattern {
    /// Every loss pattern in canonical order
    pub const ALL: [LossPattern; 2] = [Self::Random, Self::Bursty];

    /// Canonical lower-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Bursty => "bursty",
        }
    }

    /// Recognized names, comma separated
    pub fn names() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for LossPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LossPattern {
    type Err = EModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "bursty" => Ok(Self::Bursty),
            _ => Err(EModelError::unsupported_loss_pattern(s)),
        }
    }
}

/// E-model coefficients for one (bandwidth, mode, bitrate) point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientEntry {
    /// Equipment impairment factor (Ie)
    pub impairment: f64,
    /// Packet-loss robustness factor under random loss (Bpl)
    pub loss_random: f64,
    /// Packet-loss robustness factor under bursty loss (Bpl)
    pub loss_bursty: f64,
}

impl CoefficientEntry {
    /// Create a new entry
    pub const fn new(impairment: f64, loss_random: f64, loss_bursty: f64) -> Self {
        Self {
            impairment,
            loss_random,
            loss_bursty,
        }
    }

    /// Bpl for the given loss pattern, or [`DEFAULT_LOSS_FACTOR`] without one
    pub fn loss_factor(&self, loss: Option<LossPattern>) -> f64 {
        match loss {
            Some(LossPattern::Random) => self.loss_random,
            Some(LossPattern::Bursty) => self.loss_bursty,
            None => DEFAULT_LOSS_FACTOR,
        }
    }
}

/// Query result for a single bitrate
///
/// Serializes with the short E-model names `ie` and `bpl`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetric {
    /// Bitrate in kbps
    pub bitrate: u32,
    /// Equipment impairment factor (Ie)
    #[serde(rename = "ie")]
    pub impairment: f64,
    /// Packet-loss robustness factor (Bpl), 1 in impairment-only queries
    #[serde(rename = "bpl")]
    pub loss_factor: f64,
}

impl QualityMetric {
    /// Shape a metric from a table entry
    pub fn from_entry(bitrate: u32, entry: &CoefficientEntry, loss: Option<LossPattern>) -> Self {
        Self {
            bitrate,
            impairment: entry.impairment,
            loss_factor: entry.loss_factor(loss),
        }
    }
}

/// Descriptor of one (bandwidth, mode) pair carried by the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationInfo {
    /// Bandwidth class
    pub bandwidth: Bandwidth,
    /// Bitrate control mode
    pub mode: BitrateMode,
    /// Available bitrates in kbps, ascending
    pub bitrates: Vec<u32>,
}

/// Validated, normalized query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Bandwidth class
    pub bandwidth: Bandwidth,
    /// Bitrate control mode
    pub mode: BitrateMode,
    /// Loss pattern, `None` for impairment-only queries
    pub loss: Option<LossPattern>,
}
