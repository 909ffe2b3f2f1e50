//! Static E-model coefficient table for Opus
//!
//! Ie and Bpl values curve-fitted to subjective listening tests, one row per
//! supported bitrate (kbps). Rows are kept in ascending bitrate order so that
//! lookups can binary search and listings need no sorting.

use crate::types::{Bandwidth, BitrateMode, CoefficientEntry};

/// One table row: bitrate in kbps and its coefficients
pub type Row = (u32, CoefficientEntry);

const fn row(bitrate: u32, ie: f64, bpl_random: f64, bpl_bursty: f64) -> Row {
    (bitrate, CoefficientEntry::new(ie, bpl_random, bpl_bursty))
}

/// Super-wideband, variable bitrate
pub static SWB_VBR: [Row; 11] = [
    row(14, 38.06, 16.51, 9.13),
    row(15, 34.12, 15.0, 7.9),
    row(16, 30.16302131, 11.83, 10.06),
    row(19, 23.80720462, 10.67, 8.92),
    row(22, 20.22332357, 10.47, 8.57),
    row(25, 20.20905481, 11.28, 9.18),
    row(28, 18.47734739, 10.63, 8.91),
    row(31, 16.82867498, 10.44, 8.82),
    row(34, 14.75893036, 10.12, 8.54),
    row(37, 12.07782849, 10.38, 8.30),
    row(40, 10.66596559, 9.79, 8.04),
];

/// Super-wideband, constant bitrate
pub static SWB_CBR: [Row; 9] = [
    row(16, 36.88067115, 13.30, 10.80),
    row(19, 29.58016175, 10.74, 8.93),
    row(22, 23.38003477, 10.01, 8.46),
    row(25, 22.64371205, 10.57, 8.74),
    row(28, 23.65242842, 11.67, 9.98),
    row(31, 21.74245539, 11.51, 9.58),
    row(34, 20.62029481, 11.78, 9.69),
    row(37, 16.22868955, 10.62, 8.99),
    row(40, 15.89845959, 11.35, 9.37),
];

/// Wideband, variable bitrate
pub static WB_VBR: [Row; 3] = [
    row(11, 28.41322299, 23.93979569, 20.11987374),
    row(12, 23.29505705, 22.2151863, 18.90376092),
    row(13, 19.958882, 19.49608704, 16.91955649),
];

/// Wideband, constant bitrate
pub static WB_CBR: [Row; 4] = [
    row(12, 29.76435108, 24.80947978, 20.77703993),
    row(13, 26.16108167, 23.0047189, 19.372252),
    row(14, 20.77194577, 17.5623101, 15.84824707),
    row(15, 18.06274989, 18.73740804, 16.09740659),
];

/// Narrowband, variable bitrate
pub static NB_VBR: [Row; 4] = [
    row(6, 23.00233478, 24.5644848, 15.35503534),
    row(7, 21.25545861, 22.45885046, 14.42549516),
    row(8, 16.02443357, 20.25866692, 13.47963008),
    row(9, 11.73674352, 18.90829837, 12.44222463),
];

/// Narrowband, constant bitrate
pub static NB_CBR: [Row; 6] = [
    row(6, 46.26834316, 8.939710714, 5.655040056),
    row(7, 31.73480382, 18.17914283, 11.76446295),
    row(8, 19.24547807, 15.12823436, 10.1315844),
    row(9, 13.20879771, 17.23921027, 11.36427122),
    row(10, 6.197366255, 15.32972957, 10.47043983),
    row(11, 2.030115291, 15.95164784, 10.73313709),
];

static GLOBAL: CoefficientStore = CoefficientStore::from_tables([
    [&SWB_VBR, &SWB_CBR],
    [&WB_VBR, &WB_CBR],
    [&NB_VBR, &NB_CBR],
]);

/// Read-only coefficient table keyed by bandwidth, mode and bitrate
///
/// Indexed `[bandwidth][mode]` in the canonical order of [`Bandwidth::ALL`]
/// and [`BitrateMode::ALL`]. An empty slice marks a pair the table does not
/// carry.
#[derive(Debug)]
pub struct CoefficientStore {
    tables: [[&'static [Row]; 2]; 3],
}

impl CoefficientStore {
    /// Build a store from per-pair tables; each table must be sorted by bitrate
    pub const fn from_tables(tables: [[&'static [Row]; 2]; 3]) -> Self {
        Self { tables }
    }

    /// The shipped Opus coefficient table
    pub fn global() -> &'static CoefficientStore {
        &GLOBAL
    }

    /// All rows for a pair, or `None` if the table carries none
    pub fn configuration(
        &self,
        bandwidth: Bandwidth,
        mode: BitrateMode,
    ) -> Option<&'static [Row]> {
        let rows = self.tables[bandwidth as usize][mode as usize];
        (!rows.is_empty()).then_some(rows)
    }

    /// Coefficients for one bitrate of a pair
    pub fn entry(
        &self,
        bandwidth: Bandwidth,
        mode: BitrateMode,
        bitrate: u32,
    ) -> Option<&'static CoefficientEntry> {
        let rows = self.configuration(bandwidth, mode)?;
        rows.binary_search_by_key(&bitrate, |(b, _)| *b)
            .ok()
            .map(|idx| &rows[idx].1)
    }

    /// Every populated pair in canonical order
    pub fn pairs(&self) -> impl Iterator<Item = (Bandwidth, BitrateMode, &'static [Row])> + '_ {
        Bandwidth::ALL.into_iter().flat_map(move |bandwidth| {
            BitrateMode::ALL.into_iter().filter_map(move |mode| {
                self.configuration(bandwidth, mode)
                    .map(|rows| (bandwidth, mode, rows))
            })
        })
    }

    /// Number of (pair, bitrate) rows in the table
    pub fn len(&self) -> usize {
        self.pairs().map(|(_, _, rows)| rows.len()).sum()
    }

    /// True when no pair carries any rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that bitrates ascend strictly and coefficients are positive
    pub fn is_consistent(&self) -> bool {
        self.pairs().all(|(_, _, rows)| {
            rows.windows(2).all(|w| w[0].0 < w[1].0)
                && rows.iter().all(|(_, e)| {
                    [e.impairment, e.loss_random, e.loss_bursty]
                        .iter()
                        .all(|v| v.is_finite() && *v > 0.0)
                })
        })
    }
}
