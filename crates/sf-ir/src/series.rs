//! Data series to be sonified.

use alloc::string::String;
use alloc::vec::Vec;

/// One ordered numeric data series, as delivered by the data-acquisition
/// layer.
///
/// Entries the acquisition layer could not parse arrive as `None` and are
/// substituted with 0.0 when resolved — the substitution keeps the
/// sequence length (and therefore the playback length) stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    /// Human-readable label (e.g. a region name). Display only.
    pub label: String,
    /// Raw amounts in playback order; `None` marks a missing entry.
    pub amounts: Vec<Option<f64>>,
}

impl Series {
    pub fn new(label: impl Into<String>, amounts: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            amounts,
        }
    }

    /// Resolve missing entries to 0.0, preserving order and length.
    pub fn resolve(&self) -> Vec<f64> {
        self.amounts.iter().map(|a| a.unwrap_or(0.0)).collect()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}
