use serde::Serialize;

use crate::core::data::{is_valid, Data};
use crate::core::unit::TimeUnit;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Overview of a loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub filename: String,
    pub unit: TimeUnit,
    pub rows: usize,
    pub valid_retention_times: usize,
    pub retention_indices: usize,
    pub comments: usize,

    /// Smallest and largest valid retention time, in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rt_range: Option<(f64, f64)>,
}

impl DatasetSummary {
    #[must_use]
    pub fn from_data(data: &dyn Data) -> Self {
        let valid: Vec<f64> = data
            .retention_times()
            .iter()
            .copied()
            .filter(|rt| is_valid(*rt))
            .flatten()
            .collect();

        let rt_range = valid.iter().copied().fold(None, |range, rt| match range {
            None => Some((rt, rt)),
            Some((lo, hi)) => Some((f64::min(lo, rt), f64::max(hi, rt))),
        });

        Self {
            filename: data.filename().to_string(),
            unit: data.unit(),
            rows: data.len(),
            valid_retention_times: valid.len(),
            retention_indices: data.retention_indices().iter().flatten().count(),
            comments: data.comment().iter().flatten().count(),
            rt_range,
        }
    }

    /// Fraction of rows carrying a retention index
    #[must_use]
    pub fn ri_coverage(&self) -> f64 {
        if self.rows == 0 {
            return 0.0;
        }
        count_to_f64(self.retention_indices) / count_to_f64(self.rows)
    }
}
