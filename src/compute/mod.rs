//! Retention index computation methods.
//!
//! A [`ComputationMethod`] maps every retention time of a query dataset to a
//! retention index using a reference ladder of known (RT, RI) pairs:
//!
//! - [`Kovats`]: piecewise interpolation between bracketing reference points,
//!   on a linear (temperature-programmed) or logarithmic (isothermal) scale
//!
//! ## Example
//!
//! ```rust,no_run
//! use ri_assigner::compute::{ComputationMethod, Kovats};
//! use ri_assigner::core::data::Data;
//! use ri_assigner::parsing::table::{TableOptions, TabularData};
//! use ri_assigner::core::unit::TimeUnit;
//! use std::path::Path;
//!
//! let options = TableOptions::default().with_unit(TimeUnit::Minutes);
//! let reference = TabularData::load(Path::new("alkanes.csv"), &options).unwrap();
//! let mut query = TabularData::load(Path::new("peaks.csv"), &options).unwrap();
//!
//! let indices = Kovats::default().compute(&query, &reference);
//! query.set_retention_indices(indices).unwrap();
//! query.write(Path::new("peaks_with_ri.csv")).unwrap();
//! ```

use thiserror::Error;

use crate::core::data::{Data, RetentionIndex};

pub mod kovats;

pub use kovats::{InterpolationScale, Kovats};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComputeError {
    #[error("Query data is 'None'.")]
    MissingQuery,

    #[error("Reference data is 'None'.")]
    MissingReference,
}

/// Strategy for assigning retention indices to a query dataset
pub trait ComputationMethod {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Compute one retention index per row of `query`, in row order.
    ///
    /// Rows whose retention index cannot be determined are `None`; a bad row
    /// never affects the others. Neither argument is modified.
    fn compute(&self, query: &dyn Data, reference: &dyn Data) -> Vec<RetentionIndex>;

    /// Like [`compute`](Self::compute), for callers whose inputs may be absent.
    ///
    /// # Errors
    ///
    /// Returns `ComputeError::MissingQuery` or `ComputeError::MissingReference`
    /// naming the first absent argument.
    fn compute_checked(
        &self,
        query: Option<&dyn Data>,
        reference: Option<&dyn Data>,
    ) -> Result<Vec<RetentionIndex>, ComputeError> {
        let (query, reference) = check_data_args(query, reference)?;
        Ok(self.compute(query, reference))
    }
}

/// Ensure both datasets are present
///
/// # Errors
///
/// Returns `ComputeError::MissingQuery` if `query` is `None`, otherwise
/// `ComputeError::MissingReference` if `reference` is `None`.
pub fn check_data_args<'a>(
    query: Option<&'a dyn Data>,
    reference: Option<&'a dyn Data>,
) -> Result<(&'a dyn Data, &'a dyn Data), ComputeError> {
    let query = query.ok_or(ComputeError::MissingQuery)?;
    let reference = reference.ok_or(ComputeError::MissingReference)?;
    Ok((query, reference))
}
