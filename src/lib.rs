//! # ri-assigner
//!
//! A library for assigning chromatographic retention indices (RI) to analytes
//! from their measured retention times (RT).
//!
//! Retention times depend on the instrument, column and method; retention
//! indices do not. A reference ladder of standard compounds with known
//! indices (typically n-alkanes, where C*n* has index 100·*n*) is measured
//! alongside the samples, and each sample retention time is converted by
//! interpolating between the ladder compounds eluting just before and after it.
//!
//! ## Features
//!
//! - **Kovats method**: linear (temperature-programmed) or logarithmic (isothermal)
//!   (temperature-programmed) interpolation, with extrapolation beyond the ladder
//! - **Partial failure**: rows with missing or invalid retention times yield no
//!   index without aborting the batch
//! - **Tabular I/O**: CSV/TSV (optionally gzip) with column detection by header name
//! - **Comment indices**: read indices stored as `RI=<value>` in free-text comments
//! - **Units**: retention times in ms, s, min or h, compared in seconds
//!
//! ## Example
//!
//! ```rust,no_run
//! use ri_assigner::{ComputationMethod, Data, Kovats, TableOptions, TabularData, TimeUnit};
//! use std::path::Path;
//!
//! let options = TableOptions::default().with_unit(TimeUnit::Minutes);
//! let reference = TabularData::load(Path::new("alkanes.csv"), &options).unwrap();
//! let mut query = TabularData::load(Path::new("peaks.csv"), &options).unwrap();
//!
//! let indices = Kovats::default().compute(&query, &reference);
//! for (rt, ri) in query.retention_times().iter().zip(&indices) {
//!     println!("{rt:?} -> {ri:?}");
//! }
//!
//! query.set_retention_indices(indices).unwrap();
//! query.write(Path::new("peaks_with_ri.csv")).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: The `Data` abstraction, validity rules, column keys and units
//! - [`compute`]: Computation methods (Kovats)
//! - [`parsing`]: CSV/TSV loading and writing
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod compute;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use compute::{ComputationMethod, ComputeError, InterpolationScale, Kovats};
pub use core::data::{
    extract_ri_from_comment, is_valid, CommentField, Data, DataError, RetentionIndex,
    RetentionTime,
};
pub use core::keys::{
    add_possible_comment_keys, add_possible_ri_keys, add_possible_rt_keys,
    possible_comment_keys, possible_ri_keys, possible_rt_keys, ColumnKeys,
};
pub use core::summary::DatasetSummary;
pub use core::unit::TimeUnit;
pub use parsing::table::{TableOptions, TabularData};
