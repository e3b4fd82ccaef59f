//! Core data types for retention index assignment.
//!
//! - [`Data`](data::Data): a dataset viewed as aligned retention time,
//!   retention index and comment sequences
//! - [`ColumnKeys`](keys::ColumnKeys): column-name vocabularies and the
//!   process-wide key registry
//! - [`TimeUnit`](unit::TimeUnit): units retention times are recorded in
//! - [`DatasetSummary`](summary::DatasetSummary): counts and ranges for display
//!
//! ## Missing values
//!
//! Missing or invalid retention times and indices are `None`, never a
//! sentinel such as NaN. A retention time is valid when it is present,
//! finite and non-negative (see [`is_valid`](data::is_valid)).

pub mod data;
pub mod keys;
pub mod summary;
pub mod unit;
