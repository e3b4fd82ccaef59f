//! Loaders and writers for delimited retention data tables.
//!
//! - **CSV** (`.csv`) and **TSV** (`.tsv`) files, optionally gzip-compressed
//!   (`.csv.gz`, `.tsv.gz`)
//!
//! Columns are located by header name using the vocabularies in
//! [`ColumnKeys`](crate::core::keys::ColumnKeys):
//!
//! | Role | Required | Default names |
//! |------|----------|---------------|
//! | Retention time | Yes | `RT`, `rt`, `retention_time`, `time`, ... |
//! | Retention index | No | `RI`, `ri`, `retention_index`, `kovats`, ... |
//! | Comment | No | `comment`, `Comment`, `comments`, ... |
//!
//! A table without a retention index column gains a `retention_index`
//! column when written.

pub mod format;
pub mod table;
