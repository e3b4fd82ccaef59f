use regex::Regex;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::unit::TimeUnit;

/// A retention time in seconds, `None` when missing or invalid
pub type RetentionTime = Option<f64>;

/// A retention index, `None` when unknown or not computable
pub type RetentionIndex = Option<f64>;

/// A free-text comment cell
pub type CommentField = Option<String>;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid table: {0}")]
    Csv(#[from] csv::Error),

    #[error("File extension must be 'csv' or 'tsv'.")]
    UnsupportedFormat(String),

    #[error("No {0} column found")]
    MissingColumn(&'static str),

    #[error("Expected {expected} retention indices but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Too many rows: {0} exceeds maximum allowed (1000000)")]
    TooManyRows(usize),
}

/// A loaded tabular dataset viewed as aligned retention time, retention
/// index and comment sequences.
///
/// Implementations guarantee that all three sequences have the same length
/// and that row `i` of each refers to the same entry.
pub trait Data {
    /// Path the data was originally loaded from
    fn filename(&self) -> &str;

    /// Unit the retention times were recorded in
    fn unit(&self) -> TimeUnit;

    /// Retention times in seconds, one per row
    fn retention_times(&self) -> &[RetentionTime];

    /// Current retention indices, one per row
    fn retention_indices(&self) -> &[RetentionIndex];

    /// Replace all retention indices.
    ///
    /// # Errors
    ///
    /// Returns `DataError::LengthMismatch` if `values` does not have one
    /// entry per row.
    fn set_retention_indices(&mut self, values: Vec<RetentionIndex>) -> Result<(), DataError>;

    /// Comment cells, one per row
    fn comment(&self) -> &[CommentField];

    /// Store the current content at `path`.
    ///
    /// # Errors
    ///
    /// Returns `DataError::UnsupportedFormat` if the destination extension is
    /// not supported, or an IO/CSV error if writing fails.
    fn write(&self, path: &Path) -> Result<(), DataError>;

    /// Number of rows
    fn len(&self) -> usize {
        self.retention_times().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether a retention time is usable: present, finite and non-negative.
///
/// # Examples
///
/// ```
/// use ri_assigner::core::data::is_valid;
///
/// assert!(is_valid(Some(0.0)));
/// assert!(is_valid(Some(312.5)));
/// assert!(!is_valid(None));
/// assert!(!is_valid(Some(-1.0)));
/// assert!(!is_valid(Some(f64::NAN)));
/// ```
#[must_use]
pub fn is_valid(rt: RetentionTime) -> bool {
    rt.is_some_and(|value| value.is_finite() && value >= 0.0)
}

/// Extract retention indices written as `label=<digits>` inside comments.
///
/// A row yields a value only when its comment contains `label` as a whole
/// word and the whole-word pattern `label=<digits>` is present; every other
/// row is `None`. The output has one entry per input comment.
///
/// # Examples
///
/// ```
/// use ri_assigner::core::data::extract_ri_from_comment;
///
/// let comments = vec![Some("RI=1234 confirmed"), Some("no index"), None];
/// let ris = extract_ri_from_comment(&comments, "RI");
/// assert_eq!(ris, vec![Some(1234.0), None, None]);
/// ```
#[must_use]
pub fn extract_ri_from_comment<S: AsRef<str>>(
    comments: &[Option<S>],
    label: &str,
) -> Vec<RetentionIndex> {
    let (token, value) = match comment_patterns(label) {
        Ok(patterns) => patterns,
        Err(e) => {
            warn!(label, error = %e, "Cannot build comment pattern, no indices extracted");
            return vec![None; comments.len()];
        }
    };

    comments
        .iter()
        .map(|comment| {
            let text = comment.as_ref()?.as_ref();
            if !token.is_match(text) {
                return None;
            }
            value
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|digits| digits.as_str().parse::<f64>().ok())
        })
        .collect()
}

/// Whole-word matchers for `label` and for `label=<digits>`
fn comment_patterns(label: &str) -> Result<(Regex, Regex), regex::Error> {
    let escaped = regex::escape(label);
    let token = Regex::new(&format!(r"\b{escaped}\b"))?;
    let value = Regex::new(&format!(r"\b{escaped}=([0-9]+)\b"))?;
    Ok((token, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(is_valid(Some(0.0)));
        assert!(is_valid(Some(1.5)));
        assert!(!is_valid(None));
        assert!(!is_valid(Some(-0.001)));
        assert!(!is_valid(Some(f64::INFINITY)));
        assert!(!is_valid(Some(f64::NAN)));
    }

    #[test]
    fn test_extract_basic() {
        let comments = vec![
            Some("RI=812".to_string()),
            Some("note".to_string()),
            Some("RI=1005 confirmed".to_string()),
            None,
        ];
        assert_eq!(
            extract_ri_from_comment(&comments, "RI"),
            vec![Some(812.0), None, Some(1005.0), None]
        );
    }

    #[test]
    fn test_extract_requires_whole_word_label() {
        let comments = vec![Some("SRI=900"), Some("RIX=900"), Some("xRI=900 RI=901")];
        assert_eq!(
            extract_ri_from_comment(&comments, "RI"),
            vec![None, None, Some(901.0)]
        );
    }

    #[test]
    fn test_extract_label_without_value() {
        let comments = vec![Some("RI unknown"), Some("RI = 900"), Some("RI=abc")];
        assert_eq!(
            extract_ri_from_comment(&comments, "RI"),
            vec![None, None, None]
        );
    }

    #[test]
    fn test_extract_digits_stop_at_word_boundary() {
        // "1234.5": the digits before the dot form a whole word
        let comments = vec![Some("RI=1234.5"), Some("RI=12ab")];
        assert_eq!(
            extract_ri_from_comment(&comments, "RI"),
            vec![Some(1234.0), None]
        );
    }

    #[test]
    fn test_extract_label_is_literal() {
        let comments = vec![Some("R.I=700"), Some("RXI=700")];
        assert_eq!(
            extract_ri_from_comment(&comments, "R.I"),
            vec![Some(700.0), None]
        );
    }

    #[test]
    fn test_extract_empty_input() {
        let comments: Vec<Option<&str>> = Vec::new();
        assert!(extract_ri_from_comment(&comments, "RI").is_empty());
    }
}
