//! Centralized validation and helper functions.

/// Maximum number of rows allowed in a single table (DOS protection)
pub const MAX_ROWS: usize = 1_000_000;

/// Check if adding another row would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new row.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_ROWS {
        Some(format!(
            "Too many rows: adding another would exceed maximum of {MAX_ROWS}"
        ))
    } else {
        None
    }
}

/// Parse a numeric table cell. Empty cells are `None` without complaint.
///
/// # Errors
///
/// Returns the trimmed cell text if it is not empty and not a number.
pub fn parse_numeric_cell(cell: &str) -> Result<Option<f64>, &str> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>().map(Some).map_err(|_| cell)
}
