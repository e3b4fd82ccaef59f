use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::core::data::{
    extract_ri_from_comment, is_valid, CommentField, Data, DataError, RetentionIndex,
    RetentionTime,
};
use crate::core::keys::ColumnKeys;
use crate::core::unit::TimeUnit;
use crate::parsing::format::TableFormat;
use crate::utils::validation::{check_row_limit, parse_numeric_cell};

/// Header given to the retention index column when a table has none
pub const DEFAULT_RI_COLUMN: &str = "retention_index";

/// How to interpret a table while loading it
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Unit of the retention time column
    pub unit: TimeUnit,

    /// Read retention indices from `label=<digits>` in the comment column
    /// when the table has no retention index column
    pub ri_comment_label: Option<String>,

    /// Column-name vocabulary, snapshot of the global registry by default
    pub keys: ColumnKeys,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            unit: TimeUnit::default(),
            ri_comment_label: None,
            keys: ColumnKeys::global(),
        }
    }
}

impl TableOptions {
    #[must_use]
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn with_ri_comment_label(mut self, label: impl Into<String>) -> Self {
        self.ri_comment_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_keys(mut self, keys: ColumnKeys) -> Self {
        self.keys = keys;
        self
    }
}

/// A delimited table holding retention times and, optionally, retention
/// indices and comments.
///
/// All cells are kept verbatim so that writing reproduces the source table
/// with only the retention index column updated.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularData {
    filename: String,
    unit: TimeUnit,
    headers: Vec<String>,
    records: Vec<Vec<String>>,
    rt_column: usize,
    ri_column: Option<usize>,
    comment_column: Option<usize>,
    retention_times: Vec<RetentionTime>,
    retention_indices: Vec<RetentionIndex>,
    comments: Vec<CommentField>,
}

impl TabularData {
    /// Load a table from disk, detecting the format from the extension.
    ///
    /// # Errors
    ///
    /// Returns `DataError::UnsupportedFormat` for unknown extensions,
    /// `DataError::Io` if the file cannot be read, `DataError::Csv` for
    /// malformed content, `DataError::MissingColumn` if no retention time
    /// column is recognized, or `DataError::TooManyRows` if the row limit is
    /// exceeded.
    pub fn load(path: &Path, options: &TableOptions) -> Result<Self, DataError> {
        let format = TableFormat::from_path(path)?;
        let file = File::open(path)?;

        let reader: Box<dyn Read> = if format.gzip {
            Box::new(GzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        let data = Self::from_reader(reader, path.display().to_string(), format, options)?;
        info!(
            file = %path.display(),
            rows = data.len(),
            rt_column = data.rt_column_name(),
            "Loaded table"
        );
        Ok(data)
    }

    /// Parse a table from in-memory text
    ///
    /// # Errors
    ///
    /// Same as [`TabularData::from_reader`].
    pub fn from_text(
        text: &str,
        format: TableFormat,
        options: &TableOptions,
    ) -> Result<Self, DataError> {
        Self::from_reader(text.as_bytes(), "-", format, options)
    }

    /// Parse an uncompressed table from any reader. `filename` is recorded
    /// as the data's origin.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Csv` for malformed content,
    /// `DataError::MissingColumn` if no retention time column is recognized,
    /// or `DataError::TooManyRows` if the row limit is exceeded.
    pub fn from_reader<R: Read>(
        reader: R,
        filename: impl Into<String>,
        format: TableFormat,
        options: &TableOptions,
    ) -> Result<Self, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(format.delimiter.as_byte())
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(ToString::to_string)
            .collect();

        let rt_column = options
            .keys
            .find_rt_column(&headers)
            .ok_or(DataError::MissingColumn("retention time"))?;
        // A header listed under both roles stays the retention time column
        let ri_column = options.keys.find_ri_column_besides(&headers, rt_column);
        let comment_column = options.keys.find_comment_column(&headers);

        let mut records = Vec::new();
        for record in csv_reader.records() {
            if let Some(message) = check_row_limit(records.len()) {
                warn!("{message}");
                return Err(DataError::TooManyRows(records.len()));
            }

            let mut cells: Vec<String> = record?.iter().map(ToString::to_string).collect();
            if cells.len() < headers.len() {
                cells.resize(headers.len(), String::new());
            }
            records.push(cells);
        }

        let retention_times = records
            .iter()
            .enumerate()
            .map(|(row, cells)| parse_retention_time(&cells[rt_column], row, options.unit))
            .collect();

        let comments: Vec<CommentField> = match comment_column {
            Some(column) => records
                .iter()
                .map(|cells| {
                    let cell = &cells[column];
                    (!cell.trim().is_empty()).then(|| cell.clone())
                })
                .collect(),
            None => vec![None; records.len()],
        };

        let retention_indices = match (ri_column, &options.ri_comment_label) {
            (Some(column), _) => records
                .iter()
                .enumerate()
                .map(|(row, cells)| parse_retention_index(&cells[column], row))
                .collect(),
            (None, Some(label)) => {
                if comment_column.is_none() {
                    warn!(label = %label, "No comment column to read retention indices from");
                }
                extract_ri_from_comment(&comments, label)
            }
            (None, None) => vec![None; records.len()],
        };

        Ok(Self {
            filename: filename.into(),
            unit: options.unit,
            headers,
            records,
            rt_column,
            ri_column,
            comment_column,
            retention_times,
            retention_indices,
            comments,
        })
    }

    /// Column headers as found in the source
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rt_column_name(&self) -> &str {
        &self.headers[self.rt_column]
    }

    /// Name of the retention index column, [`DEFAULT_RI_COLUMN`] when it is
    /// added on write
    #[must_use]
    pub fn ri_column_name(&self) -> &str {
        self.ri_column
            .map_or(DEFAULT_RI_COLUMN, |column| self.headers[column].as_str())
    }

    #[must_use]
    pub fn comment_column_name(&self) -> Option<&str> {
        self.comment_column
            .map(|column| self.headers[column].as_str())
    }

    fn output_headers(&self) -> Vec<&str> {
        let mut headers: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        if self.ri_column.is_none() {
            headers.push(DEFAULT_RI_COLUMN);
        }
        headers
    }

    fn output_record(&self, row: usize) -> Vec<String> {
        let mut cells = self.records[row].clone();
        let ri = self.retention_indices[row]
            .map(|value| value.to_string())
            .unwrap_or_default();

        match self.ri_column {
            Some(column) => cells[column] = ri,
            None => {
                cells.resize(self.headers.len(), String::new());
                cells.push(ri);
            }
        }
        cells
    }

    fn write_records<W: Write>(&self, sink: W, format: TableFormat) -> Result<W, DataError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(format.delimiter.as_byte())
            .flexible(true)
            .from_writer(sink);

        writer.write_record(self.output_headers())?;
        for row in 0..self.records.len() {
            writer.write_record(self.output_record(row))?;
        }

        writer
            .into_inner()
            .map_err(|e| DataError::Io(e.into_error()))
    }
}

fn parse_retention_time(cell: &str, row: usize, unit: TimeUnit) -> RetentionTime {
    match parse_numeric_cell(cell) {
        Ok(Some(value)) if is_valid(Some(value)) => Some(unit.to_seconds(value)),
        Ok(Some(value)) => {
            debug!(row, value, "Invalid retention time, treating as missing");
            None
        }
        Ok(None) => None,
        Err(text) => {
            debug!(row, value = text, "Unparsable retention time, treating as missing");
            None
        }
    }
}

fn parse_retention_index(cell: &str, row: usize) -> RetentionIndex {
    match parse_numeric_cell(cell) {
        Ok(value) => value.filter(|ri| ri.is_finite()),
        Err(text) => {
            debug!(row, value = text, "Unparsable retention index, treating as missing");
            None
        }
    }
}

impl Data for TabularData {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn unit(&self) -> TimeUnit {
        self.unit
    }

    fn retention_times(&self) -> &[RetentionTime] {
        &self.retention_times
    }

    fn retention_indices(&self) -> &[RetentionIndex] {
        &self.retention_indices
    }

    fn set_retention_indices(&mut self, values: Vec<RetentionIndex>) -> Result<(), DataError> {
        if values.len() != self.records.len() {
            return Err(DataError::LengthMismatch {
                expected: self.records.len(),
                actual: values.len(),
            });
        }
        self.retention_indices = values;
        Ok(())
    }

    fn comment(&self) -> &[CommentField] {
        &self.comments
    }

    fn write(&self, path: &Path) -> Result<(), DataError> {
        let format = TableFormat::from_path(path)?;

        // Write next to the destination, then move into place
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;

        if format.gzip {
            let encoder = self.write_records(
                GzEncoder::new(temp.as_file_mut(), Compression::default()),
                format,
            )?;
            encoder.finish()?;
        } else {
            let mut writer = self.write_records(BufWriter::new(temp.as_file_mut()), format)?;
            writer.flush()?;
        }

        temp.persist(path).map_err(|e| DataError::Io(e.error))?;
        info!(file = %path.display(), rows = self.len(), "Wrote table");
        Ok(())
    }
}
