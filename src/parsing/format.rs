use std::path::Path;

use crate::core::data::DataError;

/// Field separator of a delimited table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

/// On-disk layout of a table: delimiter plus optional gzip compression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    pub delimiter: Delimiter,
    pub gzip: bool,
}

impl TableFormat {
    pub const CSV: Self = Self {
        delimiter: Delimiter::Comma,
        gzip: false,
    };

    pub const TSV: Self = Self {
        delimiter: Delimiter::Tab,
        gzip: false,
    };

    /// Detect the format from a file name (`.csv`, `.tsv`, optionally `.gz`).
    ///
    /// # Errors
    ///
    /// Returns `DataError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let (stem, gzip) = match name.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (name.as_str(), false),
        };

        let delimiter = match Path::new(stem).extension().and_then(|e| e.to_str()) {
            Some("csv") => Delimiter::Comma,
            Some("tsv") => Delimiter::Tab,
            _ => return Err(DataError::UnsupportedFormat(path.display().to_string())),
        };

        Ok(Self { delimiter, gzip })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_formats() {
        assert_eq!(
            TableFormat::from_path(Path::new("peaks.csv")).unwrap(),
            TableFormat::CSV
        );
        assert_eq!(
            TableFormat::from_path(Path::new("dir/Alkanes.TSV")).unwrap(),
            TableFormat::TSV
        );
        assert_eq!(
            TableFormat::from_path(Path::new("peaks.tsv.gz")).unwrap(),
            TableFormat {
                delimiter: Delimiter::Tab,
                gzip: true
            }
        );
    }

    #[test]
    fn test_reject_unsupported_extensions() {
        for name in ["test_file.abc", "peaks", "peaks.gz", "peaks.xlsx", "csv"] {
            let err = TableFormat::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, DataError::UnsupportedFormat(_)), "{name}");
            assert_eq!(err.to_string(), "File extension must be 'csv' or 'tsv'.");
        }
    }
}
