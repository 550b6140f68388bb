//! Dataset loading.
//!
//! The dataset is read and parsed once at startup. After that it is an
//! immutable value shared by reference with the query layer.

pub mod parser;

pub use parser::{delimiter_byte, parse, ParseOptions};

use crate::models::{DatasetInfo, ParseDiagnostics, SalaryRecord};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that prevent a dataset from being built. All of them are fatal.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {path} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("invalid delimiter {0:?}: must be a single ASCII character other than a line break")]
    InvalidDelimiter(char),

    #[error("failed to split dataset text: {0}")]
    Csv(#[from] csv::Error),
}

/// The parsed, read-only record set.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SalaryRecord>,
    columns: Vec<String>,
    diagnostics: ParseDiagnostics,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Build a dataset from in-memory text.
    pub fn from_text(raw_text: &str, options: &ParseOptions) -> Result<Self, DatasetError> {
        let parsed = parse(raw_text, options)?;
        Ok(Self {
            records: parsed.records,
            columns: parsed.columns,
            diagnostics: parsed.diagnostics,
            source: None,
            loaded_at: Utc::now(),
        })
    }

    /// Build a dataset directly from records.
    #[allow(dead_code)] // Used by tests
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        Self {
            diagnostics: ParseDiagnostics {
                data_lines: records.len(),
                ..ParseDiagnostics::default()
            },
            records,
            columns: Vec::new(),
            source: None,
            loaded_at: Utc::now(),
        }
    }

    /// Read and parse a dataset file.
    pub fn load(path: &Path, options: &ParseOptions) -> Result<Self, DatasetError> {
        let bytes = std::fs::read(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|source| DatasetError::Encoding {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dataset = Self::from_text(&text, options)?;
        dataset.source = Some(path.to_path_buf());

        info!(
            "Loaded {} records from {} ({} short rows, {} blank lines skipped)",
            dataset.records.len(),
            path.display(),
            dataset.diagnostics.short_rows,
            dataset.diagnostics.blank_lines_skipped
        );

        Ok(dataset)
    }

    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Describe the dataset without exposing its records.
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            source: self.source.clone(),
            columns: self.columns.clone(),
            records: self.records.len(),
            diagnostics: self.diagnostics.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "work_year,job_title,salary_in_usd\n2023,Analyst,100\n2024,Engineer,200\n"
        )
        .unwrap();

        let dataset = Dataset::load(file.path(), &ParseOptions::default()).unwrap();
        assert_eq!(dataset.len(), 2);

        let info = dataset.info();
        assert_eq!(info.records, 2);
        assert_eq!(info.source.as_deref(), Some(file.path()));
        assert_eq!(info.columns, vec!["work_year", "job_title", "salary_in_usd"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dataset::load(&dir.path().join("nope.csv"), &ParseOptions::default());
        assert!(matches!(result, Err(DatasetError::Read { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x77, 0x6f, 0xff, 0xfe, 0x0a]).unwrap();

        let result = Dataset::load(file.path(), &ParseOptions::default());
        assert!(matches!(result, Err(DatasetError::Encoding { .. })));
    }

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/salaries.csv");
        let dataset = Dataset::load(&path, &ParseOptions::default()).unwrap();

        assert_eq!(dataset.len(), 7);
        let info = dataset.info();
        assert_eq!(info.diagnostics.short_rows, 1);
        assert_eq!(info.diagnostics.blank_lines_skipped, 2);

        let summaries = crate::analysis::summarize_by_year(dataset.records());
        let years: Vec<_> = summaries.iter().map(|s| s.year.clone().unwrap()).collect();
        assert_eq!(years, vec!["2024", "2023", "2022"]);
        assert_eq!(summaries[0].average_salary, 100000.0);
        assert_eq!(summaries[2].total_jobs, 1);
    }

    #[test]
    fn test_from_text_has_no_source() {
        let dataset = Dataset::from_text("work_year\n2023\n", &ParseOptions::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.info().source.is_none());
    }
}
