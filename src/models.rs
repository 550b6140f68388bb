//! Data models for the salary aggregation service.
//!
//! This module contains the record and summary types shared by the
//! parser, the aggregation engine and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One data line of the source text, mapped positionally onto the header.
///
/// A `None` value means the line had no field at that position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: Vec<(String, Option<String>)>,
}

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column value.
    pub fn push(&mut self, column: impl Into<String>, value: Option<String>) {
        self.fields.push((column.into(), value));
    }

    /// Looks up a column value. Duplicate column names resolve to the last one.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns true if the column exists in the row, even if absent-valued.
    #[allow(dead_code)] // Used by parser tests
    pub fn has_column(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    #[allow(dead_code)] // Used by parser tests
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Column names used to pull typed fields out of a [`RawRow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub work_year: String,
    pub job_title: String,
    pub salary_usd: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            work_year: "work_year".to_string(),
            job_title: "job_title".to_string(),
            salary_usd: "salary_in_usd".to_string(),
        }
    }
}

/// A single observed salary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Year the salary was paid in, kept as text. Only used as a grouping key.
    pub work_year: Option<String>,
    /// Job title as written in the source.
    pub job_title: Option<String>,
    /// Raw salary text. Coerced to a number at aggregation time.
    pub salary_usd: Option<String>,
}

impl SalaryRecord {
    /// Builds a record from a raw row using the given column names.
    pub fn from_row(row: &RawRow, columns: &ColumnMapping) -> Self {
        Self {
            work_year: row.get(&columns.work_year).map(str::to_string),
            job_title: row.get(&columns.job_title).map(str::to_string),
            salary_usd: row.get(&columns.salary_usd).map(str::to_string),
        }
    }

    /// Convenience constructor, mostly for tests and fixtures.
    #[allow(dead_code)] // Used by tests
    pub fn new(year: &str, title: &str, salary: &str) -> Self {
        Self {
            work_year: Some(year.to_string()),
            job_title: Some(title.to_string()),
            salary_usd: Some(salary.to_string()),
        }
    }
}

/// Count and mean salary for one distinct `work_year` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub year: Option<String>,
    pub total_jobs: usize,
    pub average_salary: f64,
}

/// Number of records carrying a job title within one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTitleSummary {
    pub job_title: Option<String>,
    pub count: usize,
}

/// Tolerated anomalies seen while parsing. These never change output values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostics {
    /// Non-blank lines after the header.
    pub data_lines: usize,
    /// Whitespace-only lines that were skipped.
    pub blank_lines_skipped: usize,
    /// Lines with fewer fields than the header.
    pub short_rows: usize,
    /// Lines with more fields than the header (extras are ignored).
    pub long_rows: usize,
}

/// Describes the loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    /// Where the dataset was read from, if it came from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Header columns in source order.
    pub columns: Vec<String>,
    /// Number of parsed records.
    pub records: usize,
    /// Parse-time anomaly counts.
    pub diagnostics: ParseDiagnostics,
    /// When the dataset was parsed.
    pub loaded_at: DateTime<Utc>,
}

/// Job-title breakdown for one requested year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBreakdown {
    /// The year exactly as requested.
    pub year: String,
    /// Job-title counts, in order of first appearance.
    pub job_titles: Vec<JobTitleSummary>,
}

/// A printable summary of the whole dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    /// Details about the dataset the report was built from.
    pub dataset: DatasetInfo,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Yearly summaries, sorted by year.
    pub years: Vec<YearlySummary>,
    /// Optional breakdown for a single year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<YearBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_last_duplicate_wins() {
        let mut row = RawRow::new();
        row.push("a", Some("1".to_string()));
        row.push("a", Some("2".to_string()));
        assert_eq!(row.get("a"), Some("2"));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_raw_row_absent_value() {
        let mut row = RawRow::new();
        row.push("work_year", None);
        assert!(row.has_column("work_year"));
        assert_eq!(row.get("work_year"), None);
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_record_from_row() {
        let mut row = RawRow::new();
        row.push("work_year", Some("2023".to_string()));
        row.push("job_title", Some("Data Scientist".to_string()));
        row.push("salary_in_usd", None);

        let record = SalaryRecord::from_row(&row, &ColumnMapping::default());
        assert_eq!(record.work_year.as_deref(), Some("2023"));
        assert_eq!(record.job_title.as_deref(), Some("Data Scientist"));
        assert_eq!(record.salary_usd, None);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = YearlySummary {
            year: Some("2023".to_string()),
            total_jobs: 2,
            average_salary: 150.0,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["year"], "2023");
        assert_eq!(json["totalJobs"], 2);
        assert_eq!(json["averageSalary"], 150.0);

        let titles = JobTitleSummary {
            job_title: None,
            count: 1,
        };
        let json = serde_json::to_value(&titles).unwrap();
        assert!(json["jobTitle"].is_null());
        assert_eq!(json["count"], 1);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = SummaryReport {
            dataset: DatasetInfo {
                source: None,
                columns: vec!["work_year".to_string()],
                records: 1,
                diagnostics: ParseDiagnostics {
                    data_lines: 1,
                    blank_lines_skipped: 2,
                    short_rows: 0,
                    long_rows: 0,
                },
                loaded_at: Utc::now(),
            },
            generated_at: Utc::now(),
            years: Vec::new(),
            breakdown: Some(YearBreakdown {
                year: "2023".to_string(),
                job_titles: Vec::new(),
            }),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["generatedAt"].is_string());
        assert!(json["dataset"]["loadedAt"].is_string());
        assert_eq!(json["dataset"]["diagnostics"]["blankLinesSkipped"], 2);
        assert_eq!(json["dataset"]["diagnostics"]["dataLines"], 1);
        assert!(json["breakdown"]["jobTitles"].is_array());
        assert!(json.get("generated_at").is_none());
    }
}
