//! Delimited text parsing.
//!
//! Turns the raw dataset text into typed [`SalaryRecord`]s. The parser is
//! lenient: short rows are padded with absent values, blank lines are
//! skipped, and nothing about a single line can fail the parse.
//!
//! Quoting is disabled. A delimiter inside a value splits it.

use super::DatasetError;
use crate::models::{ColumnMapping, ParseDiagnostics, RawRow, SalaryRecord};
use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use std::io::Cursor;
use tracing::{debug, warn};

/// Options controlling how the text is split and which columns are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Single ASCII field delimiter.
    pub delimiter: u8,
    /// Names of the columns that feed the typed record fields.
    pub columns: ColumnMapping,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            columns: ColumnMapping::default(),
        }
    }
}

impl TryFrom<&crate::config::DatasetConfig> for ParseOptions {
    type Error = DatasetError;

    fn try_from(config: &crate::config::DatasetConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            delimiter: delimiter_byte(config.delimiter)?,
            columns: ColumnMapping {
                work_year: config.year_column.clone(),
                job_title: config.title_column.clone(),
                salary_usd: config.salary_column.clone(),
            },
        })
    }
}

/// Check that a delimiter is a single ASCII byte that isn't a line break.
pub fn delimiter_byte(delimiter: char) -> Result<u8, DatasetError> {
    match delimiter {
        '\n' | '\r' => Err(DatasetError::InvalidDelimiter(delimiter)),
        c if c.is_ascii() => Ok(c as u8),
        _ => Err(DatasetError::InvalidDelimiter(delimiter)),
    }
}

/// Output of a parse: header columns, records and anomaly counts.
#[derive(Debug, Clone, Default)]
pub struct ParsedText {
    pub columns: Vec<String>,
    pub records: Vec<SalaryRecord>,
    pub diagnostics: ParseDiagnostics,
}

fn reader_builder(delimiter: u8) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .terminator(Terminator::Any(b'\n'))
        .delimiter(delimiter);
    builder
}

/// Split the header line into trimmed column names.
///
/// An empty header line still yields one (empty) column.
fn parse_header(line: &str, delimiter: u8) -> Result<Vec<String>, csv::Error> {
    let mut rdr = reader_builder(delimiter).from_reader(Cursor::new(line.as_bytes()));

    match rdr.records().next() {
        Some(result) => Ok(result?.iter().map(str::to_string).collect()),
        None => Ok(vec![String::new()]),
    }
}

/// Map one data record positionally onto the header.
///
/// Positions past the end of the record get an explicit `None`.
pub fn parse_row(record: &StringRecord, headers: &[String]) -> RawRow {
    let mut row = RawRow::new();

    for (index, header) in headers.iter().enumerate() {
        row.push(header.clone(), record.get(index).map(str::to_string));
    }

    row
}

/// A whitespace-only line reads back as empty fields: one, or several when
/// the delimiter is itself whitespace.
fn is_blank(record: &StringRecord, delimiter: u8) -> bool {
    record.iter().all(str::is_empty) && (record.len() == 1 || delimiter.is_ascii_whitespace())
}

/// Parse the full dataset text.
pub fn parse(raw_text: &str, options: &ParseOptions) -> Result<ParsedText, csv::Error> {
    let (header_line, body) = match raw_text.split_once('\n') {
        Some((header, rest)) => (header, Some(rest)),
        None => (raw_text, None),
    };

    let headers = parse_header(header_line, options.delimiter)?;
    debug!("Parsed header with {} columns", headers.len());

    for wanted in [
        &options.columns.work_year,
        &options.columns.job_title,
        &options.columns.salary_usd,
    ] {
        if !headers.iter().any(|h| h == wanted) {
            warn!("Column '{}' not found in header; it will read as absent", wanted);
        }
    }

    let body_lines = body.map_or(0, |b| b.split('\n').count());
    let body = body.unwrap_or_default();

    let mut diagnostics = ParseDiagnostics::default();
    let mut records = Vec::new();

    let mut rdr = reader_builder(options.delimiter).from_reader(Cursor::new(body.as_bytes()));
    for result in rdr.records() {
        let record = result?;
        if is_blank(&record, options.delimiter) {
            continue;
        }
        diagnostics.data_lines += 1;

        if record.len() < headers.len() {
            diagnostics.short_rows += 1;
        } else if record.len() > headers.len() {
            diagnostics.long_rows += 1;
        }

        let row = parse_row(&record, &headers);
        records.push(SalaryRecord::from_row(&row, &options.columns));
    }

    // The reader yields one record per non-empty line; the rest were blank.
    diagnostics.blank_lines_skipped = body_lines.saturating_sub(diagnostics.data_lines);

    if diagnostics.short_rows > 0 || diagnostics.long_rows > 0 {
        debug!(
            "Tolerated {} short and {} long rows",
            diagnostics.short_rows, diagnostics.long_rows
        );
    }

    Ok(ParsedText {
        columns: headers,
        records,
        diagnostics,
    })
}
