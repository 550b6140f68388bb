//! Summary report generation.
//!
//! Renders the yearly summaries, and optionally a single year's job-title
//! breakdown, as Markdown or JSON.

use crate::analysis::{sort_chronologically, total_jobs};
use crate::models::{DatasetInfo, SummaryReport, YearBreakdown, YearlySummary};
use crate::query::SalaryQueries;
use anyhow::Result;
use chrono::Utc;

/// Build a report from the query interface.
pub fn build_report(queries: &SalaryQueries, year: Option<&str>) -> SummaryReport {
    let mut years = queries.yearly_summaries();
    sort_chronologically(&mut years);

    SummaryReport {
        dataset: queries.info(),
        generated_at: Utc::now(),
        years,
        breakdown: year.map(|y| YearBreakdown {
            year: y.to_string(),
            job_titles: queries.job_titles(y),
        }),
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &SummaryReport) -> String {
    let mut output = String::new();

    output.push_str("# Salary Summary\n\n");
    output.push_str(&generate_dataset_section(&report.dataset, report));
    output.push_str(&generate_years_section(&report.years));

    if let Some(ref breakdown) = report.breakdown {
        output.push_str(&generate_breakdown_section(breakdown));
    }

    output
}

/// Generate the dataset section.
fn generate_dataset_section(info: &DatasetInfo, report: &SummaryReport) -> String {
    let mut section = String::new();

    section.push_str("## Dataset\n\n");
    if let Some(ref source) = info.source {
        section.push_str(&format!("- **Source:** `{}`\n", source.display()));
    }
    section.push_str(&format!("- **Records:** {}\n", info.records));
    section.push_str(&format!("- **Years:** {}\n", report.years.len()));
    if info.diagnostics.short_rows > 0 {
        section.push_str(&format!(
            "- **Short Rows:** {}\n",
            info.diagnostics.short_rows
        ));
    }
    section.push_str(&format!(
        "- **Generated:** {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push('\n');

    section
}

/// Generate the yearly summary table.
fn generate_years_section(years: &[YearlySummary]) -> String {
    let mut section = String::new();

    section.push_str("## Yearly Summary\n\n");

    if years.is_empty() {
        section.push_str("No records.\n\n");
        return section;
    }

    section.push_str("| Year | Total Jobs | Average Salary (USD) |\n");
    section.push_str("|------|-----------:|---------------------:|\n");
    for summary in years {
        section.push_str(&format!(
            "| {} | {} | {:.2} |\n",
            summary.year.as_deref().unwrap_or("(none)"),
            summary.total_jobs,
            summary.average_salary
        ));
    }
    section.push_str(&format!("| **Total** | {} | |\n", total_jobs(years)));
    section.push('\n');

    section
}

/// Generate the job-title table for one year.
fn generate_breakdown_section(breakdown: &YearBreakdown) -> String {
    let mut section = String::new();

    section.push_str(&format!("## Job Titles in {}\n\n", breakdown.year));

    if breakdown.job_titles.is_empty() {
        section.push_str(&format!("No records for year {}.\n\n", breakdown.year));
        return section;
    }

    section.push_str("| Job Title | Count |\n");
    section.push_str("|-----------|------:|\n");
    for title in &breakdown.job_titles {
        section.push_str(&format!(
            "| {} | {} |\n",
            title.job_title.as_deref().unwrap_or("(none)"),
            title.count
        ));
    }
    section.push('\n');

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &SummaryReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
