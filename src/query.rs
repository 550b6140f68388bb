//! Read-only query interface over the loaded dataset.
//!
//! `SalaryQueries` is what the HTTP layer and the report generator talk to.
//! It never hands out raw records.

use crate::analysis::{summarize_by_year, summarize_job_titles};
use crate::dataset::Dataset;
use crate::models::{DatasetInfo, JobTitleSummary, YearlySummary};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Cheaply cloneable handle to the summary queries.
#[derive(Debug, Clone)]
pub struct SalaryQueries {
    dataset: Arc<Dataset>,
    yearly: Arc<OnceLock<Vec<YearlySummary>>>,
}

impl SalaryQueries {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            yearly: Arc::new(OnceLock::new()),
        }
    }

    /// One summary per distinct year, in order of first appearance.
    ///
    /// Computed once; the dataset never changes after load.
    pub fn yearly_summaries(&self) -> Vec<YearlySummary> {
        self.yearly
            .get_or_init(|| {
                debug!("Computing yearly summaries over {} records", self.dataset.len());
                summarize_by_year(self.dataset.records())
            })
            .clone()
    }

    /// Job-title counts for one year. Empty when the year is unknown.
    pub fn job_titles(&self, year: &str) -> Vec<JobTitleSummary> {
        summarize_job_titles(self.dataset.records(), year)
    }

    pub fn info(&self) -> DatasetInfo {
        self.dataset.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ParseOptions;
    use crate::models::SalaryRecord;

    fn queries() -> SalaryQueries {
        let dataset = Dataset::from_records(vec![
            SalaryRecord::new("2023", "A", "100"),
            SalaryRecord::new("2023", "A", "200"),
            SalaryRecord::new("2023", "B", "bad"),
            SalaryRecord::new("2024", "A", "300"),
        ]);
        SalaryQueries::new(Arc::new(dataset))
    }

    #[test]
    fn test_yearly_summaries() {
        let summaries = queries().yearly_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].total_jobs, 3);
        assert_eq!(summaries[0].average_salary, 100.0);
        assert_eq!(summaries[1].year.as_deref(), Some("2024"));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let q = queries();
        assert_eq!(q.yearly_summaries(), q.yearly_summaries());
        assert_eq!(q.job_titles("2023"), q.job_titles("2023"));

        let first: Vec<u64> = q
            .yearly_summaries()
            .iter()
            .map(|s| s.average_salary.to_bits())
            .collect();
        let second: Vec<u64> = q
            .clone()
            .yearly_summaries()
            .iter()
            .map(|s| s.average_salary.to_bits())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_job_titles_unknown_year() {
        assert!(queries().job_titles("1999").is_empty());
    }

    #[test]
    fn test_concurrent_readers() {
        let q = queries();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let q = q.clone();
                std::thread::spawn(move || (q.yearly_summaries(), q.job_titles("2023")))
            })
            .collect();

        for handle in handles {
            let (yearly, titles) = handle.join().unwrap();
            assert_eq!(yearly, q.yearly_summaries());
            assert_eq!(titles.len(), 2);
        }
    }

    #[test]
    fn test_info_reports_record_count() {
        let dataset = Dataset::from_text(
            "work_year,job_title,salary_in_usd\n2023,A,1\n\n",
            &ParseOptions::default(),
        )
        .unwrap();
        let q = SalaryQueries::new(Arc::new(dataset));
        assert_eq!(q.info().records, 1);
        assert_eq!(q.info().diagnostics.blank_lines_skipped, 2);
    }
}
