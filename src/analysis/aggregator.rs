//! Salary aggregation and summary statistics.
//!
//! This module groups parsed records by year and by job title and computes
//! the summaries served to the dashboard.

use super::coerce::coerce_number;
use crate::models::{JobTitleSummary, SalaryRecord, YearlySummary};
use std::collections::HashMap;
use std::hash::Hash;

/// Group items by key, keeping groups in order of first appearance.
pub fn group_in_order<'a, T, K, F>(items: &'a [T], key: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();

    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

/// Summarize records per distinct `work_year`.
///
/// Records without a year form their own group. Salaries that don't parse
/// count as zero, so they lower the average instead of being skipped.
pub fn summarize_by_year(records: &[SalaryRecord]) -> Vec<YearlySummary> {
    group_in_order(records, |r| r.work_year.clone())
        .into_iter()
        .map(|(year, group)| {
            let total_jobs = group.len();
            let total_salary: f64 = group
                .iter()
                .map(|r| coerce_number(r.salary_usd.as_deref()))
                .sum();

            YearlySummary {
                year,
                total_jobs,
                average_salary: total_salary / total_jobs as f64,
            }
        })
        .collect()
}

/// Count job titles among the records of one year.
///
/// The year is compared as an exact string: `" 2023"` does not match `"2023"`.
/// An unknown year gives an empty result.
pub fn summarize_job_titles(records: &[SalaryRecord], year: &str) -> Vec<JobTitleSummary> {
    let in_year: Vec<&SalaryRecord> = records
        .iter()
        .filter(|r| r.work_year.as_deref() == Some(year))
        .collect();

    group_in_order(&in_year, |r| r.job_title.clone())
        .into_iter()
        .map(|(job_title, group)| JobTitleSummary {
            job_title,
            count: group.len(),
        })
        .collect()
}

/// Sort yearly summaries by year, numerically where both years are numbers.
///
/// Summaries without a year go last.
pub fn sort_chronologically(summaries: &mut [YearlySummary]) {
    summaries.sort_by(|a, b| match (&a.year, &b.year) {
        (Some(x), Some(y)) => match (x.parse::<i64>(), y.parse::<i64>()) {
            (Ok(nx), Ok(ny)) => nx.cmp(&ny),
            _ => x.cmp(y),
        },
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Total number of jobs across summaries.
pub fn total_jobs(summaries: &[YearlySummary]) -> usize {
    summaries.iter().map(|s| s.total_jobs).sum()
}
