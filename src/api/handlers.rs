//! HTTP request handlers.
//!
//! Every handler is a thin wrapper over [`SalaryQueries`]. None of them can
//! fail: an unknown year is an empty list, not an error.

use crate::query::SalaryQueries;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::models::{JobTitleSummary, YearlySummary};

/// Response for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
}

/// GET /health
pub async fn health(State(queries): State<SalaryQueries>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: queries.info().records,
    })
}

/// GET /api/salaries - yearly summaries
pub async fn list_salaries(State(queries): State<SalaryQueries>) -> Json<Vec<YearlySummary>> {
    Json(queries.yearly_summaries())
}

/// GET /api/job-titles/:year - job-title counts for one year
pub async fn list_job_titles(
    State(queries): State<SalaryQueries>,
    Path(year): Path<String>,
) -> Json<Vec<JobTitleSummary>> {
    let titles = queries.job_titles(&year);
    debug!("{} job titles for year {:?}", titles.len(), year);
    Json(titles)
}
