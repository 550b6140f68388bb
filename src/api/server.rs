//! HTTP server setup and routing.

use super::handlers;
use crate::config::ServerConfig;
use crate::query::SalaryQueries;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router.
pub fn build_router(queries: SalaryQueries, cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/salaries", get(handlers::list_salaries))
        .route("/api/job-titles/:year", get(handlers::list_job_titles))
        .with_state(queries)
        .layer(TraceLayer::new_for_http());

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Bind and serve until the process is stopped.
pub async fn run(config: &ServerConfig, queries: SalaryQueries) -> Result<()> {
    let app = build_router(queries, config.cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server is running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, ParseOptions};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const CSV: &str = "work_year,job_title,salary_in_usd\n\
        2023,A,100\n\
        2023,A,200\n\
        2023,B,bad\n\
        2023,B,300\n\
        2024,A,50\n";

    fn app() -> Router {
        let dataset = Dataset::from_text(CSV, &ParseOptions::default()).unwrap();
        build_router(SalaryQueries::new(Arc::new(dataset)), true)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_salaries_endpoint() {
        let (status, body) = get_json(app(), "/api/salaries").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"year": "2023", "totalJobs": 4, "averageSalary": 150.0},
                {"year": "2024", "totalJobs": 1, "averageSalary": 50.0}
            ])
        );
    }

    #[tokio::test]
    async fn test_job_titles_endpoint() {
        let (status, body) = get_json(app(), "/api/job-titles/2023").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"jobTitle": "A", "count": 2},
                {"jobTitle": "B", "count": 2}
            ])
        );
    }

    #[tokio::test]
    async fn test_unknown_year_returns_empty_list() {
        let (status, body) = get_json(app(), "/api/job-titles/1999").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"], 5);
    }

    #[tokio::test]
    async fn test_cors_header_present() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/salaries")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
