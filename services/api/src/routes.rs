use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use engagement_insights::analysis::{
    DepartmentBreakdown, DepartmentSatisfactionAnalyzer, DepartmentStat, ValuedReportEntry,
    ValuedWithoutSuggestionsAnalyzer,
};
use engagement_insights::error::AppError;
use engagement_insights::survey::{SurveyDataset, SurveyLoader};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct DepartmentsRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DepartmentsResponse {
    pub(crate) threshold: f64,
    pub(crate) departments: Vec<DepartmentStat>,
    pub(crate) breakdown: Vec<DepartmentBreakdown>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValuedRequest {
    #[serde(default)]
    pub(crate) csv: Option<String>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/engagement/departments", post(departments_endpoint))
        .route(
            "/api/v1/engagement/valued-without-suggestions",
            post(valued_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn load_inline(csv: String) -> Result<SurveyDataset, AppError> {
    Ok(SurveyLoader::from_reader(Cursor::new(csv.into_bytes()))?)
}

pub(crate) async fn departments_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DepartmentsRequest>,
) -> Result<Json<DepartmentsResponse>, AppError> {
    let DepartmentsRequest { csv, threshold } = payload;

    let threshold = threshold.unwrap_or(state.department_threshold);
    if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
        return Err(AppError::InvalidRequest(format!(
            "threshold {threshold} must be between 0 and 100"
        )));
    }

    let dataset = load_inline(csv)?;
    let analyzer = DepartmentSatisfactionAnalyzer::new(threshold);
    let breakdown = analyzer.breakdown(&dataset);
    let departments = analyzer.analyze(&dataset);

    Ok(Json(DepartmentsResponse {
        threshold,
        departments,
        breakdown,
    }))
}

/// Omitting `csv` yields an all-zero summary rather than an error.
pub(crate) async fn valued_endpoint(
    Json(payload): Json<ValuedRequest>,
) -> Result<Json<ValuedReportEntry>, AppError> {
    let dataset = payload.csv.map(load_inline).transpose()?;
    let summary = ValuedWithoutSuggestionsAnalyzer::new().analyze(dataset.as_ref());
    Ok(Json(summary.into()))
}
