//! Route handlers

use std::sync::Arc;

use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use leadpulse_core::{AgentId, AppError, DateRange};
use leadpulse_engine::DashboardSummary;
use serde::Deserialize;
use tracing::debug;

use crate::rest::response::{ApiError, ApiResponse};
use crate::AppState;

/// Optional explicit comparison window. Both bounds must be supplied
/// together and ordered.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl SummaryParams {
    fn into_range(self) -> Result<Option<DateRange>, AppError> {
        match (self.from, self.to) {
            (None, None) => Ok(None),
            (Some(from), Some(to)) => {
                let range = DateRange::new(from, to);
                if !range.is_ordered() {
                    return Err(AppError::validation("from must not exceed to"));
                }
                Ok(Some(range))
            }
            _ => Err(AppError::validation(
                "from and to must be supplied together",
            )),
        }
    }
}

/// `GET /api/v1/dashboard/summary`
pub async fn dashboard_summary(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<AgentId>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    let range = params.into_range()?;
    debug!(agent = %agent, explicit_range = range.is_some(), "dashboard summary requested");
    let summary = state.dashboard.summary(agent, range).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// `GET /health`
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// `GET /ready`
pub async fn readiness_check() -> StatusCode {
    StatusCode::OK
}
