use axum::{Json, extract::State};

use crate::{services::metrics_manager::MetricsData, state::SharedState};

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
