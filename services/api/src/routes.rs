use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use waterfront::neighborhood::{DesignatedPortArea, NeighborhoodProfile};
use waterfront::proforma::proforma_router;

#[derive(Debug, Serialize)]
pub(crate) struct IncomeBandView {
    pub(crate) label: String,
    pub(crate) households: u32,
    pub(crate) cost_burdened_households: u32,
    pub(crate) cost_burdened_pct: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct NeighborhoodView {
    pub(crate) name: String,
    pub(crate) total_households: u32,
    pub(crate) cost_burdened_households: u32,
    pub(crate) income_restricted_homes: u32,
    pub(crate) income_restricted_home_gap: u32,
    pub(crate) bands: Vec<IncomeBandView>,
}

impl From<&NeighborhoodProfile> for NeighborhoodView {
    fn from(profile: &NeighborhoodProfile) -> Self {
        Self {
            name: profile.name.clone(),
            total_households: profile.total_households,
            cost_burdened_households: profile.cost_burdened_households(),
            income_restricted_homes: profile.income_restricted_homes,
            income_restricted_home_gap: profile.income_restricted_home_gap(),
            bands: profile
                .bands
                .iter()
                .map(|band| IncomeBandView {
                    label: band.label.clone(),
                    households: band.households,
                    cost_burdened_households: band.cost_burdened_households,
                    cost_burdened_pct: band.cost_burdened_pct(),
                })
                .collect(),
        }
    }
}

pub(crate) fn with_service_routes() -> axum::Router {
    proforma_router()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/neighborhood",
            axum::routing::get(neighborhood_endpoint),
        )
        .route("/api/v1/site", axum::routing::get(site_endpoint))
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

pub(crate) async fn neighborhood_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<NeighborhoodView> {
    Json(NeighborhoodView::from(&state.reference.neighborhood))
}

pub(crate) async fn site_endpoint(Extension(state): Extension<AppState>) -> Json<DesignatedPortArea> {
    Json(state.reference.site.clone())
}
