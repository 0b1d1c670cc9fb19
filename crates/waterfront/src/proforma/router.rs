use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::warn;

use super::engine::compute;
use super::inputs::{OutOfRangeInput, ParameterField, ParameterSet};
use super::metrics::MetricsSet;
use super::scenarios::{evaluate_scenarios, ScenarioImporter, ScenarioOutcome};
use super::summary::MetricSection;

#[derive(Debug, Clone, Serialize)]
pub struct ProFormaResponse {
    pub generated_at: DateTime<Utc>,
    pub inputs: ParameterSet,
    pub metrics: MetricsSet,
    pub sections: Vec<MetricSection>,
}

impl ProFormaResponse {
    pub fn new(inputs: ParameterSet, metrics: MetricsSet) -> Self {
        Self {
            generated_at: Utc::now(),
            inputs,
            sections: metrics.summary(),
            metrics,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub scenarios_csv: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResultView {
    pub name: String,
    pub inputs: ParameterSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OutOfRangeInput>,
}

impl From<ScenarioOutcome> for ScenarioResultView {
    fn from(outcome: ScenarioOutcome) -> Self {
        let (metrics, error) = match outcome.result {
            Ok(metrics) => (Some(metrics), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            name: outcome.scenario.name,
            inputs: outcome.scenario.parameters,
            metrics,
            error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ScenarioResultView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterCatalog {
    pub defaults: ParameterSet,
    pub fields: Vec<ParameterDescriptor>,
}

impl ParameterCatalog {
    pub fn standard() -> Self {
        let defaults = ParameterSet::default();
        let fields = ParameterField::ordered()
            .into_iter()
            .map(|field| {
                let bound = field.bound();
                ParameterDescriptor {
                    name: field.name(),
                    label: field.label(),
                    min: bound.min,
                    max: bound.max,
                    default: defaults.get(field),
                }
            })
            .collect();

        Self { defaults, fields }
    }
}

/// Router builder exposing the pro forma engine over HTTP.
pub fn proforma_router() -> Router {
    Router::new()
        .route("/api/v1/proforma", post(compute_handler))
        .route("/api/v1/proforma/parameters", get(parameters_handler))
        .route("/api/v1/proforma/batch", post(batch_handler))
}

pub(crate) async fn parameters_handler() -> Response {
    (StatusCode::OK, axum::Json(ParameterCatalog::standard())).into_response()
}

pub(crate) async fn compute_handler(axum::Json(inputs): axum::Json<ParameterSet>) -> Response {
    match compute(&inputs) {
        Ok(metrics) => {
            let body = ProFormaResponse::new(inputs, metrics);
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => out_of_range_response(error),
    }
}

pub(crate) async fn batch_handler(axum::Json(request): axum::Json<BatchRequest>) -> Response {
    let scenarios = match ScenarioImporter::from_reader(Cursor::new(request.scenarios_csv)) {
        Ok(scenarios) => scenarios,
        Err(error) => {
            warn!(%error, "rejected scenario sheet");
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let results = evaluate_scenarios(&scenarios)
        .into_iter()
        .map(ScenarioResultView::from)
        .collect();

    let body = BatchResponse {
        generated_at: Utc::now(),
        results,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

fn out_of_range_response(error: OutOfRangeInput) -> Response {
    warn!(field = error.field, value = error.value, "rejected pro forma input");
    let payload = json!({
        "error": error.to_string(),
        "field": error.field,
        "value": error.value,
        "bound": error.bound,
    });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn json_request(uri: &str, body: Value) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::post(uri)
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(
                serde_json::to_vec(&body).expect("serialize body"),
            ))
            .expect("request builds")
    }

    #[tokio::test]
    async fn compute_route_returns_metrics_and_sections() {
        let response = proforma_router()
            .oneshot(json_request(
                "/api/v1/proforma",
                json!({ "open_space_pct": 50, "residential_floors": 5 }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload["metrics"]["developable_area"].as_f64(),
            Some(718_740.0)
        );
        assert_eq!(
            payload["metrics"]["profit_margin"]["status"].as_str(),
            Some("defined")
        );
        assert_eq!(payload["sections"].as_array().map(Vec::len), Some(4));
        assert!(payload.get("generated_at").is_some());
    }

    #[tokio::test]
    async fn compute_handler_rejects_out_of_range_input() {
        let inputs = ParameterSet {
            open_space_pct: 150,
            ..ParameterSet::default()
        };

        let response = compute_handler(axum::Json(inputs)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert_eq!(payload["field"].as_str(), Some("open_space_pct"));
        assert_eq!(payload["value"].as_f64(), Some(150.0));
        assert_eq!(payload["bound"]["max"].as_f64(), Some(100.0));
    }

    #[tokio::test]
    async fn compute_route_reports_negative_percentages_as_out_of_range() {
        let response = proforma_router()
            .oneshot(json_request(
                "/api/v1/proforma",
                json!({ "open_space_pct": -5 }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert_eq!(payload["field"].as_str(), Some("open_space_pct"));
        assert_eq!(payload["value"].as_f64(), Some(-5.0));
        assert_eq!(payload["bound"]["min"].as_f64(), Some(0.0));
        assert!(payload["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn parameters_route_lists_bounds_and_defaults() {
        let response = proforma_router()
            .oneshot(
                axum::http::Request::get("/api/v1/proforma/parameters")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let fields = payload["fields"].as_array().expect("fields listed");
        assert_eq!(fields.len(), 12);
        assert_eq!(fields[2]["name"].as_str(), Some("residential_floors"));
        assert_eq!(fields[2]["min"].as_f64(), Some(1.0));
        assert_eq!(fields[2]["default"].as_f64(), Some(5.0));
    }

    #[tokio::test]
    async fn batch_route_reports_each_scenario() {
        let response = proforma_router()
            .oneshot(json_request(
                "/api/v1/proforma/batch",
                json!({ "scenarios_csv": "name,parking_ratio,open_space_pct\nCar-free,0,50\nToo green,10,101\n" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let results = payload["results"].as_array().expect("results listed");
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0]["metrics"]["parking_spot_count"].as_f64(),
            Some(0.0)
        );
        assert!(results[0].get("error").is_none());
        assert_eq!(results[1]["error"]["field"].as_str(), Some("open_space_pct"));
        assert!(results[1].get("metrics").is_none());
    }

    #[tokio::test]
    async fn batch_handler_rejects_malformed_csv() {
        let request = BatchRequest {
            scenarios_csv: "name,residential_floors\nBad,many\n".to_string(),
        };

        let response = batch_handler(axum::Json(request)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
