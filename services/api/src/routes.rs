use crate::infra::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use rental_analytics::analytics::metrics::{
    appreciation_scenarios, calculate_metrics, default_variable_changes, AppreciationScenario,
    MetricsResult, ProjectionAssumptions, SensitivityPoint, SensitivityVariable, YearlyProjection,
};
use rental_analytics::analytics::ranking::{PropertyComparison, RankedProperty, Recommendation};
use rental_analytics::analytics::scoring::ScoringMethodology;
use rental_analytics::analytics::{
    PropertyFacts, PropertyId, PropertyRecord, ScoreResult, ScoreWeights,
};
use rental_analytics::error::AppError;
use rental_analytics::portfolio::{
    PortfolioService, PortfolioSummary, PropertyFilter, PropertyStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_PROJECTION_YEARS: u32 = 10;
const MAX_PROJECTION_YEARS: u32 = 50;
const DEFAULT_TOP_N: usize = 5;
const DEFAULT_APPRECIATION_RATES: [f64; 3] = [0.02, 0.04, 0.06];

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    pub(crate) facts: PropertyFacts,
    #[serde(default)]
    pub(crate) weights: Option<ScoreWeights>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeResponse {
    pub(crate) metrics: MetricsResult,
    pub(crate) scores: ScoreResult,
}

/// Replacement body for an existing property; the id comes from the path.
#[derive(Debug, Deserialize)]
pub(crate) struct PropertyUpdate {
    pub(crate) address: String,
    pub(crate) property_type: String,
    pub(crate) facts: PropertyFacts,
    #[serde(default)]
    pub(crate) bedrooms: Option<u8>,
    #[serde(default)]
    pub(crate) bathrooms: Option<f32>,
}

impl PropertyUpdate {
    fn into_record(self, id: PropertyId) -> PropertyRecord {
        PropertyRecord {
            id,
            address: self.address,
            property_type: self.property_type,
            facts: self.facts,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectionQuery {
    pub(crate) years: Option<u32>,
    pub(crate) rent_growth: Option<f64>,
    pub(crate) expense_growth: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProjectionResponse {
    pub(crate) property_id: PropertyId,
    pub(crate) assumptions: ProjectionAssumptions,
    pub(crate) cash_flow: Vec<YearlyProjection>,
    pub(crate) appreciation: Vec<AppreciationScenario>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SensitivityRequest {
    /// Changes per variable; every variable with its default steps when empty.
    #[serde(default)]
    pub(crate) variables: BTreeMap<SensitivityVariable, Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankingRequest {
    #[serde(default)]
    pub(crate) weights: Option<ScoreWeights>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecommendationQuery {
    pub(crate) top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComparisonRequest {
    pub(crate) property_ids: Vec<PropertyId>,
}

/// Router builder exposing the portfolio analytics endpoints.
pub(crate) fn portfolio_router<S>(service: Arc<PortfolioService<S>>) -> Router
where
    S: PropertyStore + 'static,
{
    Router::new()
        .route("/api/v1/analyze", post(analyze_handler::<S>))
        .route(
            "/api/v1/properties",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/v1/properties/:property_id",
            get(property_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/properties/:property_id/metrics",
            get(metrics_handler::<S>),
        )
        .route(
            "/api/v1/properties/:property_id/score",
            get(score_handler::<S>),
        )
        .route(
            "/api/v1/properties/:property_id/projections",
            get(projections_handler::<S>),
        )
        .route(
            "/api/v1/properties/:property_id/sensitivity",
            post(sensitivity_handler::<S>),
        )
        .route("/api/v1/rankings", post(rankings_handler::<S>))
        .route("/api/v1/recommendations", get(recommendations_handler::<S>))
        .route("/api/v1/comparisons", post(comparison_handler::<S>))
        .route("/api/v1/portfolio/summary", get(summary_handler::<S>))
        .route("/api/v1/scoring/methodology", get(methodology_handler::<S>))
        .with_state(service)
}

pub(crate) fn with_portfolio_routes<S>(service: Arc<PortfolioService<S>>) -> Router
where
    S: PropertyStore + 'static,
{
    portfolio_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

/// Stateless analysis of facts that are not in the portfolio.
pub(crate) async fn analyze_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError>
where
    S: PropertyStore + 'static,
{
    let AnalyzeRequest { facts, weights } = request;
    facts
        .validate()
        .map_err(|err| AppError::InvalidRequest(err.to_string()))?;

    let scorer = service.scorer();
    let weights = match weights {
        Some(weights) => {
            weights
                .validate()
                .map_err(|err| AppError::InvalidRequest(err.to_string()))?;
            weights
        }
        None => scorer.profile().weights.clone(),
    };

    Ok(Json(AnalyzeResponse {
        metrics: calculate_metrics(&facts),
        scores: scorer.composite_score(&facts, &weights),
    }))
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Query(filter): Query<PropertyFilter>,
) -> Result<Json<Vec<PropertyRecord>>, AppError>
where
    S: PropertyStore + 'static,
{
    if filter.is_empty() {
        return Ok(Json(service.list()?));
    }
    debug!(?filter, "searching properties");
    Ok(Json(service.search(&filter)?))
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Json(record): Json<PropertyRecord>,
) -> Result<impl IntoResponse, AppError>
where
    S: PropertyStore + 'static,
{
    let stored = service.add(record)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub(crate) async fn property_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(property_id): Path<String>,
) -> Result<Json<PropertyRecord>, AppError>
where
    S: PropertyStore + 'static,
{
    Ok(Json(service.get(&PropertyId(property_id))?))
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(property_id): Path<String>,
    Json(update): Json<PropertyUpdate>,
) -> Result<Json<PropertyRecord>, AppError>
where
    S: PropertyStore + 'static,
{
    let record = update.into_record(PropertyId(property_id));
    Ok(Json(service.update(record)?))
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(property_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    S: PropertyStore + 'static,
{
    service.remove(&PropertyId(property_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn metrics_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(property_id): Path<String>,
) -> Result<Json<MetricsResult>, AppError>
where
    S: PropertyStore + 'static,
{
    Ok(Json(service.metrics(&PropertyId(property_id))?))
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(property_id): Path<String>,
) -> Result<Json<ScoreResult>, AppError>
where
    S: PropertyStore + 'static,
{
    Ok(Json(service.score(&PropertyId(property_id))?))
}

pub(crate) async fn projections_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(property_id): Path<String>,
    Query(query): Query<ProjectionQuery>,
) -> Result<Json<ProjectionResponse>, AppError>
where
    S: PropertyStore + 'static,
{
    let years = query.years.unwrap_or(DEFAULT_PROJECTION_YEARS);
    if years > MAX_PROJECTION_YEARS {
        return Err(AppError::InvalidRequest(format!(
            "years must be at most {MAX_PROJECTION_YEARS}"
        )));
    }

    let defaults = ProjectionAssumptions::default();
    let assumptions = ProjectionAssumptions {
        rent_growth: query.rent_growth.unwrap_or(defaults.rent_growth),
        expense_growth: query.expense_growth.unwrap_or(defaults.expense_growth),
    };
    if !assumptions.rent_growth.is_finite() || !assumptions.expense_growth.is_finite() {
        return Err(AppError::InvalidRequest(
            "growth rates must be finite".to_string(),
        ));
    }

    let property_id = PropertyId(property_id);
    let record = service.get(&property_id)?;
    let cash_flow = service.projections(&property_id, years, assumptions)?;
    debug!(%property_id, years, "projected cash flow");

    Ok(Json(ProjectionResponse {
        appreciation: appreciation_scenarios(
            record.facts.purchase_price,
            years,
            &DEFAULT_APPRECIATION_RATES,
        ),
        property_id,
        assumptions,
        cash_flow,
    }))
}

pub(crate) async fn sensitivity_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(property_id): Path<String>,
    Json(request): Json<SensitivityRequest>,
) -> Result<Json<BTreeMap<SensitivityVariable, Vec<SensitivityPoint>>>, AppError>
where
    S: PropertyStore + 'static,
{
    let variables: Vec<(SensitivityVariable, Vec<f64>)> = if request.variables.is_empty() {
        default_variable_changes()
    } else {
        request.variables.into_iter().collect()
    };

    Ok(Json(
        service.sensitivity(&PropertyId(property_id), &variables)?,
    ))
}

pub(crate) async fn rankings_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Json(request): Json<RankingRequest>,
) -> Result<Json<Vec<RankedProperty>>, AppError>
where
    S: PropertyStore + 'static,
{
    Ok(Json(service.rank(request.weights.as_ref())?))
}

pub(crate) async fn recommendations_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Vec<Recommendation>>, AppError>
where
    S: PropertyStore + 'static,
{
    let top_n = query.top_n.unwrap_or(DEFAULT_TOP_N);
    Ok(Json(service.recommendations(top_n)?))
}

pub(crate) async fn comparison_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Json(request): Json<ComparisonRequest>,
) -> Result<Json<Vec<PropertyComparison>>, AppError>
where
    S: PropertyStore + 'static,
{
    Ok(Json(service.compare(&request.property_ids)?))
}

pub(crate) async fn summary_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
) -> Result<Json<PortfolioSummary>, AppError>
where
    S: PropertyStore + 'static,
{
    Ok(Json(service.summary()?))
}

pub(crate) async fn methodology_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
) -> Json<ScoringMethodology>
where
    S: PropertyStore + 'static,
{
    Json(service.methodology())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{portfolio_service, InMemoryPortfolio};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use rental_analytics::analytics::ScoringProfile;
    use rental_analytics::config::AnalyticsConfig;
    use rental_analytics::portfolio::sample_portfolio;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn service() -> Arc<InMemoryPortfolio> {
        let analytics = AnalyticsConfig {
            portfolio_csv: None,
            scoring_profile: ScoringProfile::default(),
            reference_year: 2024,
        };
        portfolio_service(sample_portfolio(), &analytics).expect("sample portfolio loads")
    }

    fn app(ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_portfolio_routes(service()).layer(Extension(state))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("request handled");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn health_and_readiness() {
        let (status, body) = send(app(false), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(app(false), get_request("/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, _) = send(app(true), get_request("/ready")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn analyze_returns_metrics_and_scores() {
        let request = json_request(
            "POST",
            "/api/v1/analyze",
            json!({
                "facts": {
                    "purchase_price": 300000,
                    "down_payment": 60000,
                    "loan_amount": 240000,
                    "interest_rate": 6.5,
                    "monthly_rent": 2500,
                    "monthly_expenses": 500
                }
            }),
        );
        let (status, body) = send(app(true), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metrics"]["net_operating_income"], 22500.0);
        let cap_rate = body["metrics"]["cap_rate"].as_f64().expect("cap rate");
        assert!((cap_rate - 7.5).abs() < 1e-9);
        assert!(body["metrics"]["dscr"]["covered"].is_number());
        assert!(body["scores"]["composite_score"].is_number());
    }

    #[tokio::test]
    async fn analyze_rejects_negative_inputs() {
        let request = json_request(
            "POST",
            "/api/v1/analyze",
            json!({ "facts": { "purchase_price": -1 } }),
        );
        let (status, body) = send(app(true), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("purchase_price"));
    }

    #[tokio::test]
    async fn unknown_property_is_not_found() {
        let (status, body) = send(app(true), get_request("/api/v1/properties/nope/metrics")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().expect("error message").contains("nope"));
    }

    #[tokio::test]
    async fn creates_and_fetches_properties() {
        let app = app(true);
        let record = json!({
            "id": "new-1",
            "address": "18 Willow Way",
            "property_type": "Condo",
            "facts": { "purchase_price": 190000, "monthly_rent": 1600 }
        });

        let (status, body) = send(
            app.clone(),
            json_request("POST", "/api/v1/properties", record.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "new-1");

        let (status, _) = send(
            app.clone(),
            json_request("POST", "/api/v1/properties", record),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(app, get_request("/api/v1/properties/new-1/score")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["composite_score"].is_number());
    }

    #[tokio::test]
    async fn updates_and_deletes_properties() {
        let app = app(true);
        let update = json!({
            "address": "742 Maple Ave",
            "property_type": "Single Family",
            "facts": { "purchase_price": 285000, "monthly_rent": 2600, "monthly_expenses": 450 },
            "bedrooms": 4
        });

        let (status, body) = send(
            app.clone(),
            json_request("PUT", "/api/v1/properties/sample-001", update.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "sample-001");
        assert_eq!(body["bedrooms"], 4);

        let (_, body) = send(app.clone(), get_request("/api/v1/properties/sample-001")).await;
        assert_eq!(body["facts"]["monthly_rent"], 2600.0);

        let (status, _) = send(
            app.clone(),
            json_request("PUT", "/api/v1/properties/nope", update),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let delete = Request::builder()
            .method("DELETE")
            .uri("/api/v1/properties/sample-001")
            .body(Body::empty())
            .expect("request builds");
        let (status, body) = send(app.clone(), delete).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(app.clone(), get_request("/api/v1/properties/sample-001")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(app, get_request("/api/v1/properties")).await;
        assert_eq!(body.as_array().expect("list").len(), 5);
    }

    #[tokio::test]
    async fn update_rejects_invalid_facts() {
        let update = json!({
            "address": "742 Maple Ave",
            "property_type": "Single Family",
            "facts": { "purchase_price": 285000, "monthly_rent": -5 }
        });
        let (status, _) = send(
            app(true),
            json_request("PUT", "/api/v1/properties/sample-001", update),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_filters_by_type_and_price() {
        let (status, body) = send(
            app(true),
            get_request("/api/v1/properties?property_type=single&max_price=200000"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body
            .as_array()
            .expect("list")
            .iter()
            .map(|record| record["id"].as_str().expect("id"))
            .collect();
        assert_eq!(ids, vec!["sample-006"]);

        let (_, body) = send(app(true), get_request("/api/v1/properties?min_rent=0")).await;
        assert_eq!(body.as_array().expect("list").len(), 6);
    }

    #[tokio::test]
    async fn rankings_accept_custom_weights() {
        let (status, body) = send(
            app(true),
            json_request("POST", "/api/v1/rankings", json!({ "weights": { "condition": 1.0 } })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let ranked = body.as_array().expect("ranking array");
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0]["rank"], 1);
        assert_eq!(
            ranked[0]["scores"]["composite_score"],
            ranked[0]["scores"]["condition_score"]
        );

        let (status, _) = send(
            app(true),
            json_request("POST", "/api/v1/rankings", json!({ "weights": { "roi": -1.0 } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn recommendations_honor_top_n() {
        let (status, body) = send(app(true), get_request("/api/v1/recommendations?top_n=2")).await;

        assert_eq!(status, StatusCode::OK);
        let picks = body.as_array().expect("recommendation array");
        assert_eq!(picks.len(), 2);
        assert!(picks[0]["reasoning"].is_string());
        assert!(picks[0]["risk_label"].as_str().expect("label").ends_with("Risk"));
    }

    #[tokio::test]
    async fn projections_and_sensitivity() {
        let (status, body) = send(
            app(true),
            get_request("/api/v1/properties/sample-001/projections?years=3&rent_growth=0.05"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cash_flow"].as_array().expect("years").len(), 3);
        assert_eq!(body["assumptions"]["rent_growth"], 0.05);
        assert_eq!(body["appreciation"].as_array().expect("scenarios").len(), 3);

        let (status, _) = send(
            app(true),
            get_request("/api/v1/properties/sample-001/projections?years=500"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            app(true),
            json_request(
                "POST",
                "/api/v1/properties/sample-001/sensitivity",
                json!({ "variables": { "rent": [-0.1, 0.1] } }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rent"].as_array().expect("rent points").len(), 2);
        assert!(body.get("price").is_none());

        let (status, body) = send(
            app(true),
            json_request("POST", "/api/v1/properties/sample-001/sensitivity", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_object().expect("variables").len(), 4);
    }

    #[tokio::test]
    async fn portfolio_views() {
        let (status, body) = send(app(true), get_request("/api/v1/portfolio/summary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_properties"], 6);
        assert_eq!(body["total_bedrooms"], 20);
        assert_eq!(body["total_square_feet"], 11_930);

        let (status, body) = send(app(true), get_request("/api/v1/scoring/methodology")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score_ranges"].as_array().expect("bands").len(), 7);
        assert_eq!(body["weights"]["roi"], 0.25);

        let (status, body) = send(
            app(true),
            json_request(
                "POST",
                "/api/v1/comparisons",
                json!({ "property_ids": ["sample-002", "sample-001"] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let compared = body.as_array().expect("comparison array");
        assert_eq!(compared[0]["property_id"], "sample-001");
    }
}
