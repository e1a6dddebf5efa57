use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use cpo_sim::error::AppError;
use cpo_sim::simulator::domain::{volatility_descriptor, PolicyParameters, RiskLevel};
use cpo_sim::simulator::engine::{
    agent_shifts, impact_curve, place_agents, projected_policy, region_impacts, sensitivity,
    solve_target, AgentBehavior, ImpactAssessment, ImpactCurvePoint, RegionImpact, Scorecard,
    SensitivitySnapshot,
};
use cpo_sim::simulator::memo::{ExecutiveMemo, MemoService};
use cpo_sim::simulator::reference::{
    historical_policies, presets, HistoricalPolicy, PresetScenario,
};
use cpo_sim::simulator::scenarios::{Scenario, ScenarioId, ScenarioRepository, ScenarioService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn simulator_routes<R>(
    scenarios: Arc<ScenarioService<R>>,
    memo: Arc<MemoService>,
) -> Router
where
    R: ScenarioRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/simulation/report",
            post(simulation_report_endpoint),
        )
        .route("/api/v1/memo", post(memo_endpoint))
        .route("/api/v1/targets", post(target_endpoint))
        .route(
            "/api/v1/scenarios",
            post(save_scenario_endpoint::<R>).get(list_scenarios_endpoint::<R>),
        )
        .route("/api/v1/scenarios/:id", delete(delete_scenario_endpoint::<R>))
        .route(
            "/api/v1/scenarios/:id/export",
            get(export_scenario_endpoint::<R>),
        )
        .route("/api/v1/reference/history", get(history_endpoint))
        .route("/api/v1/reference/presets", get(presets_endpoint))
        .layer(Extension(scenarios))
        .layer(Extension(memo))
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

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SimulationReportRequest {
    pub(crate) tariff: Option<f64>,
    pub(crate) global_price: Option<f64>,
    pub(crate) yield_gap: Option<f64>,
    pub(crate) volatility_index: Option<f64>,
    #[serde(default)]
    pub(crate) include_curve: bool,
}

impl SimulationReportRequest {
    fn parameters(&self) -> PolicyParameters {
        let defaults = PolicyParameters::default();
        PolicyParameters::clamped(
            self.tariff.unwrap_or(defaults.tariff),
            self.global_price.unwrap_or(defaults.global_price),
            self.yield_gap.unwrap_or(defaults.yield_gap),
            self.volatility_index.unwrap_or(defaults.volatility_index),
        )
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ScorecardView {
    pub(crate) consumer: u8,
    pub(crate) consumer_note: &'static str,
    pub(crate) farmer: u8,
    pub(crate) farmer_note: &'static str,
    pub(crate) fiscal: u8,
    pub(crate) fiscal_note: &'static str,
    pub(crate) overall: u8,
}

impl From<Scorecard> for ScorecardView {
    fn from(scorecard: Scorecard) -> Self {
        Self {
            consumer: scorecard.consumer,
            consumer_note: scorecard.consumer_note(),
            farmer: scorecard.farmer,
            farmer_note: scorecard.farmer_note(),
            fiscal: scorecard.fiscal,
            fiscal_note: scorecard.fiscal_note(),
            overall: scorecard.overall,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SimulationReportResponse {
    pub(crate) parameters: PolicyParameters,
    pub(crate) impact: ImpactAssessment,
    pub(crate) scorecard: ScorecardView,
    pub(crate) risk_level: RiskLevel,
    pub(crate) volatility_note: &'static str,
    pub(crate) agents: Vec<AgentBehavior>,
    pub(crate) regions: Vec<RegionImpact>,
    pub(crate) projection: HistoricalPolicy,
    pub(crate) sensitivity: SensitivitySnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) curve: Option<Vec<ImpactCurvePoint>>,
}

pub(crate) async fn simulation_report_endpoint(
    Json(payload): Json<SimulationReportRequest>,
) -> Json<SimulationReportResponse> {
    let params = payload.parameters();
    let impact = ImpactAssessment::for_parameters(&params);
    let shifts = agent_shifts(&params);
    let agents = place_agents(&shifts, &mut rand::thread_rng());
    let curve = payload
        .include_curve
        .then(|| impact_curve(params.global_price, params.yield_gap));

    Json(SimulationReportResponse {
        parameters: params,
        scorecard: Scorecard::for_impact(&impact).into(),
        risk_level: RiskLevel::from_volatility(params.volatility_index),
        volatility_note: volatility_descriptor(params.volatility_index),
        agents,
        regions: region_impacts(impact.domestic_price_increase_pct),
        projection: projected_policy(params.tariff, params.global_price),
        sensitivity: sensitivity(&params),
        curve,
        impact,
    })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MemoRequest {
    pub(crate) tariff: Option<f64>,
    pub(crate) global_price: Option<f64>,
    pub(crate) yield_gap: Option<f64>,
}

pub(crate) async fn memo_endpoint(
    Extension(memo): Extension<Arc<MemoService>>,
    Json(payload): Json<MemoRequest>,
) -> Result<Json<ExecutiveMemo>, AppError> {
    let defaults = PolicyParameters::default();
    let params = PolicyParameters::clamped(
        payload.tariff.unwrap_or(defaults.tariff),
        payload.global_price.unwrap_or(defaults.global_price),
        payload.yield_gap.unwrap_or(defaults.yield_gap),
        defaults.volatility_index,
    );

    let memo = memo.generate(&params).await?;
    Ok(Json(memo))
}

#[derive(Debug, Deserialize)]
pub(crate) struct TargetRequest {
    pub(crate) target_year: i32,
    pub(crate) target_self_reliance: f64,
    pub(crate) current_yield_gap: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TargetResponse {
    #[serde(flatten)]
    pub(crate) plan: cpo_sim::simulator::engine::TargetPlan,
    pub(crate) roadmap: Vec<String>,
}

pub(crate) async fn target_endpoint(
    Json(payload): Json<TargetRequest>,
) -> Result<Json<TargetResponse>, AppError> {
    let current_gap = payload
        .current_yield_gap
        .unwrap_or(PolicyParameters::default().yield_gap);
    let plan = solve_target(payload.target_year, payload.target_self_reliance, current_gap)?;
    let roadmap = plan.roadmap();
    Ok(Json(TargetResponse { plan, roadmap }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaveScenarioRequest {
    pub(crate) name: String,
    pub(crate) tariff: Option<f64>,
    pub(crate) global_price: Option<f64>,
    pub(crate) yield_gap: Option<f64>,
    pub(crate) volatility_index: Option<f64>,
}

pub(crate) async fn save_scenario_endpoint<R>(
    Extension(scenarios): Extension<Arc<ScenarioService<R>>>,
    Json(payload): Json<SaveScenarioRequest>,
) -> Result<Response, AppError>
where
    R: ScenarioRepository + Send + Sync + 'static,
{
    let defaults = PolicyParameters::default();
    let params = PolicyParameters::clamped(
        payload.tariff.unwrap_or(defaults.tariff),
        payload.global_price.unwrap_or(defaults.global_price),
        payload.yield_gap.unwrap_or(defaults.yield_gap),
        payload.volatility_index.unwrap_or(defaults.volatility_index),
    );

    match scenarios.save(&payload.name, &params)? {
        Some(scenario) => Ok((StatusCode::CREATED, Json(scenario)).into_response()),
        None => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "scenario name must not be blank" })),
        )
            .into_response()),
    }
}

pub(crate) async fn list_scenarios_endpoint<R>(
    Extension(scenarios): Extension<Arc<ScenarioService<R>>>,
) -> Result<Json<Vec<Scenario>>, AppError>
where
    R: ScenarioRepository + Send + Sync + 'static,
{
    Ok(Json(scenarios.list()?))
}

pub(crate) async fn delete_scenario_endpoint<R>(
    Extension(scenarios): Extension<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    R: ScenarioRepository + Send + Sync + 'static,
{
    scenarios.delete(&ScenarioId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn export_scenario_endpoint<R>(
    Extension(scenarios): Extension<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: ScenarioRepository + Send + Sync + 'static,
{
    let (file_name, body) = scenarios.export(&ScenarioId(id))?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response())
}

pub(crate) async fn history_endpoint() -> Json<Vec<HistoricalPolicy>> {
    Json(historical_policies())
}

pub(crate) async fn presets_endpoint() -> Json<Vec<PresetScenario>> {
    Json(presets())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryScenarioRepository;
    use cpo_sim::simulator::memo::MemoServiceError;
    use std::time::Duration;

    fn scenario_service() -> Arc<ScenarioService<InMemoryScenarioRepository>> {
        Arc::new(ScenarioService::new(InMemoryScenarioRepository::seeded()))
    }

    #[tokio::test]
    async fn simulation_report_covers_the_dashboard_panels() {
        let request = SimulationReportRequest {
            include_curve: true,
            ..SimulationReportRequest::default()
        };

        let Json(body) = simulation_report_endpoint(Json(request)).await;

        assert_eq!(body.parameters.tariff, 12.0);
        assert!((body.impact.domestic_price_increase_pct - 18.6).abs() < 1e-9);
        assert_eq!(body.agents.len(), 5);
        assert_eq!(body.regions.len(), 15);
        assert_eq!(body.projection.month, "Projected");
        assert_eq!(body.curve.map(|curve| curve.len()), Some(26));
    }

    #[tokio::test]
    async fn simulation_report_clamps_out_of_range_inputs() {
        let request = SimulationReportRequest {
            tariff: Some(80.0),
            global_price: Some(200.0),
            ..SimulationReportRequest::default()
        };

        let Json(body) = simulation_report_endpoint(Json(request)).await;

        assert_eq!(body.parameters.tariff, 30.0);
        assert_eq!(body.parameters.global_price, 800.0);
        assert!(body.curve.is_none());
    }

    #[tokio::test]
    async fn memo_endpoint_rejects_concurrent_generation() {
        let memo = Arc::new(MemoService::with_delay(Duration::from_millis(0)));

        let Json(body) = memo_endpoint(
            Extension(memo.clone()),
            Json(MemoRequest {
                tariff: Some(18.0),
                global_price: Some(1350.0),
                yield_gap: None,
            }),
        )
        .await
        .expect("memo composes");
        assert_eq!(body.risk_level, RiskLevel::High);

        // Direct busy check; the endpoint maps Busy to a 409 via AppError.
        assert!(!memo.is_busy());
        let err = AppError::from(MemoServiceError::Busy);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn target_endpoint_back_solves_and_rejects_past_years() {
        let Json(body) = target_endpoint(Json(TargetRequest {
            target_year: 2030,
            target_self_reliance: 70.0,
            current_yield_gap: None,
        }))
        .await
        .expect("plan solves");
        assert_eq!(body.plan.years, 5);
        assert!((body.plan.required_tariff - 12.8).abs() < 1e-9);
        assert_eq!(body.roadmap.len(), 6);

        let err = target_endpoint(Json(TargetRequest {
            target_year: 2025,
            target_self_reliance: 70.0,
            current_yield_gap: None,
        }))
        .await
        .expect_err("baseline year rejected");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_scenario_name_is_unprocessable() {
        let scenarios = scenario_service();

        let response = save_scenario_endpoint(
            Extension(scenarios.clone()),
            Json(SaveScenarioRequest {
                name: "   ".to_string(),
                tariff: None,
                global_price: None,
                yield_gap: None,
                volatility_index: None,
            }),
        )
        .await
        .expect("handler succeeds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let Json(listed) = list_scenarios_endpoint(Extension(scenarios))
            .await
            .expect("list succeeds");
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn scenario_lifecycle_over_the_api() {
        let scenarios = scenario_service();

        let response = save_scenario_endpoint(
            Extension(scenarios.clone()),
            Json(SaveScenarioRequest {
                name: "Stress Case".to_string(),
                tariff: Some(18.0),
                global_price: Some(1420.0),
                yield_gap: Some(60.0),
                volatility_index: Some(85.0),
            }),
        )
        .await
        .expect("handler succeeds");
        assert_eq!(response.status(), StatusCode::CREATED);

        let Json(listed) = list_scenarios_endpoint(Extension(scenarios.clone()))
            .await
            .expect("list succeeds");
        assert_eq!(listed.len(), 3);
        let saved_id = listed[2].id.clone();

        let export = export_scenario_endpoint(
            Extension(scenarios.clone()),
            Path(saved_id.as_str().to_string()),
        )
        .await
        .expect("export succeeds");
        let disposition = export
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(disposition.contains("Stress_Case_scenario.json"));

        let status = delete_scenario_endpoint(
            Extension(scenarios.clone()),
            Path(saved_id.as_str().to_string()),
        )
        .await
        .expect("delete succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);

        let missing = delete_scenario_endpoint(
            Extension(scenarios),
            Path(saved_id.as_str().to_string()),
        )
        .await
        .expect_err("second delete fails");
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reference_endpoints_serve_the_static_tables() {
        let Json(history) = history_endpoint().await;
        assert_eq!(history.len(), 9);

        let Json(preset_rows) = presets_endpoint().await;
        assert_eq!(preset_rows.len(), 4);
        assert!(preset_rows
            .iter()
            .any(|preset| preset.key == "crisis_scenario"));
    }
}
