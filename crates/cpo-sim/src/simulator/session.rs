use crate::simulator::domain::{ParameterField, PolicyParameters, RiskLevel};
use crate::simulator::engine::{
    agent_shifts, impact_curve, region_impacts, AgentShift, ImpactAssessment, ImpactCurvePoint,
    RegionImpact, Scorecard,
};
use crate::simulator::scenarios::{
    Scenario, ScenarioId, ScenarioRepository, ScenarioService, ScenarioServiceError,
};

/// Key under which the welcome-dialog flag is persisted.
pub const WELCOME_FLAG_KEY: &str = "hasSeenWelcome";

const WELCOME_FLAG_VALUE: &str = "true";

/// Durable key/value seam for per-analyst flags.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
}

/// Single owner of the mutable simulator state: the live parameter set, the
/// scenario workflow, and the first-visit flag. All derived figures are
/// recomputed on demand from the current parameters.
pub struct SimulatorSession<R, P> {
    params: PolicyParameters,
    scenarios: ScenarioService<R>,
    preferences: P,
}

impl<R: ScenarioRepository, P: PreferenceStore> SimulatorSession<R, P> {
    pub fn new(repository: R, preferences: P) -> Self {
        Self {
            params: PolicyParameters::default(),
            scenarios: ScenarioService::new(repository),
            preferences,
        }
    }

    pub fn parameters(&self) -> &PolicyParameters {
        &self.params
    }

    pub fn set_parameter(&mut self, field: ParameterField, value: f64) {
        self.params.set(field, value);
    }

    /// Text-entry semantics: unparseable input keeps the previous value,
    /// parseable input is clamped to the field range.
    pub fn apply_entry(&mut self, field: ParameterField, raw: &str) -> bool {
        self.params.apply_entry(field, raw)
    }

    pub fn reset(&mut self) {
        self.params = PolicyParameters::default();
    }

    pub fn impact(&self) -> ImpactAssessment {
        ImpactAssessment::for_parameters(&self.params)
    }

    pub fn scorecard(&self) -> Scorecard {
        Scorecard::for_parameters(&self.params)
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_volatility(self.params.volatility_index)
    }

    pub fn agent_shifts(&self) -> Vec<AgentShift> {
        agent_shifts(&self.params)
    }

    pub fn region_impacts(&self) -> Vec<RegionImpact> {
        region_impacts(self.impact().domestic_price_increase_pct)
    }

    pub fn impact_curve(&self) -> Vec<ImpactCurvePoint> {
        impact_curve(self.params.global_price, self.params.yield_gap)
    }

    pub fn scenarios(&self) -> &ScenarioService<R> {
        &self.scenarios
    }

    pub fn save_scenario(&self, name: &str) -> Result<Option<Scenario>, ScenarioServiceError> {
        self.scenarios.save(name, &self.params)
    }

    pub fn load_scenario(&mut self, id: &ScenarioId) -> Result<(), ScenarioServiceError> {
        self.params = self.scenarios.load(id)?;
        Ok(())
    }

    pub fn load_preset(&mut self, key: &str) -> Result<(), ScenarioServiceError> {
        self.params = self.scenarios.load_preset(key)?;
        Ok(())
    }

    pub fn first_visit(&self) -> bool {
        self.preferences
            .get(WELCOME_FLAG_KEY)
            .as_deref()
            != Some(WELCOME_FLAG_VALUE)
    }

    pub fn mark_welcome_seen(&self) {
        self.preferences.put(WELCOME_FLAG_KEY, WELCOME_FLAG_VALUE);
    }
}
