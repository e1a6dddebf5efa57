use crate::simulator::domain::{PolicyParameters, SimulationError};
use crate::simulator::reference::presets;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static SCENARIO_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_scenario_id() -> ScenarioId {
    let id = SCENARIO_SEQUENCE.fetch_add(1, Ordering::SeqCst);
    ScenarioId(format!("scn-{id:06}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub String);

impl ScenarioId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named parameter snapshot saved by the analyst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub tariff: f64,
    pub global_price: f64,
    pub yield_gap: f64,
    pub volatility_index: f64,
    pub timestamp: NaiveDate,
}

impl Scenario {
    pub fn parameters(&self) -> PolicyParameters {
        PolicyParameters::clamped(
            self.tariff,
            self.global_price,
            self.yield_gap,
            self.volatility_index,
        )
    }

    /// Pretty JSON of the scenario itself, for download. Export is one-way;
    /// there is no import path.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn export_file_name(&self) -> String {
        format!("{}_scenario.json", self.name.replace(' ', "_"))
    }
}

/// Two worked examples shipped with every fresh store.
pub fn seed_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: ScenarioId("scn-seed-1".to_owned()),
            name: "Conservative Approach".to_owned(),
            tariff: 8.0,
            global_price: 1050.0,
            yield_gap: 58.0,
            volatility_index: 35.0,
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default(),
        },
        Scenario {
            id: ScenarioId("scn-seed-2".to_owned()),
            name: "Aggressive Protection".to_owned(),
            tariff: 18.0,
            global_price: 1180.0,
            yield_gap: 55.0,
            volatility_index: 65.0,
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 16).unwrap_or_default(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("scenario id already exists")]
    Conflict,
    #[error("scenario not found")]
    NotFound,
    #[error("scenario store unavailable: {0}")]
    Unavailable(String),
}

/// Storage seam for saved scenarios. `list` preserves insertion order.
pub trait ScenarioRepository {
    fn insert(&self, scenario: Scenario) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<Scenario>, RepositoryError>;
    fn fetch(&self, id: &ScenarioId) -> Result<Scenario, RepositoryError>;
    fn delete(&self, id: &ScenarioId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("scenario export failed: {0}")]
    Export(#[from] serde_json::Error),
}

/// Save/load/export workflow on top of a [`ScenarioRepository`].
pub struct ScenarioService<R> {
    repository: R,
}

impl<R: ScenarioRepository> ScenarioService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Saves the current parameters under `name`. A blank name is treated as
    /// an abandoned dialog and skipped without error.
    pub fn save(
        &self,
        name: &str,
        params: &PolicyParameters,
    ) -> Result<Option<Scenario>, ScenarioServiceError> {
        self.save_on(name, params, chrono::Local::now().date_naive())
    }

    pub fn save_on(
        &self,
        name: &str,
        params: &PolicyParameters,
        date: NaiveDate,
    ) -> Result<Option<Scenario>, ScenarioServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let scenario = Scenario {
            id: next_scenario_id(),
            name: name.to_owned(),
            tariff: params.tariff,
            global_price: params.global_price,
            yield_gap: params.yield_gap,
            volatility_index: params.volatility_index,
            timestamp: date,
        };
        self.repository.insert(scenario.clone())?;
        Ok(Some(scenario))
    }

    pub fn list(&self) -> Result<Vec<Scenario>, ScenarioServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn load(&self, id: &ScenarioId) -> Result<PolicyParameters, ScenarioServiceError> {
        let scenario = self.repository.fetch(id)?;
        Ok(scenario.parameters())
    }

    pub fn delete(&self, id: &ScenarioId) -> Result<(), ScenarioServiceError> {
        Ok(self.repository.delete(id)?)
    }

    /// Renders one saved scenario as a pretty JSON document plus its
    /// suggested download file name.
    pub fn export(&self, id: &ScenarioId) -> Result<(String, String), ScenarioServiceError> {
        let scenario = self.repository.fetch(id)?;
        let body = scenario.export_json()?;
        Ok((scenario.export_file_name(), body))
    }

    pub fn load_preset(&self, key: &str) -> Result<PolicyParameters, ScenarioServiceError> {
        presets()
            .into_iter()
            .find(|preset| preset.key == key)
            .map(|preset| {
                PolicyParameters::clamped(
                    preset.tariff,
                    preset.global_price,
                    preset.yield_gap,
                    preset.volatility_index,
                )
            })
            .ok_or_else(|| SimulationError::UnknownPreset(key.to_owned()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecRepository {
        scenarios: Mutex<Vec<Scenario>>,
    }

    impl ScenarioRepository for VecRepository {
        fn insert(&self, scenario: Scenario) -> Result<(), RepositoryError> {
            let mut scenarios = self
                .scenarios
                .lock()
                .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
            if scenarios.iter().any(|existing| existing.id == scenario.id) {
                return Err(RepositoryError::Conflict);
            }
            scenarios.push(scenario);
            Ok(())
        }

        fn list(&self) -> Result<Vec<Scenario>, RepositoryError> {
            let scenarios = self
                .scenarios
                .lock()
                .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
            Ok(scenarios.clone())
        }

        fn fetch(&self, id: &ScenarioId) -> Result<Scenario, RepositoryError> {
            self.list()?
                .into_iter()
                .find(|scenario| &scenario.id == id)
                .ok_or(RepositoryError::NotFound)
        }

        fn delete(&self, id: &ScenarioId) -> Result<(), RepositoryError> {
            let mut scenarios = self
                .scenarios
                .lock()
                .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
            let before = scenarios.len();
            scenarios.retain(|scenario| &scenario.id != id);
            if scenarios.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn blank_name_is_a_silent_no_op() {
        let service = ScenarioService::new(VecRepository::default());
        let params = PolicyParameters::default();

        assert!(service.save_on("", &params, fixed_date()).unwrap().is_none());
        assert!(service.save_on("   ", &params, fixed_date()).unwrap().is_none());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn save_assigns_sequential_ids_and_preserves_order() {
        let service = ScenarioService::new(VecRepository::default());
        let params = PolicyParameters::default();

        let first = service
            .save_on("High Tariff Test", &params, fixed_date())
            .unwrap()
            .unwrap();
        let second = service
            .save_on("Follow Up", &params, fixed_date())
            .unwrap()
            .unwrap();
        assert!(first.id.as_str().starts_with("scn-"));
        assert_ne!(first.id, second.id);

        let listed = service.list().unwrap();
        assert_eq!(listed[0].name, "High Tariff Test");
        assert_eq!(listed[1].name, "Follow Up");
    }

    #[test]
    fn delete_removes_exactly_the_named_entry() {
        let service = ScenarioService::new(VecRepository::default());
        let params = PolicyParameters::default();

        let keep = service.save_on("Keep", &params, fixed_date()).unwrap().unwrap();
        let drop = service.save_on("Drop", &params, fixed_date()).unwrap().unwrap();
        let tail = service.save_on("Tail", &params, fixed_date()).unwrap().unwrap();

        service.delete(&drop.id).unwrap();

        let remaining = service.list().unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].id, keep.id);
        assert_eq!(remaining[1].id, tail.id);

        assert!(matches!(
            service.delete(&drop.id),
            Err(ScenarioServiceError::Repository(RepositoryError::NotFound))
        ));
    }

    #[test]
    fn export_names_the_file_after_the_scenario() {
        let service = ScenarioService::new(VecRepository::default());
        let params = PolicyParameters::clamped(18.0, 1180.0, 55.0, 65.0);

        let saved = service
            .save_on("Aggressive Protection", &params, fixed_date())
            .unwrap()
            .unwrap();
        let (file_name, body) = service.export(&saved.id).unwrap();

        assert_eq!(file_name, "Aggressive_Protection_scenario.json");
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["name"], "Aggressive Protection");
        assert_eq!(value["tariff"], 18.0);
        assert_eq!(value["timestamp"], "2025-03-01");
    }

    #[test]
    fn presets_resolve_by_key() {
        let service = ScenarioService::new(VecRepository::default());

        let crisis = service.load_preset("crisis_scenario").unwrap();
        assert_eq!(crisis.global_price, 1420.0);
        assert_eq!(crisis.volatility_index, 85.0);

        assert!(matches!(
            service.load_preset("laissez_faire"),
            Err(ScenarioServiceError::Simulation(
                SimulationError::UnknownPreset(_)
            ))
        ));
    }

    #[test]
    fn seeds_match_the_documented_examples() {
        let seeds = seed_scenarios();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].name, "Conservative Approach");
        assert_eq!(seeds[0].tariff, 8.0);
        assert_eq!(seeds[1].name, "Aggressive Protection");
        assert_eq!(
            seeds[1].timestamp,
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
        );
    }
}
