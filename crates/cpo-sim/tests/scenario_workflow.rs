use chrono::NaiveDate;
use cpo_sim::simulator::domain::{ParameterField, PolicyParameters};
use cpo_sim::simulator::scenarios::{
    seed_scenarios, RepositoryError, Scenario, ScenarioId, ScenarioRepository, ScenarioService,
};
use cpo_sim::simulator::session::{PreferenceStore, SimulatorSession, WELCOME_FLAG_KEY};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct VecRepository {
    scenarios: Mutex<Vec<Scenario>>,
}

impl VecRepository {
    fn seeded() -> Self {
        Self {
            scenarios: Mutex::new(seed_scenarios()),
        }
    }
}

impl ScenarioRepository for VecRepository {
    fn insert(&self, scenario: Scenario) -> Result<(), RepositoryError> {
        let mut guard = self
            .scenarios
            .lock()
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
        if guard.iter().any(|existing| existing.id == scenario.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(scenario);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Scenario>, RepositoryError> {
        let guard = self
            .scenarios
            .lock()
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
        Ok(guard.clone())
    }

    fn fetch(&self, id: &ScenarioId) -> Result<Scenario, RepositoryError> {
        self.list()?
            .into_iter()
            .find(|scenario| &scenario.id == id)
            .ok_or(RepositoryError::NotFound)
    }

    fn delete(&self, id: &ScenarioId) -> Result<(), RepositoryError> {
        let mut guard = self
            .scenarios
            .lock()
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
        let before = guard.len();
        guard.retain(|scenario| &scenario.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
struct MapPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MapPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.values.lock() {
            guard.insert(key.to_owned(), value.to_owned());
        }
    }
}

fn session() -> SimulatorSession<VecRepository, MapPreferences> {
    SimulatorSession::new(VecRepository::seeded(), MapPreferences::default())
}

#[test]
fn seeded_store_round_trips_through_the_session() {
    let mut session = session();
    let listed = session.scenarios().list().expect("list succeeds");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].timestamp, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

    let aggressive = listed[1].id.clone();
    session.load_scenario(&aggressive).expect("load succeeds");
    assert_eq!(session.parameters().tariff, 18.0);
    assert_eq!(session.parameters().volatility_index, 65.0);
}

#[test]
fn save_delete_preserves_the_order_of_survivors() {
    let session = session();
    let service = session.scenarios();

    let saved = service
        .save("Mid Range", &PolicyParameters::default())
        .expect("save succeeds")
        .expect("named save stores");

    let before: Vec<ScenarioId> = service
        .list()
        .expect("list succeeds")
        .into_iter()
        .map(|scenario| scenario.id)
        .collect();
    assert_eq!(before.len(), 3);

    service.delete(&before[0]).expect("delete succeeds");

    let after: Vec<ScenarioId> = service
        .list()
        .expect("list succeeds")
        .into_iter()
        .map(|scenario| scenario.id)
        .collect();
    assert_eq!(after, vec![before[1].clone(), saved.id]);
}

#[test]
fn blank_names_never_reach_the_store() {
    let session = session();
    for name in ["", " ", "\t"] {
        assert!(session.save_scenario(name).expect("save succeeds").is_none());
    }
    assert_eq!(session.scenarios().list().expect("list succeeds").len(), 2);
}

#[test]
fn export_serializes_every_scenario_field() {
    let session = session();
    let listed = session.scenarios().list().expect("list succeeds");
    let (file_name, body) = session
        .scenarios()
        .export(&listed[0].id)
        .expect("export succeeds");

    assert_eq!(file_name, "Conservative_Approach_scenario.json");
    let value: serde_json::Value = serde_json::from_str(&body).expect("valid JSON");
    for field in [
        "id",
        "name",
        "tariff",
        "global_price",
        "yield_gap",
        "volatility_index",
        "timestamp",
    ] {
        assert!(!value[field].is_null(), "missing field {field}");
    }
    assert_eq!(value["global_price"], 1050.0);
}

#[test]
fn text_entry_recovery_semantics() {
    let mut session = session();

    assert!(!session.apply_entry(ParameterField::YieldGap, "not a number"));
    assert_eq!(session.parameters().yield_gap, 58.0);

    assert!(session.apply_entry(ParameterField::YieldGap, "12"));
    assert_eq!(session.parameters().yield_gap, 30.0);

    assert!(!session.apply_entry(ParameterField::Tariff, "NaN"));
    assert_eq!(session.parameters().tariff, 12.0);
}

#[test]
fn welcome_flag_uses_the_persisted_key() {
    let preferences = MapPreferences::default();
    preferences.put(WELCOME_FLAG_KEY, "true");

    let session = SimulatorSession::new(VecRepository::seeded(), preferences);
    assert!(!session.first_visit());
}

#[test]
fn presets_apply_atomically() {
    let mut session = session();
    session.load_preset("crisis_scenario").expect("preset loads");

    let params = session.parameters();
    assert_eq!(params.tariff, 12.0);
    assert_eq!(params.global_price, 1420.0);
    assert_eq!(params.yield_gap, 60.0);
    assert_eq!(params.volatility_index, 85.0);
}
