use cpo_sim::simulator::scenarios::{
    seed_scenarios, RepositoryError, Scenario, ScenarioId, ScenarioRepository,
};
use cpo_sim::simulator::session::PreferenceStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Order-preserving in-memory scenario store.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScenarioRepository {
    scenarios: Arc<Mutex<Vec<Scenario>>>,
}

impl InMemoryScenarioRepository {
    pub(crate) fn seeded() -> Self {
        Self {
            scenarios: Arc::new(Mutex::new(seed_scenarios())),
        }
    }
}

impl ScenarioRepository for InMemoryScenarioRepository {
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
        let guard = self
            .scenarios
            .lock()
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
        guard
            .iter()
            .find(|scenario| &scenario.id == id)
            .cloned()
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryPreferenceStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.values.lock() {
            guard.insert(key.to_owned(), value.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_repository_lists_both_examples_in_order() {
        let repository = InMemoryScenarioRepository::seeded();
        let listed = repository.list().expect("list succeeds");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Conservative Approach");
        assert_eq!(listed[1].name, "Aggressive Protection");
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let repository = InMemoryScenarioRepository::seeded();
        let existing = repository.list().expect("list succeeds").remove(0);
        assert_eq!(
            repository.insert(existing),
            Err(RepositoryError::Conflict)
        );
    }
}
