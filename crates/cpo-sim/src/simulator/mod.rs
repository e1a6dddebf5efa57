pub mod domain;
pub mod engine;
pub mod memo;
pub mod reference;
pub mod scenarios;
pub mod session;

pub use domain::{AgentType, ChangeBand, ParameterField, PolicyParameters, RiskLevel};
pub use engine::{ImpactAssessment, Scorecard};
pub use memo::{ExecutiveMemo, MemoService};
pub use scenarios::{Scenario, ScenarioId, ScenarioService};
pub use session::SimulatorSession;
