use crate::simulator::domain::{AgentType, ChangeBand, PolicyParameters};
use rand::Rng;
use serde::Serialize;

/// Deterministic behavioral shift for one market actor. Layout coordinates
/// live on [`AgentBehavior`] so chart placement can never influence scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentShift {
    pub agent: AgentType,
    pub baseline: f64,
    pub new_value: f64,
    pub change: f64,
    pub band: ChangeBand,
}

impl AgentShift {
    fn new(agent: AgentType, baseline: f64, new_value: f64) -> Self {
        let change = new_value - baseline;
        Self {
            agent,
            baseline,
            new_value,
            change,
            band: ChangeBand::classify(change),
        }
    }
}

/// Computes the five fixed behavioral responses, each clamped to its own
/// floor or ceiling, in [`AgentType::ordered`] order.
pub fn agent_shifts(params: &PolicyParameters) -> Vec<AgentShift> {
    let tariff = params.tariff;
    let global_price = params.global_price;
    let yield_gap = params.yield_gap;
    let price_impact = tariff * 0.8 + (global_price - 1000.0) / 20.0;

    AgentType::ordered()
        .into_iter()
        .map(|agent| match agent {
            AgentType::Farmer => AgentShift::new(
                agent,
                50.0,
                (50.0 + tariff * 2.5 + (100.0 - yield_gap) * 0.3).min(100.0),
            ),
            AgentType::Trader => AgentShift::new(
                agent,
                65.0,
                (65.0 - tariff * 1.5 + (global_price - 1000.0) / 50.0).max(20.0),
            ),
            AgentType::Investor => AgentShift::new(
                agent,
                40.0,
                (40.0 + tariff * 2.0 + (100.0 - yield_gap) * 0.4).min(90.0),
            ),
            AgentType::Consumer => {
                AgentShift::new(agent, 100.0, (100.0 - price_impact * 0.5).max(75.0))
            }
            AgentType::Importer => AgentShift::new(
                agent,
                70.0,
                (70.0 - tariff * 1.2 + yield_gap * 0.3).max(30.0),
            ),
        })
        .collect()
}

/// Shift plus cosmetic scatter-plot placement. Positions are resampled on
/// every call and carry no meaning.
#[derive(Debug, Clone, Serialize)]
pub struct AgentBehavior {
    pub agent: AgentType,
    pub metric: &'static str,
    pub baseline: f64,
    pub new_value: f64,
    pub change: f64,
    pub band: ChangeBand,
    pub display_x: f64,
    pub display_y: f64,
}

pub fn place_agents<R: Rng>(shifts: &[AgentShift], rng: &mut R) -> Vec<AgentBehavior> {
    shifts
        .iter()
        .map(|shift| AgentBehavior {
            agent: shift.agent,
            metric: shift.agent.metric(),
            baseline: shift.baseline,
            new_value: shift.new_value,
            change: shift.change,
            band: shift.band,
            display_x: rng.gen_range(10.0..90.0),
            display_y: rng.gen_range(20.0..80.0),
        })
        .collect()
}
