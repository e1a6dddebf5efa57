use crate::simulator::domain::SimulationError;
use serde::Serialize;

/// All planning horizons are measured from this year.
pub const BASELINE_YEAR: i32 = 2025;

/// Back-solved policy mix for a self-reliance target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetPlan {
    pub target_year: i32,
    pub target_self_reliance_pct: f64,
    pub years: i32,
    pub target_gap: f64,
    pub gap_reduction: f64,
    pub annual_improvement: f64,
    pub required_tariff: f64,
    pub required_subsidy_musd: f64,
    pub investment_needed_musd: f64,
}

impl TargetPlan {
    /// Year-by-year prose summary of what the plan demands.
    pub fn roadmap(&self) -> Vec<String> {
        vec![
            format!(
                "Close the yield gap from {:.0}% to {:.0}% by {}",
                self.target_gap + self.gap_reduction,
                self.target_gap,
                self.target_year
            ),
            format!(
                "Sustain {:.1} percentage points of yield improvement per year",
                self.annual_improvement
            ),
            format!(
                "Hold the import tariff near {:.1}% across the transition",
                self.required_tariff
            ),
            format!(
                "Fund ${:.0}M in annual cultivation subsidies",
                self.required_subsidy_musd
            ),
            format!(
                "Commit ${:.0}M of processing and plantation investment overall",
                self.investment_needed_musd
            ),
            format!(
                "Expand irrigation coverage by {:.1}% per year in oilseed belts",
                self.annual_improvement * 2.0
            ),
        ]
    }
}

/// Works backwards from a self-reliance goal to the yearly improvement rate
/// and the tariff, subsidy and investment levels that sustain it.
pub fn solve_target(
    target_year: i32,
    target_self_reliance_pct: f64,
    current_yield_gap: f64,
) -> Result<TargetPlan, SimulationError> {
    if target_year <= BASELINE_YEAR {
        return Err(SimulationError::TargetYearNotAhead {
            target_year,
            baseline_year: BASELINE_YEAR,
        });
    }

    let years = target_year - BASELINE_YEAR;
    let target_gap = 100.0 - target_self_reliance_pct;
    let gap_reduction = current_yield_gap - target_gap;
    let annual_improvement = gap_reduction / years as f64;

    let required_tariff = (10.0 + annual_improvement * 0.5).clamp(8.0, 20.0);
    let required_subsidy_musd = annual_improvement * 250.0;
    let investment_needed_musd = years as f64 * annual_improvement * 180.0;

    Ok(TargetPlan {
        target_year,
        target_self_reliance_pct,
        years,
        target_gap,
        gap_reduction,
        annual_improvement,
        required_tariff,
        required_subsidy_musd,
        investment_needed_musd,
    })
}
