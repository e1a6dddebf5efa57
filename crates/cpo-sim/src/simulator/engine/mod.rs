mod agents;
mod regions;
mod targets;

pub use agents::{agent_shifts, place_agents, AgentBehavior, AgentShift};
pub use regions::{region_impacts, RegionImpact, CRITICAL_IMPACT_THRESHOLD};
pub use targets::{solve_target, TargetPlan, BASELINE_YEAR};

use super::domain::PolicyParameters;
use super::reference::{
    HistoricalPolicy, SensitivityCoefficients, GAP_SENSITIVITY, PRICE_SENSITIVITY,
    TARIFF_SENSITIVITY,
};
use serde::Serialize;

/// Headline projections derived from the current parameter set. All fields
/// are signed percentages except the import bill (USD billions).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactAssessment {
    pub domestic_price_increase_pct: f64,
    pub farmer_income_increase_pct: f64,
    pub import_reduction_pct: f64,
    pub import_bill_usd_billions: f64,
}

impl ImpactAssessment {
    pub fn for_parameters(params: &PolicyParameters) -> Self {
        let domestic_price_increase_pct =
            params.tariff * 0.8 + (params.global_price - 1000.0) / 20.0;
        let farmer_income_increase_pct = params.tariff * 1.5;
        let import_reduction_pct =
            (params.tariff / 2.0 + (100.0 - params.yield_gap) / 10.0).min(15.0);
        // Assumes a fixed ~13 million ton annual import volume.
        let import_bill_usd_billions =
            params.global_price * 13.0 * (params.yield_gap / 100.0) / 1000.0;

        Self {
            domestic_price_increase_pct,
            farmer_income_increase_pct,
            import_reduction_pct,
            import_bill_usd_billions,
        }
    }
}

/// Trade-off scorecard across the three policy dimensions, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scorecard {
    pub consumer: u8,
    pub farmer: u8,
    pub fiscal: u8,
    pub overall: u8,
}

impl Scorecard {
    pub fn for_parameters(params: &PolicyParameters) -> Self {
        let impact = ImpactAssessment::for_parameters(params);
        Self::for_impact(&impact)
    }

    pub fn for_impact(impact: &ImpactAssessment) -> Self {
        let consumer = (100.0 - impact.domestic_price_increase_pct * 2.0).clamp(0.0, 100.0);
        let farmer = (50.0 + impact.farmer_income_increase_pct).min(100.0);
        let fiscal = (40.0 + impact.import_reduction_pct * 3.0).min(100.0);

        let consumer = consumer.round() as u8;
        let farmer = farmer.round() as u8;
        let fiscal = fiscal.round() as u8;
        let overall =
            ((consumer as f64 + farmer as f64 + fiscal as f64) / 3.0).round() as u8;

        Self {
            consumer,
            farmer,
            fiscal,
            overall,
        }
    }

    pub fn consumer_note(&self) -> &'static str {
        if self.consumer >= 70 {
            "Minimal price impact on consumers"
        } else if self.consumer >= 50 {
            "Moderate affordability concerns"
        } else {
            "Significant consumer price burden"
        }
    }

    pub fn farmer_note(&self) -> &'static str {
        if self.farmer >= 70 {
            "Strong incentive for domestic production"
        } else if self.farmer >= 50 {
            "Moderate farmer support"
        } else {
            "Insufficient farmer income protection"
        }
    }

    pub fn fiscal_note(&self) -> &'static str {
        if self.fiscal >= 70 {
            "Reduced import bill and forex outflow"
        } else if self.fiscal >= 50 {
            "Moderate impact on trade balance"
        } else {
            "High import dependency persists"
        }
    }
}

/// One sample of the tariff-sweep series behind the live impact chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImpactCurvePoint {
    pub tariff: u8,
    pub consumer_price_index: i64,
    pub farmer_income_index: i64,
    pub import_volume_index: i64,
}

/// Sweeps the tariff axis 0..=25 at the given price and yield gap, producing
/// the three indexed series (base = 100).
pub fn impact_curve(global_price: f64, yield_gap: f64) -> Vec<ImpactCurvePoint> {
    (0..=25u8)
        .map(|tariff| {
            let t = tariff as f64;
            let consumer_price = 120.0 + t * 0.8 + (global_price - 1000.0) / 20.0;
            let farmer_income = 100.0 + t * 1.5;
            let import_volume = (100.0 - t * 1.2 + yield_gap * 0.3).max(30.0);

            ImpactCurvePoint {
                tariff,
                consumer_price_index: consumer_price.round() as i64,
                farmer_income_index: farmer_income.round() as i64,
                import_volume_index: import_volume.round() as i64,
            }
        })
        .collect()
}

/// Synthetic "Projected" row appended to the historical table so the current
/// scenario can be charted against past regimes.
pub fn projected_policy(tariff: f64, global_price: f64) -> HistoricalPolicy {
    HistoricalPolicy {
        year: 2025,
        month: "Projected",
        tariff_rate: tariff,
        global_price,
        domestic_price: 120.0 + tariff * 0.8 + (global_price - 1000.0) * 0.06,
        farmer_income: 105.0 + tariff * 1.5,
        description: "Your scenario projection",
    }
}

/// Static coefficient table plus the figures they imply at the current
/// parameters, for the sensitivity report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SensitivitySnapshot {
    pub tariff: SensitivityCoefficients,
    pub global_price: SensitivityCoefficients,
    pub yield_gap: SensitivityCoefficients,
    pub consumer_price_impact_pct: f64,
    pub farmer_income_boost_pct: f64,
    pub import_volume_reduction_pct: f64,
}

pub fn sensitivity(params: &PolicyParameters) -> SensitivitySnapshot {
    SensitivitySnapshot {
        tariff: TARIFF_SENSITIVITY,
        global_price: PRICE_SENSITIVITY,
        yield_gap: GAP_SENSITIVITY,
        consumer_price_impact_pct: params.tariff * TARIFF_SENSITIVITY.consumer_price,
        farmer_income_boost_pct: params.tariff * TARIFF_SENSITIVITY.farmer_income,
        import_volume_reduction_pct: (params.tariff * TARIFF_SENSITIVITY.import_volume).abs(),
    }
}
