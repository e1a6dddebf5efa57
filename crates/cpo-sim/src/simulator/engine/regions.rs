use crate::simulator::reference::{regions, RegionRecord};
use serde::Serialize;

/// Impact above this share-growth percentage marks a state as critical.
pub const CRITICAL_IMPACT_THRESHOLD: f64 = 40.0;

const BASE_RETAIL_PRICE_INR: f64 = 120.0;

/// Affordability impact of a retail price increase on one state.
#[derive(Debug, Clone, Serialize)]
pub struct RegionImpact {
    pub name: &'static str,
    pub code: &'static str,
    pub per_capita_income: f64,
    pub consumption_per_capita: f64,
    pub population_millions: f64,
    pub base_expenditure_share_pct: f64,
    pub new_expenditure_share_pct: f64,
    pub impact: f64,
    pub critical: bool,
}

impl RegionImpact {
    fn for_record(record: &RegionRecord, price_increase: f64) -> Self {
        let annual_income = record.per_capita_income * 12.0;
        let base_expenditure = record.consumption_per_capita * BASE_RETAIL_PRICE_INR;
        let base_share = base_expenditure / annual_income * 100.0;

        let new_expenditure = base_expenditure * (1.0 + price_increase / 100.0);
        let new_share = new_expenditure / annual_income * 100.0;

        let impact = ((new_share - base_share) / base_share * 100.0).min(100.0);

        Self {
            name: record.name,
            code: record.code,
            per_capita_income: record.per_capita_income,
            consumption_per_capita: record.consumption_per_capita,
            population_millions: record.population_millions,
            base_expenditure_share_pct: base_share,
            new_expenditure_share_pct: new_share,
            impact,
            critical: impact > CRITICAL_IMPACT_THRESHOLD,
        }
    }
}

/// Scores every reference state against the given retail price increase,
/// sorted worst-first for the heatmap.
pub fn region_impacts(price_increase: f64) -> Vec<RegionImpact> {
    let mut impacts: Vec<RegionImpact> = regions()
        .iter()
        .map(|record| RegionImpact::for_record(record, price_increase))
        .collect();

    impacts.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    impacts
}
