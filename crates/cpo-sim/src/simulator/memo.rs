use crate::simulator::domain::{PolicyParameters, RiskLevel};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Parameter snapshot embedded in a memo. Volatility does not feed the memo
/// text, so only the three drivers are echoed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoParameters {
    pub tariff: f64,
    pub global_price: f64,
    pub yield_gap: f64,
}

/// The three fixed narrative sections of the briefing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoParagraphs {
    pub consumer_affordability: String,
    pub farmer_profitability: String,
    pub import_dependency: String,
}

/// Attribution of the outcome to each driver, in whole percentage points,
/// with a templated explanation of the weighting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluenceWeights {
    pub tariff: i32,
    pub price: i32,
    pub gap: i32,
    pub summary: String,
}

/// Immutable executive briefing for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveMemo {
    pub parameters: MemoParameters,
    pub paragraphs: MemoParagraphs,
    pub influence: InfluenceWeights,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
}

fn memo_risk(tariff: f64, global_price: f64) -> RiskLevel {
    if global_price > 1300.0 && tariff > 15.0 {
        RiskLevel::High
    } else if global_price < 1100.0 && tariff < 10.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Moderate
    }
}

// Renders whole numbers without a trailing ".0" so the prose reads naturally.
fn fmt_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Composes the full memo deterministically from the current parameters.
pub fn compose_memo(params: &PolicyParameters) -> ExecutiveMemo {
    let tariff = params.tariff;
    let global_price = params.global_price;
    let yield_gap = params.yield_gap;

    let tariff_influence = (20.0 + tariff / 20.0 * 20.0).min(40.0);
    let price_influence = (25.0 + (global_price - 1000.0) / 500.0 * 20.0).min(45.0);
    let gap_influence = (100.0 - tariff_influence - price_influence).clamp(0.0, 100.0);

    // The memo's headline price figure deliberately omits the 0.8 pass-through
    // factor the dashboard applies; the briefing quotes the gross tariff.
    let price_increase = tariff + (global_price - 1000.0) / 20.0;
    let farmer_revenue_increase = tariff * 1.5;
    let import_reduction = (tariff / 2.0 + (100.0 - yield_gap) / 10.0).min(15.0);
    let import_bill_musd = global_price * 13.0 * (yield_gap / 100.0);

    let tariff_text = fmt_value(tariff);
    let price_text = fmt_value(global_price);
    let gap_text = fmt_value(yield_gap);

    let consumer_affordability = format!(
        "Under the proposed {tariff_text}% import tariff combined with the elevated global \
         CPO price of ${price_text}/ton, domestic edible oil prices are projected to rise by \
         approximately {price_increase:.1}% within the first quarter post-implementation. This \
         increase will disproportionately affect low-income households, where cooking oil \
         constitutes 6-8% of monthly expenditure. To mitigate immediate affordability shocks, \
         the government may need to expand the Public Distribution System (PDS) coverage for \
         edible oils or implement targeted subsidies for vulnerable segments, particularly in \
         urban areas where price sensitivity is highest."
    );

    let farmer_profitability = format!(
        "The {tariff_text}% tariff is expected to boost domestic oilseed farmer revenues by \
         {farmer_revenue_increase:.1}%, creating favorable margins for palm, soybean, and \
         sunflower cultivation aligned with NMEO-OP objectives. However, with the domestic \
         yield gap still at {gap_text}%, achieving self-reliance targets by 2030 remains \
         challenging without concurrent investments in high-yield seed technology, irrigation \
         infrastructure, and farmer training programs. Confidence among farmers will \
         strengthen if the tariff remains stable for at least 3-5 crop cycles, providing \
         predictable market conditions necessary for long-term agricultural planning and \
         capital investment in oilseed production."
    );

    let import_dependency = format!(
        "Despite the tariff's protective effect, India's import dependency is forecast to \
         decline only moderately by {import_reduction:.1} percentage points over the next 3-5 \
         years, given the persistent {gap_text}% yield gap and limited arable land expansion \
         potential. At the current global price of ${price_text}/ton, the annual import bill \
         for edible oils will remain substantial at approximately ${import_bill_musd:.0} \
         million (assuming ~13 million tons import volume), representing a significant forex \
         outflow. Long-term reduction in import dependency requires a multi-pronged strategy: \
         sustaining the tariff to incentivize domestic production, accelerating R&D in \
         high-yield cultivars, improving supply chain efficiency to reduce post-harvest \
         losses, and potentially diversifying into alternative oil crops suited to India's \
         agro-climatic zones."
    );

    let summary = format!(
        "The global CPO price ({price_influence:.1}% influence) is the primary driver of \
         consumer affordability risk in this scenario, as it directly impacts domestic retail \
         prices regardless of tariff adjustments. The tariff rate ({tariff_influence:.1}% \
         influence) moderately affects both farmer incentives and consumer costs, creating a \
         policy trade-off between producer welfare and consumer burden. The domestic yield \
         gap ({gap_influence:.1}% influence) has a longer-term structural impact, determining \
         the baseline import requirement and limiting the effectiveness of tariff-based \
         self-reliance strategies without productivity improvements."
    );

    let mut recommendations = Vec::new();
    if global_price > 1200.0 {
        recommendations.push(
            "Consider temporary consumer subsidies to offset high global price impacts".to_owned(),
        );
    }
    if tariff > 10.0 {
        recommendations.push(
            "Monitor consumer price index closely; adjust PDS allocations if needed".to_owned(),
        );
    }
    if yield_gap > 50.0 {
        recommendations.push(
            "Accelerate NMEO-OP implementation with focus on yield improvement programs"
                .to_owned(),
        );
        recommendations.push(
            "Increase R&D funding for high-yield oilseed varieties suited to Indian conditions"
                .to_owned(),
        );
    }
    if tariff < 8.0 && yield_gap > 55.0 {
        recommendations.push(
            "Current tariff may be insufficient to meet self-reliance targets; consider gradual increase"
                .to_owned(),
        );
    }

    ExecutiveMemo {
        parameters: MemoParameters {
            tariff,
            global_price,
            yield_gap,
        },
        paragraphs: MemoParagraphs {
            consumer_affordability,
            farmer_profitability,
            import_dependency,
        },
        influence: InfluenceWeights {
            tariff: tariff_influence.round() as i32,
            price: price_influence.round() as i32,
            gap: gap_influence.round() as i32,
            summary,
        },
        recommendations,
        risk_level: memo_risk(tariff, global_price),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MemoServiceError {
    #[error("a memo generation is already in flight")]
    Busy,
}

/// Async facade over [`compose_memo`]. Only one generation may be in flight
/// at a time; concurrent requests are rejected rather than queued.
pub struct MemoService {
    busy: AtomicBool,
    delay: Duration,
}

// Releases the busy slot when the generation future completes or is dropped
// mid-delay (e.g. the requesting client disconnects).
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl MemoService {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(1500))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            busy: AtomicBool::new(false),
            delay,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn generate(
        &self,
        params: &PolicyParameters,
    ) -> Result<ExecutiveMemo, MemoServiceError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(MemoServiceError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        tokio::time::sleep(self.delay).await;
        Ok(compose_memo(params))
    }
}

impl Default for MemoService {
    fn default() -> Self {
        Self::new()
    }
}
