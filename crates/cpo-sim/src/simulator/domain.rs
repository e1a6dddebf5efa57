use serde::{Deserialize, Serialize};

pub const TARIFF_RANGE: (f64, f64) = (0.0, 30.0);
pub const GLOBAL_PRICE_RANGE: (f64, f64) = (800.0, 1500.0);
pub const YIELD_GAP_RANGE: (f64, f64) = (30.0, 70.0);
pub const VOLATILITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Bounded simulation inputs. Every constructor and setter clamps to the
/// documented ranges, so downstream formulas never see out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyParameters {
    pub tariff: f64,
    pub global_price: f64,
    pub yield_gap: f64,
    pub volatility_index: f64,
}

impl Default for PolicyParameters {
    fn default() -> Self {
        Self {
            tariff: 12.0,
            global_price: 1180.0,
            yield_gap: 58.0,
            volatility_index: 50.0,
        }
    }
}

impl PolicyParameters {
    pub fn clamped(tariff: f64, global_price: f64, yield_gap: f64, volatility_index: f64) -> Self {
        Self {
            tariff: clamp_to(tariff, TARIFF_RANGE),
            global_price: clamp_to(global_price, GLOBAL_PRICE_RANGE),
            yield_gap: clamp_to(yield_gap, YIELD_GAP_RANGE),
            volatility_index: clamp_to(volatility_index, VOLATILITY_RANGE),
        }
    }

    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::Tariff => self.tariff,
            ParameterField::GlobalPrice => self.global_price,
            ParameterField::YieldGap => self.yield_gap,
            ParameterField::VolatilityIndex => self.volatility_index,
        }
    }

    pub fn set(&mut self, field: ParameterField, value: f64) {
        let value = clamp_to(value, field.range());
        match field {
            ParameterField::Tariff => self.tariff = value,
            ParameterField::GlobalPrice => self.global_price = value,
            ParameterField::YieldGap => self.yield_gap = value,
            ParameterField::VolatilityIndex => self.volatility_index = value,
        }
    }

    /// Applies a raw text entry to one field. A value that parses is clamped
    /// to the field range; unparseable input leaves the previous value in
    /// place. Returns whether the entry was accepted.
    pub fn apply_entry(&mut self, field: ParameterField, raw: &str) -> bool {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.set(field, value);
                true
            }
            _ => false,
        }
    }
}

fn clamp_to(value: f64, range: (f64, f64)) -> f64 {
    value.clamp(range.0, range.1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    Tariff,
    GlobalPrice,
    YieldGap,
    VolatilityIndex,
}

impl ParameterField {
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::Tariff => TARIFF_RANGE,
            Self::GlobalPrice => GLOBAL_PRICE_RANGE,
            Self::YieldGap => YIELD_GAP_RANGE,
            Self::VolatilityIndex => VOLATILITY_RANGE,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tariff => "CPO Import Tariff",
            Self::GlobalPrice => "Global CPO Price",
            Self::YieldGap => "Domestic Yield Gap",
            Self::VolatilityIndex => "Market Volatility Index",
        }
    }
}

/// Market participants tracked by the behavioral model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    Farmer,
    Trader,
    Investor,
    Consumer,
    Importer,
}

impl AgentType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Farmer,
            Self::Trader,
            Self::Investor,
            Self::Consumer,
            Self::Importer,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Farmer => "Farmer",
            Self::Trader => "Trader",
            Self::Investor => "Investor",
            Self::Consumer => "Consumer",
            Self::Importer => "Importer",
        }
    }

    pub const fn metric(self) -> &'static str {
        match self {
            Self::Farmer => "Investment in Oilseed Production",
            Self::Trader => "Import Inventory Holdings",
            Self::Investor => "Domestic Sector Allocation",
            Self::Consumer => "Consumption Level",
            Self::Importer => "Import Volume Intent",
        }
    }
}

/// Color bucket for an agent's behavioral shift. The four bands partition the
/// real line at -10, 0, and +10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeBand {
    StrongPositive,
    MildPositive,
    MildNegative,
    StrongNegative,
}

impl ChangeBand {
    pub fn classify(change: f64) -> Self {
        if change > 10.0 {
            Self::StrongPositive
        } else if change > 0.0 {
            Self::MildPositive
        } else if change > -10.0 {
            Self::MildNegative
        } else {
            Self::StrongNegative
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongPositive => "strong positive",
            Self::MildPositive => "mild positive",
            Self::MildNegative => "mild negative",
            Self::StrongNegative => "strong negative",
        }
    }

    pub const fn hex_color(self) -> &'static str {
        match self {
            Self::StrongPositive => "#22c55e",
            Self::MildPositive => "#84cc16",
            Self::MildNegative => "#eab308",
            Self::StrongNegative => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Volatility-driven classification used by the dashboard summary.
    /// Thresholds are strict and evaluated high to low.
    pub fn from_volatility(volatility_index: f64) -> Self {
        if volatility_index > 60.0 {
            Self::High
        } else if volatility_index > 30.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

/// Slider caption for the volatility input.
pub fn volatility_descriptor(volatility_index: f64) -> &'static str {
    if volatility_index < 30.0 {
        "Low market instability"
    } else if volatility_index < 60.0 {
        "Moderate price fluctuations"
    } else {
        "High uncertainty - stress test scenario"
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("target year {target_year} must be after the {baseline_year} baseline")]
    TargetYearNotAhead {
        target_year: i32,
        baseline_year: i32,
    },
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}
