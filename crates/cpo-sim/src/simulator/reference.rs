use serde::Serialize;

/// One observed tariff/price regime. `farmer_income` is indexed to 100 at the
/// pre-NMEO baseline; `domestic_price` is the retail INR/kg figure.
#[derive(Debug, Clone, Serialize)]
pub struct HistoricalPolicy {
    pub year: i32,
    pub month: &'static str,
    pub tariff_rate: f64,
    pub global_price: f64,
    pub domestic_price: f64,
    pub farmer_income: f64,
    pub description: &'static str,
}

pub fn historical_policies() -> Vec<HistoricalPolicy> {
    vec![
        HistoricalPolicy {
            year: 2019,
            month: "Jan",
            tariff_rate: 7.5,
            global_price: 580.0,
            domestic_price: 68.0,
            farmer_income: 85.0,
            description: "Pre-pandemic baseline",
        },
        HistoricalPolicy {
            year: 2020,
            month: "Jul",
            tariff_rate: 5.0,
            global_price: 720.0,
            domestic_price: 78.0,
            farmer_income: 82.0,
            description: "COVID-19 tariff reduction",
        },
        HistoricalPolicy {
            year: 2021,
            month: "Jan",
            tariff_rate: 2.5,
            global_price: 1050.0,
            domestic_price: 110.0,
            farmer_income: 78.0,
            description: "Major duty cut to control inflation",
        },
        HistoricalPolicy {
            year: 2021,
            month: "Sep",
            tariff_rate: 2.5,
            global_price: 1180.0,
            domestic_price: 125.0,
            farmer_income: 75.0,
            description: "Global price surge",
        },
        HistoricalPolicy {
            year: 2022,
            month: "Mar",
            tariff_rate: 5.5,
            global_price: 1420.0,
            domestic_price: 152.0,
            farmer_income: 88.0,
            description: "Ukraine crisis impact",
        },
        HistoricalPolicy {
            year: 2023,
            month: "Jan",
            tariff_rate: 8.0,
            global_price: 980.0,
            domestic_price: 115.0,
            farmer_income: 95.0,
            description: "Tariff hike for farmer support",
        },
        HistoricalPolicy {
            year: 2023,
            month: "Sep",
            tariff_rate: 12.5,
            global_price: 920.0,
            domestic_price: 118.0,
            farmer_income: 108.0,
            description: "NMEO-OP alignment policy",
        },
        HistoricalPolicy {
            year: 2024,
            month: "Jun",
            tariff_rate: 10.0,
            global_price: 1050.0,
            domestic_price: 125.0,
            farmer_income: 102.0,
            description: "Balanced approach",
        },
        HistoricalPolicy {
            year: 2025,
            month: "Jan",
            tariff_rate: 10.0,
            global_price: 1180.0,
            domestic_price: 138.0,
            farmer_income: 105.0,
            description: "Current baseline",
        },
    ]
}

/// Per-state demographic and consumption record. Income is monthly INR per
/// capita, consumption is kg per capita per year.
#[derive(Debug, Clone, Serialize)]
pub struct RegionRecord {
    pub name: &'static str,
    pub code: &'static str,
    pub per_capita_income: f64,
    pub consumption_per_capita: f64,
    pub population_millions: f64,
}

pub fn regions() -> Vec<RegionRecord> {
    vec![
        RegionRecord {
            name: "Maharashtra",
            code: "MH",
            per_capita_income: 18500.0,
            consumption_per_capita: 12.5,
            population_millions: 124.0,
        },
        RegionRecord {
            name: "Uttar Pradesh",
            code: "UP",
            per_capita_income: 9800.0,
            consumption_per_capita: 10.2,
            population_millions: 231.0,
        },
        RegionRecord {
            name: "Tamil Nadu",
            code: "TN",
            per_capita_income: 16200.0,
            consumption_per_capita: 14.8,
            population_millions: 77.0,
        },
        RegionRecord {
            name: "Karnataka",
            code: "KA",
            per_capita_income: 15800.0,
            consumption_per_capita: 13.2,
            population_millions: 68.0,
        },
        RegionRecord {
            name: "West Bengal",
            code: "WB",
            per_capita_income: 11500.0,
            consumption_per_capita: 15.6,
            population_millions: 100.0,
        },
        RegionRecord {
            name: "Gujarat",
            code: "GJ",
            per_capita_income: 17200.0,
            consumption_per_capita: 11.8,
            population_millions: 70.0,
        },
        RegionRecord {
            name: "Rajasthan",
            code: "RJ",
            per_capita_income: 10500.0,
            consumption_per_capita: 9.5,
            population_millions: 81.0,
        },
        RegionRecord {
            name: "Andhra Pradesh",
            code: "AP",
            per_capita_income: 13800.0,
            consumption_per_capita: 13.9,
            population_millions: 54.0,
        },
        RegionRecord {
            name: "Telangana",
            code: "TG",
            per_capita_income: 16500.0,
            consumption_per_capita: 12.8,
            population_millions: 39.0,
        },
        RegionRecord {
            name: "Kerala",
            code: "KL",
            per_capita_income: 15900.0,
            consumption_per_capita: 16.2,
            population_millions: 35.0,
        },
        RegionRecord {
            name: "Bihar",
            code: "BR",
            per_capita_income: 7200.0,
            consumption_per_capita: 8.5,
            population_millions: 128.0,
        },
        RegionRecord {
            name: "Madhya Pradesh",
            code: "MP",
            per_capita_income: 10200.0,
            consumption_per_capita: 9.8,
            population_millions: 85.0,
        },
        RegionRecord {
            name: "Punjab",
            code: "PB",
            per_capita_income: 14800.0,
            consumption_per_capita: 11.5,
            population_millions: 30.0,
        },
        RegionRecord {
            name: "Haryana",
            code: "HR",
            per_capita_income: 19200.0,
            consumption_per_capita: 10.8,
            population_millions: 29.0,
        },
        RegionRecord {
            name: "Odisha",
            code: "OR",
            per_capita_income: 9500.0,
            consumption_per_capita: 10.5,
            population_millions: 47.0,
        },
    ]
}

/// Pre-configured parameter bundle for one-click exploration.
#[derive(Debug, Clone, Serialize)]
pub struct PresetScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tariff: f64,
    pub global_price: f64,
    pub yield_gap: f64,
    pub volatility_index: f64,
}

pub fn presets() -> Vec<PresetScenario> {
    vec![
        PresetScenario {
            key: "conservative_baseline",
            name: "Conservative Baseline",
            description: "Low tariff, stable global prices - consumer-friendly approach",
            tariff: 8.0,
            global_price: 1050.0,
            yield_gap: 58.0,
            volatility_index: 25.0,
        },
        PresetScenario {
            key: "nmeo_op_aggressive",
            name: "NMEO-OP Aggressive",
            description: "High tariff, focus on self-reliance - farmer upliftment priority",
            tariff: 18.0,
            global_price: 1180.0,
            yield_gap: 52.0,
            volatility_index: 45.0,
        },
        PresetScenario {
            key: "crisis_scenario",
            name: "Crisis Scenario",
            description: "Global supply shock simulation - stress test for resilience",
            tariff: 12.0,
            global_price: 1420.0,
            yield_gap: 60.0,
            volatility_index: 85.0,
        },
        PresetScenario {
            key: "balanced_approach",
            name: "Balanced Approach",
            description: "Moderate tariff balancing all three objectives",
            tariff: 12.0,
            global_price: 1180.0,
            yield_gap: 55.0,
            volatility_index: 50.0,
        },
    ]
}

/// Per-driver response coefficients from the model documentation. Tariff and
/// yield gap are per percentage point; global price is per $10/ton.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SensitivityCoefficients {
    pub consumer_price: f64,
    pub farmer_income: f64,
    pub import_volume: f64,
}

pub const TARIFF_SENSITIVITY: SensitivityCoefficients = SensitivityCoefficients {
    consumer_price: 0.8,
    farmer_income: 1.5,
    import_volume: -1.2,
};

pub const PRICE_SENSITIVITY: SensitivityCoefficients = SensitivityCoefficients {
    consumer_price: 0.6,
    farmer_income: 0.3,
    import_volume: -0.2,
};

pub const GAP_SENSITIVITY: SensitivityCoefficients = SensitivityCoefficients {
    consumer_price: 0.1,
    farmer_income: 0.4,
    import_volume: -0.8,
};
