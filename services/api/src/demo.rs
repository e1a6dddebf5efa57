use crate::infra::{InMemoryPreferenceStore, InMemoryScenarioRepository};
use clap::Args;
use cpo_sim::error::AppError;
use cpo_sim::simulator::domain::{volatility_descriptor, ParameterField, PolicyParameters};
use cpo_sim::simulator::engine::{
    place_agents, projected_policy, sensitivity, solve_target, CRITICAL_IMPACT_THRESHOLD,
};
use cpo_sim::simulator::memo::compose_memo;
use cpo_sim::simulator::session::SimulatorSession;

#[derive(Args, Debug, Default)]
pub(crate) struct SimulateArgs {
    /// Import tariff in percent (0-30)
    #[arg(long)]
    pub(crate) tariff: Option<f64>,
    /// Global CPO price in USD per ton (800-1500)
    #[arg(long)]
    pub(crate) global_price: Option<f64>,
    /// Domestic yield gap in percent (30-70)
    #[arg(long)]
    pub(crate) yield_gap: Option<f64>,
    /// Market volatility index (0-100)
    #[arg(long)]
    pub(crate) volatility: Option<f64>,
    /// Load a named preset before applying the overrides above
    #[arg(long)]
    pub(crate) preset: Option<String>,
    /// Print the full per-state affordability table
    #[arg(long)]
    pub(crate) list_regions: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TargetArgs {
    /// Target year for the self-reliance goal (after 2025)
    #[arg(long)]
    pub(crate) target_year: i32,
    /// Self-reliance target in percent of demand met domestically
    #[arg(long)]
    pub(crate) self_reliance: f64,
    /// Current domestic yield gap in percent
    #[arg(long)]
    pub(crate) yield_gap: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct MemoArgs {
    /// Import tariff in percent (0-30)
    #[arg(long)]
    pub(crate) tariff: Option<f64>,
    /// Global CPO price in USD per ton (800-1500)
    #[arg(long)]
    pub(crate) global_price: Option<f64>,
    /// Domestic yield gap in percent (30-70)
    #[arg(long)]
    pub(crate) yield_gap: Option<f64>,
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let SimulateArgs {
        tariff,
        global_price,
        yield_gap,
        volatility,
        preset,
        list_regions,
    } = args;

    let mut session = SimulatorSession::new(
        InMemoryScenarioRepository::seeded(),
        InMemoryPreferenceStore::default(),
    );

    if let Some(key) = preset {
        session.load_preset(&key)?;
    }
    if let Some(value) = tariff {
        session.set_parameter(ParameterField::Tariff, value);
    }
    if let Some(value) = global_price {
        session.set_parameter(ParameterField::GlobalPrice, value);
    }
    if let Some(value) = yield_gap {
        session.set_parameter(ParameterField::YieldGap, value);
    }
    if let Some(value) = volatility {
        session.set_parameter(ParameterField::VolatilityIndex, value);
    }

    let params = *session.parameters();
    println!("CPO policy simulation");
    println!(
        "Parameters: tariff {:.1}% | global price ${:.0}/ton | yield gap {:.1}% | volatility {:.0}",
        params.tariff, params.global_price, params.yield_gap, params.volatility_index
    );

    let impact = session.impact();
    println!("\nImpact assessment");
    println!(
        "- Domestic price change: {:+.1}%",
        impact.domestic_price_increase_pct
    );
    println!(
        "- Farmer income change: {:+.1}%",
        impact.farmer_income_increase_pct
    );
    println!("- Import reduction: {:.1} pp", impact.import_reduction_pct);
    println!(
        "- Annual import bill: ${:.1}B",
        impact.import_bill_usd_billions
    );

    let scorecard = session.scorecard();
    println!("\nTrade-off scorecard");
    println!(
        "- Consumer {}: {}",
        scorecard.consumer,
        scorecard.consumer_note()
    );
    println!("- Farmer {}: {}", scorecard.farmer, scorecard.farmer_note());
    println!("- Fiscal {}: {}", scorecard.fiscal, scorecard.fiscal_note());
    println!("- Overall: {}", scorecard.overall);

    println!(
        "\nRisk level: {} ({})",
        session.risk_level().label(),
        volatility_descriptor(params.volatility_index)
    );

    println!("\nAgent behavior");
    let placed = place_agents(&session.agent_shifts(), &mut rand::thread_rng());
    for behavior in &placed {
        println!(
            "- {}: {} {:.1} -> {:.1} ({:+.1}, {})",
            behavior.agent.label(),
            behavior.metric,
            behavior.baseline,
            behavior.new_value,
            behavior.change,
            behavior.band.label()
        );
    }

    let regions = session.region_impacts();
    if list_regions {
        println!("\nState affordability impact");
        for region in &regions {
            let marker = if region.critical { " [critical]" } else { "" };
            println!(
                "- {} ({}): share {:.2}% -> {:.2}% | impact {:+.1}%{}",
                region.name,
                region.code,
                region.base_expenditure_share_pct,
                region.new_expenditure_share_pct,
                region.impact,
                marker
            );
        }
    } else {
        let critical = regions.iter().filter(|region| region.critical).count();
        println!(
            "\nState affordability: {} states evaluated, {} above the {:.0}% critical line",
            regions.len(),
            critical,
            CRITICAL_IMPACT_THRESHOLD
        );
        for region in regions.iter().take(3) {
            println!("- {} ({}): {:+.1}%", region.name, region.code, region.impact);
        }
    }

    let projection = projected_policy(params.tariff, params.global_price);
    println!(
        "\nProjected vs history: domestic price {:.0} INR/kg | farmer income index {:.0}",
        projection.domestic_price, projection.farmer_income
    );

    let snapshot = sensitivity(&params);
    println!(
        "Sensitivity at current tariff: consumer price {:+.1}% | farmer income {:+.1}% | imports -{:.1}%",
        snapshot.consumer_price_impact_pct,
        snapshot.farmer_income_boost_pct,
        snapshot.import_volume_reduction_pct
    );

    Ok(())
}

pub(crate) fn run_target(args: TargetArgs) -> Result<(), AppError> {
    let TargetArgs {
        target_year,
        self_reliance,
        yield_gap,
    } = args;

    let current_gap = yield_gap.unwrap_or(PolicyParameters::default().yield_gap);
    let plan = solve_target(target_year, self_reliance, current_gap)?;

    println!(
        "Self-reliance plan: {:.0}% domestic supply by {}",
        plan.target_self_reliance_pct, plan.target_year
    );
    println!(
        "- Horizon: {} years | yield gap {:.0}% -> {:.0}%",
        plan.years,
        plan.target_gap + plan.gap_reduction,
        plan.target_gap
    );
    println!(
        "- Annual yield improvement required: {:.1} pp",
        plan.annual_improvement
    );
    println!("- Sustained tariff: {:.1}%", plan.required_tariff);
    println!(
        "- Annual subsidy: ${:.0}M | total investment: ${:.0}M",
        plan.required_subsidy_musd, plan.investment_needed_musd
    );

    println!("\nRoadmap");
    for line in plan.roadmap() {
        println!("- {line}");
    }

    Ok(())
}

pub(crate) fn run_memo(args: MemoArgs) -> Result<(), AppError> {
    let MemoArgs {
        tariff,
        global_price,
        yield_gap,
    } = args;

    let defaults = PolicyParameters::default();
    let params = PolicyParameters::clamped(
        tariff.unwrap_or(defaults.tariff),
        global_price.unwrap_or(defaults.global_price),
        yield_gap.unwrap_or(defaults.yield_gap),
        defaults.volatility_index,
    );

    let memo = compose_memo(&params);

    println!("EXECUTIVE MEMORANDUM: CPO tariff policy assessment");
    println!(
        "Scenario: tariff {:.1}% | global price ${:.0}/ton | yield gap {:.1}%",
        memo.parameters.tariff, memo.parameters.global_price, memo.parameters.yield_gap
    );
    println!("Risk level: {}", memo.risk_level.label());

    println!("\n1. Consumer affordability");
    println!("{}", memo.paragraphs.consumer_affordability);
    println!("\n2. Farmer profitability");
    println!("{}", memo.paragraphs.farmer_profitability);
    println!("\n3. Import dependency");
    println!("{}", memo.paragraphs.import_dependency);

    println!("\nDriver attribution");
    println!(
        "- Tariff {}% | global price {}% | yield gap {}%",
        memo.influence.tariff, memo.influence.price, memo.influence.gap
    );
    println!("{}", memo.influence.summary);

    if memo.recommendations.is_empty() {
        println!("\nRecommendations: none triggered");
    } else {
        println!("\nRecommendations");
        for note in &memo.recommendations {
            println!("- {note}");
        }
    }

    Ok(())
}
