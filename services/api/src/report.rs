use crate::infra::{load_records, portfolio_service};
use clap::Args;
use rental_analytics::analytics::metrics::{
    default_variable_changes, DebtCoverage, SensitivityPoint, SensitivityVariable,
};
use rental_analytics::analytics::ranking::Recommendation;
use rental_analytics::analytics::{MetricsResult, PropertyId, ScoreResult, ScoreWeights};
use rental_analytics::config::AppConfig;
use rental_analytics::error::AppError;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Portfolio CSV export to analyze
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only analyze the property with this id
    #[arg(long)]
    pub(crate) id: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Portfolio CSV export to rank (defaults to the sample portfolio)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Number of recommendations to print
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
    /// Weight overrides such as roi=0.4,cap_rate=0.3
    #[arg(long)]
    pub(crate) weights: Option<ScoreWeights>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs { csv, id } = args;
    let config = AppConfig::load()?;
    let service = portfolio_service(load_records(Some(csv.as_path()))?, &config.analytics)?;

    let single = id.is_some();
    let records = match id {
        Some(id) => vec![service.get(&PropertyId(id))?],
        None => service.list()?,
    };

    println!("Portfolio analysis ({} properties)", records.len());
    for record in records {
        let metrics = service.metrics(&record.id)?;
        let scores = service.score(&record.id)?;
        println!("\n{} | {} ({})", record.id, record.address, record.property_type);
        render_metrics(&metrics);
        render_scores(&scores);
        if single {
            render_sensitivity(&service.sensitivity(&record.id, &default_variable_changes())?);
        }
    }

    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs { csv, top, weights } = args;
    let config = AppConfig::load()?;
    let service = portfolio_service(load_records(csv.as_deref())?, &config.analytics)?;

    let ranked = service.rank(weights.as_ref())?;
    println!("Portfolio ranking");
    for entry in &ranked {
        println!(
            "{:>3}. {:<28} {:>6.1}  ${:>10.0}  ${:>7.0}/mo",
            entry.rank,
            entry.address,
            entry.scores.composite_score,
            entry.purchase_price,
            entry.monthly_rent
        );
    }

    println!("\nTop {} recommendations", top.min(ranked.len()));
    for recommendation in service.recommendations(top)? {
        render_recommendation(&recommendation);
    }

    Ok(())
}

pub(crate) fn render_metrics(metrics: &MetricsResult) {
    let dscr = match metrics.dscr {
        DebtCoverage::Covered(ratio) => format!("{ratio:.2}"),
        DebtCoverage::NoDebt => "no debt".to_string(),
    };

    println!(
        "  NOI ${:.0} | cash flow ${:.0}/mo | cap rate {:.2}% | cash-on-cash {:.2}%",
        metrics.net_operating_income,
        metrics.monthly_cash_flow,
        metrics.cap_rate,
        metrics.cash_on_cash
    );
    println!(
        "  DSCR {} | GRM {:.1} | LTV {:.1}% | 1% rule {} | breakeven rent ${:.0}",
        dscr,
        metrics.grm,
        metrics.ltv,
        if metrics.one_percent_rule { "met" } else { "missed" },
        metrics.breakeven_rent
    );
}

pub(crate) fn render_scores(scores: &ScoreResult) {
    let sub = &scores.sub_scores;
    println!(
        "  Score {:.1} (roi {:.0}, cap {:.0}, cash flow {:.0}, dscr {:.0}, location {:.0}, condition {:.0})",
        scores.composite_score,
        sub.roi_score,
        sub.cap_rate_score,
        sub.cash_flow_score,
        sub.dscr_score,
        sub.location_score,
        sub.condition_score
    );
}

pub(crate) fn render_sensitivity(
    results: &BTreeMap<SensitivityVariable, Vec<SensitivityPoint>>,
) {
    println!("  ROI sensitivity");
    for (variable, points) in results {
        let deltas: Vec<String> = points
            .iter()
            .map(|point| format!("{:+}: {:+.2}", point.change, point.roi_delta))
            .collect();
        println!("    {:<16} {}", variable.label(), deltas.join(" | "));
    }
}

pub(crate) fn render_recommendation(recommendation: &Recommendation) {
    println!(
        "\n#{} {} | score {:.1} | {}",
        recommendation.rank,
        recommendation.address,
        recommendation.composite_score,
        recommendation.risk_level.label()
    );
    println!("  {}", recommendation.reasoning);
    if !recommendation.strengths.is_empty() {
        println!("  Strengths: {}", recommendation.strengths.join(", "));
    }
    if !recommendation.weaknesses.is_empty() {
        println!("  Weaknesses: {}", recommendation.weaknesses.join(", "));
    }
}
