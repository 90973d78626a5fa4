use crate::infra::portfolio_service;
use crate::report::{render_metrics, render_recommendation, render_scores};
use chrono::{Datelike, Local};
use clap::Args;
use rental_analytics::analytics::metrics::ProjectionAssumptions;
use rental_analytics::analytics::ScoringProfile;
use rental_analytics::config::AnalyticsConfig;
use rental_analytics::error::AppError;
use rental_analytics::portfolio::sample_portfolio;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Years of cash flow to project for the top pick
    #[arg(long, default_value_t = 5)]
    pub(crate) years: u32,
    /// Year used for the property-age heuristic (defaults to the current year)
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        years,
        reference_year,
    } = args;

    let analytics = AnalyticsConfig {
        portfolio_csv: None,
        scoring_profile: ScoringProfile::default(),
        reference_year: reference_year.unwrap_or_else(|| Local::now().year()),
    };
    let service = portfolio_service(sample_portfolio(), &analytics)?;

    println!("Rental analytics demo");
    let summary = service.summary()?;
    println!(
        "- {} properties | ${:.0} total value | ${:.0}/mo gross rent",
        summary.total_properties, summary.total_value, summary.total_monthly_rent
    );
    for (property_type, count) in &summary.property_types {
        println!("  - {property_type}: {count}");
    }

    let recommendations = service.recommendations(3)?;
    println!("\nTop recommendations");
    for recommendation in &recommendations {
        render_recommendation(recommendation);
    }

    let Some(top_pick) = recommendations.first() else {
        return Ok(());
    };

    println!("\nDetail for {}", top_pick.address);
    render_metrics(&service.metrics(&top_pick.property_id)?);
    render_scores(&service.score(&top_pick.property_id)?);

    let assumptions = ProjectionAssumptions::default();
    println!(
        "\n{}-year projection (rent +{:.0}%/yr, expenses +{:.0}%/yr)",
        years,
        assumptions.rent_growth * 100.0,
        assumptions.expense_growth * 100.0
    );
    for year in service.projections(&top_pick.property_id, years, assumptions)? {
        println!(
            "  Year {:>2}: rent ${:.0}/mo | NOI ${:.0} | cash flow ${:.0}/mo",
            year.year, year.monthly_rent, year.net_operating_income, year.monthly_cash_flow
        );
    }

    Ok(())
}
