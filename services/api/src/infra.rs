use metrics_exporter_prometheus::PrometheusHandle;
use rental_analytics::analytics::{PropertyRecord, PropertyScorer};
use rental_analytics::config::AnalyticsConfig;
use rental_analytics::error::AppError;
use rental_analytics::portfolio::{
    sample_portfolio, InMemoryPropertyStore, PortfolioImporter, PortfolioService,
};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type InMemoryPortfolio = PortfolioService<InMemoryPropertyStore>;

/// Loads a portfolio CSV, or the sample portfolio when no path is given.
pub(crate) fn load_records(csv: Option<&Path>) -> Result<Vec<PropertyRecord>, AppError> {
    match csv {
        Some(path) => {
            info!(path = %path.display(), "loading portfolio CSV");
            Ok(PortfolioImporter::from_path(path)?)
        }
        None => Ok(sample_portfolio()),
    }
}

pub(crate) fn portfolio_service(
    records: Vec<PropertyRecord>,
    analytics: &AnalyticsConfig,
) -> Result<Arc<InMemoryPortfolio>, AppError> {
    let store = InMemoryPropertyStore::with_records(records)?;
    let scorer = PropertyScorer::new(
        analytics.scoring_profile.clone(),
        analytics.reference_year,
    );
    Ok(Arc::new(PortfolioService::new(Arc::new(store), scorer)))
}
