use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::filter::PropertyFilter;
use super::repository::{PropertyStore, StoreError};
use super::summary::PortfolioSummary;
use crate::analytics::domain::{PropertyId, PropertyRecord, ValidationError};
use crate::analytics::metrics::{
    calculate_metrics, projected_cash_flow, sensitivity_analysis, MetricsResult,
    ProjectionAssumptions, SensitivityPoint, SensitivityVariable, YearlyProjection,
};
use crate::analytics::ranking::{PropertyComparison, RankedProperty, Recommendation};
use crate::analytics::scoring::{PropertyScorer, ScoreResult, ScoreWeights, ScoringMethodology};

/// Service composing the property store with the analytics engine.
pub struct PortfolioService<S> {
    store: Arc<S>,
    scorer: Arc<PropertyScorer>,
}

impl<S> PortfolioService<S>
where
    S: PropertyStore + 'static,
{
    pub fn new(store: Arc<S>, scorer: PropertyScorer) -> Self {
        Self {
            store,
            scorer: Arc::new(scorer),
        }
    }

    pub fn scorer(&self) -> &PropertyScorer {
        &self.scorer
    }

    pub fn add(&self, record: PropertyRecord) -> Result<PropertyRecord, PortfolioServiceError> {
        let stored = self.store.insert(record)?;
        debug!(property_id = %stored.id, "stored property");
        Ok(stored)
    }

    pub fn get(&self, id: &PropertyId) -> Result<PropertyRecord, PortfolioServiceError> {
        self.store
            .fetch(id)?
            .ok_or_else(|| PortfolioServiceError::NotFound(id.clone()))
    }

    pub fn update(&self, record: PropertyRecord) -> Result<PropertyRecord, PortfolioServiceError> {
        let id = record.id.clone();
        let updated = self
            .store
            .update(record)?
            .ok_or(PortfolioServiceError::NotFound(id))?;
        debug!(property_id = %updated.id, "updated property");
        Ok(updated)
    }

    pub fn remove(&self, id: &PropertyId) -> Result<PropertyRecord, PortfolioServiceError> {
        let removed = self
            .store
            .remove(id)?
            .ok_or_else(|| PortfolioServiceError::NotFound(id.clone()))?;
        debug!(property_id = %removed.id, "removed property");
        Ok(removed)
    }

    pub fn list(&self) -> Result<Vec<PropertyRecord>, PortfolioServiceError> {
        Ok(self.store.all()?)
    }

    pub fn search(
        &self,
        filter: &PropertyFilter,
    ) -> Result<Vec<PropertyRecord>, PortfolioServiceError> {
        let mut records = self.store.all()?;
        records.retain(|record| filter.matches(record));
        Ok(records)
    }

    pub fn metrics(&self, id: &PropertyId) -> Result<MetricsResult, PortfolioServiceError> {
        let record = self.get(id)?;
        Ok(calculate_metrics(&record.facts))
    }

    pub fn score(&self, id: &PropertyId) -> Result<ScoreResult, PortfolioServiceError> {
        let record = self.get(id)?;
        Ok(self.scorer.score(&record.facts))
    }

    pub fn projections(
        &self,
        id: &PropertyId,
        years: u32,
        assumptions: ProjectionAssumptions,
    ) -> Result<Vec<YearlyProjection>, PortfolioServiceError> {
        let record = self.get(id)?;
        Ok(projected_cash_flow(&record.facts, years, assumptions).collect())
    }

    pub fn sensitivity(
        &self,
        id: &PropertyId,
        variable_changes: &[(SensitivityVariable, Vec<f64>)],
    ) -> Result<BTreeMap<SensitivityVariable, Vec<SensitivityPoint>>, PortfolioServiceError> {
        let record = self.get(id)?;
        Ok(sensitivity_analysis(&record.facts, variable_changes))
    }

    /// Ranks the whole portfolio. Without explicit weights the scorer's
    /// profile weights apply.
    pub fn rank(
        &self,
        weights: Option<&ScoreWeights>,
    ) -> Result<Vec<RankedProperty>, PortfolioServiceError> {
        let weights = match weights {
            Some(weights) => {
                weights.validate()?;
                weights
            }
            None => &self.scorer.profile().weights,
        };

        let records = self.store.all()?;
        debug!(properties = records.len(), "ranking portfolio");
        Ok(self.scorer.rank_properties(&records, weights))
    }

    pub fn recommendations(
        &self,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, PortfolioServiceError> {
        let records = self.store.all()?;
        Ok(self.scorer.recommendations(&records, top_n))
    }

    pub fn compare(
        &self,
        ids: &[PropertyId],
    ) -> Result<Vec<PropertyComparison>, PortfolioServiceError> {
        let records = self.store.all()?;
        Ok(self.scorer.compare(&records, ids))
    }

    pub fn summary(&self) -> Result<PortfolioSummary, PortfolioServiceError> {
        let records = self.store.all()?;
        Ok(PortfolioSummary::from_records(&records))
    }

    pub fn methodology(&self) -> ScoringMethodology {
        self.scorer.methodology()
    }
}

/// Error raised by the portfolio service.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("property '{0}' not found")]
    NotFound(PropertyId),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
