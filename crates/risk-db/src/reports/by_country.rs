//! Per-country risk summary.

use std::collections::BTreeMap;

use risk_core::enums::{Classification, UNASSIGNED_STATUS};
use risk_core::responses::CountrySummary;

use crate::error::DatabaseError;
use crate::helpers::round1;
use crate::repos::risk::{RiskRating, RiskScope};
use crate::service::RiskService;

#[derive(Default)]
struct Accumulator {
    code: Option<String>,
    name: Option<String>,
    total: u64,
    by_status: BTreeMap<String, u64>,
    significant: u64,
    moderate: u64,
    low: u64,
    score_sum: i64,
    scored: u32,
}

impl Accumulator {
    fn add(&mut self, risk: &RiskRating) {
        if self.code.is_none() {
            self.code.clone_from(&risk.country_code);
        }
        if self.name.is_none() {
            self.name.clone_from(&risk.country_name);
        }
        self.total += 1;

        let status = risk.status.as_deref().unwrap_or(UNASSIGNED_STATUS);
        *self.by_status.entry(status.to_string()).or_default() += 1;

        match risk
            .residual_classification
            .as_deref()
            .and_then(|c| c.parse::<Classification>().ok())
        {
            Some(Classification::Significant) => self.significant += 1,
            Some(Classification::Moderate) => self.moderate += 1,
            Some(Classification::Low) => self.low += 1,
            None => {}
        }

        if let Some(score) = risk.residual_score {
            self.score_sum += score;
            self.scored += 1;
        }
    }

    fn finish(self, country_id: i64) -> CountrySummary {
        #[allow(clippy::cast_precision_loss)]
        let avg = (self.scored > 0)
            .then(|| round1(self.score_sum as f64 / f64::from(self.scored)));
        CountrySummary {
            country_id,
            country_code: self.code,
            country_name: self.name,
            total_risks: self.total,
            by_status: self.by_status,
            significant: self.significant,
            moderate: self.moderate,
            low: self.low,
            avg_residual_score: avg,
        }
    }
}

/// Group risks by country.
///
/// Risks without a country are skipped and countries without risks never
/// appear. Status-less risks count under `"unassigned"`, which also holds
/// any status of that name. Ordered by risk count descending, then country id ascending.
#[must_use]
pub fn summarize(risks: &[RiskRating]) -> Vec<CountrySummary> {
    let mut groups: BTreeMap<i64, Accumulator> = BTreeMap::new();
    for risk in risks {
        if let Some(country_id) = risk.country_id {
            groups.entry(country_id).or_default().add(risk);
        }
    }

    let mut summaries: Vec<CountrySummary> = groups
        .into_iter()
        .map(|(country_id, acc)| acc.finish(country_id))
        .collect();
    summaries.sort_by(|a, b| {
        b.total_risks
            .cmp(&a.total_risks)
            .then(a.country_id.cmp(&b.country_id))
    });
    summaries
}

impl RiskService {
    /// Risk counts per country, covering every risk in the store.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn summarize_by_country(&self) -> Result<Vec<CountrySummary>, DatabaseError> {
        let risks = self.list_ratings(RiskScope::All).await?;
        let summaries = summarize(&risks);
        tracing::debug!(
            risks = risks.len(),
            countries = summaries.len(),
            "summarized risks by country"
        );
        Ok(summaries)
    }
}
