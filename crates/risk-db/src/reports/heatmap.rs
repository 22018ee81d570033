//! Likelihood × impact heatmap.

use risk_core::enums::HeatmapBasis;
use risk_core::responses::{HeatmapCell, HeatmapSummary};
use risk_core::scale::Scale;

use crate::error::DatabaseError;
use crate::repos::risk::{RiskRating, RiskScope};
use crate::service::RiskService;

/// The (likelihood, impact) pair that places `risk` under `basis`.
const fn position(risk: &RiskRating, basis: HeatmapBasis) -> (Option<i64>, Option<i64>) {
    match basis {
        HeatmapBasis::Residual => (risk.residual_likelihood, risk.residual_impact),
        HeatmapBasis::Inherent => (risk.inherent_likelihood, risk.inherent_impact),
    }
}

/// Offset of `value` along `scale`, or `None` if it is off the axis.
fn axis_offset(scale: Scale, value: i64) -> Option<usize> {
    if scale.contains(value) {
        usize::try_from(value - scale.min()).ok()
    } else {
        None
    }
}

/// Build the dense matrix for `risks`.
///
/// Every (likelihood, impact) cell on `scale` is present, ordered by
/// likelihood then impact. Risks with a missing or off-scale score land in
/// `excluded`.
#[must_use]
pub fn build(risks: &[RiskRating], scale: Scale, basis: HeatmapBasis) -> HeatmapSummary {
    let size = scale.size();
    let mut counts = vec![0_u64; size * size];
    let mut excluded = 0_u64;

    for risk in risks {
        let slot = match position(risk, basis) {
            (Some(likelihood), Some(impact)) => axis_offset(scale, likelihood)
                .zip(axis_offset(scale, impact))
                .map(|(l, i)| l * size + i),
            _ => None,
        };
        match slot {
            Some(idx) => counts[idx] += 1,
            None => excluded += 1,
        }
    }

    let mut cells = Vec::with_capacity(counts.len());
    let mut counts = counts.into_iter();
    for likelihood in scale.points() {
        for impact in scale.points() {
            cells.push(HeatmapCell {
                likelihood,
                impact,
                count: counts.next().unwrap_or_default(),
            });
        }
    }

    HeatmapSummary {
        basis,
        scale,
        cells,
        excluded,
        total_risks: risks.len() as u64,
    }
}

impl RiskService {
    /// Heatmap of in-scope risks on the configured scale and basis.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn summarize_heatmap(&self) -> Result<HeatmapSummary, DatabaseError> {
        let settings = *self.settings();
        let risks = self.list_ratings(RiskScope::Reporting).await?;
        let summary = build(&risks, settings.scale, settings.basis);
        if summary.excluded > 0 {
            tracing::warn!(
                excluded = summary.excluded,
                basis = %settings.basis,
                "risks without an on-scale position left off the heatmap"
            );
        }
        tracing::debug!(
            total = summary.total_risks,
            cells = summary.cells.len(),
            "built heatmap"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ReportSettings;
    use crate::test_support::helpers::{
        seed_example, seed_register, test_service, test_service_with,
    };
    use pretty_assertions::assert_eq;

    fn scored(likelihood: Option<i64>, impact: Option<i64>) -> RiskRating {
        RiskRating {
            id: 1,
            inherent_impact: impact.map(|i| i + 1),
            inherent_likelihood: likelihood.map(|l| l + 1),
            residual_impact: impact,
            residual_likelihood: likelihood,
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_still_emits_every_cell() {
        let summary = build(&[], Scale::DEFAULT, HeatmapBasis::Residual);
        assert_eq!(summary.cells.len(), 25);
        assert!(summary.cells.iter().all(|c| c.count == 0));
        assert_eq!(summary.total_risks, 0);
        assert_eq!(summary.excluded, 0);
    }

    #[test]
    fn cells_are_likelihood_major() {
        let summary = build(&[], Scale::new(1, 3).unwrap(), HeatmapBasis::Residual);
        let coords: Vec<(i64, i64)> = summary
            .cells
            .iter()
            .map(|c| (c.likelihood, c.impact))
            .collect();
        assert_eq!(
            coords,
            [(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3), (3, 1), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn missing_and_off_scale_scores_are_excluded() {
        let risks = vec![
            scored(Some(2), Some(3)),
            scored(None, Some(3)),
            scored(Some(0), Some(1)),
            scored(Some(5), Some(6)),
        ];
        let summary = build(&risks, Scale::DEFAULT, HeatmapBasis::Residual);
        assert_eq!(summary.cell(2, 3), Some(1));
        assert_eq!(summary.excluded, 3);
        assert_eq!(summary.placed() + summary.excluded, summary.total_risks);
    }

    #[test]
    fn inherent_basis_reads_inherent_scores() {
        let risks = vec![scored(Some(2), Some(3))];
        let summary = build(&risks, Scale::DEFAULT, HeatmapBasis::Inherent);
        assert_eq!(summary.cell(3, 4), Some(1));
        assert_eq!(summary.cell(2, 3), Some(0));
        assert_eq!(summary.basis, HeatmapBasis::Inherent);
    }

    #[tokio::test]
    async fn example_data_places_three_risks() {
        let svc = test_service().await;
        seed_example(&svc).await;

        let summary = svc.summarize_heatmap().await.unwrap();
        assert_eq!(summary.cells.len(), 25);
        assert_eq!(summary.cell(3, 4), Some(2));
        assert_eq!(summary.cell(1, 1), Some(1));
        let others: u64 = summary
            .cells
            .iter()
            .filter(|c| !matches!((c.likelihood, c.impact), (3, 4) | (1, 1)))
            .map(|c| c.count)
            .sum();
        assert_eq!(others, 0);
        assert_eq!(summary.excluded, 0);
        assert_eq!(summary.total_risks, 3);
    }

    #[tokio::test]
    async fn register_counts_excluded_risks() {
        let svc = test_service().await;
        seed_register(&svc).await;

        let summary = svc.summarize_heatmap().await.unwrap();
        assert_eq!(summary.total_risks, 6);
        assert_eq!(summary.excluded, 2);
        assert_eq!(summary.cell(2, 2), Some(1));
        assert_eq!(summary.placed() + summary.excluded, summary.total_risks);
    }

    #[tokio::test]
    async fn closed_risks_leave_the_heatmap() {
        let svc = test_service_with(ReportSettings {
            closed_status_id: Some(4),
            ..ReportSettings::default()
        })
        .await;
        seed_register(&svc).await;

        let summary = svc.summarize_heatmap().await.unwrap();
        assert_eq!(summary.total_risks, 5);
        assert_eq!(summary.cell(2, 2), Some(0));
        assert_eq!(summary.placed(), 3);
    }

    #[tokio::test]
    async fn smaller_scale_emits_nine_cells() {
        let svc = test_service_with(ReportSettings {
            scale: Scale::new(1, 3).unwrap(),
            ..ReportSettings::default()
        })
        .await;
        seed_register(&svc).await;

        let summary = svc.summarize_heatmap().await.unwrap();
        assert_eq!(summary.cells.len(), 9);
        assert_eq!(summary.placed(), 2);
        assert_eq!(summary.excluded, 4);
    }

    #[tokio::test]
    async fn inherent_basis_from_settings() {
        let svc = test_service_with(ReportSettings {
            basis: HeatmapBasis::Inherent,
            ..ReportSettings::default()
        })
        .await;
        seed_example(&svc).await;

        let summary = svc.summarize_heatmap().await.unwrap();
        assert_eq!(summary.cell(5, 5), Some(1));
        assert_eq!(summary.cell(4, 4), Some(1));
        assert_eq!(summary.cell(2, 3), Some(1));
    }

    #[tokio::test]
    async fn heatmap_is_repeatable() {
        let svc = test_service().await;
        seed_register(&svc).await;

        let first = svc.summarize_heatmap().await.unwrap();
        let second = svc.summarize_heatmap().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn real_valued_score_is_excluded() {
        let svc = test_service().await;
        seed_example(&svc).await;
        svc.db()
            .conn()
            .execute("UPDATE risks SET residual_likelihood = 3.5 WHERE id = 1", ())
            .await
            .unwrap();

        let summary = svc.summarize_heatmap().await.unwrap();
        assert_eq!(summary.total_risks, 3);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.cell(3, 4), Some(1));
        assert_eq!(summary.placed() + summary.excluded, summary.total_risks);
    }

    #[tokio::test]
    async fn odd_timestamps_do_not_block_the_heatmap() {
        let svc = test_service().await;
        seed_example(&svc).await;
        svc.db()
            .conn()
            .execute_batch(
                "UPDATE risks SET created_at = 'not a date' WHERE id = 1;
                 UPDATE risks SET last_review_date = '??' WHERE id = 3;",
            )
            .await
            .unwrap();

        let summary = svc.summarize_heatmap().await.unwrap();
        assert_eq!(summary.placed(), 3);
    }
}
