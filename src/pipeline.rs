//! The analysis pipeline.
//!
//! Data flows strictly downward:
//!
//! ```text
//! [Pokedex] → [StatsMatrix<Raw>] → [StatsMatrix<Scaled>] → [RoleScoreMatrix] → [RankingReport]
//! ```
//!
//! Each run builds its own matrices from the record store and shares
//! nothing with other runs.

use crate::config::AnalysisConfig;
use crate::error::RoleError;
use crate::matrix::{Raw, Scaled, StatsMatrix};
use crate::ranking::{rank, RankingReport};
use crate::record::Pokedex;
use crate::role::RoleScoreMatrix;

/// Runs the scale → role → rank pipeline with a fixed configuration.
///
/// # Examples
///
/// ```rust
/// use rolestat::{Pokedex, RolePipeline};
///
/// let json = r#"{
///     "snorlax":  {"type": ["normal"],  "stats": [160, 110, 65, 65, 110, 30]},
///     "alakazam": {"type": ["psychic"], "stats": [55, 50, 45, 135, 95, 120]},
///     "machamp":  {"type": ["fighting"], "stats": [90, 130, 80, 65, 85, 55]}
/// }"#;
/// let mut dex = Pokedex::from_json(json).unwrap();
/// dex.assign_speed_ranks();
///
/// let report = RolePipeline::default().run(&dex).unwrap();
/// assert_eq!(report.len(), 3);
/// assert_eq!(report.sorted_by_overall()[0].overall, 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RolePipeline {
    config: AnalysisConfig,
}

impl RolePipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Raw stats matrix for the records this configuration includes.
    pub fn stats_matrix(&self, dex: &Pokedex) -> Result<StatsMatrix<Raw>, RoleError> {
        let total = self.config.total_count.unwrap_or(dex.len());
        let include_alt = self.config.include_alt_forms;
        let skipped = dex.iter().filter(|r| r.alt_form && !include_alt).count();
        if skipped > 0 {
            tracing::warn!(skipped, "Excluding alternate forms from analysis");
        }
        let matrix =
            StatsMatrix::from_records(dex.iter().filter(|r| include_alt || !r.alt_form), total)?;
        tracing::debug!(rows = matrix.len(), total, "Built stats matrix");
        Ok(matrix)
    }

    /// Level-scaled stats matrix.
    pub fn scaled_matrix(&self, dex: &Pokedex) -> Result<StatsMatrix<Scaled>, RoleError> {
        let scaled = self.config.scaling.apply(self.stats_matrix(dex)?);
        tracing::debug!(rows = scaled.len(), "Applied level scaling");
        Ok(scaled)
    }

    /// Raw (unstandardized) role scores.
    pub fn role_scores(&self, dex: &Pokedex) -> Result<RoleScoreMatrix, RoleError> {
        let roles = RoleScoreMatrix::compute(&self.scaled_matrix(dex)?, &self.config.roles);
        tracing::debug!(rows = roles.len(), "Computed role scores");
        Ok(roles)
    }

    /// Full run: role scores, biases and overall ranking.
    pub fn run(&self, dex: &Pokedex) -> Result<RankingReport, RoleError> {
        let roles = self.role_scores(dex)?;
        let report = rank(&roles, &self.config.ranking)?;
        tracing::info!(creatures = report.len(), "Ranking complete");
        Ok(report)
    }
}
