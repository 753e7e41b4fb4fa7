//! Bias scores and overall ranking.
//!
//! Ranking runs in a fixed order over the raw role scores:
//!
//! 1. standardize PD/SD/PO/SO jointly (`std = 25` by default);
//! 2. sum the four standardized scores per creature and min-max the sums
//!    onto `[1, creature_count]`;
//! 3. derive the offense/durability and physical/special biases from the
//!    standardized scores;
//! 4. standardize the two bias columns jointly (`std = 5` by default).
//!
//! The resulting [`RankingReport`] carries seven values per creature in
//! the order PD, SD, PO, SO, ODB, PSB, BSR.

use crate::column_id::{labels, ColumnId};
use crate::error::RoleError;
use crate::normalize::{min_max, standard_score, Rescale, Standardize};
use crate::role::{RoleScoreMatrix, RoleScores};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Spreads used when standardizing role and bias scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingParams {
    pub role_spread: Standardize,
    pub bias_spread: Standardize,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            role_spread: Standardize::with_std(25.0),
            bias_spread: Standardize::with_std(5.0),
        }
    }
}

/// `max(PD, SD) - max(PO, SO)`. Negative leans offense, positive leans durability.
pub fn offense_durability_bias(scores: &RoleScores) -> f64 {
    scores.physical_durability.max(scores.special_durability)
        - scores.physical_offense.max(scores.special_offense)
}

/// `(PD + PO) - (SD + SO)`. Negative leans special, positive leans physical.
pub fn physical_special_bias(scores: &RoleScores) -> f64 {
    (scores.physical_durability + scores.physical_offense)
        - (scores.special_durability + scores.special_offense)
}

/// Standardize the four role columns jointly, keeping row order.
pub fn standardize_roles(
    roles: &RoleScoreMatrix,
    spread: Standardize,
) -> Result<RoleScoreMatrix, RoleError> {
    let table = standard_score(&roles.to_table(), spread)?;
    let rows = table.rows().iter().map(|r| RoleScores::from_slice(r)).collect();
    Ok(RoleScoreMatrix::from_parts(roles.names().to_vec(), rows))
}

/// Overall ranking: summed standardized scores rescaled onto `[1, n]`.
///
/// # Examples
///
/// ```rust
/// use rolestat::ranking::overall_ranking;
/// use rolestat::{ColumnId, Table};
///
/// let sums = Table::from_rows(
///     ColumnId::list(&["BSR"]),
///     vec![vec![-3.0], vec![10.0], vec![1.0]],
/// )
/// .unwrap();
/// let ranking = overall_ranking(&sums).unwrap();
/// assert_eq!(ranking.column_values(0)[1], 3.0);
/// assert_eq!(ranking.column_values(0)[0], 1.0);
/// ```
pub fn overall_ranking(sums: &Table) -> Result<Table, RoleError> {
    min_max(sums, Rescale::new(1.0, sums.len() as f64))
}

fn summed_scores(standardized: &RoleScoreMatrix) -> Table {
    let rows = standardized
        .rows()
        .iter()
        .map(|r| vec![r.as_array().iter().sum()])
        .collect();
    Table::from_parts(ColumnId::list(&[labels::BSR]), rows)
}

fn bias_table(standardized: &RoleScoreMatrix) -> Table {
    let rows = standardized
        .rows()
        .iter()
        .map(|r| vec![offense_durability_bias(r), physical_special_bias(r)])
        .collect();
    Table::from_parts(ColumnId::list(&[labels::ODB, labels::PSB]), rows)
}

/// One creature's line of the ranking report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub name: String,
    /// Standardized role scores.
    pub roles: RoleScores,
    pub offense_durability_bias: f64,
    pub physical_special_bias: f64,
    /// Overall ranking in `[1, creature_count]`.
    pub overall: f64,
}

impl RankingRow {
    /// Values in PD, SD, PO, SO, ODB, PSB, BSR order.
    pub fn values(&self) -> [f64; 7] {
        let [pd, sd, po, so] = self.roles.as_array();
        [
            pd,
            sd,
            po,
            so,
            self.offense_durability_bias,
            self.physical_special_bias,
            self.overall,
        ]
    }
}

/// The final seven-column report, one row per creature in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    rows: Vec<RankingRow>,
}

impl RankingReport {
    pub fn rows(&self) -> &[RankingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RankingRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Rows ordered by overall ranking, best first. Ties keep input order.
    pub fn sorted_by_overall(&self) -> Vec<&RankingRow> {
        let mut rows: Vec<&RankingRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.overall.total_cmp(&a.overall));
        rows
    }

    /// Labelled seven-column table.
    pub fn to_table(&self) -> Table {
        let rows = self.rows.iter().map(|r| r.values().to_vec()).collect();
        Table::from_parts(ColumnId::list(&labels::REPORT), rows)
    }
}

/// Build the ranking report from raw role scores.
///
/// Fails with `DegenerateColumn` if any role, bias or summed column has
/// no spread, and with `EmptyInput` if there are no creatures.
pub fn rank(roles: &RoleScoreMatrix, params: &RankingParams) -> Result<RankingReport, RoleError> {
    if roles.is_empty() {
        return Err(RoleError::EmptyInput("ranking needs at least one creature"));
    }

    let standardized = standardize_roles(roles, params.role_spread)?;
    let overall = overall_ranking(&summed_scores(&standardized))?;
    let biases = standard_score(&bias_table(&standardized), params.bias_spread)?;

    let rows = standardized
        .names()
        .iter()
        .zip(standardized.rows())
        .zip(biases.rows().iter().zip(overall.rows()))
        .map(|((name, scores), (bias, total))| RankingRow {
            name: name.clone(),
            roles: *scores,
            offense_durability_bias: bias[0],
            physical_special_bias: bias[1],
            overall: total[0],
        })
        .collect();

    Ok(RankingReport { rows })
}
