//! Role scores.
//!
//! Four raw role axes are computed per creature from level-scaled stats:
//!
//! ```text
//! physical_durability = HP * Defense
//! special_durability  = HP * SpDefense
//! physical_offense    = Attack   * (Attack*S + K)   / (Attack*(1-S) + K)
//! special_offense     = SpAttack * (SpAttack*S + K) / (SpAttack*(1-S) + K)
//! ```
//!
//! `S` is a logistic curve over the speed-rank fraction and `K` the
//! damage scale (450 by default). A fast creature (`S` near 1) gets a
//! multiplier above 1, a slow one a multiplier below 1.

use crate::column_id::{labels, ColumnId};
use crate::matrix::{Scaled, StatRow, StatsMatrix};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Logistic curve `1 / (1 + exp(-stretch * (x - shift)))`.
///
/// # Examples
///
/// ```rust
/// use rolestat::SpeedCurve;
///
/// let curve = SpeedCurve::default();
/// assert_eq!(curve.eval(curve.shift), 0.5);
/// assert!(curve.eval(1.0) > curve.eval(0.1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedCurve {
    /// Input at which the curve crosses 0.5.
    pub shift: f64,
    /// Steepness.
    pub stretch: f64,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            shift: 0.45,
            stretch: 5.5,
        }
    }
}

impl SpeedCurve {
    pub fn eval(&self, x: f64) -> f64 {
        sigmoid(x, self.shift, self.stretch)
    }
}

/// Logistic function centred on `shift`.
pub fn sigmoid(x: f64, shift: f64, stretch: f64) -> f64 {
    1.0 / (1.0 + (-stretch * (x - shift)).exp())
}

/// Tuning parameters for the role-score formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleParams {
    /// Bounds the speed multiplier on offense.
    pub damage_scale: f64,
    pub speed_curve: SpeedCurve,
}

impl Default for RoleParams {
    fn default() -> Self {
        Self {
            damage_scale: 450.0,
            speed_curve: SpeedCurve::default(),
        }
    }
}

/// Offense weighted by the speed factor `s` in (0, 1).
pub fn speed_weighted_offense(stat: f64, s: f64, damage_scale: f64) -> f64 {
    stat * ((stat * s + damage_scale) / (stat * (1.0 - s) + damage_scale))
}

/// The four role axes of one creature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleScores {
    pub physical_durability: f64,
    pub special_durability: f64,
    pub physical_offense: f64,
    pub special_offense: f64,
}

impl RoleScores {
    /// Compute role scores from a level-scaled row.
    pub fn from_row(row: &StatRow, params: &RoleParams) -> Self {
        let s = params.speed_curve.eval(row.speed_fraction);
        Self {
            physical_durability: row.hp * row.defense,
            special_durability: row.hp * row.sp_defense,
            physical_offense: speed_weighted_offense(row.attack, s, params.damage_scale),
            special_offense: speed_weighted_offense(row.sp_attack, s, params.damage_scale),
        }
    }

    /// Values in PD, SD, PO, SO order.
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.physical_durability,
            self.special_durability,
            self.physical_offense,
            self.special_offense,
        ]
    }

    pub(crate) fn from_slice(values: &[f64]) -> Self {
        Self {
            physical_durability: values[0],
            special_durability: values[1],
            physical_offense: values[2],
            special_offense: values[3],
        }
    }
}

/// Role scores for every creature, in stats-matrix order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleScoreMatrix {
    names: Vec<String>,
    rows: Vec<RoleScores>,
}

impl RoleScoreMatrix {
    /// Compute role scores for every row of a scaled matrix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rolestat::scaling::level_scale;
    /// use rolestat::{BaseStats, PokeType, RoleParams, RoleScoreMatrix, StatRecord, StatsMatrix};
    ///
    /// let stats = BaseStats::new(100, 100, 100, 100, 100, 100);
    /// let mon = StatRecord::new("a", vec![PokeType::Fire], stats).with_speed_rank(0);
    /// let scaled = level_scale(StatsMatrix::from_records([&mon], 1).unwrap());
    /// let roles = RoleScoreMatrix::compute(&scaled, &RoleParams::default());
    ///
    /// assert_eq!(roles.rows()[0].physical_durability, 341.0 * 236.0);
    /// ```
    pub fn compute(matrix: &StatsMatrix<Scaled>, params: &RoleParams) -> Self {
        let rows = matrix
            .rows()
            .iter()
            .map(|row| RoleScores::from_row(row, params))
            .collect();
        Self {
            names: matrix.names().to_vec(),
            rows,
        }
    }

    pub(crate) fn from_parts(names: Vec<String>, rows: Vec<RoleScores>) -> Self {
        Self { names, rows }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> &[RoleScores] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RoleScores> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.rows[i])
    }

    /// Labelled PD/SD/PO/SO table.
    pub fn to_table(&self) -> Table {
        let rows = self.rows.iter().map(|r| r.as_array().to_vec()).collect();
        Table::from_parts(ColumnId::list(&labels::ROLES), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn scaled(rows: &[StatRow]) -> StatsMatrix<Scaled> {
        let names = (0..rows.len()).map(|i| format!("m{i}")).collect();
        StatsMatrix::from_parts(names, rows.to_vec())
    }

    fn row(hp: f64, atk: f64, def: f64, spa: f64, spd: f64, speed: f64) -> StatRow {
        StatRow {
            hp,
            attack: atk,
            defense: def,
            sp_attack: spa,
            sp_defense: spd,
            speed_fraction: speed,
        }
    }

    #[test]
    fn test_sigmoid_midpoint_and_bounds() {
        let curve = SpeedCurve::default();
        assert!((curve.eval(0.45) - 0.5).abs() < EPS);
        let mut prev = 0.0;
        for i in -100..=100 {
            let x = f64::from(i) / 20.0;
            let y = curve.eval(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y}");
            assert!(y > prev);
            prev = y;
        }
    }

    #[test]
    fn test_sigmoid_custom_shift() {
        assert_eq!(sigmoid(2.0, 2.0, 10.0), 0.5);
        assert!(sigmoid(2.1, 2.0, 10.0) > 0.5);
    }

    #[test]
    fn test_offense_multiplier_direction() {
        // Fast creatures gain, slow ones lose, midpoint is neutral.
        assert!(speed_weighted_offense(200.0, 0.9, 450.0) > 200.0);
        assert!(speed_weighted_offense(200.0, 0.1, 450.0) < 200.0);
        assert!((speed_weighted_offense(200.0, 0.5, 450.0) - 200.0).abs() < EPS);
    }

    #[test]
    fn test_role_formulas() {
        let params = RoleParams::default();
        let r = row(341.0, 136.0, 236.0, 336.0, 100.0, 0.45);
        let scores = RoleScores::from_row(&r, &params);
        assert_eq!(scores.physical_durability, 341.0 * 236.0);
        assert_eq!(scores.special_durability, 341.0 * 100.0);
        // S = 0.5 at the curve midpoint, so offense equals the stat.
        assert!((scores.physical_offense - 136.0).abs() < EPS);
        assert!((scores.special_offense - 336.0).abs() < EPS);
    }

    #[test]
    fn test_higher_attack_higher_offense_at_equal_speed() {
        let params = RoleParams::default();
        let weak = RoleScores::from_row(&row(200.0, 136.0, 100.0, 100.0, 100.0, 0.8), &params);
        let strong = RoleScores::from_row(&row(200.0, 336.0, 100.0, 100.0, 100.0, 0.8), &params);
        assert!(strong.physical_offense > weak.physical_offense);
        assert_eq!(strong.special_offense, weak.special_offense);
    }

    #[test]
    fn test_rows_permute_with_input() {
        let params = RoleParams::default();
        let a = row(300.0, 200.0, 150.0, 90.0, 120.0, 0.2);
        let b = row(250.0, 100.0, 250.0, 300.0, 80.0, 0.9);
        let c = row(400.0, 150.0, 90.0, 150.0, 210.0, 0.5);

        let forward = RoleScoreMatrix::compute(&scaled(&[a, b, c]), &params);
        let reversed = RoleScoreMatrix::compute(&scaled(&[c, b, a]), &params);

        assert_eq!(forward.rows()[0], reversed.rows()[2]);
        assert_eq!(forward.rows()[1], reversed.rows()[1]);
        assert_eq!(forward.rows()[2], reversed.rows()[0]);
    }

    #[test]
    fn test_to_table_labels() {
        let roles = RoleScoreMatrix::compute(
            &scaled(&[row(1.0, 1.0, 2.0, 1.0, 3.0, 0.45)]),
            &RoleParams::default(),
        );
        let table = roles.to_table();
        assert_eq!(table.column(labels::PD), Some(vec![2.0]));
        assert_eq!(table.column(labels::SD), Some(vec![3.0]));
        assert_eq!(roles.get("m0").unwrap().special_durability, 3.0);
    }
}
