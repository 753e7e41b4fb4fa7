//! Level scaling.
//!
//! Converts base stats to level-100 values using the fixed affine
//! formulas for a perfect-IV, zero-EV, neutral-nature creature:
//! HP becomes `2 * base + 141`, every other stat `2 * base + 36`. The
//! speed-rank fraction column is carried through untouched.

use crate::matrix::{Raw, Scaled, StatRow, StatsMatrix};
use serde::{Deserialize, Serialize};

/// An affine map `x -> slope * x + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineScale {
    pub slope: f64,
    pub offset: f64,
}

impl AffineScale {
    pub fn new(slope: f64, offset: f64) -> Self {
        Self { slope, offset }
    }

    pub fn apply(&self, x: f64) -> f64 {
        self.slope * x + self.offset
    }
}

/// Level-100 conversion parameters.
///
/// # Examples
///
/// ```rust
/// use rolestat::LevelScaling;
///
/// let scaling = LevelScaling::default();
/// assert_eq!(scaling.scale_hp(0.0), 141.0);
/// assert_eq!(scaling.scale_stat(0.0), 36.0);
/// assert_eq!(scaling.scale_hp(100.0), 341.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelScaling {
    /// Map applied to HP.
    pub hp: AffineScale,
    /// Map applied to Attack, Defense, Sp. Attack and Sp. Defense.
    pub other: AffineScale,
}

impl Default for LevelScaling {
    fn default() -> Self {
        Self {
            hp: AffineScale::new(2.0, 141.0),
            other: AffineScale::new(2.0, 36.0),
        }
    }
}

impl LevelScaling {
    pub fn scale_hp(&self, base: f64) -> f64 {
        self.hp.apply(base)
    }

    pub fn scale_stat(&self, base: f64) -> f64 {
        self.other.apply(base)
    }

    /// Scale one row; the speed fraction is left as is.
    pub fn scale_row(&self, row: &StatRow) -> StatRow {
        StatRow {
            hp: self.scale_hp(row.hp),
            attack: self.scale_stat(row.attack),
            defense: self.scale_stat(row.defense),
            sp_attack: self.scale_stat(row.sp_attack),
            sp_defense: self.scale_stat(row.sp_defense),
            speed_fraction: row.speed_fraction,
        }
    }

    /// Scale a raw matrix, consuming it.
    pub fn apply(&self, matrix: StatsMatrix<Raw>) -> StatsMatrix<Scaled> {
        let (names, rows) = matrix.into_parts();
        let rows = rows.iter().map(|row| self.scale_row(row)).collect();
        StatsMatrix::from_parts(names, rows)
    }
}

/// Scale a raw matrix with the default level-100 formulas.
pub fn level_scale(matrix: StatsMatrix<Raw>) -> StatsMatrix<Scaled> {
    LevelScaling::default().apply(matrix)
}
