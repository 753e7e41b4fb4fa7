//! Column-wise normalization.
//!
//! Both operations work per column across all rows and never mix
//! columns. Standard deviation is the population form (divide by `n`),
//! kept on purpose to match how the role scores were tuned.
//!
//! A column whose values are all equal has no spread and is reported as
//! [`RoleError::DegenerateColumn`] instead of producing NaN.

use crate::column_id::ColumnId;
use crate::error::{RoleError, Spread};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Target mean and standard deviation for [`standard_score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standardize {
    pub mean: f64,
    pub std: f64,
}

impl Standardize {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Zero mean with the given spread.
    pub fn with_std(std: f64) -> Self {
        Self { mean: 0.0, std }
    }
}

impl Default for Standardize {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Target interval `[min, max]` for [`min_max`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rescale {
    pub min: f64,
    pub max: f64,
}

impl Rescale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Default for Rescale {
    fn default() -> Self {
        Self::new(1.0, 100.0)
    }
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around `mean`.
pub fn population_std(values: &[f64], mean: f64) -> f64 {
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn check_input(table: &Table) -> Result<(), RoleError> {
    if table.is_empty() {
        return Err(RoleError::EmptyInput("normalization needs at least one row"));
    }
    table.ensure_finite()
}

fn degenerate(column: &ColumnId, spread: Spread) -> RoleError {
    RoleError::DegenerateColumn {
        column: column.clone(),
        spread,
    }
}

/// Standardize every column to `target.mean` / `target.std`.
///
/// Each value maps to `target.mean + target.std * (x - mean) / std`.
///
/// # Examples
///
/// ```rust
/// use rolestat::normalize::{standard_score, Standardize};
/// use rolestat::{ColumnId, Table};
///
/// let table = Table::from_rows(
///     ColumnId::list(&["x"]),
///     vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]],
/// )
/// .unwrap();
///
/// let scored = standard_score(&table, Standardize::new(50.0, 10.0)).unwrap();
/// let col = scored.column_values(0);
/// assert!((col.iter().sum::<f64>() / 4.0 - 50.0).abs() < 1e-9);
/// assert!(col[0] < col[1] && col[2] < col[3]);
/// ```
pub fn standard_score(table: &Table, target: Standardize) -> Result<Table, RoleError> {
    check_input(table)?;
    let mut out = table.clone();
    for (i, column) in table.columns().iter().enumerate() {
        let values = table.column_values(i);
        let (lo, hi) = bounds(&values);
        if lo == hi {
            return Err(degenerate(column, Spread::StandardDeviation));
        }
        let m = mean(&values);
        let std = population_std(&values, m);
        if std == 0.0 || !std.is_finite() {
            return Err(degenerate(column, Spread::StandardDeviation));
        }
        out.map_column(i, |x| target.mean + target.std * (x - m) / std);
    }
    Ok(out)
}

/// Rescale every column linearly so its minimum maps to `target.min`
/// and its maximum to `target.max`.
///
/// # Examples
///
/// ```rust
/// use rolestat::normalize::{min_max, Rescale};
/// use rolestat::{ColumnId, Table};
///
/// let table = Table::from_rows(
///     ColumnId::list(&["x"]),
///     vec![vec![10.0], vec![20.0], vec![15.0]],
/// )
/// .unwrap();
///
/// let scaled = min_max(&table, Rescale::default()).unwrap();
/// assert_eq!(scaled.column_values(0), vec![1.0, 100.0, 50.5]);
/// ```
pub fn min_max(table: &Table, target: Rescale) -> Result<Table, RoleError> {
    check_input(table)?;
    let mut out = table.clone();
    for (i, column) in table.columns().iter().enumerate() {
        let values = table.column_values(i);
        let (lo, hi) = bounds(&values);
        let range = hi - lo;
        if range == 0.0 {
            return Err(degenerate(column, Spread::Range));
        }
        let span = target.max - target.min;
        out.map_column(i, |x| {
            if x == hi {
                target.max
            } else {
                target.min + (x - lo) * span / range
            }
        });
    }
    Ok(out)
}

/// Per-column descriptive statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: ColumnId,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Mean, population standard deviation and bounds of every column.
pub fn summarize(table: &Table) -> Result<Vec<ColumnSummary>, RoleError> {
    check_input(table)?;
    let summaries = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let values = table.column_values(i);
            let m = mean(&values);
            let (min, max) = bounds(&values);
            ColumnSummary {
                column: column.clone(),
                mean: m,
                std: population_std(&values, m),
                min,
                max,
            }
        })
        .collect();
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn table(cols: &[&str], rows: Vec<Vec<f64>>) -> Table {
        Table::from_rows(ColumnId::list(cols), rows).unwrap()
    }

    #[test]
    fn test_population_std_divides_by_n() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        assert!((population_std(&values, m) - 2.0).abs() < EPS);
    }

    #[test]
    fn test_standard_score_hits_target_moments() {
        let t = table(
            &["a", "b"],
            vec![
                vec![1.0, 100.0],
                vec![5.0, 80.0],
                vec![9.0, 300.0],
                vec![2.0, 10.0],
                vec![7.0, 55.0],
            ],
        );
        let target = Standardize::new(3.0, 25.0);
        let out = standard_score(&t, target).unwrap();
        for i in 0..out.width() {
            let col = out.column_values(i);
            let m = mean(&col);
            assert!((m - 3.0).abs() < EPS);
            assert!((population_std(&col, m) - 25.0).abs() < EPS);
        }
    }

    #[test]
    fn test_standard_score_columns_independent() {
        let t = table(&["a", "b"], vec![vec![1.0, 7.0], vec![2.0, 7.5], vec![3.0, 9.0]]);
        let both = standard_score(&t, Standardize::default()).unwrap();
        let only_a = standard_score(
            &table(&["a"], vec![vec![1.0], vec![2.0], vec![3.0]]),
            Standardize::default(),
        )
        .unwrap();
        assert_eq!(both.column_values(0), only_a.column_values(0));
    }

    #[test]
    fn test_standard_score_degenerate() {
        let t = table(&["a", "Def"], vec![vec![1.0, 100.0], vec![2.0, 100.0]]);
        let err = standard_score(&t, Standardize::default()).unwrap_err();
        assert_eq!(
            err,
            RoleError::DegenerateColumn {
                column: ColumnId::from_str("Def"),
                spread: Spread::StandardDeviation,
            }
        );
    }

    #[test]
    fn test_single_row_is_degenerate() {
        let t = table(&["a"], vec![vec![4.0]]);
        assert!(standard_score(&t, Standardize::default())
            .unwrap_err()
            .is_degenerate());
        assert!(min_max(&t, Rescale::default()).unwrap_err().is_degenerate());
    }

    #[test]
    fn test_empty_and_nan_rejected() {
        let empty = Table::new(ColumnId::list(&["a"]));
        assert!(matches!(
            standard_score(&empty, Standardize::default()),
            Err(RoleError::EmptyInput(_))
        ));
        let t = table(&["a"], vec![vec![1.0], vec![f64::NAN]]);
        assert!(matches!(
            min_max(&t, Rescale::default()),
            Err(RoleError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_min_max_exact_bounds() {
        let t = table(
            &["a", "b"],
            vec![vec![0.3, -7.0], vec![0.1, 2.5], vec![0.7, 1.0], vec![0.2, 1.0]],
        );
        let out = min_max(&t, Rescale::new(1.0, 4.0)).unwrap();
        for i in 0..out.width() {
            let (lo, hi) = bounds(&out.column_values(i));
            assert!((lo - 1.0).abs() < EPS);
            assert_eq!(hi, 4.0);
        }
        // order is preserved
        let a = out.column_values(0);
        assert!(a[1] < a[3] && a[3] < a[0] && a[0] < a[2]);
    }

    #[test]
    fn test_min_max_degenerate_range() {
        let t = table(&["a"], vec![vec![3.0], vec![3.0]]);
        assert_eq!(
            min_max(&t, Rescale::default()).unwrap_err(),
            RoleError::DegenerateColumn {
                column: ColumnId::from_str("a"),
                spread: Spread::Range,
            }
        );
    }

    #[test]
    fn test_summarize() {
        let t = table(&["hp"], vec![vec![10.0], vec![20.0], vec![30.0]]);
        let summary = summarize(&t).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].mean, 20.0);
        assert_eq!(summary[0].min, 10.0);
        assert_eq!(summary[0].max, 30.0);
        assert!((summary[0].std - (200.0f64 / 3.0).sqrt()).abs() < EPS);
    }
}
