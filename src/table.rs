//! Column-labelled numeric table.
//!
//! `Table` is the shared shape for every matrix in the pipeline: a list of
//! column labels and row-major `f64` rows of matching width. Normalization
//! and concatenation operate on tables and always preserve row order.

use crate::column_id::ColumnId;
use crate::error::RoleError;
use serde::{Deserialize, Serialize};

/// A row-major table of `f64` values with labelled columns.
///
/// # Examples
///
/// ```rust
/// use rolestat::{ColumnId, Table};
///
/// let table = Table::from_rows(
///     ColumnId::list(&["a", "b"]),
///     vec![vec![1.0, 2.0], vec![3.0, 4.0]],
/// )
/// .unwrap();
///
/// assert_eq!(table.width(), 2);
/// assert_eq!(table.column_values(1), vec![2.0, 4.0]);
/// assert!(Table::from_rows(ColumnId::list(&["a"]), vec![vec![1.0, 2.0]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<ColumnId>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<ColumnId>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table, checking every row has one value per column.
    pub fn from_rows(columns: Vec<ColumnId>, rows: Vec<Vec<f64>>) -> Result<Self, RoleError> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Assemble a table whose rows are known to match `columns`.
    pub(crate) fn from_parts(columns: Vec<ColumnId>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: Vec<f64>) -> Result<(), RoleError> {
        if row.len() != self.columns.len() {
            return Err(RoleError::ColumnCount {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.as_str() == label)
    }

    /// Copy out one column.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn column_values(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }

    /// Copy out a column by label.
    pub fn column(&self, label: &str) -> Option<Vec<f64>> {
        self.column_index(label).map(|i| self.column_values(i))
    }

    /// Apply `f` to every value of one column.
    pub(crate) fn map_column<F>(&mut self, index: usize, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        for row in &mut self.rows {
            row[index] = f(row[index]);
        }
    }

    /// Fail with `NonFinite` on the first NaN or infinite value.
    pub fn ensure_finite(&self) -> Result<(), RoleError> {
        for (r, row) in self.rows.iter().enumerate() {
            if let Some(c) = row.iter().position(|v| !v.is_finite()) {
                return Err(RoleError::NonFinite {
                    column: self.columns[c].clone(),
                    row: r,
                });
            }
        }
        Ok(())
    }

    /// Join two tables side by side. Both must have the same row count.
    pub fn hconcat(&self, other: &Table) -> Result<Table, RoleError> {
        if self.len() != other.len() {
            return Err(RoleError::MalformedRecord {
                name: "table".to_string(),
                reason: format!(
                    "cannot join {} rows with {} rows",
                    self.len(),
                    other.len()
                ),
            });
        }
        let columns = self
            .columns
            .iter()
            .chain(other.columns.iter())
            .cloned()
            .collect();
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.iter().chain(b).copied().collect())
            .collect();
        Ok(Table { columns, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            ColumnId::list(&["x", "y"]),
            vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = Table::new(ColumnId::list(&["x", "y"]));
        let err = table.push_row(vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            RoleError::ColumnCount {
                expected: 2,
                found: 1
            }
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_column_by_label() {
        let table = sample();
        assert_eq!(table.column("y"), Some(vec![10.0, 20.0, 30.0]));
        assert_eq!(table.column("z"), None);
    }

    #[test]
    fn test_map_column_touches_one_column() {
        let mut table = sample();
        table.map_column(0, |v| v * 2.0);
        assert_eq!(table.column_values(0), vec![2.0, 4.0, 6.0]);
        assert_eq!(table.column_values(1), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_hconcat() {
        let left = sample();
        let right = Table::from_rows(
            ColumnId::list(&["z"]),
            vec![vec![-1.0], vec![-2.0], vec![-3.0]],
        )
        .unwrap();
        let joined = left.hconcat(&right).unwrap();
        assert_eq!(joined.width(), 3);
        assert_eq!(joined.row(1), Some(&[2.0, 20.0, -2.0][..]));

        let short = Table::from_rows(ColumnId::list(&["z"]), vec![vec![0.0]]).unwrap();
        assert!(left.hconcat(&short).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        let mut table = sample();
        assert!(table.ensure_finite().is_ok());
        table.map_column(1, |v| if v > 15.0 { f64::NAN } else { v });
        assert_eq!(
            table.ensure_finite().unwrap_err(),
            RoleError::NonFinite {
                column: ColumnId::from_str("y"),
                row: 1
            }
        );
    }
}
