//! The per-creature stats matrix.
//!
//! A `StatsMatrix` has one row per creature: five base stats plus the
//! normalized speed-rank fraction `(speed_rank + 1) / total_count`. The
//! marker parameter records whether the five stats are still raw base
//! values or have been level-scaled, so a matrix cannot be scaled twice.

use crate::column_id::{labels, ColumnId};
use crate::error::RoleError;
use crate::record::{Pokedex, StatRecord};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Marker: stats are raw base values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raw;

/// Marker: stats have been converted to level-100 values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scaled;

/// One matrix row with named columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub sp_attack: f64,
    pub sp_defense: f64,
    /// `(speed_rank + 1) / total_count`.
    pub speed_fraction: f64,
}

impl StatRow {
    /// Number of columns in a stats row.
    pub const WIDTH: usize = 6;

    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed_fraction,
        ]
    }

    fn from_slice(values: &[f64]) -> Result<Self, RoleError> {
        match *values {
            [hp, attack, defense, sp_attack, sp_defense, speed_fraction] => Ok(Self {
                hp,
                attack,
                defense,
                sp_attack,
                sp_defense,
                speed_fraction,
            }),
            _ => Err(RoleError::ColumnCount {
                expected: Self::WIDTH,
                found: values.len(),
            }),
        }
    }
}

/// Ordered stats rows keyed by creature name.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsMatrix<S = Raw> {
    names: Vec<String>,
    rows: Vec<StatRow>,
    _stage: PhantomData<S>,
}

impl StatsMatrix<Raw> {
    /// Build from every record in the store, in store order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rolestat::{BaseStats, Pokedex, PokeType, StatRecord, StatsMatrix};
    ///
    /// let mut dex = Pokedex::new();
    /// dex.insert(
    ///     StatRecord::new("a", vec![PokeType::Bug], BaseStats::new(10, 20, 30, 40, 50, 60))
    ///         .with_speed_rank(1),
    /// )
    /// .unwrap();
    ///
    /// let matrix = StatsMatrix::from_pokedex(&dex, 4).unwrap();
    /// assert_eq!(matrix.rows()[0].attack, 20.0);
    /// assert_eq!(matrix.rows()[0].speed_fraction, 0.5);
    /// ```
    pub fn from_pokedex(dex: &Pokedex, total_count: usize) -> Result<Self, RoleError> {
        Self::from_records(dex.iter(), total_count)
    }

    /// Build from the given records, in iteration order.
    ///
    /// Fails with `MissingSpeedRank` for any record whose rank was never
    /// computed, and with `MalformedRecord` when `speed_rank + 1` exceeds
    /// `total_count`.
    pub fn from_records<'a, I>(records: I, total_count: usize) -> Result<Self, RoleError>
    where
        I: IntoIterator<Item = &'a StatRecord>,
    {
        if total_count == 0 {
            return Err(RoleError::EmptyInput("total creature count is zero"));
        }
        let total = total_count as f64;
        let mut names = Vec::new();
        let mut rows = Vec::new();
        for record in records {
            if !record.is_ranked() {
                return Err(RoleError::MissingSpeedRank(record.name.clone()));
            }
            if record.speed_rank >= total_count as i64 {
                return Err(RoleError::MalformedRecord {
                    name: record.name.clone(),
                    reason: format!(
                        "speed rank {} out of range for {total_count} creatures",
                        record.speed_rank
                    ),
                });
            }
            let s = record.stats;
            rows.push(StatRow {
                hp: f64::from(s.hp),
                attack: f64::from(s.attack),
                defense: f64::from(s.defense),
                sp_attack: f64::from(s.sp_attack),
                sp_defense: f64::from(s.sp_defense),
                speed_fraction: (record.speed_rank + 1) as f64 / total,
            });
            names.push(record.name.clone());
        }
        Ok(Self::from_parts(names, rows))
    }

    /// Build from an unlabelled table of raw rows.
    ///
    /// The table must have exactly six columns: five base stats followed
    /// by the speed-rank fraction, which must lie in `(0, 1]`.
    pub fn from_table(names: Vec<String>, table: &Table) -> Result<Self, RoleError> {
        if table.width() != StatRow::WIDTH {
            return Err(RoleError::ColumnCount {
                expected: StatRow::WIDTH,
                found: table.width(),
            });
        }
        if names.len() != table.len() {
            return Err(RoleError::MalformedRecord {
                name: "stats matrix".to_string(),
                reason: format!("{} names for {} rows", names.len(), table.len()),
            });
        }
        table.ensure_finite()?;
        let rows = table
            .rows()
            .iter()
            .map(|r| StatRow::from_slice(r))
            .collect::<Result<Vec<_>, _>>()?;
        for (name, row) in names.iter().zip(&rows) {
            if !(row.speed_fraction > 0.0 && row.speed_fraction <= 1.0) {
                return Err(RoleError::MalformedRecord {
                    name: name.clone(),
                    reason: format!(
                        "speed-rank fraction {} outside (0, 1]",
                        row.speed_fraction
                    ),
                });
            }
        }
        Ok(Self::from_parts(names, rows))
    }
}

impl<S> StatsMatrix<S> {
    pub(crate) fn from_parts(names: Vec<String>, rows: Vec<StatRow>) -> Self {
        Self {
            names,
            rows,
            _stage: PhantomData,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<StatRow>) {
        (self.names, self.rows)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> &[StatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a creature by name.
    pub fn get(&self, name: &str) -> Option<&StatRow> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.rows[i])
    }

    /// Labelled table view, one column per stat.
    pub fn to_table(&self) -> Table {
        let rows = self.rows.iter().map(StatRow::to_vec).collect();
        Table::from_parts(ColumnId::list(&labels::STATS), rows)
    }
}
