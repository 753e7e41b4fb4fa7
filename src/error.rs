//! Error types for the role-scoring pipeline.
//!
//! All errors are represented by the `RoleError` enum. They fall into
//! two families: malformed input (wrong shape, missing fields, ranks
//! that were never computed) and degenerate columns (zero spread
//! during normalization). Every error is fatal to the current run.

use crate::column_id::ColumnId;
use crate::poke_type::PokeType;
use std::fmt;
use thiserror::Error;

/// Which spread measure was zero for a degenerate column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spread {
    /// Population standard deviation (standardization).
    StandardDeviation,
    /// `max - min` (min-max rescaling).
    Range,
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spread::StandardDeviation => write!(f, "standard deviation"),
            Spread::Range => write!(f, "range"),
        }
    }
}

/// Errors that can occur while building or analysing a dataset.
///
/// # Examples
///
/// ```rust
/// use rolestat::RoleError;
///
/// let err = RoleError::MissingSpeedRank("bulbasaur".to_string());
/// assert!(err.is_malformed_input());
/// assert!(err.to_string().contains("bulbasaur"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoleError {
    /// A matrix or stat list did not have the expected number of columns.
    #[error("Malformed input: expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    /// A record reached scaling without a computed speed rank.
    #[error("Speed rank was never computed for {0}")]
    MissingSpeedRank(String),

    /// A record is missing or has invalid fields.
    #[error("Malformed record {name}: {reason}")]
    MalformedRecord { name: String, reason: String },

    /// A NaN or infinite value was found in a column.
    #[error("Non-finite value in column {column} at row {row}")]
    NonFinite { column: ColumnId, row: usize },

    /// An operation needed at least one row.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Two records share the same name.
    #[error("Duplicate creature: {0}")]
    DuplicateCreature(String),

    /// A lookup by name found nothing.
    #[error("Unknown creature: {0}")]
    UnknownCreature(String),

    /// A type name is not one of the 18 known types.
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A type chart has no entry for a type.
    #[error("Type chart has no entry for {0}")]
    MissingTypeEntry(PokeType),

    /// JSON input could not be parsed.
    #[error("Failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// A file could not be read.
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// A column's spread was zero, so it cannot be normalized.
    #[error("Degenerate column {column}: {spread} is zero")]
    DegenerateColumn { column: ColumnId, spread: Spread },
}

impl RoleError {
    /// True for errors caused by degenerate (zero-spread) columns.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, RoleError::DegenerateColumn { .. })
    }

    /// True for every error caused by malformed or missing input.
    pub fn is_malformed_input(&self) -> bool {
        !self.is_degenerate()
    }

    pub(crate) fn parse(what: impl Into<String>, err: impl fmt::Display) -> Self {
        RoleError::Parse {
            what: what.into(),
            message: err.to_string(),
        }
    }
}
