//! # rolestat - Deterministic Role Scoring for Pokémon Base Stats
//!
//! Turns a dataset of base stats into per-creature role scores, bias
//! scores and an overall ranking, and scores type-defense synergy between
//! two creatures to suggest teammates.
//!
//! ## Core Concepts
//!
//! ### Role Pipeline
//!
//! ```text
//! [Pokedex] → [StatsMatrix<Raw>] → [StatsMatrix<Scaled>] → [RoleScoreMatrix] → [RankingReport]
//! ```
//!
//! 1. **Level scaling** converts base stats to level-100 values
//! 2. **Role scores** combine them into physical/special offense and durability,
//!    weighting offense by a logistic curve over the speed rank
//! 3. **Ranking** standardizes the role scores, derives biases and maps the
//!    summed scores onto `[1, creature_count]`
//!
//! Every step is a pure function of its input. Zero-spread columns and
//! malformed input are reported as [`RoleError`]s, never as NaN.
//!
//! ## Example
//!
//! ```rust
//! use rolestat::*;
//!
//! let mut dex = Pokedex::new();
//! dex.insert(StatRecord::new("gengar", vec![PokeType::Ghost, PokeType::Poison],
//!     BaseStats::new(60, 65, 60, 130, 75, 110))).unwrap();
//! dex.insert(StatRecord::new("blissey", vec![PokeType::Normal],
//!     BaseStats::new(255, 10, 10, 75, 135, 55))).unwrap();
//! dex.insert(StatRecord::new("tyranitar", vec![PokeType::Rock, PokeType::Dark],
//!     BaseStats::new(100, 134, 110, 95, 100, 61))).unwrap();
//! dex.assign_speed_ranks();
//!
//! let report = RolePipeline::default().run(&dex).unwrap();
//! let blissey = report.get("blissey").unwrap();
//! assert!(blissey.offense_durability_bias > 0.0); // leans durability
//!
//! let chart = TypeChart::standard();
//! let partners = find_partners(&chart, &dex, "gengar", 1).unwrap();
//! assert_eq!(partners.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`record`] - Creature records and the record store
//! - [`matrix`] - Stats matrix built from the store
//! - [`scaling`] - Level-100 stat conversion
//! - [`role`] - Role scores and the speed curve
//! - [`normalize`] - Standardization and min-max rescaling
//! - [`ranking`] - Bias scores and overall ranking
//! - [`report`] - Text rendering
//! - [`synergy`] - Type chart and partner search
//! - [`config`] - Tuning parameters
//! - [`pipeline`] - End-to-end runs
//! - [`error`] - Error types

pub mod column_id;
pub mod config;
pub mod error;
pub mod matrix;
pub mod normalize;
pub mod pipeline;
pub mod poke_type;
pub mod ranking;
pub mod record;
pub mod report;
pub mod role;
pub mod scaling;
pub mod synergy;
pub mod table;

// Re-export main types for convenience
pub use column_id::ColumnId;
pub use config::AnalysisConfig;
pub use error::{RoleError, Spread};
pub use matrix::{Raw, Scaled, StatRow, StatsMatrix};
pub use pipeline::RolePipeline;
pub use poke_type::PokeType;
pub use ranking::{rank, RankingParams, RankingReport, RankingRow};
pub use record::{BaseStats, Pokedex, StatRecord, UNRANKED};
pub use role::{RoleParams, RoleScoreMatrix, RoleScores, SpeedCurve};
pub use scaling::{level_scale, LevelScaling};
pub use synergy::{find_partners, type_synergy, Partner, TypeChart};
pub use table::Table;

// Re-export normalization entry points
pub use normalize::{min_max, standard_score, Rescale, Standardize};
