//! Analysis configuration.
//!
//! Every tuning constant of the pipeline lives here. Configuration is
//! read from JSON; any key left out keeps its default.

use crate::error::RoleError;
use crate::ranking::RankingParams;
use crate::role::RoleParams;
use crate::scaling::LevelScaling;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for one analysis run.
///
/// # Examples
///
/// ```rust
/// use rolestat::AnalysisConfig;
///
/// let config = AnalysisConfig::from_json(r#"{"roles": {"damage_scale": 500.0}}"#).unwrap();
/// assert_eq!(config.roles.damage_scale, 500.0);
/// assert_eq!(config.roles.speed_curve.shift, 0.45);
/// assert!(config.include_alt_forms);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub scaling: LevelScaling,
    pub roles: RoleParams,
    pub ranking: RankingParams,
    /// Keep alternate forms in the analysed set.
    pub include_alt_forms: bool,
    /// Denominator of the speed-rank fraction. Defaults to the store size.
    pub total_count: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scaling: LevelScaling::default(),
            roles: RoleParams::default(),
            ranking: RankingParams::default(),
            include_alt_forms: true,
            total_count: None,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self, RoleError> {
        serde_json::from_str(json).map_err(|e| RoleError::parse("config", e))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RoleError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RoleError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }
}
