//! Column identifier module.
//!
//! Provides the `ColumnId` type, an interned string label for table
//! columns. Uses `Arc<str>` so cloning labels across tables is cheap.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Interned string identifier for a table column.
///
/// # Examples
///
/// ```rust
/// use rolestat::ColumnId;
///
/// let pd = ColumnId::from_str("PD");
/// let pd2: ColumnId = "PD".into();
/// let pd3: ColumnId = String::from("PD").into();
///
/// assert_eq!(pd, pd2);
/// assert_eq!(pd, pd3);
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColumnId(Arc<str>);

impl Serialize for ColumnId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColumnId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ColumnId::from(s))
    }
}

impl ColumnId {
    /// Create a new `ColumnId` from a string slice.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this `ColumnId`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a list of column ids from string labels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rolestat::ColumnId;
    ///
    /// let cols = ColumnId::list(&["HP", "Atk"]);
    /// assert_eq!(cols[1].as_str(), "Atk");
    /// ```
    pub fn list(labels: &[&str]) -> Vec<ColumnId> {
        labels.iter().map(|s| ColumnId::from_str(s)).collect()
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl PartialEq<str> for ColumnId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Labels used throughout the stat and ranking tables.
pub mod labels {
    pub const HP: &str = "HP";
    pub const ATTACK: &str = "Atk";
    pub const DEFENSE: &str = "Def";
    pub const SP_ATTACK: &str = "SpA";
    pub const SP_DEFENSE: &str = "SpD";
    pub const SPEED_FRACTION: &str = "SpeRank";

    /// Physical durability.
    pub const PD: &str = "PD";
    /// Special durability.
    pub const SD: &str = "SD";
    /// Physical offense.
    pub const PO: &str = "PO";
    /// Special offense.
    pub const SO: &str = "SO";
    /// Offense/durability bias.
    pub const ODB: &str = "ODB";
    /// Physical/special bias.
    pub const PSB: &str = "PSB";
    /// Overall ranking.
    pub const BSR: &str = "BSR";

    pub const STATS: [&str; 6] = [HP, ATTACK, DEFENSE, SP_ATTACK, SP_DEFENSE, SPEED_FRACTION];
    pub const ROLES: [&str; 4] = [PD, SD, PO, SO];
    pub const REPORT: [&str; 7] = [PD, SD, PO, SO, ODB, PSB, BSR];
}
