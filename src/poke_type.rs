//! The fixed set of 18 elemental types.

use crate::error::RoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 18 elemental types.
///
/// Variant order is alphabetical and matches the index used by
/// type-effectiveness vectors (see [`PokeType::index`]).
///
/// # Examples
///
/// ```rust
/// use rolestat::PokeType;
///
/// let fire: PokeType = "Fire".parse().unwrap();
/// assert_eq!(fire, PokeType::Fire);
/// assert_eq!(fire.index(), 6);
/// assert_eq!(fire.to_string(), "fire");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokeType {
    Bug,
    Dark,
    Dragon,
    Electric,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Steel,
    Water,
}

impl PokeType {
    /// Number of types.
    pub const COUNT: usize = 18;

    /// All types in index order.
    pub const ALL: [PokeType; PokeType::COUNT] = [
        PokeType::Bug,
        PokeType::Dark,
        PokeType::Dragon,
        PokeType::Electric,
        PokeType::Fairy,
        PokeType::Fighting,
        PokeType::Fire,
        PokeType::Flying,
        PokeType::Ghost,
        PokeType::Grass,
        PokeType::Ground,
        PokeType::Ice,
        PokeType::Normal,
        PokeType::Poison,
        PokeType::Psychic,
        PokeType::Rock,
        PokeType::Steel,
        PokeType::Water,
    ];

    /// Position of this type in an effectiveness vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            PokeType::Bug => "bug",
            PokeType::Dark => "dark",
            PokeType::Dragon => "dragon",
            PokeType::Electric => "electric",
            PokeType::Fairy => "fairy",
            PokeType::Fighting => "fighting",
            PokeType::Fire => "fire",
            PokeType::Flying => "flying",
            PokeType::Ghost => "ghost",
            PokeType::Grass => "grass",
            PokeType::Ground => "ground",
            PokeType::Ice => "ice",
            PokeType::Normal => "normal",
            PokeType::Poison => "poison",
            PokeType::Psychic => "psychic",
            PokeType::Rock => "rock",
            PokeType::Steel => "steel",
            PokeType::Water => "water",
        }
    }
}

impl FromStr for PokeType {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        PokeType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == lower)
            .ok_or_else(|| RoleError::UnknownType(s.to_string()))
    }
}

impl fmt::Display for PokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
