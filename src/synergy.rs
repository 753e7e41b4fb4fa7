//! Type-defense synergy between two creatures.
//!
//! Each type has a defensive profile over the 18 attacking types: neutral
//! (1), weakness (2), resistance (0.5) or immunity (0). A dual-typed
//! creature's profile is the elementwise product of its two types. The
//! synergy of a pair is the 2-norm of the elementwise product of both
//! profiles, so shared weaknesses blow the score up and complementary
//! resistances pull it down. Lower is better.

use crate::error::RoleError;
use crate::poke_type::PokeType;
use crate::record::Pokedex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Damage multipliers from each attacking type, indexed by [`PokeType::index`].
pub type EffectVector = [f64; PokeType::COUNT];

/// Defensive interactions of a single type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effectiveness {
    pub weaknesses: Vec<PokeType>,
    pub resistances: Vec<PokeType>,
    pub immunities: Vec<PokeType>,
}

impl Effectiveness {
    fn new(weaknesses: &[PokeType], resistances: &[PokeType], immunities: &[PokeType]) -> Self {
        Self {
            weaknesses: weaknesses.to_vec(),
            resistances: resistances.to_vec(),
            immunities: immunities.to_vec(),
        }
    }

    /// Multiplier vector. Later categories win: immunity over resistance
    /// over weakness.
    pub fn vector(&self) -> EffectVector {
        let mut v = [1.0; PokeType::COUNT];
        for ty in &self.weaknesses {
            v[ty.index()] = 2.0;
        }
        for ty in &self.resistances {
            v[ty.index()] = 0.5;
        }
        for ty in &self.immunities {
            v[ty.index()] = 0.0;
        }
        v
    }
}

/// Defensive type chart keyed by defending type.
///
/// # Examples
///
/// ```rust
/// use rolestat::{PokeType, TypeChart};
///
/// let chart = TypeChart::standard();
/// let v = chart.combined_vector(&[PokeType::Water, PokeType::Ground]).unwrap();
/// assert_eq!(v[PokeType::Grass.index()], 4.0);
/// assert_eq!(v[PokeType::Electric.index()], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeChart {
    entries: BTreeMap<PokeType, Effectiveness>,
}

impl TypeChart {
    /// The current-generation defensive chart.
    pub fn standard() -> Self {
        use PokeType::*;
        let table: [(PokeType, Effectiveness); PokeType::COUNT] = [
            (Bug, Effectiveness::new(&[Fire, Flying, Rock], &[Fighting, Grass, Ground], &[])),
            (Dark, Effectiveness::new(&[Bug, Fairy, Fighting], &[Dark, Ghost], &[Psychic])),
            (
                Dragon,
                Effectiveness::new(&[Dragon, Fairy, Ice], &[Electric, Fire, Grass, Water], &[]),
            ),
            (Electric, Effectiveness::new(&[Ground], &[Electric, Flying, Steel], &[])),
            (Fairy, Effectiveness::new(&[Poison, Steel], &[Bug, Dark, Fighting], &[Dragon])),
            (
                Fighting,
                Effectiveness::new(&[Fairy, Flying, Psychic], &[Bug, Dark, Rock], &[]),
            ),
            (
                Fire,
                Effectiveness::new(
                    &[Ground, Rock, Water],
                    &[Bug, Fairy, Fire, Grass, Ice, Steel],
                    &[],
                ),
            ),
            (
                Flying,
                Effectiveness::new(&[Electric, Ice, Rock], &[Bug, Fighting, Grass], &[Ground]),
            ),
            (
                Ghost,
                Effectiveness::new(&[Dark, Ghost], &[Bug, Poison], &[Fighting, Normal]),
            ),
            (
                Grass,
                Effectiveness::new(
                    &[Bug, Fire, Flying, Ice, Poison],
                    &[Electric, Grass, Ground, Water],
                    &[],
                ),
            ),
            (
                Ground,
                Effectiveness::new(&[Grass, Ice, Water], &[Poison, Rock], &[Electric]),
            ),
            (Ice, Effectiveness::new(&[Fighting, Fire, Rock, Steel], &[Ice], &[])),
            (Normal, Effectiveness::new(&[Fighting], &[], &[Ghost])),
            (
                Poison,
                Effectiveness::new(&[Ground, Psychic], &[Bug, Fairy, Fighting, Grass, Poison], &[]),
            ),
            (Psychic, Effectiveness::new(&[Bug, Dark, Ghost], &[Fighting, Psychic], &[])),
            (
                Rock,
                Effectiveness::new(
                    &[Fighting, Grass, Ground, Steel, Water],
                    &[Fire, Flying, Normal, Poison],
                    &[],
                ),
            ),
            (
                Steel,
                Effectiveness::new(
                    &[Fighting, Fire, Ground],
                    &[Bug, Dragon, Fairy, Flying, Grass, Ice, Normal, Psychic, Rock, Steel],
                    &[Poison],
                ),
            ),
            (Water, Effectiveness::new(&[Electric, Grass], &[Fire, Ice, Steel, Water], &[])),
        ];
        Self {
            entries: table.into_iter().collect(),
        }
    }

    /// Parse a chart shaped `{"fire": {"weaknesses": [...], ...}, ...}`.
    pub fn from_json(json: &str) -> Result<Self, RoleError> {
        serde_json::from_str(json).map_err(|e| RoleError::parse("type chart", e))
    }

    pub fn get(&self, ty: PokeType) -> Option<&Effectiveness> {
        self.entries.get(&ty)
    }

    /// Multiplier vector of a single defending type.
    pub fn defense_vector(&self, ty: PokeType) -> Result<EffectVector, RoleError> {
        self.get(ty)
            .map(Effectiveness::vector)
            .ok_or(RoleError::MissingTypeEntry(ty))
    }

    /// Multiplier vector of a creature with one or two types.
    pub fn combined_vector(&self, types: &[PokeType]) -> Result<EffectVector, RoleError> {
        match *types {
            [single] => self.defense_vector(single),
            [first, second] if first == second => Err(RoleError::MalformedRecord {
                name: format!("{types:?}"),
                reason: format!("type {first} listed twice"),
            }),
            [first, second] => Ok(elementwise(
                &self.defense_vector(first)?,
                &self.defense_vector(second)?,
            )),
            _ => Err(RoleError::MalformedRecord {
                name: format!("{types:?}"),
                reason: format!("expected 1 or 2 types, found {}", types.len()),
            }),
        }
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::standard()
    }
}

fn elementwise(a: &EffectVector, b: &EffectVector) -> EffectVector {
    let mut out = [0.0; PokeType::COUNT];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b)) {
        *o = x * y;
    }
    out
}

/// Synergy score of two type lists. Lower means better coverage.
///
/// # Examples
///
/// ```rust
/// use rolestat::synergy::type_synergy;
/// use rolestat::{PokeType, TypeChart};
///
/// let chart = TypeChart::standard();
/// let same = type_synergy(&chart, &[PokeType::Fire], &[PokeType::Fire]).unwrap();
/// let mixed = type_synergy(&chart, &[PokeType::Fire], &[PokeType::Water]).unwrap();
/// assert!(mixed < same);
/// ```
pub fn type_synergy(
    chart: &TypeChart,
    first: &[PokeType],
    second: &[PokeType],
) -> Result<f64, RoleError> {
    let joint = elementwise(&chart.combined_vector(first)?, &chart.combined_vector(second)?);
    Ok(joint.iter().map(|v| v * v).sum::<f64>().sqrt())
}

/// A candidate teammate and its synergy score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    pub score: f64,
}

/// Best `limit` teammates for `subject`, lowest score first.
///
/// The subject itself is not a candidate. Ties keep store order.
pub fn find_partners(
    chart: &TypeChart,
    dex: &Pokedex,
    subject: &str,
    limit: usize,
) -> Result<Vec<Partner>, RoleError> {
    let subject_types = &dex.require(subject)?.types;
    tracing::debug!(subject, candidates = dex.len() - 1, "Scoring partners");

    let mut partners = dex
        .iter()
        .filter(|record| record.name != subject)
        .map(|record| {
            Ok(Partner {
                name: record.name.clone(),
                score: type_synergy(chart, subject_types, &record.types)?,
            })
        })
        .collect::<Result<Vec<_>, RoleError>>()?;

    partners.sort_by(|a, b| a.score.total_cmp(&b.score));
    partners.truncate(limit);
    Ok(partners)
}
