//! Creature records and the in-memory record store.
//!
//! A [`Pokedex`] holds [`StatRecord`]s in insertion order. That order is
//! the row order of every matrix built from the store, so loading from
//! JSON keeps the order the entries appear in the file.

use crate::error::RoleError;
use crate::poke_type::PokeType;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Speed rank of a record whose rank was never computed.
pub const UNRANKED: i64 = -1;

/// The six species-level base stats.
///
/// Serialized as a list of exactly six integers in the order
/// HP, Attack, Defense, Sp. Attack, Sp. Defense, Speed.
///
/// # Examples
///
/// ```rust
/// use rolestat::BaseStats;
///
/// let stats = BaseStats::try_from(vec![45, 49, 49, 65, 65, 45]).unwrap();
/// assert_eq!(stats.sp_attack, 65);
/// assert_eq!(stats.total(), 318);
///
/// assert!(BaseStats::try_from(vec![45, 49, 49]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "[u32; 6]")]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Number of base stats.
    pub const COUNT: usize = 6;

    pub fn new(
        hp: u32,
        attack: u32,
        defense: u32,
        sp_attack: u32,
        sp_defense: u32,
        speed: u32,
    ) -> Self {
        Self {
            hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        }
    }

    /// Stats in canonical order.
    pub fn as_array(&self) -> [u32; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }

    /// Base stat total.
    pub fn total(&self) -> u32 {
        self.as_array().iter().sum()
    }
}

impl TryFrom<Vec<u32>> for BaseStats {
    type Error = RoleError;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            &[hp, attack, defense, sp_attack, sp_defense, speed] => Ok(Self::new(
                hp, attack, defense, sp_attack, sp_defense, speed,
            )),
            _ => Err(RoleError::ColumnCount {
                expected: Self::COUNT,
                found: values.len(),
            }),
        }
    }
}

impl From<BaseStats> for [u32; 6] {
    fn from(stats: BaseStats) -> Self {
        stats.as_array()
    }
}

/// One creature: name, base stats, types and speed rank.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord {
    /// Unique name within a store.
    pub name: String,
    /// National dex number, when known.
    pub dex_id: Option<u32>,
    /// One or two types, in source order.
    pub types: Vec<PokeType>,
    pub stats: BaseStats,
    /// Alternate form (mega, regional, ...) of an earlier entry.
    pub alt_form: bool,
    /// Dense speed rank, [`UNRANKED`] until computed.
    pub speed_rank: i64,
}

impl StatRecord {
    /// Create an unranked, non-alternate record.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rolestat::{BaseStats, PokeType, StatRecord};
    ///
    /// let mon = StatRecord::new(
    ///     "pikachu",
    ///     vec![PokeType::Electric],
    ///     BaseStats::new(35, 55, 40, 50, 50, 90),
    /// )
    /// .with_speed_rank(42);
    /// assert!(mon.is_ranked());
    /// ```
    pub fn new(name: impl Into<String>, types: Vec<PokeType>, stats: BaseStats) -> Self {
        Self {
            name: name.into(),
            dex_id: None,
            types,
            stats,
            alt_form: false,
            speed_rank: UNRANKED,
        }
    }

    pub fn with_speed_rank(mut self, rank: i64) -> Self {
        self.speed_rank = rank;
        self
    }

    pub fn with_alt_form(mut self, alt_form: bool) -> Self {
        self.alt_form = alt_form;
        self
    }

    pub fn with_dex_id(mut self, dex_id: u32) -> Self {
        self.dex_id = Some(dex_id);
        self
    }

    pub fn is_ranked(&self) -> bool {
        self.speed_rank >= 0
    }

    /// Check the invariants a record must hold before it enters a store.
    pub fn validate(&self) -> Result<(), RoleError> {
        if self.name.trim().is_empty() {
            return Err(RoleError::MalformedRecord {
                name: self.name.clone(),
                reason: "name is empty".to_string(),
            });
        }
        if self.types.is_empty() || self.types.len() > 2 {
            return Err(RoleError::MalformedRecord {
                name: self.name.clone(),
                reason: format!("expected 1 or 2 types, found {}", self.types.len()),
            });
        }
        if let [first, second] = self.types[..] {
            if first == second {
                return Err(RoleError::MalformedRecord {
                    name: self.name.clone(),
                    reason: format!("type {first} listed twice"),
                });
            }
        }
        if self.speed_rank < UNRANKED {
            return Err(RoleError::MalformedRecord {
                name: self.name.clone(),
                reason: format!("invalid speed rank {}", self.speed_rank),
            });
        }
        Ok(())
    }
}

/// JSON body of a record; the name is the map key.
#[derive(Deserialize)]
struct RecordBody {
    #[serde(default)]
    dex_id: Option<u32>,
    #[serde(rename = "type")]
    types: Vec<PokeType>,
    stats: BaseStats,
    #[serde(default)]
    alt_form: bool,
    #[serde(default = "unranked")]
    speed_rank: i64,
}

fn unranked() -> i64 {
    UNRANKED
}

#[derive(Serialize)]
struct RecordBodyRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    dex_id: Option<u32>,
    #[serde(rename = "type")]
    types: &'a [PokeType],
    stats: BaseStats,
    alt_form: bool,
    speed_rank: i64,
}

/// Ordered, name-indexed store of creature records.
///
/// # Examples
///
/// ```rust
/// use rolestat::Pokedex;
///
/// let json = r#"{
///     "bulbasaur": {"type": ["grass", "poison"], "stats": [45, 49, 49, 65, 65, 45]},
///     "charmander": {"type": ["fire"], "stats": [39, 52, 43, 60, 50, 65]}
/// }"#;
/// let mut dex = Pokedex::from_json(json).unwrap();
/// assert_eq!(dex.names().collect::<Vec<_>>(), vec!["bulbasaur", "charmander"]);
///
/// dex.assign_speed_ranks();
/// assert_eq!(dex.get("bulbasaur").unwrap().speed_rank, 0);
/// assert_eq!(dex.get("charmander").unwrap().speed_rank, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pokedex {
    records: Vec<StatRecord>,
    index: HashMap<String, usize>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Names must be unique.
    pub fn insert(&mut self, record: StatRecord) -> Result<(), RoleError> {
        record.validate()?;
        if self.index.contains_key(&record.name) {
            return Err(RoleError::DuplicateCreature(record.name));
        }
        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Build a store from records, failing on the first invalid one.
    pub fn from_records<I>(records: I) -> Result<Self, RoleError>
    where
        I: IntoIterator<Item = StatRecord>,
    {
        let mut dex = Self::new();
        for record in records {
            dex.insert(record)?;
        }
        Ok(dex)
    }

    pub fn get(&self, name: &str) -> Option<&StatRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Look up a record, failing with `UnknownCreature`.
    pub fn require(&self, name: &str) -> Result<&StatRecord, RoleError> {
        self.get(name)
            .ok_or_else(|| RoleError::UnknownCreature(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StatRecord> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.records[i]),
            None => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Assign dense speed ranks, keeping alternate forms out of contention.
    pub fn assign_speed_ranks(&mut self) {
        self.assign_speed_ranks_with(|record| record.alt_form);
    }

    /// Assign dense speed ranks over the records `exclude` rejects.
    ///
    /// Distinct Speed values of the contending records are ranked from 0
    /// (slowest) upward; equal speeds share a rank. Every record, excluded
    /// or not, then receives the number of distinct contending speeds
    /// strictly below its own.
    pub fn assign_speed_ranks_with<F>(&mut self, exclude: F)
    where
        F: Fn(&StatRecord) -> bool,
    {
        let contending: Vec<u32> = self
            .records
            .iter()
            .filter(|r| !exclude(r))
            .map(|r| r.stats.speed)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        for record in &mut self.records {
            let below = contending.partition_point(|&speed| speed < record.stats.speed);
            record.speed_rank = below as i64;
        }
    }

    /// Parse the `name -> record` JSON mapping, keeping file order.
    pub fn from_json(json: &str) -> Result<Self, RoleError> {
        serde_json::from_str(json).map_err(|e| RoleError::parse("pokedex", e))
    }

    pub fn to_json_pretty(&self) -> Result<String, RoleError> {
        serde_json::to_string_pretty(self).map_err(|e| RoleError::parse("pokedex", e))
    }
}

impl<'a> IntoIterator for &'a Pokedex {
    type Item = &'a StatRecord;
    type IntoIter = std::slice::Iter<'a, StatRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for Pokedex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            let body = RecordBodyRef {
                dex_id: record.dex_id,
                types: &record.types,
                stats: record.stats,
                alt_form: record.alt_form,
                speed_rank: record.speed_rank,
            };
            map.serialize_entry(&record.name, &body)?;
        }
        map.end()
    }
}

struct PokedexVisitor;

impl<'de> Visitor<'de> for PokedexVisitor {
    type Value = Pokedex;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of creature name to record")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut dex = Pokedex::new();
        while let Some((name, body)) = access.next_entry::<String, RecordBody>()? {
            let record = StatRecord {
                name,
                dex_id: body.dex_id,
                types: body.types,
                stats: body.stats,
                alt_form: body.alt_form,
                speed_rank: body.speed_rank,
            };
            dex.insert(record).map_err(serde::de::Error::custom)?;
        }
        Ok(dex)
    }
}

impl<'de> Deserialize<'de> for Pokedex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PokedexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mon(name: &str, speed: u32) -> StatRecord {
        StatRecord::new(name, vec![PokeType::Normal], BaseStats::new(50, 50, 50, 50, 50, speed))
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut dex = Pokedex::new();
        dex.insert(mon("a", 10)).unwrap();
        dex.insert(mon("b", 20)).unwrap();
        assert_eq!(dex.len(), 2);
        assert_eq!(dex.get("b").unwrap().stats.speed, 20);
        assert!(dex.get("c").is_none());
        assert_eq!(
            dex.require("c").unwrap_err(),
            RoleError::UnknownCreature("c".to_string())
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut dex = Pokedex::new();
        dex.insert(mon("a", 10)).unwrap();
        let err = dex.insert(mon("a", 30)).unwrap_err();
        assert_eq!(err, RoleError::DuplicateCreature("a".to_string()));
    }

    #[test]
    fn test_type_count_validated() {
        let mut record = mon("a", 10);
        record.types = vec![PokeType::Fire, PokeType::Water, PokeType::Grass];
        assert!(matches!(
            Pokedex::new().insert(record),
            Err(RoleError::MalformedRecord { .. })
        ));

        let mut record = mon("b", 10);
        record.types.clear();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_repeated_type_rejected() {
        let mut record = mon("a", 10);
        record.types = vec![PokeType::Fire, PokeType::Fire];
        let err = record.validate().unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("fire listed twice"));

        let json = r#"{"a": {"type": ["fire", "fire"], "stats": [1, 2, 3, 4, 5, 6]}}"#;
        assert!(Pokedex::from_json(json).is_err());
    }

    #[test]
    fn test_speed_ranks_dense_with_ties() {
        let mut dex =
            Pokedex::from_records(vec![mon("a", 30), mon("b", 10), mon("c", 30), mon("d", 20)])
                .unwrap();
        dex.assign_speed_ranks();

        let ranks: Vec<i64> = dex.iter().map(|r| r.speed_rank).collect();
        assert_eq!(ranks, vec![2, 0, 2, 1]);
    }

    #[test]
    fn test_speed_ranks_exclude_alt_forms() {
        let mut dex = Pokedex::new();
        dex.insert(mon("a", 10)).unwrap();
        dex.insert(mon("b", 50)).unwrap();
        dex.insert(mon("mega b", 40).with_alt_form(true)).unwrap();
        dex.insert(mon("mega a", 100).with_alt_form(true)).unwrap();
        dex.assign_speed_ranks();

        assert_eq!(dex.get("a").unwrap().speed_rank, 0);
        assert_eq!(dex.get("b").unwrap().speed_rank, 1);
        // 40 sits between 10 and 50 without taking a rank of its own
        assert_eq!(dex.get("mega b").unwrap().speed_rank, 1);
        assert_eq!(dex.get("mega a").unwrap().speed_rank, 2);
    }

    #[test]
    fn test_json_keeps_file_order() {
        let json = r#"{
            "zubat": {"type": ["flying", "poison"],
                      "stats": [40, 45, 35, 30, 40, 55], "dex_id": 41},
            "abra": {"type": ["psychic"], "stats": [25, 20, 15, 105, 55, 90],
                     "alt_form": false, "speed_rank": 7}
        }"#;
        let dex = Pokedex::from_json(json).unwrap();
        assert_eq!(dex.names().collect::<Vec<_>>(), vec!["zubat", "abra"]);
        assert_eq!(dex.get("zubat").unwrap().dex_id, Some(41));
        assert_eq!(dex.get("zubat").unwrap().speed_rank, UNRANKED);
        assert_eq!(dex.get("abra").unwrap().speed_rank, 7);
    }

    #[test]
    fn test_json_rejects_short_stats() {
        let json = r#"{"abra": {"type": ["psychic"], "stats": [25, 20, 15]}}"#;
        let err = Pokedex::from_json(json).unwrap_err();
        assert!(err.to_string().contains("expected 6 columns"));
    }

    #[test]
    fn test_json_rejects_unknown_type() {
        let json = r#"{"abra": {"type": ["cosmic"], "stats": [25, 20, 15, 105, 55, 90]}}"#;
        assert!(matches!(
            Pokedex::from_json(json),
            Err(RoleError::Parse { .. })
        ));
    }

    #[test]
    fn test_json_write_then_read() {
        let mut dex = Pokedex::new();
        dex.insert(mon("b", 10).with_dex_id(2)).unwrap();
        dex.insert(mon("a", 20).with_speed_rank(1)).unwrap();
        let json = dex.to_json_pretty().unwrap();
        assert!(json.find("\"b\"").unwrap() < json.find("\"a\"").unwrap());
        assert_eq!(Pokedex::from_json(&json).unwrap(), dex);
    }
}
