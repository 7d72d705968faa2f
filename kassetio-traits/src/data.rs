use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespaced identifier of a trait, e.g.
/// `"openassetio-mediacreation:content.LocatableContent"`.
pub type TraitId = String;

/// An unordered set of trait IDs, identifying an entity "shape".
pub type TraitSet = BTreeSet<TraitId>;

/// A primitive value held by a trait property.
///
/// Serializes untagged so library documents and fixtures read naturally
/// (`"linear"`, `42`, `1.5`, `true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitPropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for TraitPropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<bool> for TraitPropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TraitPropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for TraitPropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for TraitPropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for TraitPropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl TraitPropertyValue {
    /// Returns the contained string, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the contained integer, if this value is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }
}

/// A bundle of traits-with-properties exchanged with a backend.
///
/// Traits are keyed by [`TraitId`]; each holds zero or more named
/// properties. A trait with no properties is still meaningful — its
/// presence alone marks the entity as having that facet ("imbuing").
/// Iteration order is deterministic (sorted by trait ID, then property
/// key).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitsData {
    traits: BTreeMap<TraitId, BTreeMap<String, TraitPropertyValue>>,
}

impl TraitsData {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload with every trait in `trait_set` imbued (no
    /// properties).
    #[must_use]
    pub fn from_trait_set(trait_set: &TraitSet) -> Self {
        let mut data = Self::new();
        for trait_id in trait_set {
            data.imbue(trait_id);
        }
        data
    }

    /// Marks `trait_id` as present, without any properties.
    pub fn imbue(&mut self, trait_id: &str) {
        self.traits.entry(trait_id.to_string()).or_default();
    }

    /// Returns whether `trait_id` is present.
    #[must_use]
    pub fn has_trait(&self, trait_id: &str) -> bool {
        self.traits.contains_key(trait_id)
    }

    /// Returns the set of trait IDs present in this payload.
    #[must_use]
    pub fn trait_set(&self) -> TraitSet {
        self.traits.keys().cloned().collect()
    }

    /// Sets a property on `trait_id`, imbuing the trait if absent.
    pub fn set_property(
        &mut self,
        trait_id: &str,
        key: &str,
        value: impl Into<TraitPropertyValue>,
    ) {
        self.traits
            .entry(trait_id.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Returns the property `key` of `trait_id`, if set.
    #[must_use]
    pub fn property(&self, trait_id: &str, key: &str) -> Option<&TraitPropertyValue> {
        self.traits.get(trait_id)?.get(key)
    }

    /// Returns the string property `key` of `trait_id`, if set and a string.
    #[must_use]
    pub fn string_property(&self, trait_id: &str, key: &str) -> Option<&str> {
        self.property(trait_id, key)?.as_str()
    }

    /// Returns the property keys set on `trait_id` (empty for an absent or
    /// property-less trait).
    #[must_use]
    pub fn property_keys(&self, trait_id: &str) -> Vec<&str> {
        self.traits
            .get(trait_id)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Copies every trait and property of `other` into this payload,
    /// overwriting on collision.
    pub fn merge_from(&mut self, other: &TraitsData) {
        for (trait_id, props) in &other.traits {
            let entry = self.traits.entry(trait_id.clone()).or_default();
            for (key, value) in props {
                entry.insert(key.clone(), value.clone());
            }
        }
    }

    /// Returns a copy reduced to the traits named in `trait_set`.
    #[must_use]
    pub fn filtered_to(&self, trait_set: &TraitSet) -> Self {
        Self {
            traits: self
                .traits
                .iter()
                .filter(|(trait_id, _)| trait_set.contains(*trait_id))
                .map(|(trait_id, props)| (trait_id.clone(), props.clone()))
                .collect(),
        }
    }

    /// Returns whether no traits are present at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn imbue_is_presence_without_properties() {
        let mut data = TraitsData::new();
        data.imbue("ns:a.Marker");

        assert!(data.has_trait("ns:a.Marker"));
        assert!(data.property_keys("ns:a.Marker").is_empty());
    }

    #[test]
    fn set_property_imbues_implicitly() {
        let mut data = TraitsData::new();
        data.set_property("ns:a.Thing", "name", "cat");

        assert!(data.has_trait("ns:a.Thing"));
        assert_eq!(data.string_property("ns:a.Thing", "name"), Some("cat"));
    }

    #[test]
    fn absent_property_is_none_not_empty() {
        let mut data = TraitsData::new();
        data.imbue("ns:a.Thing");

        assert_eq!(data.property("ns:a.Thing", "name"), None);
        assert_eq!(data.property("ns:b.Other", "name"), None);
    }

    #[test]
    fn filtered_to_drops_unlisted_traits() {
        let mut data = TraitsData::new();
        data.set_property("ns:a.Keep", "k", 1_i64);
        data.imbue("ns:a.Drop");

        let filtered = data.filtered_to(&TraitSet::from(["ns:a.Keep".to_string()]));
        assert!(filtered.has_trait("ns:a.Keep"));
        assert!(!filtered.has_trait("ns:a.Drop"));
    }

    #[test]
    fn merge_from_overwrites_on_collision() {
        let mut base = TraitsData::new();
        base.set_property("ns:a.Thing", "name", "old");
        base.imbue("ns:a.Keep");

        let mut incoming = TraitsData::new();
        incoming.set_property("ns:a.Thing", "name", "new");
        incoming.set_property("ns:b.Other", "count", 2_i64);

        base.merge_from(&incoming);
        assert_eq!(base.string_property("ns:a.Thing", "name"), Some("new"));
        assert_eq!(base.property("ns:b.Other", "count"), Some(&TraitPropertyValue::Int(2)));
        assert!(base.has_trait("ns:a.Keep"));
    }

    #[test]
    fn empty_payload_reports_empty() {
        let mut data = TraitsData::new();
        assert!(data.is_empty());
        data.imbue("ns:a.Marker");
        assert!(!data.is_empty());
    }

    #[test]
    fn values_round_trip_through_json() {
        let mut data = TraitsData::new();
        data.set_property("ns:a.Thing", "flag", true);
        data.set_property("ns:a.Thing", "count", 3_i64);
        data.set_property("ns:a.Thing", "weight", 1.5_f64);
        data.set_property("ns:a.Thing", "name", "cat");

        let json = serde_json::to_string(&data).unwrap();
        let back: TraitsData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn display_formats_bools_as_words() {
        assert_eq!(TraitPropertyValue::from(true).to_string(), "true");
        assert_eq!(TraitPropertyValue::from(7_i64).to_string(), "7");
        assert_eq!(TraitPropertyValue::from("x").to_string(), "x");
    }
}
