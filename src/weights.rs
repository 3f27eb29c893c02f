use std::collections::{btree_map, BTreeMap};

use serde::Serialize;

/// Mapping from term to a strictly positive weight.
///
/// Iteration is in lexical term order. Every stage of the pipeline builds a
/// fresh map instead of mutating its input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightMap(BTreeMap<String, f64>);

impl WeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `term` with `weight`, replacing any previous weight.
    ///
    /// The term is trimmed. Empty terms and weights that are not finite and
    /// strictly positive are rejected and `false` is returned.
    pub fn insert(&mut self, term: impl AsRef<str>, weight: f64) -> bool {
        let term = term.as_ref().trim();
        if term.is_empty() || !weight.is_finite() || weight <= 0.0 {
            return false;
        }

        self.0.insert(term.to_string(), weight);
        true
    }

    pub fn get(&self, term: &str) -> Option<f64> {
        self.0.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(term, weight)| (term.as_str(), *weight))
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn max_weight(&self) -> Option<f64> {
        self.0.values().copied().reduce(f64::max)
    }

    pub fn min_weight(&self) -> Option<f64> {
        self.0.values().copied().reduce(f64::min)
    }

    /// Entries sorted by descending weight.
    ///
    /// The sort is stable over lexical order, so equal weights stay in
    /// ascending term order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries
    }

    /// Builds a new map with every weight passed through `f`.
    ///
    /// Results are clamped into the positive finite range, so the new map
    /// has exactly the same terms.
    pub fn map_weights(&self, mut f: impl FnMut(f64) -> f64) -> WeightMap {
        self.iter()
            .map(|(term, weight)| (term.to_string(), clamp_weight(f(weight))))
            .collect()
    }
}

/// Pulls an underflowed or overflowed weight back into `[MIN_POSITIVE, MAX]`.
pub(crate) fn clamp_weight(weight: f64) -> f64 {
    weight.clamp(f64::MIN_POSITIVE, f64::MAX)
}

impl FromIterator<(String, f64)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut map = WeightMap::new();
        for (term, weight) in iter {
            map.insert(term, weight);
        }
        map
    }
}

impl<'a> FromIterator<(&'a str, f64)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut map = WeightMap::new();
        for (term, weight) in iter {
            map.insert(term, weight);
        }
        map
    }
}

impl IntoIterator for WeightMap {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
