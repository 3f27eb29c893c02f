use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
};

use crate::{pipeline::InputMode, settings::Settings};

/// Hash of everything a pipeline run depends on.
pub fn cache_key(text: &str, mode: InputMode, settings: &Settings) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    mode.hash(&mut hasher);
    settings.hash(&mut hasher);
    hasher.finish()
}

/// Get-or-compute memoization owned by the caller.
#[derive(Debug)]
pub struct ResultCache<V> {
    entries: HashMap<u64, V>,
    hits: usize,
    misses: usize,
}

impl<V> Default for ResultCache<V> {
    fn default() -> Self {
        ResultCache {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<V> ResultCache<V> {
    pub fn get(&self, key: u64) -> Option<&V> {
        self.entries.get(&key)
    }

    /// Returns the cached value for `key`, computing it first if needed.
    /// Failed computations are not cached.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: u64,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let value = compute()?;
            self.entries.insert(key, value);
        }

        Ok(&self.entries[&key])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{cache_key, ResultCache};
    use crate::{pipeline::InputMode, settings::Settings};

    #[test]
    fn computes_once() {
        let mut cache = ResultCache::default();
        let mut calls = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_try_insert_with(7, || -> Result<&'static str, ()> {
                    calls += 1;
                    Ok("value")
                })
                .unwrap();
            assert_eq!(*value, "value");
        }

        assert_eq!(calls, 1);
        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        let mut cache: ResultCache<u32> = ResultCache::default();
        assert!(cache.get_or_try_insert_with(1, || Err("boom")).is_err());
        assert!(cache.is_empty());
        let value = cache.get_or_try_insert_with(1, || -> Result<u32, &'static str> { Ok(5) });
        assert_eq!(value, Ok(&5));
    }

    #[test]
    fn key_depends_on_every_input() {
        let settings = Settings::default();
        let base = cache_key("a 1", InputMode::FrequencyList, &settings);

        assert_eq!(base, cache_key("a 1", InputMode::FrequencyList, &settings));
        assert_ne!(base, cache_key("a 2", InputMode::FrequencyList, &settings));
        assert_ne!(base, cache_key("a 1", InputMode::RawText, &settings));

        let scaled = Settings {
            scale: 2.0,
            ..Settings::default()
        };
        assert_ne!(base, cache_key("a 1", InputMode::FrequencyList, &scaled));
    }
}
