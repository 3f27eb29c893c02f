use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::{stopwords, weights::WeightMap};

/// Naive word counter for raw prose.
///
/// Words are maximal runs of ASCII or Cyrillic letters after lowercasing;
/// everything else separates them.
pub struct TextTokenizer {
    //分词正则
    regex: Regex,
    pub filter: HashSet<String>,
    pub min_word_length: usize,
}

impl Default for TextTokenizer {
    fn default() -> Self {
        let regex = Regex::new("[a-zа-яё]+").expect("Unable to compile tokenization regex");

        TextTokenizer {
            regex,
            filter: Default::default(),
            min_word_length: 3,
        }
    }
}

impl TextTokenizer {
    pub fn with_min_word_length(mut self, size: usize) -> Self {
        self.min_word_length = size;
        self
    }

    /// Replaces the stop-word filter. Words are lowercased on the way in.
    pub fn with_filter(mut self, value: &[&str]) -> Self {
        self.filter = value.iter().map(|el| el.to_lowercase()).collect();
        self
    }

    /// Adds the built-in English and Russian stop words to the filter.
    pub fn with_default_stop_words(mut self) -> Self {
        self.filter.extend(stopwords::default_stop_words());
        self
    }

    fn tokens<'a>(
        &'a self,
        lowercase: &'a str,
        stop_words: &'a HashSet<String>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.regex
            .find_iter(lowercase)
            .map(|mat| mat.as_str())
            .filter(move |word| word.chars().count() >= self.min_word_length)
            .filter(move |word| !stop_words.contains(*word))
    }

    fn word_counts_with(&self, text: &str, stop_words: &HashSet<String>) -> HashMap<String, usize> {
        let lowercase = text.to_lowercase();
        let mut frequencies = HashMap::new();

        for word in self.tokens(&lowercase, stop_words) {
            let entry = frequencies.entry(word.to_string()).or_insert(0);
            *entry += 1;
        }

        frequencies
    }

    /// Occurrence count of every surviving word.
    pub fn word_counts(&self, text: &str) -> HashMap<String, usize> {
        self.word_counts_with(text, &self.filter)
    }

    /// Counts divided by the largest count, so the top word weighs 1.0.
    pub fn weights(&self, text: &str) -> WeightMap {
        self.weights_with(text, &self.filter)
    }

    #[tracing::instrument(skip_all, fields(bytes = text.len()))]
    fn weights_with(&self, text: &str, stop_words: &HashSet<String>) -> WeightMap {
        let frequencies = self.word_counts_with(text, stop_words);

        let Some(max_freq) = frequencies.values().max().copied() else {
            return WeightMap::new();
        };
        let max_freq = max_freq as f64;

        let weights: WeightMap = frequencies
            .into_iter()
            .map(|(word, count)| (word, count as f64 / max_freq))
            .collect();

        tracing::debug!(distinct = weights.len(), "tokenized raw text");
        weights
    }
}

/// Counts words of `text` that are not in `stop_words` and scales the
/// counts so the most frequent word maps to 1.0.
///
/// `stop_words` is matched exactly against lowercased words, so it should
/// already be lowercase.
pub fn tokenize(text: &str, stop_words: &HashSet<String>) -> WeightMap {
    TextTokenizer::default().weights_with(text, stop_words)
}
