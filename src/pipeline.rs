use serde::{Deserialize, Serialize};

use crate::{
    cache::{cache_key, ResultCache},
    error::{Error, Result},
    frequency::{apply, normalize},
    parser::LineParser,
    settings::Settings,
    stats::Statistics,
    tokenizer::TextTokenizer,
    weights::WeightMap,
};

/// How the input text should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// One `term weight` pair per line.
    #[default]
    FrequencyList,
    /// Free prose; words are counted.
    RawText,
}

/// Result of a successful run, ready for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub weights: WeightMap,
    pub statistics: Statistics,
}

/// parse or tokenize -> normalize -> threshold/scale/cap.
#[derive(Default)]
pub struct Pipeline {
    parser: LineParser,
    tokenizer: TextTokenizer,
}

impl Pipeline {
    pub fn new(tokenizer: TextTokenizer) -> Self {
        Pipeline {
            parser: LineParser::default(),
            tokenizer,
        }
    }

    pub fn raw_weights(&self, text: &str, mode: InputMode) -> WeightMap {
        match mode {
            InputMode::FrequencyList => self.parser.parse(text),
            InputMode::RawText => self.tokenizer.weights(text),
        }
    }

    /// Runs every stage.
    ///
    /// An empty map after parsing and an empty map after filtering are
    /// reported as [`Error::NothingRecognized`] and
    /// [`Error::NothingAboveThreshold`] respectively.
    #[tracing::instrument(skip_all, fields(mode = ?mode))]
    pub fn run(&self, text: &str, mode: InputMode, settings: &Settings) -> Result<Outcome> {
        settings.validate()?;

        let raw = self.raw_weights(text, mode);
        if raw.is_empty() {
            return Err(Error::NothingRecognized);
        }

        let recognized = raw.len();
        let normalized = normalize(&raw);
        let weights = apply(
            &normalized,
            settings.min_frequency,
            settings.scale,
            settings.max_words,
        );

        let statistics = Statistics::collect(recognized, &weights, settings, Statistics::TOP_WORDS)
            .ok_or(Error::NothingAboveThreshold(settings.min_frequency))?;

        tracing::debug!(recognized, retained = weights.len(), "pipeline finished");
        Ok(Outcome {
            weights,
            statistics,
        })
    }
}

/// A [`Pipeline`] plus a memo of previous runs, keyed by input and settings.
#[derive(Default)]
pub struct Session {
    pipeline: Pipeline,
    cache: ResultCache<Outcome>,
}

impl Session {
    pub fn new(pipeline: Pipeline) -> Self {
        Session {
            pipeline,
            cache: ResultCache::default(),
        }
    }

    pub fn generate(&mut self, text: &str, mode: InputMode, settings: &Settings) -> Result<&Outcome> {
        let key = cache_key(text, mode, settings);
        let pipeline = &self.pipeline;
        self.cache
            .get_or_try_insert_with(key, || pipeline.run(text, mode, settings))
    }

    pub fn cache(&self) -> &ResultCache<Outcome> {
        &self.cache
    }
}
