//! Word clouds from frequency lists or raw text.
//!
//! The pipeline turns user text into a [`WeightMap`]:
//!
//! ```text
//! text -> parse | tokenize -> normalize -> apply(min_freq, scale, max_terms) -> WordCloud
//! ```
//!
//! [`parse`], [`tokenize`], [`normalize`] and [`apply`] are pure functions
//! that never fail on bad input. [`Pipeline`] chains them and reports empty
//! results, [`WordCloud`] lays out and draws the final map, and [`export`]
//! encodes the result.

use ab_glyph::{point, FontVec, Point, PxScale};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use nanorand::{Rng, WyRand};
use sat::Rect;

pub use cache::{cache_key, ResultCache};
pub use color::Colormap;
pub use error::{Error, Result};
pub use frequency::{apply, normalize};
pub use parser::{parse, parse_weight, LineParser, ParseIssue, ParseReport, WeightEntry};
pub use pipeline::{InputMode, Outcome, Pipeline, Session};
pub use settings::{ExportFormat, Settings};
pub use stats::Statistics;
pub use text::GlyphData;
pub use tokenizer::{tokenize, TextTokenizer};
pub use weights::WeightMap;

mod cache;
pub mod color;
mod error;
pub mod export;
pub mod font;
mod frequency;
mod parser;
mod pipeline;
mod sat;
mod settings;
mod stats;
pub mod stopwords;
mod text;
mod tokenizer;
mod weights;

/// A word placed on the canvas.
#[derive(Debug, Clone)]
pub struct Word<'a> {
    pub text: &'a str,
    pub font_size: PxScale,
    pub glyphs: GlyphData,
    pub rotated: bool,
    /// Top-left corner of the word's box.
    pub position: Point,
    pub frequency: f32,
    pub color: Rgba<u8>,
}

pub struct WordCloud {
    pub font: FontVec,
}

impl WordCloud {
    /// Factor applied to the font size each time a word does not fit.
    const FONT_STEP: f32 = 0.9;
    /// Largest accepted `max_font_size`, in pixels.
    pub const MAX_FONT_SIZE: f32 = 4096.0;

    pub fn new(font: FontVec) -> Self {
        WordCloud { font }
    }

    /// Loads the font named in `settings`, or a system font.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let path = font::resolve_font(settings.font.as_deref())?;
        tracing::debug!(path = %path.display(), "using font");
        Ok(WordCloud::new(font::load_font(&path)?))
    }

    fn check_canvas(settings: &Settings) -> Result<()> {
        if settings.width == 0 || settings.height == 0 {
            return Err(Error::InvalidSetting {
                name: "width/height",
                reason: format!("canvas {}x{} is empty", settings.width, settings.height),
            });
        }
        if !(settings.min_font_size > 0.0
            && settings.max_font_size >= settings.min_font_size
            && settings.max_font_size <= Self::MAX_FONT_SIZE)
        {
            return Err(Error::InvalidSetting {
                name: "min_font_size/max_font_size",
                reason: format!(
                    "need 0 < min ({}) <= max ({}) <= {}",
                    settings.min_font_size,
                    settings.max_font_size,
                    Self::MAX_FONT_SIZE
                ),
            });
        }
        Ok(())
    }

    /// Places words heaviest first.
    ///
    /// Font size is interpolated between the minimum and maximum font size
    /// by weight. A word that does not fit shrinks until it does or drops
    /// below the minimum font size, in which case it is left out.
    #[tracing::instrument(skip_all, fields(terms = weights.len()))]
    pub fn layout<'a>(&self, weights: &'a WeightMap, settings: &Settings) -> Result<Vec<Word<'a>>> {
        Self::check_canvas(settings)?;
        let colormap: Colormap = settings.colormap.parse()?;

        let ranked = weights.ranked();
        let Some(&(_, max_weight)) = ranked.first() else {
            return Err(Error::NothingRecognized);
        };

        let (width, height) = (settings.width, settings.height);
        let mut occupancy = GrayImage::from_pixel(width, height, Luma([0]));
        let mut summed_area_table = vec![0u32; width as usize * height as usize];
        let mut rng = WyRand::new_seed(settings.random_state);

        let min_font_size = settings.min_font_size;
        let font_range = settings.max_font_size - min_font_size;
        let horizontal_share = (settings.prefer_horizontal.clamp(0.0, 1.0) * 100.0) as u32;

        let mut final_words = Vec::with_capacity(ranked.len());

        for (term, weight) in ranked {
            let relative = (weight / max_weight) as f32;
            let mut font_size = min_font_size + font_range * relative;
            let roll: u32 = rng.generate_range(0..100);
            let rotated = roll >= horizontal_share;

            while font_size >= min_font_size {
                let glyphs = text::text_to_glyphs(term, &self.font, PxScale::from(font_size));
                let (word_width, word_height) = glyphs.extent(rotated);
                let rect = Rect {
                    width: word_width.saturating_add(settings.margin),
                    height: word_height.saturating_add(settings.margin),
                };

                if let Some(spot) = sat::find_space_for_rect(
                    &summed_area_table,
                    width,
                    height,
                    &rect,
                    &mut rng,
                ) {
                    let half_margin = settings.margin / 2;
                    let position = point((spot.x + half_margin) as f32, (spot.y + half_margin) as f32);
                    text::draw_glyphs_to_gray_buffer(
                        &mut occupancy,
                        &glyphs,
                        &self.font,
                        position,
                        rotated,
                    );
                    sat::to_summed_area_table(
                        &mut summed_area_table,
                        occupancy.as_raw(),
                        width as usize,
                        spot.y.saturating_sub(rect.height) as usize,
                    );

                    final_words.push(Word {
                        text: term,
                        font_size: PxScale::from(font_size),
                        glyphs,
                        rotated,
                        position,
                        frequency: weight as f32,
                        color: colormap.random_color(&mut rng),
                    });
                    break;
                }

                font_size = (font_size * Self::FONT_STEP).min(font_size - 1.0);
            }

            if font_size < min_font_size {
                tracing::debug!(term, "no room left, skipping");
            }
        }

        tracing::debug!(placed = final_words.len(), "layout finished");
        Ok(final_words)
    }

    /// Draws laid out words onto a canvas filled with the background color.
    pub fn render(&self, words: &[Word<'_>], settings: &Settings) -> Result<RgbaImage> {
        Self::check_canvas(settings)?;
        let background_color = color::parse_color(&settings.background_color)?;

        let mut final_image_buffer =
            RgbaImage::from_pixel(settings.width, settings.height, background_color);

        for word in words {
            text::draw_glyphs_to_rgba_buffer(
                &mut final_image_buffer,
                &word.glyphs,
                &self.font,
                word.position,
                word.rotated,
                word.color,
            )
        }

        Ok(final_image_buffer)
    }

    pub fn generate(&self, weights: &WeightMap, settings: &Settings) -> Result<RgbaImage> {
        let words = self.layout(weights, settings)?;
        self.render(&words, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::WordCloud;
    use crate::{Error, Settings};

    fn with_max_font(max_font_size: f32) -> Settings {
        Settings {
            width: 320,
            height: 200,
            max_font_size,
            ..Settings::default()
        }
    }

    #[test]
    fn canvas_accepts_defaults() {
        assert!(WordCloud::check_canvas(&Settings::default()).is_ok());
        assert!(WordCloud::check_canvas(&with_max_font(WordCloud::MAX_FONT_SIZE)).is_ok());
    }

    #[test]
    fn canvas_rejects_unusable_font_sizes() {
        for max_font_size in [3.0e9, f32::INFINITY, f32::NAN] {
            assert!(matches!(
                WordCloud::check_canvas(&with_max_font(max_font_size)),
                Err(Error::InvalidSetting { .. })
            ));
        }

        let settings = Settings {
            min_font_size: f32::NAN,
            ..Settings::default()
        };
        assert!(WordCloud::check_canvas(&settings).is_err());
    }

    #[test]
    fn canvas_rejects_empty_size() {
        let settings = Settings {
            width: 0,
            ..Settings::default()
        };
        assert!(WordCloud::check_canvas(&settings).is_err());
    }
}
