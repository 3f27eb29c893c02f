//! Error types for wcloud_studio.

use std::path::PathBuf;

use crate::settings::ExportFormat;

/// Errors surfaced to the caller of the pipeline, renderer or exporter.
///
/// Malformed input *content* never produces one of these from the core
/// stages; see [`crate::parser::ParseIssue`] for per-line problems.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Parsing or tokenizing produced an empty map.
    #[error("could not recognize any terms in the input")]
    NothingRecognized,

    /// Every term fell below the minimum frequency.
    #[error("no terms with frequency at or above {0}")]
    NothingAboveThreshold(f64),

    /// A setting is outside its allowed range.
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        /// Name of the offending field.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    #[error("unknown colormap `{0}`")]
    UnknownColormap(String),

    #[error("invalid color `{value}`")]
    InvalidColor {
        value: String,
        #[source]
        source: csscolorparser::ParseColorError,
    },

    #[error("unknown export format `{0}`")]
    UnknownFormat(String),

    #[error("export format {0} is not supported")]
    UnsupportedFormat(ExportFormat),

    /// No font path was given and none of the known system fonts exist.
    #[error("no usable font found, pass one explicitly")]
    FontNotFound,

    #[error("font file {} is not a valid font", .path.display())]
    InvalidFont { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for wcloud_studio operations.
pub type Result<T> = std::result::Result<T, Error>;
