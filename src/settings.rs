use std::{
    fmt, fs,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Svg => "SVG",
            ExportFormat::Pdf => "PDF",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Every knob of a word cloud run.
///
/// Only `min_frequency`, `scale` and `max_words` feed the frequency
/// pipeline. The rest is handed untouched to the renderer and exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    /// Any CSS color, e.g. `#FFFFFF` or `white`.
    pub background_color: String,
    pub colormap: String,
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub max_words: usize,
    pub scale: f64,
    pub min_frequency: f64,
    /// Share of words laid out horizontally, in `[0, 1]`.
    pub prefer_horizontal: f64,
    pub margin: u32,
    pub dpi: u32,
    pub format: ExportFormat,
    /// JPEG quality, 1..=100.
    pub quality: u8,
    pub font: Option<PathBuf>,
    pub random_state: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: 1000,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            colormap: "plasma".to_string(),
            min_font_size: 10.0,
            max_font_size: 200.0,
            max_words: 50,
            scale: 1.0,
            min_frequency: 0.0,
            prefer_horizontal: 0.8,
            margin: 2,
            dpi: 300,
            format: ExportFormat::Png,
            quality: 95,
            font: None,
            random_state: 42,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the values the frequency pipeline depends on.
    pub fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            return Err(Error::InvalidSetting {
                name: "max_words",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::InvalidSetting {
                name: "scale",
                reason: format!("must be a positive number, got {}", self.scale),
            });
        }
        if !(self.min_frequency.is_finite() && self.min_frequency >= 0.0) {
            return Err(Error::InvalidSetting {
                name: "min_frequency",
                reason: format!("must be zero or more, got {}", self.min_frequency),
            });
        }
        Ok(())
    }
}

// f32/f64 fields hash by bit pattern; this is only used for cache keys.
impl Hash for Settings {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.background_color.hash(state);
        self.colormap.hash(state);
        self.min_font_size.to_bits().hash(state);
        self.max_font_size.to_bits().hash(state);
        self.max_words.hash(state);
        self.scale.to_bits().hash(state);
        self.min_frequency.to_bits().hash(state);
        self.prefer_horizontal.to_bits().hash(state);
        self.margin.hash(state);
        self.dpi.hash(state);
        self.format.hash(state);
        self.quality.hash(state);
        self.font.hash(state);
        self.random_state.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::Path};

    use super::{ExportFormat, Settings};
    use crate::Error;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_pipeline_values() {
        let settings = Settings {
            max_words: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { name: "max_words", .. })
        ));

        let settings = Settings {
            scale: -1.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { name: "scale", .. })
        ));

        let settings = Settings {
            min_frequency: f64::NAN,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"width": 640, "colormap": "viridis", "format": "svg"}}"#).unwrap();

        let settings = Settings::from_json_file(file.path()).unwrap();
        assert_eq!(settings.width, 640);
        assert_eq!(settings.colormap, "viridis");
        assert_eq!(settings.format, ExportFormat::Svg);
        assert_eq!(settings.height, 600);
        assert_eq!(settings.max_words, 50);
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_words": 0}}"#).unwrap();
        assert!(Settings::from_json_file(file.path()).is_err());
    }

    #[test]
    fn format_names() {
        assert_eq!("JPG".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert_eq!(
            ExportFormat::from_path(Path::new("out/cloud.svg")),
            Some(ExportFormat::Svg)
        );
        assert_eq!(ExportFormat::from_path(Path::new("cloud")), None);
        assert!("gif".parse::<ExportFormat>().is_err());
    }
}
