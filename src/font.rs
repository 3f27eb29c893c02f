use std::{
    fs,
    path::{Path, PathBuf},
};

use ab_glyph::FontVec;

use crate::error::{Error, Result};

/// Tried in order when no font is configured.
pub const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// The configured font if any, otherwise the first system font that exists.
pub fn resolve_font(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!(path = %path.display(), "configured font does not exist");
        return Err(Error::FontNotFound);
    }

    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
        .ok_or(Error::FontNotFound)
}

pub fn load_font(path: &Path) -> Result<FontVec> {
    let font_file = fs::read(path)?;

    FontVec::try_from_vec(font_file).map_err(|_| Error::InvalidFont {
        path: path.to_path_buf(),
    })
}
