//! Encoding rendered clouds into files.
//!
//! PNG and JPEG come from the raster image. SVG is written from the word
//! layout instead, so it stays scalable. `dpi` is not embedded in any
//! format.

use image::{
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    ColorType, DynamicImage, ImageEncoder, RgbaImage,
};

use crate::{
    color,
    error::{Error, Result},
    settings::{ExportFormat, Settings},
    Word,
};

/// Encodes the cloud in `settings.format`.
pub fn encode(words: &[Word<'_>], image: &RgbaImage, settings: &Settings) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();

    match settings.format {
        ExportFormat::Png => {
            PngEncoder::new(&mut buffer).write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ColorType::Rgba8,
            )?;
        }
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let quality = settings.quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ColorType::Rgb8,
            )?;
        }
        ExportFormat::Svg => buffer = to_svg(words, settings)?.into_bytes(),
        format @ ExportFormat::Pdf => return Err(Error::UnsupportedFormat(format)),
    }

    Ok(buffer)
}

/// Writes the layout as an SVG document with one `<text>` per word.
pub fn to_svg(words: &[Word<'_>], settings: &Settings) -> Result<String> {
    let background = color::parse_color(&settings.background_color)?;
    let family = settings
        .font
        .as_deref()
        .and_then(|path| path.file_stem())
        .and_then(|stem| stem.to_str())
        .map(escape)
        .unwrap_or_else(|| "sans-serif".to_string());
    let (width, height) = (settings.width, settings.height);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\n"
    );
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        color::to_hex(background)
    ));

    for word in words {
        let (x, y) = (word.position.x, word.position.y);
        // rotated words turn counter-clockwise around their box
        let transform = if word.rotated {
            format!("translate({x} {}) rotate(-90)", y + word.glyphs.width as f32)
        } else {
            format!("translate({x} {y})")
        };

        svg.push_str(&format!(
            "<text transform=\"{transform}\" y=\"{:.2}\" font-family=\"{family}\" \
             font-size=\"{:.2}\" fill=\"{}\">{}</text>\n",
            word.glyphs.ascent,
            word.font_size.y,
            color::to_hex(word.color),
            escape(word.text),
        ));
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
