use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, Point, PxScale, ScaleFont};
use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};

#[derive(Clone, Debug)]
pub struct GlyphData {
    pub glyphs: Vec<Glyph>,
    pub width: u32,
    pub height: u32,
    pub ascent: f32,
}

impl GlyphData {
    /// Size of the box the word covers, after rotation.
    pub fn extent(&self, rotated: bool) -> (u32, u32) {
        if rotated {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

//把文本转换为字体，方便画图
pub fn text_to_glyphs(text: &str, font: &FontVec, scale: PxScale) -> GlyphData {
    let scaled_font = font.as_scaled(scale);

    let mut glyphs: Vec<Glyph> = vec![];
    layout_paragraph(scaled_font, point(0.0, 0.0), text, &mut glyphs);

    let glyphs_height = scaled_font.height().ceil() as u32;
    let glyphs_width = match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => {
            let min_x = first.position.x;
            let max_x = last.position.x + scaled_font.h_advance(last.id);
            (max_x - min_x).ceil().max(0.0) as u32
        }
        _ => 0,
    };

    GlyphData {
        glyphs,
        width: glyphs_width,
        height: glyphs_height,
        ascent: scaled_font.ascent(),
    }
}

/// Calls `plot` for every covered pixel of the word placed at `origin`.
///
/// A rotated word is turned 90 degrees counter-clockwise, so it reads
/// bottom to top. Pixels outside `bounds` are skipped.
fn for_each_pixel(
    glyph_data: &GlyphData,
    font: &FontVec,
    origin: Point,
    rotated: bool,
    bounds: (u32, u32),
    mut plot: impl FnMut(u32, u32, f32),
) {
    let width = glyph_data.width as i64;

    for glyph in &glyph_data.glyphs {
        if let Some(outlined) = font.outline_glyph(glyph.clone()) {
            let px_bounds = outlined.px_bounds();

            outlined.draw(|x, y, v| {
                let local_x = px_bounds.min.x as i64 + x as i64;
                let local_y = px_bounds.min.y as i64 + y as i64;
                let (dx, dy) = if rotated {
                    (local_y, width - 1 - local_x)
                } else {
                    (local_x, local_y)
                };

                let final_x = origin.x as i64 + dx;
                let final_y = origin.y as i64 + dy;
                if final_x < 0
                    || final_y < 0
                    || final_x >= bounds.0 as i64
                    || final_y >= bounds.1 as i64
                {
                    return;
                }

                plot(final_x as u32, final_y as u32, v)
            })
        }
    }
}

pub fn draw_glyphs_to_gray_buffer(
    buffer: &mut GrayImage,
    glyph_data: &GlyphData,
    font: &FontVec,
    point: Point,
    rotated: bool,
) {
    let bounds = buffer.dimensions();
    for_each_pixel(glyph_data, font, point, rotated, bounds, |x, y, v| {
        if v > 0.0 {
            buffer.put_pixel(x, y, Luma([1]));
        }
    });
}

pub fn draw_glyphs_to_rgba_buffer(
    buffer: &mut RgbaImage,
    glyph_data: &GlyphData,
    font: &FontVec,
    point: Point,
    rotated: bool,
    pixel: Rgba<u8>,
) {
    let bounds = buffer.dimensions();
    for_each_pixel(glyph_data, font, point, rotated, bounds, |x, y, v| {
        let v = v.clamp(0.0, 1.0);
        let px = buffer.get_pixel_mut(x, y);
        px.apply2(&pixel, |old, new| {
            ((v * new as f32) + (1.0 - v) * old as f32) as u8
        });
    });
}

pub fn layout_paragraph<F, SF>(font: SF, position: Point, text: &str, target: &mut Vec<Glyph>)
where
    F: Font,
    SF: ScaleFont<F>,
{
    let v_advance = font.height() + font.line_gap();
    let mut caret = position + point(0.0, font.ascent());
    let mut last_glyph: Option<GlyphId> = None;
    for c in text.chars() {
        if c.is_control() {
            if c == '\n' {
                //进行换行
                caret = point(position.x, caret.y + v_advance);
            }
            continue;
        }

        let mut glyph = font.scaled_glyph(c);
        if let Some(previous) = last_glyph.take() {
            caret.x += font.kern(previous, glyph.id);
        }
        glyph.position = caret;
        last_glyph = Some(glyph.id);
        caret.x += font.h_advance(glyph.id);

        target.push(glyph);
    }
}
