use std::str::FromStr;

use image::Rgba;
use nanorand::{Rng, WyRand};
use palette::{Hsl, IntoColor, Pixel, Srgb};

use crate::error::{Error, Result};

/// Word color schemes, named after the matplotlib colormaps they imitate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Viridis,
    Pastel1,
    Plasma,
    Set2,
    Coolwarm,
    Hot,
    Autumn,
    Rainbow,
}

const VIRIDIS: &[[u8; 3]] = &[
    [0x44, 0x01, 0x54],
    [0x3b, 0x52, 0x8b],
    [0x21, 0x91, 0x8c],
    [0x5e, 0xc9, 0x62],
    [0xfd, 0xe7, 0x25],
];
const PLASMA: &[[u8; 3]] = &[
    [0x0d, 0x08, 0x87],
    [0x7e, 0x03, 0xa8],
    [0xcc, 0x47, 0x78],
    [0xf8, 0x95, 0x40],
    [0xf0, 0xf9, 0x21],
];
const PASTEL1: &[[u8; 3]] = &[
    [0xfb, 0xb4, 0xae],
    [0xb3, 0xcd, 0xe3],
    [0xcc, 0xeb, 0xc5],
    [0xde, 0xcb, 0xe4],
    [0xfe, 0xd9, 0xa6],
    [0xff, 0xff, 0xcc],
    [0xe5, 0xd8, 0xbd],
    [0xfd, 0xda, 0xec],
    [0xf2, 0xf2, 0xf2],
];
const SET2: &[[u8; 3]] = &[
    [0x66, 0xc2, 0xa5],
    [0xfc, 0x8d, 0x62],
    [0x8d, 0xa0, 0xcb],
    [0xe7, 0x8a, 0xc3],
    [0xa6, 0xd8, 0x54],
    [0xff, 0xd9, 0x2f],
    [0xe5, 0xc4, 0x94],
    [0xb3, 0xb3, 0xb3],
];
const COOLWARM: &[[u8; 3]] = &[[0x3b, 0x4c, 0xc0], [0xdd, 0xdd, 0xdd], [0xb4, 0x04, 0x26]];
const HOT: &[[u8; 3]] = &[
    [0x0b, 0x00, 0x00],
    [0xff, 0x00, 0x00],
    [0xff, 0xff, 0x00],
    [0xff, 0xff, 0xff],
];
const AUTUMN: &[[u8; 3]] = &[[0xff, 0x00, 0x00], [0xff, 0xff, 0x00]];

impl Colormap {
    /// Color at position `t` in `[0, 1]`.
    pub fn sample(self, t: f32) -> Rgba<u8> {
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Viridis => interpolate(VIRIDIS, t),
            Colormap::Plasma => interpolate(PLASMA, t),
            Colormap::Coolwarm => interpolate(COOLWARM, t),
            Colormap::Hot => interpolate(HOT, t),
            Colormap::Autumn => interpolate(AUTUMN, t),
            Colormap::Pastel1 => discrete(PASTEL1, t),
            Colormap::Set2 => discrete(SET2, t),
            Colormap::Rainbow => {
                let col = Hsl::new(t * 300.0, 1.0, 0.5);
                let rgb: Srgb = col.into_color();

                let raw: [u8; 3] = rgb.into_format().into_raw();

                Rgba([raw[0], raw[1], raw[2], 255])
            }
        }
    }

    /// A random color from the map.
    pub fn random_color(self, rng: &mut WyRand) -> Rgba<u8> {
        let step: u8 = rng.generate_range(0..=255);
        self.sample(step as f32 / 255.0)
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "pastel1" => Ok(Colormap::Pastel1),
            "plasma" => Ok(Colormap::Plasma),
            "set2" => Ok(Colormap::Set2),
            "coolwarm" => Ok(Colormap::Coolwarm),
            "hot" => Ok(Colormap::Hot),
            "autumn" => Ok(Colormap::Autumn),
            "rainbow" => Ok(Colormap::Rainbow),
            _ => Err(Error::UnknownColormap(s.to_string())),
        }
    }
}

fn interpolate(stops: &[[u8; 3]], t: f32) -> Rgba<u8> {
    let position = t * (stops.len() - 1) as f32;
    let index = (position.floor() as usize).min(stops.len() - 2);
    let frac = position - index as f32;

    let (from, to) = (stops[index], stops[index + 1]);
    let channel = |i: usize| {
        let from = from[i] as f32 / 255.0;
        let to = to[i] as f32 / 255.0;
        from + (to - from) * frac
    };

    let rgb = Srgb::new(channel(0), channel(1), channel(2));
    let raw: [u8; 3] = rgb.into_format().into_raw();

    Rgba([raw[0], raw[1], raw[2], 255])
}

fn discrete(stops: &[[u8; 3]], t: f32) -> Rgba<u8> {
    let index = ((t * stops.len() as f32) as usize).min(stops.len() - 1);
    let [r, g, b] = stops[index];
    Rgba([r, g, b, 255])
}

/// Parses any CSS color (`#fff`, `white`, `rgb(0, 0, 0)`, ...).
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let color = csscolorparser::parse(value).map_err(|source| Error::InvalidColor {
        value: value.to_string(),
        source,
    })?;

    Ok(Rgba(color.to_rgba8()))
}

/// `#rrggbb` form used in SVG output.
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, _] = color.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use nanorand::WyRand;

    use super::{parse_color, to_hex, Colormap};

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!("Pastel1".parse::<Colormap>().unwrap(), Colormap::Pastel1);
        assert_eq!("plasma".parse::<Colormap>().unwrap(), Colormap::Plasma);
        assert!("jet".parse::<Colormap>().is_err());
    }

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(Colormap::Autumn.sample(0.0), Rgba([255, 0, 0, 255]));
        assert_eq!(Colormap::Autumn.sample(1.0), Rgba([255, 255, 0, 255]));
        assert_eq!(Colormap::Viridis.sample(0.0), Rgba([0x44, 0x01, 0x54, 255]));
        assert_eq!(Colormap::Set2.sample(1.0), Rgba([0xb3, 0xb3, 0xb3, 255]));
    }

    #[test]
    fn random_colors_are_reproducible() {
        let mut a = WyRand::new_seed(42);
        let mut b = WyRand::new_seed(42);
        for _ in 0..10 {
            assert_eq!(
                Colormap::Rainbow.random_color(&mut a),
                Colormap::Rainbow.random_color(&mut b)
            );
        }
    }

    #[test]
    fn css_colors() {
        assert_eq!(parse_color("#FFFFFF").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("black").unwrap(), Rgba([0, 0, 0, 255]));
        assert!(parse_color("not a color").is_err());
        assert_eq!(to_hex(Rgba([255, 128, 0, 255])), "#ff8000");
    }
}
