//! Rendering needs a real font, so these tests are ignored by default.
//! Run them with `cargo test -- --ignored` on a machine with a system font
//! installed.

use wcloud_studio::{export, parse, Error, ExportFormat, Settings, WeightMap, WordCloud};

fn cloud(settings: &Settings) -> WordCloud {
    match WordCloud::from_settings(settings) {
        Ok(cloud) => cloud,
        Err(Error::FontNotFound) => panic!("no system font found; set `font` to a .ttf file"),
        Err(err) => panic!("unexpected error: {err}"),
    }
}

fn small_settings() -> Settings {
    Settings {
        width: 320,
        height: 200,
        min_font_size: 6.0,
        max_font_size: 60.0,
        ..Settings::default()
    }
}

#[test]
#[ignore = "needs a system font"]
fn words_stay_on_canvas() {
    let settings = small_settings();
    let cloud = cloud(&settings);
    let weights = parse("alpha 10\nbeta 7\ngamma 5\ndelta 3\nepsilon 1");

    let words = cloud.layout(&weights, &settings).unwrap();
    assert!(!words.is_empty());
    assert_eq!(words[0].text, "alpha");

    for word in &words {
        let (w, h) = word.glyphs.extent(word.rotated);
        assert!(word.position.x as u32 + w <= settings.width);
        assert!(word.position.y as u32 + h <= settings.height);
        assert!(word.font_size.y >= settings.min_font_size);
    }
}

#[test]
#[ignore = "needs a system font"]
fn same_seed_same_layout() {
    let settings = small_settings();
    let cloud = cloud(&settings);
    let weights = parse("one 3\ntwo 2\nthree 1");

    let positions = |cloud: &WordCloud| -> Vec<(String, f32, f32, bool)> {
        cloud
            .layout(&weights, &settings)
            .unwrap()
            .iter()
            .map(|w| (w.text.to_string(), w.position.x, w.position.y, w.rotated))
            .collect()
    };
    assert_eq!(positions(&cloud), positions(&cloud));
}

#[test]
#[ignore = "needs a system font"]
fn renders_and_exports() {
    let settings = Settings {
        format: ExportFormat::Png,
        ..small_settings()
    };
    let cloud = cloud(&settings);
    let weights = parse("cloud 5\nrain 2");

    let words = cloud.layout(&weights, &settings).unwrap();
    let image = cloud.render(&words, &settings).unwrap();
    assert_eq!(image.dimensions(), (320, 200));

    let png = export::encode(&words, &image, &settings).unwrap();
    assert_eq!(&png[1..4], b"PNG");

    let svg_settings = Settings {
        format: ExportFormat::Svg,
        ..settings
    };
    let svg = export::encode(&words, &image, &svg_settings).unwrap();
    let svg = String::from_utf8(svg).unwrap();
    assert_eq!(svg.matches("<text ").count(), words.len());
}

#[test]
#[ignore = "needs a system font"]
fn layout_rejects_bad_input() {
    let settings = small_settings();
    let cloud = cloud(&settings);

    assert!(matches!(
        cloud.layout(&WeightMap::new(), &settings),
        Err(Error::NothingRecognized)
    ));

    let unknown = Settings {
        colormap: "jet".to_string(),
        ..small_settings()
    };
    assert!(matches!(
        cloud.layout(&parse("a 1"), &unknown),
        Err(Error::UnknownColormap(_))
    ));
}

#[test]
#[ignore = "needs a system font"]
fn oversized_font_is_rejected() {
    let settings = Settings {
        max_font_size: 3.0e9,
        ..small_settings()
    };
    let cloud = cloud(&small_settings());

    assert!(matches!(
        cloud.layout(&parse("alphabet 10\nbeta 1"), &settings),
        Err(Error::InvalidSetting { .. })
    ));
}

#[test]
#[ignore = "needs a system font"]
fn huge_margin_places_nothing() {
    let settings = Settings {
        margin: u32::MAX,
        ..small_settings()
    };
    let cloud = cloud(&settings);

    let parsed = parse("alphabet 10\nbeta 1");
    let words = cloud.layout(&parsed, &settings).unwrap();
    assert!(words.is_empty());
}
