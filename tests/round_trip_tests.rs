//! End-to-end tests: encode, render, export, then read back with the
//! crate's own still-image decoder.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
use qr_studio::{
    ECLevel, EmbedOptions, EncodeMode, EncodeRequest, ModuleShape, QrBuilder, RenderStyle,
    decode_image, encode, is_finder_region, render_embedded, render_styled, to_png,
};

fn styled_png(payload: &str, box_size: u32) -> Vec<u8> {
    styled_png_with(payload, ECLevel::L, ModuleShape::Square, box_size)
}

fn styled_png_with(payload: &str, level: ECLevel, shape: ModuleShape, box_size: u32) -> Vec<u8> {
    let matrix = QrBuilder::new(level)
        .box_size(box_size)
        .build(payload)
        .expect("payload fits");
    let render = render_styled(&matrix, &RenderStyle::new(shape, [0, 0, 0])).expect("render");
    to_png(&render.image).expect("png")
}

#[test]
fn square_styled_round_trip() {
    let payloads = [
        "hello",
        "0123456789012345",
        "HELLO WORLD $%*+-./:",
        "https://example.com/path?q=1&r=2",
        "Mixed Case text, with punctuation!",
    ];
    for payload in payloads {
        let outcome = decode_image(&styled_png(payload, 8)).expect("decodable png");
        assert!(outcome.found, "no code found for {payload:?}");
        assert_eq!(outcome.payload.as_deref(), Some(payload));
    }
}

#[test]
fn every_level_and_shape_round_trips() {
    let shapes = [
        ModuleShape::Circle,
        ModuleShape::Square,
        ModuleShape::Rounded,
        ModuleShape::GappedSquare,
    ];
    let text = "Level and shape sweep, with lower case and punctuation! ".repeat(4);
    let mut reached_version_7 = false;
    for level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
        for len in [5, 60, 200] {
            let payload = &text[..len];
            let version = QrBuilder::new(level).build(payload).unwrap().version();
            reached_version_7 |= version >= 7;
            for shape in shapes {
                let outcome = decode_image(&styled_png_with(payload, level, shape, 6))
                    .expect("decodable png");
                assert_eq!(
                    outcome.payload.as_deref(),
                    Some(payload),
                    "level {level}, shape {shape}, {len} bytes, version {version}"
                );
            }
        }
    }
    assert!(reached_version_7);
}

#[test]
fn longer_payload_round_trip() {
    let payload = "The quick brown fox jumps over the lazy dog. ".repeat(4);
    let outcome = decode_image(&styled_png(&payload, 6)).expect("decodable png");
    assert_eq!(outcome.payload.as_deref(), Some(payload.as_str()));
}

#[test]
fn url_flag_follows_payload() {
    let outcome = decode_image(&styled_png("https://example.com", 8)).unwrap();
    assert!(outcome.is_url);
    let outcome = decode_image(&styled_png("example.com", 8)).unwrap();
    assert!(outcome.found);
    assert!(!outcome.is_url);
}

#[test]
fn colored_code_over_light_background_round_trip() {
    let background = RgbaImage::from_pixel(50, 50, Rgba([230, 230, 200, 255]));
    let bg_png = to_png(&background).unwrap();
    let matrix = QrBuilder::new(ECLevel::L)
        .box_size(8)
        .build("over a background")
        .unwrap();
    let style = RenderStyle::new(ModuleShape::Square, [20, 40, 120]).with_background(bg_png);
    let render = render_styled(&matrix, &style).unwrap();
    assert!(render.warning.is_none());
    assert!(render.image.pixels().all(|p| p[3] == 255));

    let outcome = decode_image(&to_png(&render.image).unwrap()).unwrap();
    assert_eq!(outcome.payload.as_deref(), Some("over a background"));
}

#[test]
fn dark_background_warns_but_renders() {
    let background = RgbaImage::from_pixel(16, 16, Rgba([10, 10, 10, 255]));
    let request = EncodeRequest {
        payload: "low contrast".to_string(),
        mode: EncodeMode::Styled(
            RenderStyle::default().with_background(to_png(&background).unwrap()),
        ),
    };
    let response = encode(&request).unwrap();
    let warning = response.warning.expect("contrast warning");
    assert!(warning.contrast() < 50.0);
    assert!(!response.png.is_empty());
}

#[test]
fn embedded_finder_blocks_black_for_any_image() {
    let sources = [
        RgbImage::from_pixel(10, 10, Rgb([255, 255, 255])),
        RgbImage::from_fn(64, 48, |x, y| Rgb([(x * 4) as u8, (y * 5) as u8, 200])),
    ];
    for source in sources {
        let bytes = to_png(&source).unwrap();
        let options = EmbedOptions::default();
        let out = render_embedded("finder check", &bytes, &options).unwrap();

        let b = options.box_size;
        let side = out.width() / b;
        let size = side as usize - 8;
        for my in 0..size {
            for mx in 0..size {
                if !is_finder_region(mx, my, size) {
                    continue;
                }
                let px = out.get_pixel((mx as u32 + 4) * b, (my as u32 + 4) * b);
                assert!(
                    px.0 == [0, 0, 0] || px.0 == [255, 255, 255],
                    "finder module ({mx}, {my}) is {:?}",
                    px
                );
            }
        }
        // Top-left finder corner is always on
        assert_eq!(out.get_pixel(4 * b, 4 * b).0, [0, 0, 0]);
    }
}

#[test]
fn embedded_with_uniform_image_decodes() {
    let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([120, 120, 120])));
    let options = EmbedOptions {
        box_size: 8,
        ..EmbedOptions::default()
    };
    let out = qr_studio::render::render_embedded_image("embedded payload", &source, &options)
        .unwrap();
    let (w, h) = out.dimensions();
    assert_eq!(w, h);

    let outcome = decode_image(&to_png(&out).unwrap()).unwrap();
    assert_eq!(outcome.payload.as_deref(), Some("embedded payload"));
}

#[test]
fn styled_png_dimensions() {
    let png = styled_png("size check", 4);
    let image = image::load_from_memory(&png).unwrap();
    assert_eq!(image.dimensions(), (116, 116));
}
