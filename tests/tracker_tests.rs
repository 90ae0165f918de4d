//! Live tracker driven by real rendered frames

use image::{Rgb, RgbImage, imageops};
use qr_studio::{
    ECLevel, FrameDetector, LiveTracker, QrBuilder, RenderStyle, RqrrDetector, TrackerConfig,
    render_styled,
};
use std::time::{Duration, Instant};

const EXPIRY: Duration = Duration::from_secs(5);

/// A camera-sized frame with a rendered code pasted in the middle
fn frame_with_code(payload: &str) -> RgbImage {
    let matrix = QrBuilder::new(ECLevel::L).box_size(6).build(payload).unwrap();
    let code = render_styled(&matrix, &RenderStyle::default()).unwrap();
    let code = image::DynamicImage::ImageRgba8(code.image).to_rgb8();

    let mut frame = RgbImage::from_pixel(320, 240, Rgb([255, 255, 255]));
    let x = (320 - code.width() as i64) / 2;
    let y = (240 - code.height() as i64) / 2;
    imageops::overlay(&mut frame, &code, x, y);
    frame
}

fn empty_frame() -> RgbImage {
    RgbImage::from_pixel(320, 240, Rgb([255, 255, 255]))
}

fn tracker() -> LiveTracker<RqrrDetector> {
    LiveTracker::with_detector(RqrrDetector::new(), TrackerConfig { expiry: EXPIRY })
}

#[test]
fn detector_reads_pasted_code() {
    let detection = RqrrDetector::new().detect(&frame_with_code("frame payload"));
    assert_eq!(detection.payload.as_deref(), Some("frame payload"));
    assert_eq!(detection.polygon.len(), 4);
}

#[test]
fn payload_survives_short_gap_and_expires() {
    let mut tracker = tracker();
    let t0 = Instant::now();

    let report = tracker.process_frame(&mut frame_with_code("X marks"), t0);
    assert_eq!(report.current_payload.as_deref(), Some("X marks"));
    assert!(report.polygon.is_some());

    let report = tracker.process_frame(&mut empty_frame(), t0 + Duration::from_secs(1));
    assert_eq!(report.current_payload.as_deref(), Some("X marks"));
    assert!(report.polygon.is_none());

    let report = tracker.process_frame(&mut empty_frame(), t0 + Duration::from_secs(6));
    assert_eq!(report.current_payload, None);
    assert_eq!(tracker.current_payload(), None);
}

#[test]
fn newer_code_replaces_older() {
    let mut tracker = tracker();
    let t0 = Instant::now();
    tracker.process_frame(&mut frame_with_code("first"), t0);
    let report = tracker.process_frame(
        &mut frame_with_code("https://example.com/second"),
        t0 + Duration::from_millis(33),
    );
    assert_eq!(
        report.current_payload.as_deref(),
        Some("https://example.com/second")
    );
    assert!(report.is_url);
}

#[test]
fn decoded_frame_is_annotated() {
    let mut tracker = tracker();
    let mut frame = frame_with_code("annotate me");
    let before = frame.clone();
    tracker.process_frame(&mut frame, Instant::now());

    assert_ne!(frame, before);
    assert!(frame.pixels().any(|p| *p == Rgb([0, 255, 0])));
    assert!(frame.pixels().any(|p| *p == Rgb([255, 0, 255])));
}

#[test]
fn independent_sessions_do_not_share_state() {
    let mut a = tracker();
    let mut b = tracker();
    a.process_frame(&mut frame_with_code("session a"), Instant::now());
    b.process_frame(&mut empty_frame(), Instant::now());
    assert_eq!(a.current_payload(), Some("session a"));
    assert_eq!(b.current_payload(), None);
}
