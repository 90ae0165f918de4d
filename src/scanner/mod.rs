//! Reading QR codes back: still images and live frame streams
//!
//! - `detect`: the frame detector seam and the still-image decoder
//! - `tracker`: per-session debounce over a stream of frames
//! - `overlay`: outline and text annotations drawn onto frames

/// Frame detection and still-image decoding
pub mod detect;
/// Outline and text drawing
pub mod overlay;
/// Live session state
pub mod tracker;
/// URL shape check
pub mod url;

pub use detect::{DecodeOutcome, Detection, FrameDetector, RqrrDetector, decode_image};
pub use tracker::{FrameReport, LiveTracker, TrackerConfig, TrackerState};
pub use url::is_url;
