use super::detect::{FrameDetector, RqrrDetector};
use super::overlay::{draw_payload, draw_polygon};
use super::url::is_url;
use crate::config::tracker_expiry;
use crate::models::Point;
use image::RgbImage;
use std::time::{Duration, Instant};

/// Debounce state of a live session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackerState {
    /// No live payload
    #[default]
    Idle,
    /// `payload` was last decoded at `since`
    Locked {
        /// Decoded text
        payload: String,
        /// Time of the latest decode
        since: Instant,
    },
}

impl TrackerState {
    /// Next state after one frame.
    ///
    /// A decode always locks onto the new payload and restarts the timer,
    /// even when the payload is unchanged. Without a decode the lock holds
    /// until strictly more than `expiry` has elapsed.
    pub fn advance(self, decoded: Option<String>, now: Instant, expiry: Duration) -> Self {
        match (decoded, self) {
            (Some(payload), _) => TrackerState::Locked {
                payload,
                since: now,
            },
            (None, TrackerState::Locked { since, .. })
                if now.saturating_duration_since(since) > expiry =>
            {
                TrackerState::Idle
            }
            (None, state) => state,
        }
    }

    /// Locked payload, if any
    pub fn payload(&self) -> Option<&str> {
        match self {
            TrackerState::Idle => None,
            TrackerState::Locked { payload, .. } => Some(payload),
        }
    }
}

/// Tracker settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// How long a payload survives without being decoded again
    pub expiry: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            expiry: tracker_expiry(),
        }
    }
}

/// Per-frame summary returned by [`LiveTracker::process_frame`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Outline of the located code, if any
    pub polygon: Option<Vec<Point>>,
    /// Payload still within its expiry window
    pub current_payload: Option<String>,
    /// `current_payload` is a URL
    pub is_url: bool,
}

/// Annotates a stream of frames and remembers the last decoded payload.
pub struct LiveTracker<D = RqrrDetector> {
    detector: D,
    config: TrackerConfig,
    state: TrackerState,
}

impl LiveTracker<RqrrDetector> {
    /// rqrr detector with the default config
    pub fn new() -> Self {
        Self::with_detector(RqrrDetector::new(), TrackerConfig::default())
    }
}

impl Default for LiveTracker<RqrrDetector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: FrameDetector> LiveTracker<D> {
    /// Tracker over a custom detector
    pub fn with_detector(detector: D, config: TrackerConfig) -> Self {
        Self {
            detector,
            config,
            state: TrackerState::Idle,
        }
    }

    /// Active settings
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current debounce state
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Last payload that has not yet expired
    pub fn current_payload(&self) -> Option<&str> {
        self.state.payload()
    }

    /// Detect, annotate `frame` in place and advance the debounce state.
    pub fn process_frame(&mut self, frame: &mut RgbImage, now: Instant) -> FrameReport {
        let detection = self.detector.detect(frame);

        let polygon = (!detection.polygon.is_empty()).then_some(detection.polygon);
        if let Some(polygon) = &polygon {
            draw_polygon(frame, polygon);
        }
        if let Some(payload) = &detection.payload {
            draw_payload(frame, payload);
        }

        let had_payload = self.state.payload().is_some();
        let state = std::mem::take(&mut self.state);
        self.state = state.advance(detection.payload, now, self.config.expiry);
        match self.state.payload() {
            Some(payload) => tracing::trace!(payload, "tracker locked"),
            None if had_payload => tracing::debug!("tracked payload expired"),
            None => {}
        }

        let current_payload = self.state.payload().map(str::to_owned);
        FrameReport {
            polygon,
            is_url: current_payload.as_deref().is_some_and(is_url),
            current_payload,
        }
    }
}
