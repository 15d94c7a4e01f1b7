//! Stateless gesture predicates over a [`BufferSnapshot`].
//!
//! Detectors run in a fixed priority order and the first match wins, so the
//! stricter stationary patterns are tried before movement-based ones.

use tracing::debug;

use crate::buffer::BufferSnapshot;
use crate::config::GestureConfig;
use crate::gesture::Gesture;

mod pinch;
mod rotate;
mod swipe;
mod tap_hold;

pub use pinch::detect_pinch;
pub use rotate::detect_rotate;
pub use swipe::detect_swipe;
pub use tap_hold::{detect_hold, detect_tap};

pub type DetectFn = fn(&BufferSnapshot, &GestureConfig) -> Option<Gesture>;

pub const DETECTORS: [(&str, DetectFn); 5] = [
    ("tap", detect_tap),
    ("hold", detect_hold),
    ("swipe", detect_swipe),
    ("pinch", detect_pinch),
    ("rotate", detect_rotate),
];

pub fn detect(snapshot: &BufferSnapshot, config: &GestureConfig) -> Option<Gesture> {
    DETECTORS.iter().find_map(|(name, detect_fn)| {
        let gesture = detect_fn(snapshot, config)?;
        debug!(detector = *name, %gesture, "gesture: detected");
        Some(gesture)
    })
}
