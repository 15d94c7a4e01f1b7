use tracing::debug;

use crate::buffer::BufferSnapshot;
use crate::config::GestureConfig;
use crate::gesture::Gesture;

pub fn detect_tap(snapshot: &BufferSnapshot, config: &GestureConfig) -> Option<Gesture> {
    if snapshot.moved {
        debug!("tap: fingers moved");
        return None;
    }
    if !snapshot.began {
        debug!("tap: no begin for every finger");
        return None;
    }
    if !snapshot.ended {
        debug!("tap: not every finger lifted");
        return None;
    }
    let duration_ms = snapshot.duration_ms?;
    if duration_ms > config.tap_hold_threshold_ms() {
        debug!(duration_ms, "tap: too long for a tap");
        return None;
    }

    debug!(fingers = snapshot.finger_count, "tap: detected");
    Some(Gesture::Tap {
        finger_count: snapshot.finger_count,
    })
}

/// Fires while the contact is still down as well, so timer ticks can repeat
/// it.
pub fn detect_hold(snapshot: &BufferSnapshot, config: &GestureConfig) -> Option<Gesture> {
    if snapshot.max_displacement_mm > config.jitter_threshold {
        debug!(
            displacement_mm = snapshot.max_displacement_mm,
            "hold: a finger drifted beyond jitter"
        );
        return None;
    }

    let duration_ms = snapshot.duration_ms?;
    if duration_ms <= config.tap_hold_threshold_ms() {
        debug!(duration_ms, "hold: too short for a hold");
        return None;
    }

    debug!(fingers = snapshot.finger_count, "hold: detected");
    Some(Gesture::Hold {
        finger_count: snapshot.finger_count,
    })
}
