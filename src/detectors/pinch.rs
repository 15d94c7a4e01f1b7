use tracing::debug;

use crate::buffer::BufferSnapshot;
use crate::config::GestureConfig;
use crate::geometry::distance;
use crate::gesture::{Gesture, PinchDirection};

pub fn detect_pinch(snapshot: &BufferSnapshot, config: &GestureConfig) -> Option<Gesture> {
    if !snapshot.moved {
        debug!("pinch: no movement");
        return None;
    }
    if snapshot.movements.len() < 2 {
        debug!("pinch: fewer than two moving fingers");
        return None;
    }

    let mut shrinking: Option<bool> = None;
    for (idx, (finger_a, a)) in snapshot.movements.iter().enumerate() {
        for (finger_b, b) in &snapshot.movements[idx + 1..] {
            let begin = distance(a.first_position, b.first_position);
            let end = distance(a.last_position, b.last_position);
            let delta = end - begin;
            if delta.abs() <= config.jitter_threshold {
                debug!(
                    finger_a,
                    finger_b, delta, "pinch: finger distance barely changed"
                );
                return None;
            }

            let pair_shrinking = delta < 0.0;
            match shrinking {
                None => shrinking = Some(pair_shrinking),
                Some(expected) if expected != pair_shrinking => {
                    debug!(finger_a, finger_b, "pinch: finger pairs disagree on direction");
                    return None;
                }
                Some(_) => {}
            }
        }
    }

    let direction = if shrinking? {
        PinchDirection::In
    } else {
        PinchDirection::Out
    };
    debug!(
        fingers = snapshot.finger_count,
        direction = direction.as_str(),
        "pinch: detected"
    );
    Some(Gesture::Pinch {
        finger_count: snapshot.finger_count,
        direction,
    })
}
