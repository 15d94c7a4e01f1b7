use tracing::debug;

use crate::buffer::BufferSnapshot;
use crate::config::GestureConfig;
use crate::geometry::{angles_average, angles_difference};
use crate::gesture::{Gesture, SwipeDirection};

const SECTORS: [(f64, SwipeDirection); 4] = [
    (0.0, SwipeDirection::Right),
    (90.0, SwipeDirection::Down),
    (180.0, SwipeDirection::Left),
    (270.0, SwipeDirection::Up),
];

pub(crate) fn direction_for_angle(angle: f64, sector_width: f64) -> Option<SwipeDirection> {
    let half_width = sector_width / 2.0;
    SECTORS
        .iter()
        .find(|(center, _)| angles_difference(angle, *center).abs() <= half_width)
        .map(|(_, direction)| *direction)
}

pub fn detect_swipe(snapshot: &BufferSnapshot, config: &GestureConfig) -> Option<Gesture> {
    if !snapshot.moved {
        debug!("swipe: no movement");
        return None;
    }

    let angles: Vec<f64> = snapshot
        .movements
        .iter()
        .map(|(_, movement)| movement.angle)
        .collect();
    for (idx, a) in angles.iter().enumerate() {
        for b in &angles[idx + 1..] {
            if angles_difference(*a, *b).abs() > config.movement_angle_threshold {
                debug!(a, b, "swipe: fingers move in different directions");
                return None;
            }
        }
    }

    let average = angles_average(&angles)?;
    let Some(direction) = direction_for_angle(average, config.direction_angle_width) else {
        debug!(average, "swipe: angle outside every direction sector");
        return None;
    };

    debug!(
        fingers = snapshot.finger_count,
        direction = direction.as_str(),
        "swipe: detected"
    );
    Some(Gesture::Swipe {
        finger_count: snapshot.finger_count,
        direction,
    })
}
