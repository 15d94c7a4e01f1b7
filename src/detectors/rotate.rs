use tracing::debug;

use crate::buffer::BufferSnapshot;
use crate::config::GestureConfig;
use crate::geometry::{angle_between, angles_difference, center};
use crate::gesture::{Gesture, RotateDirection};
use crate::types::Point;

pub fn detect_rotate(snapshot: &BufferSnapshot, config: &GestureConfig) -> Option<Gesture> {
    if !snapshot.moved {
        debug!("rotate: no movement");
        return None;
    }
    if snapshot.movements.len() < 2 {
        debug!("rotate: fewer than two moving fingers");
        return None;
    }

    let origins: Vec<Point> = snapshot
        .movements
        .iter()
        .map(|(_, movement)| movement.first_position)
        .collect();
    let pivot = center(&origins)?;

    let mut reference_sign: Option<bool> = None;
    for (finger, movement) in &snapshot.movements {
        let begin = angle_between(pivot, movement.first_position);
        let end = angle_between(pivot, movement.last_position);
        let change = angles_difference(end, begin);
        if change.abs() <= config.angle_threshold {
            debug!(finger, change, "rotate: bearing barely changed");
            return None;
        }

        let decreasing = change < 0.0;
        match reference_sign {
            None => reference_sign = Some(decreasing),
            Some(expected) if expected != decreasing => {
                debug!(finger, begin, end, "rotate: finger turns the other way");
                return None;
            }
            Some(_) => {}
        }
    }

    let direction = if reference_sign? {
        RotateDirection::Clockwise
    } else {
        RotateDirection::Counterclockwise
    };
    debug!(
        fingers = snapshot.finger_count,
        direction = direction.as_str(),
        "rotate: detected"
    );
    Some(Gesture::Rotate {
        finger_count: snapshot.finger_count,
        direction,
    })
}
