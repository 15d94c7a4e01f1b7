use tracing::debug;

use crate::config::GestureConfig;
use crate::geometry::{distance, distance_from_line, normalize_angle};
use crate::types::{FingerId, Point, TouchSample};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementThresholds {
    /// Endpoint offset below which a trajectory counts as axis-aligned.
    pub axis_mm: f64,
    /// Step size and lateral drift treated as noise.
    pub jitter_mm: f64,
}

impl MovementThresholds {
    pub fn from_config(config: &GestureConfig) -> Self {
        Self {
            axis_mm: config.axis_threshold,
            jitter_mm: config.jitter_threshold,
        }
    }
}

impl Default for MovementThresholds {
    fn default() -> Self {
        Self::from_config(&GestureConfig::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FingerMovement {
    pub first_position: Point,
    pub last_position: Point,
    pub distance: f64,
    /// Bearing of the movement in `[0, 360)`.
    pub angle: f64,
}

#[derive(Clone, Copy, Debug)]
enum Orientation {
    Vertical { direction: i8, axis_x: f64 },
    Horizontal { direction: i8, axis_y: f64 },
    Diagonal {
        slope: f64,
        intercept: f64,
        direction_x: i8,
        direction_y: i8,
    },
}

fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn classify(first: Point, last: Point, axis_mm: f64) -> Orientation {
    let dx = last.x - first.x;
    let dy = last.y - first.y;
    if dx.abs() < axis_mm {
        Orientation::Vertical {
            direction: sign(dy),
            axis_x: (first.x + last.x) / 2.0,
        }
    } else if dy.abs() < axis_mm {
        Orientation::Horizontal {
            direction: sign(dx),
            axis_y: (first.y + last.y) / 2.0,
        }
    } else {
        let slope = dy / dx;
        Orientation::Diagonal {
            slope,
            intercept: first.y - slope * first.x,
            direction_x: sign(dx),
            direction_y: sign(dy),
        }
    }
}

/// Whether `point`, reached by a non-jitter step `delta` from the previous
/// accepted point, continues the trajectory.
fn step_consistent(orientation: Orientation, point: Point, delta: Point, jitter_mm: f64) -> bool {
    let jitter_x = delta.x.abs() < jitter_mm;
    let jitter_y = delta.y.abs() < jitter_mm;
    match orientation {
        Orientation::Vertical { direction, axis_x } => {
            (jitter_y || sign(delta.y) == direction) && (point.x - axis_x).abs() < jitter_mm
        }
        Orientation::Horizontal { direction, axis_y } => {
            (jitter_x || sign(delta.x) == direction) && (point.y - axis_y).abs() < jitter_mm
        }
        Orientation::Diagonal {
            slope,
            intercept,
            direction_x,
            direction_y,
        } => {
            (jitter_x || sign(delta.x) == direction_x)
                && (jitter_y || sign(delta.y) == direction_y)
                && distance_from_line(point, slope, intercept) < jitter_mm
        }
    }
}

fn orientation_angle(orientation: Orientation, first: Point, last: Point) -> f64 {
    match orientation {
        Orientation::Vertical { direction, .. } => {
            if direction >= 0 {
                90.0
            } else {
                270.0
            }
        }
        Orientation::Horizontal { direction, .. } => {
            if direction >= 0 {
                0.0
            } else {
                180.0
            }
        }
        Orientation::Diagonal { slope, .. } => {
            // atan only covers (-90, 90); moving left puts the bearing in the
            // opposite half-plane.
            let base = slope.atan().to_degrees();
            if last.x < first.x {
                normalize_angle(base + 180.0)
            } else {
                normalize_angle(base)
            }
        }
    }
}

pub(super) fn track_movement(
    finger: FingerId,
    samples: &[TouchSample],
    thresholds: &MovementThresholds,
) -> Option<FingerMovement> {
    let mut positions = samples.iter().filter_map(|sample| sample.position_mm);
    let first = positions.next()?;
    let last = positions.last()?;

    let net = distance(first, last);
    if net < thresholds.jitter_mm {
        return None;
    }

    let orientation = classify(first, last, thresholds.axis_mm);
    let mut prev = first;
    for point in samples.iter().filter_map(|sample| sample.position_mm) {
        let delta = point - prev;
        if delta.x.abs() < thresholds.jitter_mm && delta.y.abs() < thresholds.jitter_mm {
            continue;
        }
        if !step_consistent(orientation, point, delta, thresholds.jitter_mm) {
            debug!(
                finger,
                x = point.x,
                y = point.y,
                "touch: interrupted movement, ignoring finger trajectory"
            );
            return None;
        }
        prev = point;
    }

    Some(FingerMovement {
        first_position: first,
        last_position: last,
        distance: net,
        angle: orientation_angle(orientation, first, last),
    })
}
