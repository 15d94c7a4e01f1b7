//! Plane geometry over millimeter positions.
//!
//! Angles are degrees. Bearings follow `atan2(dy, dx)` on panel coordinates
//! and are wrapped into `[0, 360)`.

use crate::types::Point;

impl core::ops::Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::ops::Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let delta = b - a;
    delta.x.hypot(delta.y)
}

/// Wraps any finite angle into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid may round up to the modulus for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn angle_between(base: Point, other: Point) -> f64 {
    let delta = other - base;
    normalize_angle(delta.y.atan2(delta.x).to_degrees())
}

/// Signed shortest rotation from `b` to `a`, in `[-180, 180]`.
pub fn angles_difference(a: f64, b: f64) -> f64 {
    let mut delta = normalize_angle(a) - normalize_angle(b);
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

/// Circular mean. Returns `None` for an empty input or when the unit vectors
/// cancel out and no direction is defined.
pub fn angles_average(angles: &[f64]) -> Option<f64> {
    if angles.is_empty() {
        return None;
    }

    let (sum_x, sum_y) = angles.iter().fold((0.0f64, 0.0f64), |(x, y), angle| {
        let radians = angle.to_radians();
        (x + radians.cos(), y + radians.sin())
    });
    if sum_x.hypot(sum_y) < f64::EPSILON * angles.len() as f64 {
        return None;
    }

    Some(normalize_angle(sum_y.atan2(sum_x).to_degrees()))
}

pub fn center(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Point::default(), |acc, point| acc + *point);
    let count = points.len() as f64;
    Some(Point::new(sum.x / count, sum.y / count))
}

/// Perpendicular distance from `point` to the line `y = slope * x + intercept`.
pub fn distance_from_line(point: Point, slope: f64, intercept: f64) -> f64 {
    (slope * point.x + intercept - point.y).abs() / (slope * slope + 1.0).sqrt()
}
