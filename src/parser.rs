//! Adapter for `libinput debug-events` touch lines.
//!
//! ```text
//!  event4   TOUCH_DOWN     +0.000s   0 (0) 27.07/42.62 (68.39/71.37mm)
//!  event4   TOUCH_MOTION   +0.051s   1 (1) 26.84/53.27 (67.82/89.21mm)
//!  event4   TOUCH_UP       +0.220s   0 (0)
//! ```
//!
//! The offset after `+` is seconds since the device was opened. Lines that
//! are not touch events are skipped.

use regex::{Captures, Regex};
use tracing::debug;

use crate::config::{secs_to_ms, DEFAULT_SOURCE};
use crate::types::{FingerId, Point, TouchSample, TouchStatus};

pub struct DebugEventParser {
    positioned: Regex,
    lifted: Regex,
}

impl DebugEventParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            positioned: Regex::new(
                r"(TOUCH_DOWN|TOUCH_MOTION)\s+\+(\d+\.\d+)s\s+(\d+)\s+\(\d+\)\s+(\d+\.\d+)/(\d+\.\d+)\s+\((\d+\.\d+)/(\d+\.\d+)mm\)",
            )?,
            lifted: Regex::new(r"TOUCH_UP\s+\+(\d+\.\d+)s\s+(\d+)\s+\(\d+\)")?,
        })
    }

    /// Source tag attached to every sample this adapter produces.
    pub fn tag(&self) -> &'static str {
        DEFAULT_SOURCE
    }

    pub fn parse_line(&self, line: &str) -> Option<TouchSample> {
        if let Some(caps) = self.positioned.captures(line) {
            let status = match &caps[1] {
                "TOUCH_DOWN" => TouchStatus::Begin,
                _ => TouchStatus::Update,
            };
            let sample = TouchSample {
                finger: finger(&caps, 3)?,
                status,
                t_ms: offset_ms(&caps, 2)?,
                position_mm: Some(point(&caps, 6, 7)?),
                position_px: Some(point(&caps, 4, 5)?),
            };
            return Some(sample);
        }

        if let Some(caps) = self.lifted.captures(line) {
            return Some(TouchSample::end(finger(&caps, 2)?, offset_ms(&caps, 1)?));
        }

        if line.contains("TOUCH_") {
            debug!(line, "parser: unrecognized touch line");
        }
        None
    }
}

fn number(caps: &Captures<'_>, idx: usize) -> Option<f64> {
    caps.get(idx)?.as_str().parse().ok()
}

fn finger(caps: &Captures<'_>, idx: usize) -> Option<FingerId> {
    caps.get(idx)?.as_str().parse().ok()
}

fn offset_ms(caps: &Captures<'_>, idx: usize) -> Option<u64> {
    number(caps, idx).map(secs_to_ms)
}

fn point(caps: &Captures<'_>, x_idx: usize, y_idx: usize) -> Option<Point> {
    Some(Point::new(number(caps, x_idx)?, number(caps, y_idx)?))
}
