use tracing::{debug, warn};

use crate::config::GestureConfig;
use crate::geometry::distance;
use crate::types::{FingerId, TouchSample, TouchStatus};

mod movement;

pub use movement::{FingerMovement, MovementThresholds};

/// Samples of one finger in arrival order. At most one `end` sample, and
/// only in last position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FingerTrack {
    samples: Vec<TouchSample>,
}

impl FingerTrack {
    fn starting_with(sample: TouchSample) -> Self {
        Self {
            samples: vec![sample],
        }
    }

    pub fn samples(&self) -> &[TouchSample] {
        &self.samples
    }

    pub fn first(&self) -> Option<&TouchSample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TouchSample> {
        self.samples.last()
    }

    pub fn is_ended(&self) -> bool {
        self.last()
            .is_some_and(|sample| sample.status == TouchStatus::End)
    }

    pub fn is_began(&self) -> bool {
        self.first()
            .is_some_and(|sample| sample.status == TouchStatus::Begin)
    }
}

/// Per-finger sample window of the current gesture candidate.
///
/// Tracks iterate in first-seen order. Derived state is never cached on the
/// buffer itself: [`TouchEventBuffer::snapshot`] computes it once per tick,
/// so a mutation can never be observed through stale values.
#[derive(Clone, Debug)]
pub struct TouchEventBuffer {
    source: String,
    keep_ms: u64,
    thresholds: MovementThresholds,
    tracks: Vec<(FingerId, FingerTrack)>,
}

/// Derived buffer state for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BufferSnapshot {
    pub now_ms: u64,
    pub finger_count: u8,
    pub began: bool,
    pub ended: bool,
    pub begin_time_ms: Option<u64>,
    pub end_time_ms: Option<u64>,
    pub duration_ms: Option<u64>,
    pub movements: Vec<(FingerId, FingerMovement)>,
    pub moved: bool,
    /// Largest first-to-last positioned distance of any finger, filtered
    /// movement or not.
    pub max_displacement_mm: f64,
}

impl BufferSnapshot {
    pub fn movement(&self, finger: FingerId) -> Option<&FingerMovement> {
        self.movements
            .iter()
            .find(|(id, _)| *id == finger)
            .map(|(_, movement)| movement)
    }
}

impl TouchEventBuffer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            source: config.source.clone(),
            keep_ms: config.keep_ms(),
            thresholds: MovementThresholds::from_config(config),
            tracks: Vec::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Appends `sample` to its finger's track. Samples from another source
    /// are ignored. Returns whether the buffer changed.
    ///
    /// A `begin` for a finger that is already tracked, or any sample after
    /// that finger's `end`, discards the finger's track; a `begin` then
    /// starts a fresh track in the same slot.
    pub fn buffer(&mut self, source: &str, sample: TouchSample) -> bool {
        if source != self.source {
            return false;
        }

        let Some(idx) = self.tracks.iter().position(|(id, _)| *id == sample.finger) else {
            self.tracks
                .push((sample.finger, FingerTrack::starting_with(sample)));
            return true;
        };

        let track = &mut self.tracks[idx].1;
        let inconsistent = track.is_ended() || sample.status == TouchStatus::Begin;
        if !inconsistent {
            track.samples.push(sample);
            return true;
        }

        warn!(
            finger = sample.finger,
            status = sample.status.as_str(),
            t_ms = sample.t_ms,
            "touch: inconsistent sample sequence, discarding finger track"
        );
        if sample.status == TouchStatus::Begin {
            *track = FingerTrack::starting_with(sample);
        } else {
            self.tracks.remove(idx);
        }
        true
    }

    /// Drops the whole window once every finger has lifted; otherwise drops
    /// samples older than the retention window and any track left empty.
    pub fn clear_expired(&mut self, now_ms: u64) {
        if self.ended() {
            debug!(fingers = self.tracks.len(), "touch: clearing ended gesture");
            self.clear();
            return;
        }

        let keep_ms = self.keep_ms;
        for (_, track) in &mut self.tracks {
            track
                .samples
                .retain(|sample| now_ms.saturating_sub(sample.t_ms) < keep_ms);
        }
        self.tracks.retain(|(_, track)| !track.samples.is_empty());
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> impl Iterator<Item = (FingerId, &FingerTrack)> {
        self.tracks.iter().map(|(id, track)| (*id, track))
    }

    pub fn track(&self, finger: FingerId) -> Option<&FingerTrack> {
        self.tracks
            .iter()
            .find(|(id, _)| *id == finger)
            .map(|(_, track)| track)
    }

    pub fn finger_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn began(&self) -> bool {
        !self.tracks.is_empty() && self.tracks.iter().all(|(_, track)| track.is_began())
    }

    pub fn ended(&self) -> bool {
        !self.tracks.is_empty() && self.tracks.iter().all(|(_, track)| track.is_ended())
    }

    pub fn begin_time_ms(&self) -> Option<u64> {
        self.tracks
            .iter()
            .filter_map(|(_, track)| track.first().map(|sample| sample.t_ms))
            .min()
    }

    pub fn end_time_ms(&self) -> Option<u64> {
        self.tracks
            .iter()
            .filter_map(|(_, track)| track.last().map(|sample| sample.t_ms))
            .max()
    }

    /// Gesture length so far: up to the last lift when ended, else up to
    /// `now_ms`.
    pub fn duration_ms(&self, now_ms: u64) -> Option<u64> {
        let begin = self.begin_time_ms()?;
        let end = if self.ended() {
            self.end_time_ms()?
        } else {
            now_ms
        };
        Some(end.saturating_sub(begin))
    }

    /// Straight, uninterrupted movements longer than the jitter threshold,
    /// keyed by finger in first-seen order.
    pub fn finger_movements(&self) -> Vec<(FingerId, FingerMovement)> {
        self.tracks
            .iter()
            .filter_map(|(id, track)| {
                movement::track_movement(*id, track.samples(), &self.thresholds)
                    .map(|movement| (*id, movement))
            })
            .collect()
    }

    /// Straight-line distance between the first and last positioned sample
    /// of each finger, ignoring whatever happened in between. Zero for an
    /// empty buffer or fingers with a single position.
    pub fn max_displacement_mm(&self) -> f64 {
        self.tracks
            .iter()
            .filter_map(|(_, track)| {
                let mut positions = track.samples().iter().filter_map(|s| s.position_mm);
                let first = positions.next()?;
                let last = positions.last().unwrap_or(first);
                Some(distance(first, last))
            })
            .fold(0.0, f64::max)
    }

    pub fn moved(&self) -> bool {
        Self::all_fingers_moved(self.tracks.len(), &self.finger_movements())
    }

    fn all_fingers_moved(finger_count: usize, movements: &[(FingerId, FingerMovement)]) -> bool {
        !movements.is_empty() && movements.len() == finger_count
    }

    pub fn snapshot(&self, now_ms: u64) -> BufferSnapshot {
        let movements = self.finger_movements();
        let moved = Self::all_fingers_moved(self.tracks.len(), &movements);
        BufferSnapshot {
            now_ms,
            finger_count: u8::try_from(self.tracks.len()).unwrap_or(u8::MAX),
            began: self.began(),
            ended: self.ended(),
            begin_time_ms: self.begin_time_ms(),
            end_time_ms: self.end_time_ms(),
            duration_ms: self.duration_ms(now_ms),
            movements,
            moved,
            max_displacement_mm: self.max_displacement_mm(),
        }
    }
}
