//! Line-stream driver shared by replay and listen modes.
//!
//! Touch samples arrive irregularly, so the driver synthesizes the periodic
//! timer ticks the recognizer relies on for Hold and expiry: every multiple
//! of the timer interval that falls strictly between two delivered ticks is
//! delivered as a timer tick first.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::config::GestureConfig;
use crate::gesture::LifecycleEvent;
use crate::parser::DebugEventParser;
use crate::recognizer::{GestureRecognizer, TickEvents};
use crate::types::TouchSample;

pub struct Driver {
    recognizer: GestureRecognizer,
    parser: DebugEventParser,
    interval_ms: u64,
    last_tick_ms: Option<u64>,
    events: Vec<LifecycleEvent>,
}

impl Driver {
    pub fn new(config: GestureConfig) -> Result<Self, regex::Error> {
        let interval_ms = config.timer_interval_ms();
        Ok(Self {
            recognizer: GestureRecognizer::new(config),
            parser: DebugEventParser::new()?,
            interval_ms,
            last_tick_ms: None,
            events: Vec::new(),
        })
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_tick_ms(&self) -> Option<u64> {
        self.last_tick_ms
    }

    /// Parses one debug-events line and runs it through the recognizer.
    /// Returns the number of lifecycle events it produced, including those
    /// of synthesized timer ticks.
    pub fn feed_line(&mut self, line: &str) -> usize {
        match self.parse_line(line) {
            Some(sample) => self.feed_sample(sample),
            None => 0,
        }
    }

    /// Parses a line without feeding it, for callers that need the sample
    /// before it reaches the recognizer.
    pub fn parse_line(&mut self, line: &str) -> Option<TouchSample> {
        self.parser.parse_line(line)
    }

    pub fn feed_sample(&mut self, sample: TouchSample) -> usize {
        let before = self.events.len();
        self.advance_to(sample.t_ms);
        let output = self.recognizer.touch(self.parser.tag(), sample);
        self.record(sample.t_ms, output);
        self.events.len() - before
    }

    /// Delivers a timer tick at `now_ms`, after any synthesized ticks that
    /// precede it.
    pub fn timer(&mut self, now_ms: u64) -> usize {
        let before = self.events.len();
        self.advance_to(now_ms);
        let output = self.recognizer.timer(now_ms);
        self.record(now_ms, output);
        self.events.len() - before
    }

    /// Runs the timer until `tail_ms` after the last tick so pending expiry
    /// is reported at the end of a trace.
    pub fn flush(&mut self, tail_ms: u64) -> usize {
        match self.last_tick_ms {
            Some(last) => self.timer(last.saturating_add(tail_ms)),
            None => 0,
        }
    }

    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Hands over the events recorded so far.
    pub fn take_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance_to(&mut self, now_ms: u64) {
        let Some(last) = self.last_tick_ms else {
            return;
        };
        let mut next = (last / self.interval_ms + 1) * self.interval_ms;
        while next < now_ms {
            trace!(next, "driver: synthesized timer tick");
            let output = self.recognizer.timer(next);
            self.record(next, output);
            next += self.interval_ms;
        }
    }

    fn record(&mut self, now_ms: u64, output: TickEvents) {
        self.last_tick_ms = Some(self.last_tick_ms.map_or(now_ms, |last| last.max(now_ms)));
        self.events.extend(output);
    }
}

/// Maps wall-clock time onto device time for live input and keeps a fixed
/// timer schedule.
///
/// Device time is anchored at the latest consumed touch sample; lines that
/// carry no sample never move the anchor or the schedule.
#[derive(Clone, Debug)]
pub struct ListenClock {
    interval: Duration,
    anchor: Option<(u64, Instant)>,
    next_tick: Instant,
}

impl ListenClock {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            anchor: None,
            next_tick: start + interval,
        }
    }

    pub fn anchor(&mut self, sample_ms: u64, at: Instant) {
        self.anchor = Some((sample_ms, at));
    }

    pub fn device_now(&self, at: Instant) -> Option<u64> {
        let (sample_ms, seen) = self.anchor?;
        let elapsed = u64::try_from(at.saturating_duration_since(seen).as_millis())
            .unwrap_or(u64::MAX);
        Some(sample_ms.saturating_add(elapsed))
    }

    /// How long to wait for input before the next scheduled tick.
    pub fn until_next_tick(&self, at: Instant) -> Duration {
        self.next_tick.saturating_duration_since(at)
    }

    /// Device time of the scheduled tick if it is due at `at`. Missed ticks
    /// collapse into one and the schedule restarts from `at`.
    pub fn due(&mut self, at: Instant) -> Option<u64> {
        if at < self.next_tick {
            return None;
        }
        self.next_tick += self.interval;
        if self.next_tick <= at {
            self.next_tick = at + self.interval;
        }
        self.device_now(at)
    }
}

/// Replays a recorded debug-events transcript and flushes `tail_ms` past
/// its last tick.
pub fn replay<'a>(
    config: GestureConfig,
    lines: impl IntoIterator<Item = &'a str>,
    tail_ms: u64,
) -> Result<Driver, regex::Error> {
    let mut driver = Driver::new(config)?;
    for line in lines {
        driver.feed_line(line);
    }
    driver.flush(tail_ms);
    Ok(driver)
}

/// Expected event labels, one per line; blank lines and `#` comments are
/// skipped.
pub fn parse_expected_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_ascii_lowercase)
        .collect()
}
