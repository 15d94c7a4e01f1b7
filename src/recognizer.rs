use statig::blocking::IntoStateMachineExt as _;
use tracing::{debug, warn};

use crate::buffer::TouchEventBuffer;
use crate::config::GestureConfig;
use crate::detectors;
use crate::gesture::{Gesture, LifecycleEvent, LifecycleTag};
use crate::types::TouchSample;

mod hsm;

use hsm::{LifecycleHsm, LifecycleInput};

/// Upper bound on lifecycle events produced by a single tick: the end of the
/// tracked gesture followed by plain, begin and end of a new one.
pub const MAX_EVENTS_PER_TICK: usize = 5;

pub type TickEvents = heapless::Vec<LifecycleEvent, MAX_EVENTS_PER_TICK>;

#[derive(Clone, Copy, Debug)]
pub enum TickInput<'a> {
    Touch {
        source: &'a str,
        sample: TouchSample,
    },
    Timer {
        now_ms: u64,
    },
}

impl TickInput<'_> {
    pub fn now_ms(&self) -> u64 {
        match self {
            TickInput::Touch { sample, .. } => sample.t_ms,
            TickInput::Timer { now_ms } => *now_ms,
        }
    }
}

#[derive(Debug, Default)]
struct TickContext {
    events: TickEvents,
}

impl TickContext {
    fn emit(&mut self, gesture: &Gesture, tag: LifecycleTag, now_ms: u64) {
        let event = LifecycleEvent::new(gesture, tag, now_ms);
        debug!(%event, "lifecycle: emit");
        if self.events.push(event).is_err() {
            warn!(%gesture, "lifecycle: tick output full, event dropped");
        }
    }

    fn finish(self) -> TickEvents {
        self.events
    }
}

pub struct GestureRecognizer {
    config: GestureConfig,
    buffer: TouchEventBuffer,
    machine: statig::blocking::StateMachine<LifecycleHsm>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        let buffer = TouchEventBuffer::new(&config);
        let machine = LifecycleHsm::new(config.event_expire_ms()).state_machine();
        Self {
            config,
            buffer,
            machine,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TouchEventBuffer {
        &self.buffer
    }

    /// The repeatable gesture currently being tracked and the time it was
    /// last detected.
    pub fn last_known_gesture(&self) -> Option<(Gesture, u64)> {
        hsm::tracked_gesture(self.machine.state())
    }

    pub fn tick(&mut self, input: TickInput<'_>) -> TickEvents {
        let now_ms = input.now_ms();
        let mut context = TickContext::default();

        self.buffer.clear_expired(now_ms);
        match input {
            TickInput::Touch { source, sample } => {
                if !self.buffer.buffer(source, sample) {
                    return context.finish();
                }
            }
            TickInput::Timer { now_ms } => {
                self.machine
                    .handle_with_context(&LifecycleInput::Timer { now_ms }, &mut context);
            }
        }

        if self.buffer.is_empty() {
            return context.finish();
        }

        let snapshot = self.buffer.snapshot(now_ms);
        match detectors::detect(&snapshot, &self.config) {
            Some(gesture) => {
                self.buffer.clear();
                self.machine.handle_with_context(
                    &LifecycleInput::Detected {
                        gesture,
                        ended: snapshot.ended,
                        now_ms,
                    },
                    &mut context,
                );
            }
            None if snapshot.ended => {
                self.machine
                    .handle_with_context(&LifecycleInput::Ended { now_ms }, &mut context);
            }
            None => {}
        }

        context.finish()
    }

    pub fn touch(&mut self, source: &str, sample: TouchSample) -> TickEvents {
        self.tick(TickInput::Touch { source, sample })
    }

    pub fn timer(&mut self, now_ms: u64) -> TickEvents {
        self.tick(TickInput::Timer { now_ms })
    }
}

#[cfg(test)]
mod tests;
