use statig::prelude::*;
use tracing::debug;

use super::TickContext;
use crate::gesture::{Gesture, LifecycleTag};

#[derive(Clone, Copy, Debug)]
pub(super) enum LifecycleInput {
    /// Periodic timer tick; may expire the tracked gesture.
    Timer { now_ms: u64 },
    /// Nothing detected and every finger has lifted.
    Ended { now_ms: u64 },
    Detected {
        gesture: Gesture,
        ended: bool,
        now_ms: u64,
    },
}

pub(super) struct LifecycleHsm {
    event_expire_ms: u64,
}

#[state_machine(initial = "State::idle()")]
impl LifecycleHsm {
    #[state]
    fn idle(&mut self, context: &mut TickContext, event: &LifecycleInput) -> Outcome<State> {
        match event {
            LifecycleInput::Detected {
                gesture,
                ended,
                now_ms,
            } => self.start(context, *gesture, *ended, *now_ms),
            LifecycleInput::Timer { .. } | LifecycleInput::Ended { .. } => Handled,
        }
    }

    #[state]
    fn active(
        &mut self,
        gesture: &mut Gesture,
        since_ms: &mut u64,
        context: &mut TickContext,
        event: &LifecycleInput,
    ) -> Outcome<State> {
        match event {
            LifecycleInput::Timer { now_ms } => {
                if now_ms.saturating_sub(*since_ms) > self.event_expire_ms {
                    debug!(%gesture, since_ms = *since_ms, "lifecycle: gesture expired");
                    context.emit(gesture, LifecycleTag::End, *now_ms);
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            LifecycleInput::Ended { now_ms } => {
                debug!(%gesture, "lifecycle: contact lifted");
                context.emit(gesture, LifecycleTag::End, *now_ms);
                Transition(State::idle())
            }
            LifecycleInput::Detected {
                gesture: detected,
                ended,
                now_ms,
            } => {
                if detected.repeatable() && *detected == *gesture {
                    *since_ms = *now_ms;
                    if *ended {
                        context.emit(gesture, LifecycleTag::End, *now_ms);
                        return Transition(State::idle());
                    }
                    context.emit(gesture, LifecycleTag::Update, *now_ms);
                    return Handled;
                }

                context.emit(gesture, LifecycleTag::End, *now_ms);
                self.start(context, *detected, *ended, *now_ms)
            }
        }
    }
}

impl LifecycleHsm {
    pub(super) fn new(event_expire_ms: u64) -> Self {
        Self { event_expire_ms }
    }

    fn start(
        &self,
        context: &mut TickContext,
        gesture: Gesture,
        ended: bool,
        now_ms: u64,
    ) -> Outcome<State> {
        context.emit(&gesture, LifecycleTag::None, now_ms);
        if !gesture.repeatable() {
            return Transition(State::idle());
        }

        context.emit(&gesture, LifecycleTag::Begin, now_ms);
        if ended {
            context.emit(&gesture, LifecycleTag::End, now_ms);
            return Transition(State::idle());
        }
        debug!(%gesture, "lifecycle: tracking repeatable gesture");
        Transition(State::active(gesture, now_ms))
    }
}

pub(super) fn tracked_gesture(state: &State) -> Option<(Gesture, u64)> {
    match state {
        State::Active { gesture, since_ms } => Some((*gesture, *since_ms)),
        _ => None,
    }
}
