use super::*;
use crate::config::DEFAULT_SOURCE;
use crate::gesture::SwipeDirection;
use crate::types::{FingerId, Point};

fn recognizer() -> GestureRecognizer {
    GestureRecognizer::new(GestureConfig::default())
}

fn begin(finger: FingerId, t_ms: u64, x: f64, y: f64) -> TouchSample {
    TouchSample::begin(finger, t_ms, Point::new(x, y))
}

fn update(finger: FingerId, t_ms: u64, x: f64, y: f64) -> TouchSample {
    TouchSample::update(finger, t_ms, Point::new(x, y))
}

fn end(finger: FingerId, t_ms: u64) -> TouchSample {
    TouchSample::end(finger, t_ms)
}

fn labels(events: &TickEvents) -> Vec<String> {
    events.iter().map(ToString::to_string).collect()
}

fn touch(recognizer: &mut GestureRecognizer, sample: TouchSample) -> Vec<String> {
    labels(&recognizer.touch(DEFAULT_SOURCE, sample))
}

fn timer(recognizer: &mut GestureRecognizer, now_ms: u64) -> Vec<String> {
    labels(&recognizer.timer(now_ms))
}

#[test]
fn hold_begins_updates_and_ends_when_lifted() {
    let mut recognizer = recognizer();

    assert!(touch(&mut recognizer, begin(1, 0, 10.0, 10.0)).is_empty());
    assert!(timer(&mut recognizer, 300).is_empty());
    assert_eq!(timer(&mut recognizer, 600), vec!["hold.1", "hold.1.begin"]);
    assert_eq!(
        recognizer.last_known_gesture(),
        Some((Gesture::Hold { finger_count: 1 }, 600))
    );

    // The contact keeps reporting in place; once it has been down long
    // enough again the hold repeats.
    assert!(touch(&mut recognizer, update(1, 700, 11.0, 10.0)).is_empty());
    assert_eq!(timer(&mut recognizer, 1300), vec!["hold.1.update"]);
    assert_eq!(
        recognizer.last_known_gesture(),
        Some((Gesture::Hold { finger_count: 1 }, 1300))
    );

    assert_eq!(touch(&mut recognizer, end(1, 1400)), vec!["hold.1.end"]);
    assert_eq!(recognizer.last_known_gesture(), None);
    assert!(timer(&mut recognizer, 1500).is_empty());
}

#[test]
fn repeat_on_final_sample_ends_immediately() {
    let mut recognizer = recognizer();

    touch(&mut recognizer, begin(1, 0, 10.0, 10.0));
    assert_eq!(timer(&mut recognizer, 600), vec!["hold.1", "hold.1.begin"]);

    touch(&mut recognizer, update(1, 700, 10.0, 10.0));
    assert_eq!(touch(&mut recognizer, end(1, 1300)), vec!["hold.1.end"]);
    assert_eq!(recognizer.last_known_gesture(), None);
}

#[test]
fn tap_is_emitted_once_and_never_tracked() {
    let mut recognizer = recognizer();

    assert!(touch(&mut recognizer, begin(1, 0, 10.0, 10.0)).is_empty());
    assert_eq!(touch(&mut recognizer, end(1, 100)), vec!["tap.1"]);
    assert_eq!(recognizer.last_known_gesture(), None);

    for now_ms in [200, 1_000, 5_000] {
        assert!(timer(&mut recognizer, now_ms).is_empty());
    }
}

#[test]
fn tap_after_tracked_hold_ends_the_hold_first() {
    let mut recognizer = recognizer();

    touch(&mut recognizer, begin(1, 0, 10.0, 10.0));
    timer(&mut recognizer, 600);

    // A quick two-finger tap while the hold is still tracked.
    touch(&mut recognizer, begin(2, 700, 40.0, 40.0));
    touch(&mut recognizer, begin(3, 710, 60.0, 40.0));
    touch(&mut recognizer, end(2, 750));
    assert_eq!(
        touch(&mut recognizer, end(3, 760)),
        vec!["hold.1.end", "tap.2"]
    );
    assert_eq!(recognizer.last_known_gesture(), None);
}

#[test]
fn tracked_gesture_expires_on_timer() {
    let mut recognizer = recognizer();

    touch(&mut recognizer, begin(1, 0, 10.0, 10.0));
    timer(&mut recognizer, 600);

    assert!(timer(&mut recognizer, 2_600).is_empty());
    assert_eq!(timer(&mut recognizer, 2_601), vec!["hold.1.end"]);
    assert_eq!(recognizer.last_known_gesture(), None);
    assert!(timer(&mut recognizer, 5_000).is_empty());
}

#[test]
fn swipe_repeats_while_fingers_keep_moving() {
    let mut recognizer = recognizer();

    assert!(touch(&mut recognizer, begin(1, 0, 10.0, 10.0)).is_empty());
    assert_eq!(
        touch(&mut recognizer, update(1, 50, 20.0, 10.0)),
        vec!["swipe.1.right", "swipe.1.right.begin"]
    );

    assert!(touch(&mut recognizer, update(1, 100, 22.0, 10.0)).is_empty());
    assert_eq!(
        touch(&mut recognizer, update(1, 150, 30.0, 10.0)),
        vec!["swipe.1.right.update"]
    );
    assert_eq!(
        recognizer.last_known_gesture(),
        Some((
            Gesture::Swipe {
                finger_count: 1,
                direction: SwipeDirection::Right
            },
            150
        ))
    );

    assert_eq!(touch(&mut recognizer, end(1, 200)), vec!["swipe.1.right.end"]);
    assert_eq!(recognizer.last_known_gesture(), None);
}

#[test]
fn changing_direction_ends_previous_swipe() {
    let mut recognizer = recognizer();

    touch(&mut recognizer, begin(1, 0, 10.0, 10.0));
    touch(&mut recognizer, update(1, 50, 20.0, 10.0));

    touch(&mut recognizer, update(1, 100, 20.0, 12.0));
    assert_eq!(
        touch(&mut recognizer, update(1, 150, 20.0, 25.0)),
        vec![
            "swipe.1.right.end",
            "swipe.1.down",
            "swipe.1.down.begin"
        ]
    );
}

#[test]
fn samples_from_other_sources_are_ignored() {
    let mut recognizer = recognizer();

    let events = recognizer.touch("other_source", begin(1, 0, 10.0, 10.0));
    assert!(events.is_empty());
    assert!(recognizer.buffer().is_empty());
}

#[test]
fn timer_without_buffer_or_gesture_is_quiet() {
    let mut recognizer = recognizer();
    assert!(timer(&mut recognizer, 100).is_empty());
    assert!(timer(&mut recognizer, 10_000).is_empty());
    assert_eq!(recognizer.last_known_gesture(), None);
}

#[test]
fn events_carry_their_tick_time() {
    let mut recognizer = recognizer();

    recognizer.touch(DEFAULT_SOURCE, begin(1, 0, 10.0, 10.0));
    let events = recognizer.touch(DEFAULT_SOURCE, end(1, 120));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].emitted_at_ms, 120);
    assert_eq!(events[0].tag, LifecycleTag::None);
}
