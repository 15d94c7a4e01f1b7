use std::{fs, path::PathBuf};

use touchgest::driver::{self, Driver};
use touchgest::{GestureConfig, LifecycleTag};

fn trace(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("traces")
        .join(name)
}

fn replay(name: &str) -> Driver {
    let text = fs::read_to_string(trace(&format!("{name}.txt"))).expect("missing trace fixture");
    driver::replay(GestureConfig::default(), text.lines(), 2_500).expect("replay should run")
}

fn expected(name: &str) -> Vec<String> {
    let text =
        fs::read_to_string(trace(&format!("{name}.expected"))).expect("missing expected fixture");
    driver::parse_expected_labels(&text)
}

fn labels(driver: &Driver) -> Vec<String> {
    driver.events().iter().map(ToString::to_string).collect()
}

#[test]
fn recorded_traces_match_expected_events() {
    for name in ["two_finger_swipe", "three_finger_tap", "one_finger_hold"] {
        let driver = replay(name);
        assert_eq!(labels(&driver), expected(name), "trace `{name}`");
    }
}

#[test]
fn two_finger_swipe_timing() {
    let driver = replay("two_finger_swipe");
    let timeline: Vec<(u64, Option<&str>)> = driver
        .events()
        .iter()
        .map(|event| (event.emitted_at_ms, event.tag.as_str()))
        .collect();
    assert_eq!(
        timeline,
        vec![
            (91, None),
            (91, Some("begin")),
            (131, Some("update")),
            (162, Some("update")),
            (181, Some("update")),
            (220, Some("end")),
        ]
    );
    assert_eq!(driver.recognizer().last_known_gesture(), None);
}

#[test]
fn every_begin_is_closed_by_an_end() {
    for name in ["two_finger_swipe", "one_finger_hold"] {
        let driver = replay(name);
        let begins = driver
            .events()
            .iter()
            .filter(|event| event.tag == LifecycleTag::Begin)
            .count();
        let ends = driver
            .events()
            .iter()
            .filter(|event| event.tag == LifecycleTag::End)
            .count();
        assert_eq!(begins, ends, "trace `{name}`");
    }
}

#[test]
fn raised_hold_threshold_reports_slow_press_as_tap() {
    let config = GestureConfig {
        tap_hold_threshold: 2.0,
        ..GestureConfig::default()
    };

    let text = fs::read_to_string(trace("one_finger_hold.txt")).expect("missing trace fixture");
    let driver = driver::replay(config.clone(), text.lines(), 2_500).expect("replay should run");
    assert_eq!(labels(&driver), vec!["tap.1"]);

    let text = fs::read_to_string(trace("three_finger_tap.txt")).expect("missing trace fixture");
    let driver = driver::replay(config, text.lines(), 2_500).expect("replay should run");
    assert_eq!(labels(&driver), vec!["tap.3"]);
}
