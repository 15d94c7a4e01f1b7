use std::io::BufRead as _;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use touchgest::driver::{Driver, ListenClock};
use touchgest::GestureConfig;
use tracing::{info, warn};

/// Reads debug-events lines on a helper thread; the recognizer itself only
/// runs on this thread.
pub fn run_listen(config: GestureConfig) -> Result<()> {
    let mut driver = Driver::new(config).context("building touch line parser")?;
    let interval = Duration::from_millis(driver.interval_ms());

    let (tx, rx) = mpsc::channel::<String>();
    let reader = thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "listen: stdin read failed");
                    break;
                }
            }
        }
    });

    info!(interval_ms = driver.interval_ms(), "listening for touch events");
    let mut clock = ListenClock::new(interval, Instant::now());
    loop {
        match rx.recv_timeout(clock.until_next_tick(Instant::now())) {
            Ok(line) => {
                if let Some(sample) = driver.parse_line(&line) {
                    clock.anchor(sample.t_ms, Instant::now());
                    driver.feed_sample(sample);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        if let Some(now_ms) = clock.due(Instant::now()) {
            driver.timer(now_ms);
        }

        for event in driver.take_events() {
            println!("{event}");
        }
    }

    if reader.join().is_err() {
        warn!("listen: reader thread panicked");
    }
    Ok(())
}
