use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use touchgest::driver;
use touchgest::GestureConfig;
use tracing::info;

pub struct ReplayOptions {
    pub trace_path: PathBuf,
    pub config: GestureConfig,
    pub expect_path: Option<PathBuf>,
    pub tail_ms: u64,
}

pub fn run_replay(options: ReplayOptions) -> Result<()> {
    let trace = std::fs::read_to_string(&options.trace_path)
        .with_context(|| format!("failed to read {}", options.trace_path.display()))?;

    let driver = driver::replay(options.config, trace.lines(), options.tail_ms)
        .context("building touch line parser")?;
    info!(
        events = driver.events().len(),
        trace = %options.trace_path.display(),
        "replay finished"
    );

    println!("event,ms,identity,tag");
    for event in driver.events() {
        println!(
            "event,{},{},{}",
            event.emitted_at_ms,
            event.identity,
            event.tag.as_str().unwrap_or("")
        );
    }

    let Some(expect_path) = options.expect_path else {
        return Ok(());
    };
    let expected_text = std::fs::read_to_string(&expect_path)
        .with_context(|| format!("failed to read {}", expect_path.display()))?;
    let expected = driver::parse_expected_labels(&expected_text);
    let actual: Vec<String> = driver.events().iter().map(ToString::to_string).collect();
    if actual != expected {
        eprintln!("expected events: {}", expected.join(","));
        eprintln!("actual events:   {}", actual.join(","));
        bail!("event sequence mismatch");
    }
    Ok(())
}
