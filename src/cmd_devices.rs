use std::io::Read as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use touchgest::device;

pub fn run_devices(path: Option<&Path>) -> Result<()> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            text
        }
    };

    let devices = device::parse_list_devices(&text);
    for device in devices.iter().filter(|device| device.is_touchscreen()) {
        println!(
            "{}\t{}",
            device.name,
            device.kernel.as_deref().unwrap_or("-")
        );
    }

    if !device::any_touchscreen(&devices) {
        bail!("no touchscreen among {} devices", devices.len());
    }
    Ok(())
}
