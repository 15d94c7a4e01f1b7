//! Touch capability scan over `libinput list-devices` output.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputDevice {
    pub name: String,
    pub kernel: Option<String>,
    pub capabilities: String,
}

impl InputDevice {
    pub fn is_touchscreen(&self) -> bool {
        self.capabilities.contains("touch")
    }
}

/// Splits the listing into one device per `Device:` block. Fields other
/// than name, kernel node and capabilities are ignored.
pub fn parse_list_devices(text: &str) -> Vec<InputDevice> {
    let mut devices = Vec::new();
    let mut current: Option<InputDevice> = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Device" => {
                if let Some(device) = current.take() {
                    devices.push(device);
                }
                current = Some(InputDevice {
                    name: value.to_string(),
                    ..InputDevice::default()
                });
            }
            "Kernel" => {
                if let Some(device) = current.as_mut() {
                    device.kernel = Some(value.to_string());
                }
            }
            "Capabilities" => {
                if let Some(device) = current.as_mut() {
                    device.capabilities = value.to_string();
                }
            }
            _ => {}
        }
    }

    devices.extend(current);
    devices
}

pub fn any_touchscreen(devices: &[InputDevice]) -> bool {
    devices.iter().any(InputDevice::is_touchscreen)
}
