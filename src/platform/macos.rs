//! `system_profiler SPDisplaysDataType -json` decoding.
//!
//! One graphics entry per device, each with the displays attached to it.

use serde::Deserialize;

use crate::error::ProbeError;

#[derive(Debug, Deserialize)]
struct DisplaysReport {
    #[serde(rename = "SPDisplaysDataType", default)]
    devices: Vec<GraphicsDevice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphicsDevice {
    #[serde(rename = "_name")]
    pub name: Option<String>,
    #[serde(rename = "sppci_model")]
    pub model: Option<String>,
    #[serde(rename = "spdisplays_ndrvs", default)]
    pub displays: Vec<AttachedDisplay>,
}

impl GraphicsDevice {
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().or(self.name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachedDisplay {
    #[serde(rename = "_name")]
    pub name: Option<String>,
    /// Logical resolution, e.g. `"1470 x 956 @ 60.00Hz"`.
    #[serde(rename = "_spdisplays_resolution")]
    pub resolution: Option<String>,
}

pub fn parse_displays_report(json: &str) -> Result<Vec<GraphicsDevice>, ProbeError> {
    let report: DisplaysReport = serde_json::from_str(json)?;
    Ok(report.devices)
}

/// Split `"W x H"` with an optional `"@ R Hz"` suffix.
pub fn parse_resolution(text: &str) -> Option<(u32, u32, Option<f64>)> {
    let (dims, refresh) = match text.split_once('@') {
        Some((dims, refresh)) => (dims, Some(refresh)),
        None => (text, None),
    };

    let mut numbers = dims
        .split('x')
        .map(|part| part.split_whitespace().next().and_then(|n| n.parse::<u32>().ok()));
    let width = numbers.next().flatten()?;
    let height = numbers.next().flatten()?;

    let refresh_hz = refresh.and_then(|r| {
        r.trim()
            .trim_end_matches("Hz")
            .trim()
            .parse::<f64>()
            .ok()
    });

    Some((width, height, refresh_hz))
}

#[cfg(target_os = "macos")]
pub fn graphics_devices() -> Result<Vec<GraphicsDevice>, ProbeError> {
    let output = super::process::output("system_profiler", &["SPDisplaysDataType", "-json"])?;

    if !output.status.success() {
        return Err(ProbeError::query(format!(
            "system_profiler exited with {}",
            output.status
        )));
    }

    parse_displays_report(&String::from_utf8_lossy(&output.stdout))
}
