//! Graphics device and display enumeration, dispatched per platform.
//!
//! `Ok(None)` means the platform has no device registry to walk at all;
//! an empty list means the registry exists but is empty.

use crate::error::ProbeError;

/// One attached display as reported by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDisplay {
    pub width: u32,
    pub height: u32,
    pub refresh_hz: Option<f64>,
}

#[cfg(target_os = "linux")]
pub fn gpu_models() -> Result<Option<Vec<String>>, ProbeError> {
    super::drm::gpu_models(std::path::Path::new(super::drm::DRM_CLASS_DIR))
}

#[cfg(target_os = "linux")]
pub fn displays() -> Result<Option<Vec<RawDisplay>>, ProbeError> {
    let modes = super::drm::connected_modes(std::path::Path::new(super::drm::DRM_CLASS_DIR))?;
    Ok(modes.map(|modes| {
        modes
            .into_iter()
            .map(|mode| RawDisplay {
                width: mode.width,
                height: mode.height,
                refresh_hz: None,
            })
            .collect()
    }))
}

#[cfg(target_os = "macos")]
pub fn gpu_models() -> Result<Option<Vec<String>>, ProbeError> {
    let devices = super::macos::graphics_devices()?;
    Ok(Some(
        devices
            .iter()
            .filter_map(|device| device.model_name().map(str::to_string))
            .collect(),
    ))
}

#[cfg(target_os = "macos")]
pub fn displays() -> Result<Option<Vec<RawDisplay>>, ProbeError> {
    let devices = super::macos::graphics_devices()?;
    Ok(Some(
        devices
            .iter()
            .flat_map(|device| device.displays.iter())
            .filter_map(|display| {
                let (width, height, refresh_hz) =
                    super::macos::parse_resolution(display.resolution.as_deref()?)?;
                Some(RawDisplay {
                    width,
                    height,
                    refresh_hz,
                })
            })
            .collect(),
    ))
}

#[cfg(windows)]
pub fn gpu_models() -> Result<Option<Vec<String>>, ProbeError> {
    let controllers = super::windows::video_controllers()?;
    Ok(Some(
        controllers
            .into_iter()
            .filter_map(|controller| controller.name)
            .collect(),
    ))
}

#[cfg(windows)]
pub fn displays() -> Result<Option<Vec<RawDisplay>>, ProbeError> {
    let modes = super::windows::active_display_modes()?;
    Ok(Some(super::windows::displays_from_modes(&modes)))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub fn gpu_models() -> Result<Option<Vec<String>>, ProbeError> {
    Ok(None)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub fn displays() -> Result<Option<Vec<RawDisplay>>, ProbeError> {
    Ok(None)
}
