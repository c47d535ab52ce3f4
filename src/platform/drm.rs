//! Linux DRM device registry under `/sys/class/drm`.
//!
//! `cardN` entries are graphics devices; `cardN-<connector>` entries are
//! their outputs. Functions take the class directory so tests can point
//! them at a fake tree.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::ProbeError;

pub const DRM_CLASS_DIR: &str = "/sys/class/drm";

/// PCI vendor ids of common graphics vendors.
const PCI_VENDORS: &[(&str, &str)] = &[
    ("0x8086", "Intel"),
    ("0x10de", "NVIDIA"),
    ("0x1002", "AMD"),
    ("0x106b", "Apple"),
    ("0x1af4", "Virtio"),
    ("0x15ad", "VMware"),
    ("0x1234", "QEMU"),
    ("0x1414", "Microsoft"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorMode {
    pub width: u32,
    pub height: u32,
}

/// Sorted entry names of the class directory, `None` if it does not exist.
fn entries(class_dir: &Path) -> Result<Option<Vec<String>>, ProbeError> {
    let dir = match fs::read_dir(class_dir) {
        Ok(dir) => dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in dir {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(Some(names))
}

fn is_card(name: &str) -> bool {
    name.strip_prefix("card")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

fn is_connector(name: &str) -> bool {
    name.starts_with("card") && name.contains('-')
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn vendor_name(vendor_id: &str) -> Option<&'static str> {
    PCI_VENDORS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(vendor_id))
        .map(|(_, name)| *name)
}

/// Model strings of every graphics device, in card order.
///
/// The kernel does not expose marketing names, so the model is the vendor
/// name followed by the PCI ids, e.g. `Intel GPU [0x8086:0x46a6]`.
pub fn gpu_models(class_dir: &Path) -> Result<Option<Vec<String>>, ProbeError> {
    let Some(names) = entries(class_dir)? else {
        return Ok(None);
    };

    let models = names
        .iter()
        .filter(|name| is_card(name))
        .filter_map(|name| {
            let device_dir = class_dir.join(name).join("device");
            let vendor = read_trimmed(&device_dir.join("vendor"))?;
            let device = read_trimmed(&device_dir.join("device")).unwrap_or_else(|| "?".into());
            let label = vendor_name(&vendor).unwrap_or("Unknown");
            Some(format!("{} GPU [{}:{}]", label, vendor, device))
        })
        .collect();

    Ok(Some(models))
}

/// Parse the first line of a connector `modes` file, e.g. `1920x1080`
/// or `1920x1080i`.
pub fn parse_mode_line(line: &str) -> Option<ConnectorMode> {
    let (width, height) = line.trim().split_once('x')?;
    let height: String = height.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some(ConnectorMode {
        width: width.parse().ok()?,
        height: height.parse().ok()?,
    })
}

/// Preferred mode of every connected output, in connector order.
///
/// sysfs lists resolutions only; refresh rates are not exposed there.
pub fn connected_modes(class_dir: &Path) -> Result<Option<Vec<ConnectorMode>>, ProbeError> {
    let Some(names) = entries(class_dir)? else {
        return Ok(None);
    };

    let modes = names
        .iter()
        .filter(|name| is_connector(name))
        .filter(|name| {
            read_trimmed(&class_dir.join(name).join("status")).as_deref() == Some("connected")
        })
        .filter_map(|name| {
            let modes = fs::read_to_string(class_dir.join(name).join("modes")).ok()?;
            modes.lines().next().and_then(parse_mode_line)
        })
        .collect();

    Ok(Some(modes))
}
