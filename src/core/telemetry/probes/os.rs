use sysinfo::System;

use super::text_or_unavailable;
use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{FieldValue, OsVersion, ProbeOutcome};
use crate::platform::kernel;

pub struct OsNameProbe;

impl Probe for OsNameProbe {
    fn run(&self) -> ProbeOutcome {
        text_or_unavailable(System::name(), "OS name")
    }

    fn describe(&self) -> &'static str {
        "os name"
    }
}

pub struct OsVersionProbe;

impl Probe for OsVersionProbe {
    fn run(&self) -> ProbeOutcome {
        interpret_os_version(System::os_version())
    }

    fn describe(&self) -> &'static str {
        "os version"
    }
}

pub struct HostNameProbe;

impl Probe for HostNameProbe {
    fn run(&self) -> ProbeOutcome {
        text_or_unavailable(System::host_name(), "host name")
    }

    fn describe(&self) -> &'static str {
        "host name"
    }
}

pub struct KernelNameProbe;

impl Probe for KernelNameProbe {
    fn run(&self) -> ProbeOutcome {
        match kernel::kernel_name() {
            Ok(name) => text_or_unavailable(name, "kernel name"),
            Err(err) => ProbeOutcome::failed(err),
        }
    }

    fn describe(&self) -> &'static str {
        "kernel name"
    }
}

pub struct KernelVersionProbe;

impl Probe for KernelVersionProbe {
    fn run(&self) -> ProbeOutcome {
        text_or_unavailable(System::kernel_version(), "kernel version")
    }

    fn describe(&self) -> &'static str {
        "kernel version"
    }
}

/// Split a version string into `(major, minor, patch)`.
///
/// Leading digits of the first three dot-separated components are used;
/// missing components are zero. Returns `None` when no component starts
/// with a digit.
pub fn parse_version(raw: &str) -> Option<(u32, u32, u32)> {
    let mut parts = raw
        .split(|c: char| c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        });

    let major = parts.next().flatten()?;
    let minor = parts.next().flatten().unwrap_or(0);
    let patch = parts.next().flatten().unwrap_or(0);
    Some((major, minor, patch))
}

impl OsVersion {
    /// Patch is omitted from the text when zero: `12.0`, not `12.0.0`.
    pub fn from_parts(major: u32, minor: u32, patch: u32) -> Self {
        let text = if patch == 0 {
            format!("{}.{}", major, minor)
        } else {
            format!("{}.{}.{}", major, minor, patch)
        };

        Self {
            text,
            major,
            minor,
            patch,
        }
    }
}

pub fn interpret_os_version(raw: Option<String>) -> ProbeOutcome {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return ProbeOutcome::unavailable("OS version not reported by the platform");
    };

    match parse_version(&raw) {
        Some((major, minor, patch)) => {
            ProbeOutcome::ok(FieldValue::Version(OsVersion::from_parts(major, minor, patch)))
        }
        // Rolling releases report names like "rolling" instead of numbers.
        None => ProbeOutcome::unavailable(format!(
            "OS version '{}' has no numeric components",
            raw.trim()
        )),
    }
}
