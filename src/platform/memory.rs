//! Page-category memory counters.
//!
//! On macOS the used figure is built from `vm_stat` page counts; other
//! platforms rely on sysinfo and report `None` here.

use crate::core::telemetry::units;
use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCounts {
    pub page_size: u64,
    pub active: u64,
    pub inactive: u64,
    pub wired: u64,
}

impl PageCounts {
    /// `(active + inactive + wired) * page_size`
    pub fn used_bytes(&self) -> u64 {
        let pages = self
            .active
            .saturating_add(self.inactive)
            .saturating_add(self.wired);
        units::pages_to_bytes(pages, self.page_size)
    }
}

/// Parse the output of `vm_stat`.
pub fn parse_vm_stat(output: &str) -> Result<PageCounts, ProbeError> {
    let page_size = output
        .lines()
        .next()
        .and_then(|header| header.split("page size of").nth(1))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|size| size.parse::<u64>().ok())
        .ok_or_else(|| ProbeError::malformed("vm_stat header has no page size"))?;

    let counter = |label: &str| -> Result<u64, ProbeError> {
        output
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.trim() != label {
                    return None;
                }
                value.trim().trim_end_matches('.').parse::<u64>().ok()
            })
            .ok_or_else(|| ProbeError::malformed(format!("vm_stat has no '{}' counter", label)))
    };

    Ok(PageCounts {
        page_size,
        active: counter("Pages active")?,
        inactive: counter("Pages inactive")?,
        wired: counter("Pages wired down")?,
    })
}

#[cfg(target_os = "macos")]
pub fn read_page_counts() -> Result<Option<PageCounts>, ProbeError> {
    let output = super::process::output("vm_stat", &[])?;
    if !output.status.success() {
        return Err(ProbeError::query(format!(
            "vm_stat exited with {}",
            output.status
        )));
    }

    parse_vm_stat(&String::from_utf8_lossy(&output.stdout)).map(Some)
}

#[cfg(not(target_os = "macos"))]
pub fn read_page_counts() -> Result<Option<PageCounts>, ProbeError> {
    Ok(None)
}
