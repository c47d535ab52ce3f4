use std::path::Path;
use sysinfo::Disks;

use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{FieldValue, ProbeOutcome, StorageInfo};
use crate::core::telemetry::units;

/// Capacity of one designated volume.
pub struct StorageProbe {
    mount_point: String,
}

impl StorageProbe {
    pub fn new<S: Into<String>>(mount_point: S) -> Self {
        Self {
            mount_point: mount_point.into(),
        }
    }
}

impl Probe for StorageProbe {
    fn run(&self) -> ProbeOutcome {
        let disks = Disks::new_with_refreshed_list();
        let volume = disks
            .list()
            .iter()
            .find(|disk| same_mount(disk.mount_point(), &self.mount_point))
            .map(|disk| (disk.total_space(), disk.available_space()));

        interpret_storage(&self.mount_point, volume)
    }

    fn describe(&self) -> &'static str {
        "storage"
    }
}

fn same_mount(mount: &Path, wanted: &str) -> bool {
    let mount = mount.to_string_lossy();
    if cfg!(windows) {
        mount.trim_end_matches('\\').eq_ignore_ascii_case(wanted.trim_end_matches('\\'))
    } else {
        mount == wanted
    }
}

/// `volume` is `(total, available)` in bytes, `None` when not mounted.
pub fn interpret_storage(mount_point: &str, volume: Option<(u64, u64)>) -> ProbeOutcome {
    let Some((total, available)) = volume else {
        return ProbeOutcome::unavailable(format!("volume '{}' is not mounted", mount_point));
    };

    let available = available.min(total);
    ProbeOutcome::ok(FieldValue::Storage(StorageInfo {
        mount_point: mount_point.to_string(),
        total_bytes: total,
        used_bytes: units::used_from_available(total, available),
        available_bytes: available,
    }))
}
