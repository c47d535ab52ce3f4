use colored::*;
use humansize::{format_size, BINARY, DECIMAL};

use crate::core::telemetry::units::ByteConvention;
use crate::core::telemetry::{FieldKey, FieldValue, ProbeOutcome, Reading, Snapshot};

/// Format a byte count with the convention of its field (GiB for memory,
/// GB for storage).
pub fn format_bytes(bytes: u64, convention: ByteConvention) -> String {
    match convention {
        ByteConvention::Binary => format_size(bytes, BINARY),
        ByteConvention::Decimal => format_size(bytes, DECIMAL),
    }
}

/// Format a `[0, 1]` fraction as a whole percentage.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Format seconds as `Xd Yh Zm`, dropping leading zero units.
pub fn format_uptime(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, total % 60)
    }
}

fn format_reading<T>(reading: &Reading<T>, render: impl Fn(&T) -> String) -> String {
    match reading {
        Reading::Value { value } => render(value),
        Reading::Unavailable { .. } => "unknown".dimmed().to_string(),
    }
}

fn usage(used: u64, total: u64, convention: ByteConvention) -> String {
    let pct = if total > 0 {
        format_percent(used as f64 / total as f64)
    } else {
        "-".to_string()
    };
    format!(
        "{} / {} ({})",
        format_bytes(used, convention),
        format_bytes(total, convention),
        pct
    )
}

/// Render one field value on a single line (lists use one line per item).
pub fn format_value(key: FieldKey, value: &FieldValue) -> String {
    let convention = ByteConvention::for_field(key);

    match value {
        FieldValue::Text(text) => text.clone(),
        FieldValue::Version(version) => version.text.clone(),
        FieldValue::Quantity { value, unit } => match key {
            FieldKey::UptimeSeconds => format_uptime(*value),
            _ => format!("{} {}", value, unit),
        },
        FieldValue::Cpu(cpu) => format!(
            "{} ({} threads, {})",
            cpu.name,
            cpu.logical_cores,
            format_reading(&cpu.frequency_ghz, |ghz| format!("{:.2} GHz", ghz))
        ),
        FieldValue::Memory(memory) => usage(memory.used_bytes, memory.total_bytes, convention),
        FieldValue::Storage(storage) => format!(
            "{} on {}",
            usage(storage.used_bytes, storage.total_bytes, convention),
            storage.mount_point
        ),
        FieldValue::Power(power) => format!(
            "battery {}, {}",
            format_reading(&power.battery_fraction, |f| format_percent(*f)),
            format_reading(&power.is_charging, |charging| {
                if *charging {
                    "charging".to_string()
                } else {
                    "not charging".to_string()
                }
            })
        ),
        FieldValue::Gpus(gpus) if gpus.is_empty() => "none".to_string(),
        FieldValue::Gpus(gpus) => gpus
            .iter()
            .map(|gpu| {
                let kind = if gpu.integrated { "integrated" } else { "discrete" };
                format!("{} [{}]", gpu.name, kind)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        FieldValue::Displays(displays) if displays.is_empty() => "none".to_string(),
        FieldValue::Displays(displays) => displays
            .iter()
            .map(|display| {
                format!(
                    "{}x{} @ {}",
                    display.width,
                    display.height,
                    format_reading(&display.refresh_hz, |hz| format!("{:.0} Hz", hz))
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn format_outcome(key: FieldKey, outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Ok { value } => format_value(key, value),
        ProbeOutcome::Unavailable { reason } => {
            format!("{} ({})", "unavailable".yellow(), reason)
        }
        ProbeOutcome::Failed { error } => format!("{} ({})", "failed".red(), error),
    }
}

/// Render a snapshot as an aligned two-column report.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    for (key, outcome) in snapshot.iter() {
        let rendered = format_outcome(key, outcome);
        let mut lines = rendered.lines();
        let first = lines.next().unwrap_or_default();
        out.push_str(&format!("{:<16} {}\n", key.as_str().cyan(), first));
        for line in lines {
            out.push_str(&format!("{:<16} {}\n", "", line));
        }
    }

    out.push_str(&format!(
        "\n{} ok, {} unavailable, {} failed\n",
        snapshot.ok_count().to_string().green(),
        snapshot.unavailable_count().to_string().yellow(),
        snapshot.failed_count().to_string().red()
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::telemetry::{CpuInfo, MemoryInfo, StorageInfo};

    #[test]
    fn test_byte_conventions() {
        assert_eq!(
            format_bytes(16 * 1024 * 1024 * 1024, ByteConvention::Binary),
            "16 GiB"
        );
        assert_eq!(
            format_bytes(512_000_000_000, ByteConvention::Decimal),
            "512 GB"
        );
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(12345.0), "3h 25m");
        assert_eq!(format_uptime(90_061.0), "1d 1h 1m");
        assert_eq!(format_uptime(59.0), "0m 59s");
    }

    #[test]
    fn test_cpu_without_frequency_says_unknown() {
        let value = FieldValue::Cpu(CpuInfo {
            name: "Apple M2".into(),
            logical_cores: 8,
            frequency_ghz: Reading::unavailable("not exposed"),
        });
        let text = format_value(FieldKey::Cpu, &value);
        assert!(text.starts_with("Apple M2 (8 threads, "));
        assert!(text.contains("unknown"));
        assert!(!text.contains("0.00 GHz"));
    }

    #[test]
    fn test_memory_and_storage_use_their_conventions() {
        let memory = FieldValue::Memory(MemoryInfo {
            total_bytes: 16 * 1024 * 1024 * 1024,
            used_bytes: 8 * 1024 * 1024 * 1024,
        });
        assert_eq!(
            format_value(FieldKey::Memory, &memory),
            "8 GiB / 16 GiB (50%)"
        );

        let storage = FieldValue::Storage(StorageInfo {
            mount_point: "/".into(),
            total_bytes: 500_000_000_000,
            used_bytes: 125_000_000_000,
            available_bytes: 375_000_000_000,
        });
        assert_eq!(
            format_value(FieldKey::Storage, &storage),
            "125 GB / 500 GB (25%) on /"
        );
    }
}
