//! Pure conversions from raw platform units to the canonical report units.
//!
//! Nothing in here performs I/O. Canonical units are plain byte counts,
//! GHz for clock frequencies and `[0, 1]` fractions for ratios; turning
//! them into strings is left to `ui::formatters`.

use serde::{Deserialize, Serialize};

use super::field::FieldKey;

const HZ_PER_GHZ: f64 = 1_000_000_000.0;
const HZ_PER_MHZ: u64 = 1_000_000;

/// Converts a clock frequency in Hz to GHz.
pub fn hz_to_ghz(hz: u64) -> f64 {
    hz as f64 / HZ_PER_GHZ
}

pub fn mhz_to_hz(mhz: u64) -> u64 {
    mhz.saturating_mul(HZ_PER_MHZ)
}

/// Converts a page count to bytes.
pub fn pages_to_bytes(pages: u64, page_size: u64) -> u64 {
    pages.saturating_mul(page_size)
}

/// Used capacity of a volume given its total and available bytes.
pub fn used_from_available(total: u64, available: u64) -> u64 {
    total.saturating_sub(available)
}

/// `current / max`, clamped to `[0, 1]`.
///
/// Returns `None` when the ratio is undefined (non-positive or non-finite
/// maximum, or non-finite current value).
pub fn fraction(current: f64, max: f64) -> Option<f64> {
    if !current.is_finite() || !max.is_finite() || max <= 0.0 {
        return None;
    }
    Some((current / max).clamp(0.0, 1.0))
}

/// Which multiplier a byte count is scaled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteConvention {
    /// 1024-based (KiB, MiB, ...), used for memory.
    Binary,
    /// 1000-based (KB, MB, ...), used for storage.
    Decimal,
}

impl ByteConvention {
    /// Platform convention for a field: memory is reported in binary units,
    /// everything else in decimal units.
    pub fn for_field(key: FieldKey) -> Self {
        match key {
            FieldKey::Memory => ByteConvention::Binary,
            _ => ByteConvention::Decimal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hz_to_ghz_is_exact() {
        assert_eq!(hz_to_ghz(3_200_000_000), 3.2);
        assert_eq!(hz_to_ghz(0), 0.0);
    }

    #[test]
    fn test_mhz_paths_agree() {
        assert_eq!(hz_to_ghz(mhz_to_hz(3200)), 3.2);
        assert_eq!(mhz_to_hz(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_used_plus_available_is_total() {
        let total = 16_000_000_000;
        let available = 9_500_000_000;
        let used = used_from_available(total, available);
        assert_eq!(used + available, total);
        assert_eq!(total - used, available);
    }

    #[test]
    fn test_used_never_underflows() {
        assert_eq!(used_from_available(10, 20), 0);
    }

    #[test]
    fn test_pages_to_bytes() {
        assert_eq!(pages_to_bytes(4, 16384), 65536);
        assert_eq!(pages_to_bytes(u64::MAX, 4096), u64::MAX);
    }

    #[test]
    fn test_fraction_bounds() {
        assert_eq!(fraction(50.0, 100.0), Some(0.5));
        assert_eq!(fraction(120.0, 100.0), Some(1.0));
        assert_eq!(fraction(10.0, 0.0), None);
        assert_eq!(fraction(f64::NAN, 100.0), None);
    }

    #[test]
    fn test_field_conventions() {
        assert_eq!(
            ByteConvention::for_field(FieldKey::Memory),
            ByteConvention::Binary
        );
        assert_eq!(
            ByteConvention::for_field(FieldKey::Storage),
            ByteConvention::Decimal
        );
    }
}
