use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

use super::field::FieldKey;
use super::types::{FieldValue, ProbeOutcome};

/// Outcome of one field together with how long its probe took.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    pub outcome: ProbeOutcome,
    pub elapsed: Duration,
}

/// Complete, immutable result of one aggregation pass.
///
/// Holds exactly one entry per registered probe; a probe that failed is
/// present as a `Failed` or `Unavailable` outcome, never missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    collected_at: DateTime<Utc>,
    fields: BTreeMap<FieldKey, FieldReport>,
}

impl Snapshot {
    pub(crate) fn new(collected_at: DateTime<Utc>, fields: BTreeMap<FieldKey, FieldReport>) -> Self {
        Self {
            collected_at,
            fields,
        }
    }

    pub fn collected_at(&self) -> DateTime<Utc> {
        self.collected_at
    }

    pub fn get(&self, key: FieldKey) -> Option<&ProbeOutcome> {
        self.fields.get(&key).map(|report| &report.outcome)
    }

    /// The value of `key` if its probe succeeded.
    pub fn value(&self, key: FieldKey) -> Option<&FieldValue> {
        self.get(key).and_then(ProbeOutcome::value)
    }

    pub fn report(&self, key: FieldKey) -> Option<&FieldReport> {
        self.fields.get(&key)
    }

    pub fn elapsed(&self, key: FieldKey) -> Option<Duration> {
        self.fields.get(&key).map(|report| report.elapsed)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(&key)
    }

    /// Keys in `FieldKey` order.
    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &ProbeOutcome)> + '_ {
        self.fields
            .iter()
            .map(|(key, report)| (*key, &report.outcome))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn ok_count(&self) -> usize {
        self.count(ProbeOutcome::is_ok)
    }

    pub fn unavailable_count(&self) -> usize {
        self.count(ProbeOutcome::is_unavailable)
    }

    pub fn failed_count(&self) -> usize {
        self.count(ProbeOutcome::is_failed)
    }

    fn count(&self, pred: fn(&ProbeOutcome) -> bool) -> usize {
        self.fields
            .values()
            .filter(|report| pred(&report.outcome))
            .count()
    }
}

#[derive(Serialize)]
struct FieldEntry<'a> {
    #[serde(flatten)]
    outcome: &'a ProbeOutcome,
    elapsed_ms: u64,
}

struct Fields<'a>(&'a BTreeMap<FieldKey, FieldReport>);

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, report) in self.0 {
            let entry = FieldEntry {
                outcome: &report.outcome,
                elapsed_ms: report.elapsed.as_millis() as u64,
            };
            map.serialize_entry(key.as_str(), &entry)?;
        }
        map.end()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            collected_at: DateTime<Utc>,
            fields: Fields<'a>,
        }

        Repr {
            collected_at: self.collected_at,
            fields: Fields(&self.fields),
        }
        .serialize(serializer)
    }
}
