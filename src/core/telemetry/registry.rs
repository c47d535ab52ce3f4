use std::sync::Arc;

use super::field::FieldKey;
use super::probe::Probe;
use super::probes;
use crate::core::config::Config;
use crate::error::{HostsnapError, Result};

/// Ordered list of probes, each tagged with the field it fills.
///
/// Keys are unique. Once handed to the aggregator the registry is only
/// read, so probes are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct ProbeRegistry {
    entries: Vec<(FieldKey, Arc<dyn Probe>)>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe under `key`.
    pub fn register<P>(&mut self, key: FieldKey, probe: P) -> Result<()>
    where
        P: Probe + 'static,
    {
        self.register_shared(key, Arc::new(probe))
    }

    pub fn register_shared(&mut self, key: FieldKey, probe: Arc<dyn Probe>) -> Result<()> {
        if self.contains(key) {
            return Err(HostsnapError::DuplicateField(key));
        }
        self.entries.push((key, probe));
        Ok(())
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with<P>(mut self, key: FieldKey, probe: P) -> Result<Self>
    where
        P: Probe + 'static,
    {
        self.register(key, probe)?;
        Ok(self)
    }

    /// The standard host probes, minus any field disabled in `config`.
    pub fn standard(config: &Config) -> Self {
        let mut registry = Self::new();
        for key in FieldKey::ALL {
            if config.is_disabled(key) {
                continue;
            }
            registry
                .entries
                .push((key, probes::standard_probe(key, config)));
        }
        registry
    }

    /// Keep only the listed fields, in registry order.
    pub fn retain(&mut self, keys: &[FieldKey]) {
        self.entries.retain(|(key, _)| keys.contains(key));
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &Arc<dyn Probe>)> + '_ {
        self.entries.iter().map(|(key, probe)| (*key, probe))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ProbeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(key, probe)| (key, probe.describe())))
            .finish()
    }
}
