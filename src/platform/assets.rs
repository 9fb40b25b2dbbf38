//! Asset readiness gate
//!
//! The frame and spawn timers must not start before every required asset has
//! reported in. Loaders call [`AssetGate::mark_loaded`] from their completion
//! callbacks, in any order, any number of times.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct AssetGate {
    required: BTreeSet<String>,
    loaded: BTreeSet<String>,
}

impl AssetGate {
    /// Gate waiting on the given asset names. An empty list is ready at once.
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            loaded: BTreeSet::new(),
        }
    }

    /// Record that an asset finished loading.
    ///
    /// Returns `true` only for the call that makes the gate ready.
    pub fn mark_loaded(&mut self, name: &str) -> bool {
        if !self.required.contains(name) {
            log::warn!("Ignoring unknown asset '{}'", name);
            return false;
        }
        let was_ready = self.is_ready();
        if self.loaded.insert(name.to_string()) {
            log::info!(
                "Asset '{}' ready ({}/{})",
                name,
                self.loaded.len(),
                self.required.len()
            );
        }
        !was_ready && self.is_ready()
    }

    pub fn is_ready(&self) -> bool {
        self.loaded.len() == self.required.len()
    }

    /// Names still outstanding
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.required
            .difference(&self.loaded)
            .map(String::as_str)
    }
}
