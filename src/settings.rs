// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::{Settings, SettingsPatch};
use crate::store::KeyValueStore;

pub const SETTINGS_KEY: &str = "appSettings";
pub const HAS_LAUNCHED_KEY: &str = "hasLaunched";

/// Device preferences. `update` is the only writer.
pub struct SettingsStore<'a, K: KeyValueStore + ?Sized> {
    kv: &'a K,
    current: Settings,
}

impl<'a, K: KeyValueStore + ?Sized> SettingsStore<'a, K> {
    /// Reads the saved blob; a missing or unreadable blob yields the defaults.
    pub fn load(kv: &'a K) -> Self {
        let current = match kv.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Settings>(&raw).unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to parse saved settings, using defaults");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load settings, using defaults");
                Settings::default()
            }
        };
        tracing::debug!(?current, "settings loaded");
        SettingsStore { kv, current }
    }

    pub fn get(&self) -> &Settings {
        &self.current
    }

    /// Merges `patch` onto the current settings and saves the result as one
    /// blob. The in-memory copy only changes once the save succeeded.
    pub fn update(&mut self, patch: &SettingsPatch) -> Result<&Settings> {
        let updated = self.current.merged(patch);
        self.kv.set(SETTINGS_KEY, &serde_json::to_string(&updated)?)?;
        tracing::info!(?updated, "settings updated");
        self.current = updated;
        Ok(&self.current)
    }
}

/// True until `mark_launched` has been called on this device. Read failures
/// count as a first launch.
pub fn is_first_launch<K: KeyValueStore + ?Sized>(kv: &K) -> bool {
    match kv.get(HAS_LAUNCHED_KEY) {
        Ok(v) => v.is_none(),
        Err(e) => {
            tracing::error!(error = %e, "failed to read launch flag");
            true
        }
    }
}

pub fn mark_launched<K: KeyValueStore + ?Sized>(kv: &K) -> Result<()> {
    kv.set(HAS_LAUNCHED_KEY, "true")
}
