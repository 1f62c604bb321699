// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::db;
use fintrack::models::{Currency, Settings, SettingsPatch};
use fintrack::settings::{SETTINGS_KEY, SettingsStore, is_first_launch, mark_launched};
use fintrack::store::{KeyValueStore, LocalBackend};

fn backend() -> LocalBackend {
    LocalBackend::new(db::open_in_memory().unwrap())
}

#[test]
fn defaults_when_nothing_saved() {
    let b = backend();
    let store = SettingsStore::load(&b);
    assert_eq!(store.get(), &Settings::default());
    assert_eq!(store.get().currency, Currency::GBP);
    assert_eq!(store.get().language, "English");
    assert!(store.get().notifications_enabled);
}

#[test]
fn currency_update_survives_reload() {
    let b = backend();
    let mut store = SettingsStore::load(&b);
    store
        .update(&SettingsPatch {
            currency: Some(Currency::USD),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(store.get().currency, Currency::USD);

    let reloaded = SettingsStore::load(&b);
    assert_eq!(reloaded.get().currency, Currency::USD);
    assert_eq!(reloaded.get().language, "English");
}

#[test]
fn updates_merge_rather_than_replace() {
    let b = backend();
    let mut store = SettingsStore::load(&b);
    store
        .update(&SettingsPatch {
            notifications_enabled: Some(false),
            ..Default::default()
        })
        .unwrap();
    store
        .update(&SettingsPatch {
            language: Some("French".into()),
            ..Default::default()
        })
        .unwrap();
    let s = SettingsStore::load(&b).get().clone();
    assert!(!s.notifications_enabled);
    assert_eq!(s.language, "French");

    let raw = b.get(SETTINGS_KEY).unwrap().unwrap();
    assert!(raw.contains("\"notificationsEnabled\":false"));
}

#[test]
fn corrupt_blob_falls_back_to_defaults() {
    let b = backend();
    b.set(SETTINGS_KEY, "{not json").unwrap();
    assert_eq!(SettingsStore::load(&b).get(), &Settings::default());
}

#[test]
fn onboarding_flag_round_trip() {
    let b = backend();
    assert!(is_first_launch(&b));
    mark_launched(&b).unwrap();
    assert!(!is_first_launch(&b));
    mark_launched(&b).unwrap();
    assert!(!is_first_launch(&b));
}
