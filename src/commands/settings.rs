// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};

use crate::models::{Currency, SettingsPatch};
use crate::settings::SettingsStore;
use crate::store::LocalBackend;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(backend: &LocalBackend, m: &clap::ArgMatches) -> Result<()> {
    let mut store = SettingsStore::load(backend);
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = store.get();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), s)? {
                let rows = vec![
                    vec!["Language".into(), s.language.clone()],
                    vec![
                        "Currency".into(),
                        format!("{} ({})", s.currency.code(), s.currency.name()),
                    ],
                    vec![
                        "Notifications".into(),
                        if s.notifications_enabled { "on" } else { "off" }.into(),
                    ],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let patch = SettingsPatch {
                language: sub.get_one::<String>("language").cloned(),
                currency: sub
                    .get_one::<String>("currency")
                    .map(|c| c.parse::<Currency>())
                    .transpose()?,
                notifications_enabled: sub
                    .get_one::<String>("notifications")
                    .map(|v| v == "on"),
            };
            if patch.is_empty() {
                bail!("Nothing to change; pass --language, --currency or --notifications");
            }
            let s = store.update(&patch).context("Failed to save settings")?;
            println!(
                "Saved: language={}, currency={}, notifications={}",
                s.language,
                s.currency.code(),
                if s.notifications_enabled { "on" } else { "off" }
            );
        }
        _ => {}
    }
    Ok(())
}
