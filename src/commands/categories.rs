// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::{Category, TransactionKind};
use crate::utils::{maybe_print_json, pretty_table};

#[derive(Serialize)]
struct CategoryRow {
    name: &'static str,
    #[serde(rename = "type")]
    kind: TransactionKind,
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let kind = sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionKind>())
            .transpose()?;
        let data: Vec<CategoryRow> = Category::all()
            .filter(|c| kind.is_none_or(|k| c.belongs_to(k)))
            .map(|c| CategoryRow {
                name: c.label(),
                kind: c.kind(),
            })
            .collect();
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
            let rows = data
                .iter()
                .map(|r| vec![r.name.to_string(), r.kind.label().to_string()])
                .collect();
            println!("{}", pretty_table(&["Category", "Type"], rows));
        }
    }
    Ok(())
}
