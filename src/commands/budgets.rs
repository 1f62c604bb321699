// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{LocalSession, display_currency, loaded_transactions};
use crate::budget;
use crate::store::LocalBackend;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(backend: &LocalBackend, session: &LocalSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    let txs = loaded_transactions(session)?;
    let available = budget::available_income(&txs);
    let buckets = budget::allocate(available);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &buckets)? {
        return Ok(());
    }
    let ccy = display_currency(backend);
    println!("Available income: {}", fmt_money(&available, ccy));
    if buckets.is_empty() {
        println!("No budget data available");
        return Ok(());
    }
    let rows = buckets
        .iter()
        .map(|b| {
            vec![
                b.category.label().to_string(),
                b.percentage.to_string(),
                fmt_money(&b.allocated, ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Bucket", "Share", "Allocated"], rows));
    Ok(())
}
