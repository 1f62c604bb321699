// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result, bail};

use super::{LocalSession, arg_str, loaded_transactions};
use super::transactions::TransactionRow;
use crate::models::Transaction;

pub fn handle(session: &LocalSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = arg_str(sub, "format")?.to_lowercase();
            let out = arg_str(sub, "out")?;
            let txs = loaded_transactions(session)?;
            export_transactions(&txs, &fmt, Path::new(out))?;
            println!("Exported {} transactions to {}", txs.len(), out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes `txs` to `out` as `csv` or pretty `json`, newest first.
pub fn export_transactions(txs: &[Transaction], fmt: &str, out: &Path) -> Result<()> {
    let rows: Vec<TransactionRow> = txs.iter().map(TransactionRow::from).collect();
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out.display()))?;
            wtr.write_record(["id", "date", "title", "type", "category", "amount"])?;
            for r in &rows {
                wtr.write_record([
                    r.id.as_str(),
                    r.date.as_str(),
                    r.title.as_str(),
                    r.kind.as_str(),
                    r.category.label(),
                    r.amount.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("Failed to write {}", out.display()))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}
