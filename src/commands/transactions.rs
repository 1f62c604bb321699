// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use super::{LocalSession, arg_str, display_currency, loaded_transactions};
use crate::aggregate::{self, TransactionFilter};
use crate::models::{Category, Transaction, TransactionKind};
use crate::store::LocalBackend;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, to_stored_timestamp};
use crate::wizard::EntryWizard;

pub fn handle(
    backend: &LocalBackend,
    session: &mut LocalSession<'_>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(backend, session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn advance(wizard: &mut EntryWizard) -> Result<()> {
    let (n, total) = wizard.progress();
    let title = wizard.step().title();
    wizard
        .next()
        .with_context(|| format!("Step {} of {} ({})", n, total, title))?;
    Ok(())
}

/// Feeds the flags through the entry steps in order, so the same gates
/// apply as for interactive entry.
pub fn fill_wizard(wizard: &mut EntryWizard, sub: &clap::ArgMatches) -> Result<()> {
    wizard.open();
    wizard.set_amount(arg_str(sub, "amount")?);
    advance(wizard)?;

    if let Some(kind) = sub.get_one::<String>("type") {
        wizard.set_type(Some(kind.parse::<TransactionKind>()?));
    }
    advance(wizard)?;

    if let Some(cat) = sub.get_one::<String>("category") {
        wizard.set_category(Some(cat.parse::<Category>()?))?;
    }
    advance(wizard)?;

    if let Some(note) = sub.get_one::<String>("note") {
        wizard.set_note(note);
    }
    advance(wizard)?;

    if let Some(date) = sub.get_one::<String>("date") {
        wizard.set_date(parse_date(date)?)?;
    }
    advance(wizard)?;
    Ok(())
}

fn add(session: &mut LocalSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let mut wizard = EntryWizard::new();
    fill_wizard(&mut wizard, sub)?;
    let form = wizard.form().clone();
    let id = wizard.submit(|record| session.add_transaction(record))?;
    println!(
        "Recorded {} {} ({}) on {} [{}]",
        form.kind.map(|k| k.label()).unwrap_or_default(),
        form.amount.trim(),
        form.category.map(|c| c.label()).unwrap_or_default(),
        form.date.date_naive(),
        id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id.clone(),
            date: to_stored_timestamp(&t.date),
            title: t.title.clone(),
            kind: t.kind,
            category: t.category,
            amount: t.amount.to_string(),
        }
    }
}

fn list(backend: &LocalBackend, session: &LocalSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let txs = loaded_transactions(session)?;
    let filter = TransactionFilter {
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionKind>())
            .transpose()?,
        category: sub
            .get_one::<String>("category")
            .map(|s| s.parse::<Category>())
            .transpose()?,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    let selected: Vec<&Transaction> = aggregate::filter(&txs, &filter)
        .into_iter()
        .take(limit)
        .collect();
    let data: Vec<TransactionRow> = selected.iter().copied().map(TransactionRow::from).collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No transactions yet");
            return Ok(());
        }
        let ccy = display_currency(backend);
        let rows = selected
            .iter()
            .map(|t| {
                let sign = match t.kind {
                    TransactionKind::Income => "+",
                    TransactionKind::Expense => "-",
                };
                vec![
                    t.date.date_naive().to_string(),
                    t.title.clone(),
                    t.category.label().to_string(),
                    format!("{}{}", sign, fmt_money(&t.amount, ccy)),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Title", "Category", "Amount", "ID"], rows)
        );
    }
    Ok(())
}

fn confirm_on_stdin(id: &str) -> bool {
    print!("Delete transaction {}? This can't be undone. [y/N] ", id);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn remove(session: &mut LocalSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg_str(sub, "id")?;
    let skip_prompt = sub.get_flag("yes");
    let deleted = session
        .delete_transaction(id, || skip_prompt || confirm_on_stdin(id))
        .with_context(|| format!("Failed to delete transaction {}", id))?;
    if deleted {
        println!("Deleted {}", id);
    } else {
        println!("Kept {}", id);
    }
    Ok(())
}
