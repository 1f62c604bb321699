// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{LocalSession, display_currency, loaded_transactions};
use crate::aggregate;
use crate::models::{Category, Currency, TransactionKind};
use crate::session::balance_status;
use crate::store::LocalBackend;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(backend: &LocalBackend, session: &LocalSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    let ccy = display_currency(backend);
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub, ccy)?,
        Some(("categories", sub)) => categories(session, sub, ccy)?,
        Some(("daily", sub)) => daily(session, sub, ccy)?,
        Some(("monthly", sub)) => monthly(session, sub, ccy)?,
        Some(("overview", sub)) => overview(session, sub, ccy)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct Summary {
    income: Decimal,
    expense: Decimal,
    balance: Decimal,
    count: usize,
    status: &'static str,
}

fn summary(session: &LocalSession<'_>, sub: &clap::ArgMatches, ccy: Currency) -> Result<()> {
    let txs = loaded_transactions(session)?;
    let t = aggregate::totals(&txs);
    let data = Summary {
        income: t.income,
        expense: t.expense,
        balance: t.balance,
        count: txs.len(),
        status: balance_status(t.balance, !txs.is_empty()),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = vec![
            vec!["Money In".into(), fmt_money(&data.income, ccy)],
            vec!["Money Out".into(), fmt_money(&data.expense, ccy)],
            vec!["Balance".into(), fmt_money(&data.balance, ccy)],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
        println!("{}", data.status);
    }
    Ok(())
}

#[derive(Serialize)]
struct CategoryTotal {
    category: Category,
    total: Decimal,
}

fn categories(session: &LocalSession<'_>, sub: &clap::ArgMatches, ccy: Currency) -> Result<()> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionKind>())
        .transpose()?
        .unwrap_or(TransactionKind::Expense);
    let txs = loaded_transactions(session)?;
    let mut data: Vec<CategoryTotal> = aggregate::by_category(&txs, kind)
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    data.sort_by(|a, b| b.total.cmp(&a.total));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No {} data to display", kind.label().to_lowercase());
            return Ok(());
        }
        let rows = data
            .iter()
            .map(|r| vec![r.category.label().to_string(), fmt_money(&r.total, ccy)])
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct PeriodRow {
    period: String,
    income: Decimal,
    expense: Decimal,
    net: Decimal,
}

fn print_periods(sub: &clap::ArgMatches, data: &[PeriodRow], label: &str, ccy: Currency) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.period.clone(),
                    fmt_money(&r.income, ccy),
                    fmt_money(&r.expense, ccy),
                    fmt_money(&r.net, ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&[label, "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}

fn daily(session: &LocalSession<'_>, sub: &clap::ArgMatches, ccy: Currency) -> Result<()> {
    let days = sub.get_one::<u32>("days").copied().unwrap_or(7);
    let txs = loaded_transactions(session)?;
    let data: Vec<PeriodRow> = aggregate::by_day(&txs, days, Utc::now().date_naive())
        .into_iter()
        .map(|(day, f)| PeriodRow {
            period: day.to_string(),
            income: f.income,
            expense: f.expense,
            net: f.net(),
        })
        .collect();
    print_periods(sub, &data, "Day", ccy)
}

fn monthly(session: &LocalSession<'_>, sub: &clap::ArgMatches, ccy: Currency) -> Result<()> {
    let months = sub.get_one::<u32>("months").copied().unwrap_or(6);
    let txs = loaded_transactions(session)?;
    let data: Vec<PeriodRow> = aggregate::by_month(&txs, months, Utc::now().date_naive())
        .into_iter()
        .map(|(month, f)| PeriodRow {
            period: aggregate::month_label(month),
            income: f.income,
            expense: f.expense,
            net: f.net(),
        })
        .collect();
    print_periods(sub, &data, "Month", ccy)
}

#[derive(Serialize)]
struct Slice {
    name: &'static str,
    value: Decimal,
}

fn overview(session: &LocalSession<'_>, sub: &clap::ArgMatches, ccy: Currency) -> Result<()> {
    let txs = loaded_transactions(session)?;
    let data: Vec<Slice> = aggregate::overview(&txs)
        .into_iter()
        .map(|(name, value)| Slice { name, value })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No data to display");
            return Ok(());
        }
        let rows = data
            .iter()
            .map(|s| vec![s.name.to_string(), fmt_money(&s.value, ccy)])
            .collect();
        println!("{}", pretty_table(&["", "Total"], rows));
    }
    Ok(())
}
