// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures for the dashboard and charts. Every function here is a
//! pure scan over the loaded list; nothing is cached between calls.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Flow {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Flow {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    fn add(&mut self, kind: TransactionKind, amount: Decimal) {
        match kind {
            TransactionKind::Income => self.income += amount,
            TransactionKind::Expense => self.expense += amount,
        }
    }

    fn is_zero(&self) -> bool {
        self.income.is_zero() && self.expense.is_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Dashboard filter; `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
}

/// Negative amounts never reduce a sum.
fn clamped(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

fn sum_of(txs: &[Transaction], kind: TransactionKind) -> Decimal {
    txs.iter()
        .filter(|t| t.kind == kind)
        .map(|t| clamped(t.amount))
        .sum()
}

pub fn total_income(txs: &[Transaction]) -> Decimal {
    sum_of(txs, TransactionKind::Income)
}

pub fn total_expense(txs: &[Transaction]) -> Decimal {
    sum_of(txs, TransactionKind::Expense)
}

pub fn balance(txs: &[Transaction]) -> Decimal {
    total_income(txs) - total_expense(txs)
}

pub fn totals(txs: &[Transaction]) -> Totals {
    let income = total_income(txs);
    let expense = total_expense(txs);
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

pub fn by_category(txs: &[Transaction], kind: TransactionKind) -> BTreeMap<Category, Decimal> {
    let mut map: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in txs.iter().filter(|t| t.kind == kind) {
        *map.entry(t.category).or_insert(Decimal::ZERO) += clamped(t.amount);
    }
    map.retain(|_, v| *v > Decimal::ZERO);
    map
}

/// Daily buckets over the `window_days` days ending on `today` (inclusive).
/// A window reaching past the calendar's range starts at `NaiveDate::MIN`.
pub fn by_day(txs: &[Transaction], window_days: u32, today: NaiveDate) -> BTreeMap<NaiveDate, Flow> {
    if window_days == 0 {
        return BTreeMap::new();
    }
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days) - 1))
        .unwrap_or(NaiveDate::MIN);
    bucket(txs, start, today, |d| d)
}

/// Monthly buckets keyed by the first day of the month, covering the
/// `window_months` calendar months up to and including `today`'s month.
pub fn by_month(
    txs: &[Transaction],
    window_months: u32,
    today: NaiveDate,
) -> BTreeMap<NaiveDate, Flow> {
    let Some(start) = month_window_start(window_months, today) else {
        return BTreeMap::new();
    };
    bucket(txs, start, today, first_of_month)
}

/// `income - expense` per month bucket.
pub fn monthly_net(
    txs: &[Transaction],
    window_months: u32,
    today: NaiveDate,
) -> BTreeMap<NaiveDate, Decimal> {
    by_month(txs, window_months, today)
        .into_iter()
        .map(|(m, f)| (m, f.net()))
        .collect()
}

/// Income vs expenses slices; zero slices are dropped.
pub fn overview(txs: &[Transaction]) -> Vec<(&'static str, Decimal)> {
    let t = totals(txs);
    [("Income", t.income), ("Expenses", t.expense)]
        .into_iter()
        .filter(|(_, v)| *v > Decimal::ZERO)
        .collect()
}

pub fn filter<'a>(txs: &'a [Transaction], f: &TransactionFilter) -> Vec<&'a Transaction> {
    txs.iter()
        .filter(|t| f.kind.is_none_or(|k| t.kind == k))
        .filter(|t| f.category.is_none_or(|c| t.category == c))
        .collect()
}

/// "Aug 2025"
pub fn month_label(month: NaiveDate) -> String {
    month.format("%b %Y").to_string()
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// `None` only for an empty window; oversized windows clamp to `NaiveDate::MIN`.
fn month_window_start(window_months: u32, today: NaiveDate) -> Option<NaiveDate> {
    if window_months == 0 {
        return None;
    }
    let start = first_of_month(today)
        .checked_sub_months(Months::new(window_months - 1))
        .unwrap_or(NaiveDate::MIN);
    Some(start)
}

fn bucket(
    txs: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    key: impl Fn(NaiveDate) -> NaiveDate,
) -> BTreeMap<NaiveDate, Flow> {
    let mut map: BTreeMap<NaiveDate, Flow> = BTreeMap::new();
    for t in txs {
        let day = t.date.date_naive();
        if day < start || day > end {
            continue;
        }
        map.entry(key(day))
            .or_default()
            .add(t.kind, clamped(t.amount));
    }
    map.retain(|_, f| !f.is_zero());
    map
}
