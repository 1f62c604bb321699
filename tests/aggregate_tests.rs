// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use fintrack::aggregate::{self, TransactionFilter};
use fintrack::models::{Category, Transaction, TransactionKind};

fn tx(id: &str, kind: TransactionKind, category: Category, amount: &str, ymd: (i32, u32, u32)) -> Transaction {
    Transaction {
        id: id.to_string(),
        user_id: "u1".into(),
        title: category.label().to_string(),
        amount: amount.parse().unwrap(),
        kind,
        category,
        date: Utc.with_ymd_and_hms(ymd.0, ymd.1, ymd.2, 9, 30, 0).unwrap(),
        created_at: None,
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("1", TransactionKind::Income, Category::Allowance, "1200", (2025, 8, 1)),
        tx("2", TransactionKind::Income, Category::PartTimeJob, "300.50", (2025, 8, 9)),
        tx("3", TransactionKind::Expense, Category::RentDorm, "650", (2025, 8, 2)),
        tx("4", TransactionKind::Expense, Category::FoodAndSnacks, "12.25", (2025, 8, 10)),
        tx("5", TransactionKind::Expense, Category::FoodAndSnacks, "7.75", (2025, 7, 28)),
        tx("6", TransactionKind::Expense, Category::Transport, "30", (2025, 6, 15)),
    ]
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn balance_is_income_minus_expense() {
    let txs = sample();
    let t = aggregate::totals(&txs);
    assert_eq!(t.income, Decimal::new(150050, 2));
    assert_eq!(t.expense, Decimal::from(700));
    assert_eq!(t.balance, t.income - t.expense);
    assert_eq!(aggregate::balance(&txs), Decimal::new(80050, 2));
}

#[test]
fn category_totals_add_up_to_kind_totals() {
    let txs = sample();
    for kind in TransactionKind::ALL {
        let per_cat: Decimal = aggregate::by_category(&txs, kind).values().copied().sum();
        let total = match kind {
            TransactionKind::Income => aggregate::total_income(&txs),
            TransactionKind::Expense => aggregate::total_expense(&txs),
        };
        assert_eq!(per_cat, total, "{kind}");
    }
    let spend = aggregate::by_category(&txs, TransactionKind::Expense);
    assert_eq!(spend[&Category::FoodAndSnacks], Decimal::from(20));
    assert!(!spend.contains_key(&Category::Allowance));
}

#[test]
fn negative_amounts_count_as_zero() {
    let mut txs = sample();
    txs.push(tx("7", TransactionKind::Expense, Category::PhoneInternet, "-10", (2025, 8, 5)));
    let spend = aggregate::by_category(&txs, TransactionKind::Expense);
    assert!(!spend.contains_key(&Category::PhoneInternet));
    assert_eq!(aggregate::total_expense(&txs), Decimal::from(700));
}

#[test]
fn empty_list_gives_zeroes() {
    let t = aggregate::totals(&[]);
    assert_eq!(t.balance, Decimal::ZERO);
    assert!(aggregate::by_category(&[], TransactionKind::Expense).is_empty());
    assert!(aggregate::overview(&[]).is_empty());
}

#[test]
fn daily_window_includes_today_and_stops_at_the_edge() {
    let txs = sample();
    let days = aggregate::by_day(&txs, 7, d(2025, 8, 10));
    // window is Aug 4..=Aug 10
    let keys: Vec<NaiveDate> = days.keys().copied().collect();
    assert_eq!(keys, vec![d(2025, 8, 9), d(2025, 8, 10)]);
    assert_eq!(days[&d(2025, 8, 9)].income, Decimal::new(30050, 2));
    assert_eq!(days[&d(2025, 8, 10)].expense, Decimal::new(1225, 2));

    let wider = aggregate::by_day(&txs, 9, d(2025, 8, 10));
    assert!(wider.contains_key(&d(2025, 8, 2)));
    assert!(!wider.contains_key(&d(2025, 8, 1)));
}

#[test]
fn monthly_buckets_are_keyed_by_first_of_month() {
    let txs = sample();
    let months = aggregate::by_month(&txs, 2, d(2025, 8, 20));
    let keys: Vec<NaiveDate> = months.keys().copied().collect();
    assert_eq!(keys, vec![d(2025, 7, 1), d(2025, 8, 1)]);
    assert_eq!(months[&d(2025, 7, 1)].expense, Decimal::new(775, 2));
    assert_eq!(months[&d(2025, 8, 1)].net(), Decimal::new(83825, 2));

    let net = aggregate::monthly_net(&txs, 3, d(2025, 8, 20));
    assert_eq!(net[&d(2025, 6, 1)], Decimal::from(-30));
    assert_eq!(aggregate::month_label(d(2025, 6, 1)), "Jun 2025");
}

#[test]
fn overview_drops_empty_slices() {
    let txs = vec![tx("1", TransactionKind::Expense, Category::RentDorm, "100", (2025, 8, 1))];
    assert_eq!(
        aggregate::overview(&txs),
        vec![("Expenses", Decimal::from(100))]
    );
}

#[test]
fn filter_by_kind_and_category() {
    let txs = sample();
    let all = aggregate::filter(&txs, &TransactionFilter::default());
    assert_eq!(all.len(), txs.len());

    let food = aggregate::filter(
        &txs,
        &TransactionFilter {
            kind: Some(TransactionKind::Expense),
            category: Some(Category::FoodAndSnacks),
        },
    );
    let ids: Vec<&str> = food.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "5"]);

    let income = aggregate::filter(
        &txs,
        &TransactionFilter {
            kind: Some(TransactionKind::Income),
            category: None,
        },
    );
    assert_eq!(income.len(), 2);
}

#[test]
fn huge_day_window_covers_everything_without_panicking() {
    let txs = sample();
    let today = d(2025, 8, 10);
    let days = aggregate::by_day(&txs, 200_000_000, today);
    assert_eq!(days.len(), 6);
    assert_eq!(aggregate::by_day(&txs, u32::MAX, today), days);
}

#[test]
fn huge_month_window_is_a_superset_of_smaller_ones() {
    let txs = sample();
    let today = d(2025, 8, 10);
    let year = aggregate::by_month(&txs, 12, today);
    let all = aggregate::by_month(&txs, u32::MAX, today);
    assert_eq!(year.len(), 3);
    assert_eq!(all, year);
    assert_eq!(
        aggregate::monthly_net(&txs, u32::MAX, today)[&d(2025, 6, 1)],
        Decimal::from(-30)
    );
}
