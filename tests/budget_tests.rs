// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rust_decimal::Decimal;

use fintrack::budget::{self, BudgetCategory};
use fintrack::models::{Category, Transaction, TransactionKind};

fn tx(kind: TransactionKind, category: Category, amount: i64) -> Transaction {
    Transaction {
        id: format!("{kind}-{amount}"),
        user_id: "u1".into(),
        title: String::new(),
        amount: Decimal::from(amount),
        kind,
        category,
        date: Utc::now(),
        created_at: None,
    }
}

#[test]
fn splits_fifty_thirty_twenty() {
    let buckets = budget::allocate(Decimal::from(1000));
    let got: Vec<(BudgetCategory, Decimal, &str)> = buckets
        .iter()
        .map(|b| (b.category, b.allocated, b.percentage))
        .collect();
    assert_eq!(
        got,
        vec![
            (BudgetCategory::Needs, Decimal::from(500), "50%"),
            (BudgetCategory::Wants, Decimal::from(300), "30%"),
            (BudgetCategory::Savings, Decimal::from(200), "20%"),
        ]
    );
    let total: Decimal = buckets.iter().map(|b| b.allocated).sum();
    assert_eq!(total, Decimal::from(1000));
}

#[test]
fn no_surplus_means_no_buckets() {
    assert!(budget::allocate(Decimal::ZERO).is_empty());
    assert!(budget::allocate(Decimal::from(-250)).is_empty());
}

#[test]
fn available_income_comes_from_the_transactions() {
    let txs = vec![
        tx(TransactionKind::Income, Category::PartTimeJob, 800),
        tx(TransactionKind::Expense, Category::FoodAndSnacks, 300),
    ];
    let available = budget::available_income(&txs);
    assert_eq!(available, Decimal::from(500));
    let buckets = budget::allocate(available);
    assert_eq!(buckets[0].allocated, Decimal::from(250));
    assert_eq!(buckets[2].allocated, Decimal::from(100));

    let overspent = vec![
        tx(TransactionKind::Income, Category::PartTimeJob, 100),
        tx(TransactionKind::Expense, Category::RentDorm, 400),
    ];
    assert!(budget::allocate(budget::available_income(&overspent)).is_empty());
}
