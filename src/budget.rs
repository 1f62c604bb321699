// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate;
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetCategory {
    Needs,
    Wants,
    Savings,
}

impl BudgetCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetCategory::Needs => "Needs",
            BudgetCategory::Wants => "Wants",
            BudgetCategory::Savings => "Savings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetBucket {
    pub category: BudgetCategory,
    pub allocated: Decimal,
    pub percentage: &'static str,
}

// 50/30/20; static, not derived from spend
const SPLIT: [(BudgetCategory, i64, &str); 3] = [
    (BudgetCategory::Needs, 50, "50%"),
    (BudgetCategory::Wants, 30, "30%"),
    (BudgetCategory::Savings, 20, "20%"),
];

pub fn available_income(txs: &[Transaction]) -> Decimal {
    aggregate::total_income(txs) - aggregate::total_expense(txs)
}

/// Splits positive available income into Needs/Wants/Savings. Nothing is
/// allocated when there is no surplus.
pub fn allocate(available: Decimal) -> Vec<BudgetBucket> {
    if available <= Decimal::ZERO {
        return Vec::new();
    }
    SPLIT
        .iter()
        .map(|&(category, pct, label)| BudgetBucket {
            category,
            allocated: available * Decimal::new(pct, 2),
            percentage: label,
        })
        .collect()
}
