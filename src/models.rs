// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Money In",
            TransactionKind::Expense => "Money Out",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionKind::Income),
            "expense" | "out" => Ok(TransactionKind::Expense),
            _ => Err(ValidationError::UnknownKind(s.trim().to_string())),
        }
    }
}

/// Fixed category set. Income and expense categories never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Part-time Job")]
    PartTimeJob,
    #[serde(rename = "Allowance")]
    Allowance,
    #[serde(rename = "Scholarship")]
    Scholarship,
    #[serde(rename = "Tutoring")]
    Tutoring,
    #[serde(rename = "Selling Stuff")]
    SellingStuff,
    #[serde(rename = "Gifts Received")]
    GiftsReceived,
    #[serde(rename = "Side Hustle")]
    SideHustle,
    #[serde(rename = "Other Income")]
    OtherIncome,
    #[serde(rename = "Food & Snacks")]
    FoodAndSnacks,
    #[serde(rename = "Books & Supplies")]
    BooksAndSupplies,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Social Outings")]
    SocialOutings,
    #[serde(rename = "Subscriptions")]
    Subscriptions,
    #[serde(rename = "Rent/Dorm")]
    RentDorm,
    #[serde(rename = "Phone/Internet")]
    PhoneInternet,
    #[serde(rename = "Clothing")]
    Clothing,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Study Tools")]
    StudyTools,
    #[serde(rename = "Fees (Uni/College)")]
    Fees,
    #[serde(rename = "Savings Contribution")]
    SavingsContribution,
    #[serde(rename = "Other Expense")]
    OtherExpense,
}

const INCOME_CATEGORIES: [Category; 8] = [
    Category::PartTimeJob,
    Category::Allowance,
    Category::Scholarship,
    Category::Tutoring,
    Category::SellingStuff,
    Category::GiftsReceived,
    Category::SideHustle,
    Category::OtherIncome,
];

const EXPENSE_CATEGORIES: [Category; 14] = [
    Category::FoodAndSnacks,
    Category::BooksAndSupplies,
    Category::Transport,
    Category::Entertainment,
    Category::SocialOutings,
    Category::Subscriptions,
    Category::RentDorm,
    Category::PhoneInternet,
    Category::Clothing,
    Category::PersonalCare,
    Category::StudyTools,
    Category::Fees,
    Category::SavingsContribution,
    Category::OtherExpense,
];

impl Category {
    /// Categories of one kind, in display order. The first entry is the default.
    pub fn of_kind(kind: TransactionKind) -> &'static [Category] {
        match kind {
            TransactionKind::Income => &INCOME_CATEGORIES,
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
        }
    }

    pub fn default_for(kind: TransactionKind) -> Category {
        Category::of_kind(kind)[0]
    }

    pub fn all() -> impl Iterator<Item = Category> {
        INCOME_CATEGORIES.into_iter().chain(EXPENSE_CATEGORIES)
    }

    pub fn kind(&self) -> TransactionKind {
        if INCOME_CATEGORIES.contains(self) {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    pub fn belongs_to(&self, kind: TransactionKind) -> bool {
        self.kind() == kind
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::PartTimeJob => "Part-time Job",
            Category::Allowance => "Allowance",
            Category::Scholarship => "Scholarship",
            Category::Tutoring => "Tutoring",
            Category::SellingStuff => "Selling Stuff",
            Category::GiftsReceived => "Gifts Received",
            Category::SideHustle => "Side Hustle",
            Category::OtherIncome => "Other Income",
            Category::FoodAndSnacks => "Food & Snacks",
            Category::BooksAndSupplies => "Books & Supplies",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::SocialOutings => "Social Outings",
            Category::Subscriptions => "Subscriptions",
            Category::RentDorm => "Rent/Dorm",
            Category::PhoneInternet => "Phone/Internet",
            Category::Clothing => "Clothing",
            Category::PersonalCare => "Personal Care",
            Category::StudyTools => "Study Tools",
            Category::Fees => "Fees (Uni/College)",
            Category::SavingsContribution => "Savings Contribution",
            Category::OtherExpense => "Other Expense",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::all()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownCategory(wanted.to_string()))
    }
}

/// A stored transaction as delivered by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub date: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated record ready to hand to the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub date: DateTime<Utc>,
}

impl NewTransaction {
    /// Blank notes are stored under the category label.
    pub fn resolved_title(&self) -> String {
        let t = self.title.trim();
        if t.is_empty() {
            self.category.label().to_string()
        } else {
            t.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    GBP,
    NGN,
    USD,
    EUR,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::GBP, Currency::NGN, Currency::USD, Currency::EUR];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::NGN => "NGN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::GBP => "British Pound",
            Currency::NGN => "Nigerian Naira",
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let up = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == up)
            .ok_or(ValidationError::UnknownCurrency(up))
    }
}

/// Per-device display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub language: String,
    pub currency: Currency,
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: "English".to_string(),
            currency: Currency::GBP,
            notifications_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.language.is_none() && self.currency.is_none() && self.notifications_enabled.is_none()
    }
}

impl Settings {
    pub fn merged(&self, patch: &SettingsPatch) -> Settings {
        Settings {
            language: patch.language.clone().unwrap_or_else(|| self.language.clone()),
            currency: patch.currency.unwrap_or(self.currency),
            notifications_enabled: patch
                .notifications_enabled
                .unwrap_or(self.notifications_enabled),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub creation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_sets_do_not_overlap() {
        for c in Category::of_kind(TransactionKind::Income) {
            assert!(!Category::of_kind(TransactionKind::Expense).contains(c));
            assert_eq!(c.kind(), TransactionKind::Income);
        }
        assert_eq!(Category::all().count(), 22);
        assert_eq!(
            Category::default_for(TransactionKind::Expense),
            Category::FoodAndSnacks
        );
    }

    #[test]
    fn category_parses_labels_case_insensitively() {
        assert_eq!("rent/dorm".parse::<Category>().unwrap(), Category::RentDorm);
        assert_eq!(
            " Fees (Uni/College) ".parse::<Category>().unwrap(),
            Category::Fees
        );
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn settings_blob_uses_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(
            json,
            r#"{"language":"English","currency":"GBP","notificationsEnabled":true}"#
        );
    }

    #[test]
    fn blank_title_falls_back_to_category() {
        let tx = NewTransaction {
            title: "   ".into(),
            amount: Decimal::new(450, 2),
            kind: TransactionKind::Expense,
            category: Category::Transport,
            date: Utc::now(),
        };
        assert_eq!(tx.resolved_title(), "Transport");
    }
}
