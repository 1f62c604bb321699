// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Six-step entry form for one new transaction.
//!
//! The steps run strictly in order: `Amount → Type → Category → Note → Date →
//! Review`. Three forward transitions are gated (amount, type, category);
//! going back is always allowed. Nothing is persisted until `submit`, and
//! closing the wizard throws the draft away.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Result, ValidationError};
use crate::models::{Category, NewTransaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WizardStep {
    Amount,
    Type,
    Category,
    Note,
    Date,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Amount,
        WizardStep::Type,
        WizardStep::Category,
        WizardStep::Note,
        WizardStep::Date,
        WizardStep::Review,
    ];

    /// 1-based position.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Amount => "Amount",
            WizardStep::Type => "Type",
            WizardStep::Category => "Category",
            WizardStep::Note => "Note",
            WizardStep::Date => "Date",
            WizardStep::Review => "Review",
        }
    }

    fn next(self) -> WizardStep {
        WizardStep::ALL
            .get(self.number())
            .copied()
            .unwrap_or(WizardStep::Review)
    }

    fn prev(self) -> WizardStep {
        match self.number() {
            1 => WizardStep::Amount,
            n => WizardStep::ALL[n - 2],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardForm {
    pub amount: String,
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
    pub note: String,
    pub date: DateTime<Utc>,
}

impl WizardForm {
    fn initial() -> Self {
        WizardForm {
            amount: String::new(),
            kind: Some(TransactionKind::Expense),
            category: Some(Category::default_for(TransactionKind::Expense)),
            note: String::new(),
            date: Utc::now(),
        }
    }
}

/// Parses user input as a positive amount.
pub fn parse_amount(input: &str) -> std::result::Result<Decimal, ValidationError> {
    let s = input.trim();
    let value = s
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| ValidationError::InvalidAmount(s.to_string()))?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount(s.to_string()));
    }
    Ok(value)
}

#[derive(Debug)]
pub struct EntryWizard {
    form: WizardForm,
    step: WizardStep,
    open: bool,
}

impl Default for EntryWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryWizard {
    /// A closed wizard holding the initial form.
    pub fn new() -> Self {
        EntryWizard {
            form: WizardForm::initial(),
            step: WizardStep::Amount,
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.reset();
        self.open = true;
    }

    /// Discards the draft. Cancelling is the same as closing.
    pub fn close(&mut self) {
        self.reset();
        self.open = false;
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    fn reset(&mut self) {
        self.form = WizardForm::initial();
        self.step = WizardStep::Amount;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &WizardForm {
        &self.form
    }

    /// (current step number, step count)
    pub fn progress(&self) -> (usize, usize) {
        (self.step.number(), WizardStep::ALL.len())
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.form.amount = amount.to_string();
    }

    pub fn set_type(&mut self, kind: Option<TransactionKind>) {
        self.form.kind = kind;
    }

    /// Only categories of the selected type can be picked.
    pub fn set_category(&mut self, category: Option<Category>) -> Result<()> {
        if let (Some(c), Some(kind)) = (category, self.form.kind) {
            if !c.belongs_to(kind) {
                return Err(ValidationError::CategoryKindMismatch {
                    category: c.label().to_string(),
                    kind: kind.to_string(),
                }
                .into());
            }
        }
        self.form.category = category;
        Ok(())
    }

    pub fn set_note(&mut self, note: &str) {
        self.form.note = note.to_string();
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) -> Result<()> {
        if date > Utc::now() {
            return Err(ValidationError::FutureDate(date.to_rfc3339()).into());
        }
        self.form.date = date;
        Ok(())
    }

    /// Categories offered at the Category step.
    pub fn category_choices(&self) -> &'static [Category] {
        Category::of_kind(self.form.kind.unwrap_or(TransactionKind::Expense))
    }

    /// Moves forward one step if the current step's gate passes.
    pub fn next(&mut self) -> Result<WizardStep> {
        match self.step {
            WizardStep::Amount => {
                parse_amount(&self.form.amount)?;
            }
            WizardStep::Type => {
                let kind = self.form.kind.ok_or(ValidationError::MissingType)?;
                let fits = self.form.category.is_some_and(|c| c.belongs_to(kind));
                if !fits {
                    let reset = Category::default_for(kind);
                    tracing::debug!(category = %reset, "category reset to match type");
                    self.form.category = Some(reset);
                }
            }
            WizardStep::Category => {
                if self.form.category.is_none() {
                    return Err(ValidationError::MissingCategory.into());
                }
            }
            WizardStep::Note | WizardStep::Date | WizardStep::Review => {}
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.prev();
        self.step
    }

    /// Builds the record from the form, re-checking every gate. A failed gate
    /// moves the wizard back to that step.
    pub fn build(&mut self) -> Result<NewTransaction> {
        let amount = match parse_amount(&self.form.amount) {
            Ok(a) => a,
            Err(e) => {
                self.step = WizardStep::Amount;
                return Err(e.into());
            }
        };
        let Some(kind) = self.form.kind else {
            self.step = WizardStep::Type;
            return Err(ValidationError::MissingType.into());
        };
        let category = match self.form.category {
            Some(c) if c.belongs_to(kind) => c,
            _ => {
                self.step = WizardStep::Category;
                return Err(ValidationError::MissingCategory.into());
            }
        };
        Ok(NewTransaction {
            title: self.form.note.clone(),
            amount,
            kind,
            category,
            date: self.form.date,
        })
    }

    /// Hands the validated record to `persist`. On success the wizard resets
    /// and closes; on failure it stays open at Review with the draft intact.
    pub fn submit<F>(&mut self, persist: F) -> Result<String>
    where
        F: FnOnce(&NewTransaction) -> Result<String>,
    {
        if !self.open {
            return Err(ValidationError::Form("The entry form is not open").into());
        }
        if self.step != WizardStep::Review {
            return Err(ValidationError::Form("Review the transaction before submitting").into());
        }
        let record = self.build()?;
        match persist(&record) {
            Ok(id) => {
                tracing::info!(id = %id, "transaction submitted");
                self.close();
                Ok(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "submission failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_numbered_in_order() {
        assert_eq!(WizardStep::Amount.number(), 1);
        assert_eq!(WizardStep::Review.number(), 6);
        assert_eq!(WizardStep::Review.next(), WizardStep::Review);
        assert_eq!(WizardStep::Amount.prev(), WizardStep::Amount);
        assert_eq!(WizardStep::Date.prev(), WizardStep::Note);
    }

    #[test]
    fn amount_parsing() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), Decimal::new(1250, 2));
        assert_eq!(parse_amount("1e2").unwrap(), Decimal::from(100));
        for bad in ["", "0", "-5", "abc", "0.00"] {
            assert!(parse_amount(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn back_is_unconditional() {
        let mut w = EntryWizard::new();
        w.open();
        w.set_amount("10");
        w.next().unwrap();
        w.set_type(None);
        assert_eq!(w.back(), WizardStep::Amount);
        assert_eq!(w.back(), WizardStep::Amount);
    }
}
