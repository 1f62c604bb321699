// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Signed-in session: follows the auth state, keeps the transaction feed
//! attached to the current user and routes create/delete to the store.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::{FinanceError, Result, ValidationError};
use crate::feed::{FeedState, TransactionFeed};
use crate::models::{AuthUser, NewTransaction, UserProfile};
use crate::store::{AuthProvider, DocumentStore, Subscription};
use crate::utils::looks_like_email;

const MIN_PASSWORD_LEN: usize = 6;

pub const RESET_REQUESTED: &str =
    "If an account exists for this email, a password reset link has been sent.";

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
}

fn check_email(email: &str) -> std::result::Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Form("Please enter your email address."));
    }
    if !email.contains('@') || !email.contains('.') || !looks_like_email(email) {
        return Err(ValidationError::Form("Please enter a valid email address."));
    }
    Ok(())
}

impl SignInForm {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::Form(
                "Password must be at least 6 characters long.",
            ));
        }
        Ok(())
    }
}

impl SignUpForm {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        SignInForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .validate()?;
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::Form("Please enter your full name."));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::Form("Passwords do not match."));
        }
        Ok(())
    }
}

pub struct Session<'a, A: AuthProvider + ?Sized, D: DocumentStore + ?Sized> {
    auth: &'a A,
    docs: &'a D,
    user: Rc<RefCell<Option<AuthUser>>>,
    feed: RefCell<TransactionFeed>,
    _auth_subscription: Subscription,
}

impl<'a, A: AuthProvider + ?Sized, D: DocumentStore + ?Sized> Session<'a, A, D> {
    /// Starts observing the auth state and attaches the feed if someone is
    /// already signed in. The listener only records the user; the feed is
    /// brought in line with it before every read.
    pub fn start(auth: &'a A, docs: &'a D) -> Self {
        let user = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&user);
        let sub = auth.on_auth_state_changed(Box::new(move |u: &Option<AuthUser>| {
            tracing::debug!(uid = ?u.as_ref().map(|u| &u.uid), "auth state changed");
            *sink.borrow_mut() = u.clone();
        }));
        let session = Session {
            auth,
            docs,
            user,
            feed: RefCell::new(TransactionFeed::new()),
            _auth_subscription: sub,
        };
        session.sync_feed();
        session
    }

    /// Re-attaches or detaches the feed to match the observed user.
    fn sync_feed(&self) {
        let uid = self.user.borrow().as_ref().map(|u| u.uid.clone());
        let mut feed = self.feed.borrow_mut();
        match uid {
            Some(uid) if feed.attached_uid() != Some(uid.as_str()) => {
                tracing::debug!(uid = %uid, "attaching transaction feed");
                feed.attach(self.docs, &uid)
            }
            Some(_) => {}
            None if feed.attached_uid().is_some() => feed.detach(),
            None => {}
        }
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.user.borrow().clone()
    }

    fn require_user(&self) -> Result<AuthUser> {
        self.current_user().ok_or(FinanceError::NotSignedIn)
    }

    /// The feed for the currently observed user. Do not hold the guard across
    /// other session calls.
    pub fn feed(&self) -> Ref<'_, TransactionFeed> {
        self.sync_feed();
        self.feed.borrow()
    }

    pub fn feed_state(&self) -> FeedState {
        self.feed().state()
    }

    pub fn sign_up(&mut self, form: &SignUpForm) -> Result<AuthUser> {
        form.validate()?;
        let full_name = form.full_name.trim();
        let user = self.auth.sign_up(form.email.trim(), &form.password, full_name)?;
        self.docs.put_profile(&UserProfile {
            uid: user.uid.clone(),
            full_name: full_name.to_string(),
            email: user.email.clone(),
            created_at: Utc::now(),
        })?;
        self.sync_feed();
        Ok(user)
    }

    pub fn sign_in(&mut self, form: &SignInForm) -> Result<AuthUser> {
        form.validate()?;
        let user = self.auth.sign_in(form.email.trim(), &form.password)?;
        self.sync_feed();
        Ok(user)
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.feed.borrow_mut().detach();
        self.auth.sign_out()?;
        self.sync_feed();
        Ok(())
    }

    /// Validates the address and acknowledges the request without revealing
    /// whether an account exists.
    pub fn request_password_reset(&self, email: &str) -> Result<&'static str> {
        check_email(email)?;
        tracing::info!("password reset requested");
        Ok(RESET_REQUESTED)
    }

    /// Persists a new record for the signed-in user. A blank note is stored
    /// as the category label.
    pub fn add_transaction(&mut self, tx: &NewTransaction) -> Result<String> {
        let user = self.require_user()?;
        let stored = NewTransaction {
            title: tx.resolved_title(),
            ..tx.clone()
        };
        let id = self.docs.add_transaction(&user.uid, &stored)?;
        Ok(id)
    }

    /// Deletes after `confirm` agrees. Returns whether anything was deleted.
    pub fn delete_transaction(
        &mut self,
        id: &str,
        confirm: impl FnOnce() -> bool,
    ) -> Result<bool> {
        let user = self.require_user()?;
        if !confirm() {
            return Ok(false);
        }
        self.docs.delete_transaction(&user.uid, id)?;
        Ok(true)
    }

    /// The profile's full name, if the profile document has one.
    pub fn display_name(&self) -> Option<String> {
        let user = self.current_user()?;
        match self.docs.profile(&user.uid) {
            Ok(Some(p)) if !p.full_name.trim().is_empty() => Some(p.full_name),
            Ok(_) => {
                tracing::debug!(uid = %user.uid, "no profile document");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching user details");
                None
            }
        }
    }

    pub fn greeting(&self, hour: u32) -> String {
        greeting(hour, self.display_name().as_deref())
    }
}

pub fn greeting(hour: u32, name: Option<&str>) -> String {
    let part = if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    };
    match name {
        Some(n) => format!("{}, {}!", part, n),
        None => format!("{}!", part),
    }
}

pub fn balance_status(balance: Decimal, has_transactions: bool) -> &'static str {
    if balance > Decimal::from(500) {
        "You're doing great!"
    } else if balance < Decimal::ZERO {
        "Let's get back on track!"
    } else if !has_transactions {
        "Ready to track your first transaction?"
    } else {
        "Keep up the good work!"
    }
}

/// "Ada Lovelace" -> "AL"
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_by_hour() {
        assert_eq!(greeting(8, None), "Good Morning!");
        assert_eq!(greeting(12, Some("Ada")), "Good Afternoon, Ada!");
        assert_eq!(greeting(21, None), "Good Evening!");
    }

    #[test]
    fn balance_status_thresholds() {
        assert_eq!(balance_status(Decimal::from(501), true), "You're doing great!");
        assert_eq!(balance_status(Decimal::from(500), true), "Keep up the good work!");
        assert_eq!(balance_status(Decimal::from(-1), true), "Let's get back on track!");
        assert_eq!(
            balance_status(Decimal::ZERO, false),
            "Ready to track your first transaction?"
        );
    }

    #[test]
    fn initials_from_full_name() {
        assert_eq!(initials("ada  lovelace"), "AL");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn sign_up_form_rules() {
        let mut form = SignUpForm {
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            full_name: "Ada".into(),
        };
        assert!(form.validate().is_ok());
        form.confirm_password = "secret2".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Form("Passwords do not match."))
        );
        form.full_name = "  ".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Form("Please enter your full name."))
        );
        form.password = "123".into();
        assert!(form.validate().unwrap_err().to_string().contains("6 characters"));
        form.email = "nobody".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Form("Please enter a valid email address."))
        );
    }
}
