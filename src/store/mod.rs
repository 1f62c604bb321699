// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Collaborator contracts: authentication, the per-user document store and
//! local key-value persistence. `LocalBackend` implements all three on top of
//! a single SQLite connection.

mod listeners;
mod local;

pub use listeners::{Listeners, Subscription};
pub use local::LocalBackend;

use crate::error::{FinanceError, Result};
use crate::models::{AuthUser, NewTransaction, Transaction, UserProfile};

/// What a transaction subscription delivers: a full replacement list ordered
/// by date descending, or the reason the query failed.
pub type Snapshot = std::result::Result<Vec<Transaction>, FinanceError>;

pub type AuthListener = Box<dyn FnMut(&Option<AuthUser>)>;
pub type SnapshotListener = Box<dyn FnMut(&Snapshot)>;

pub trait AuthProvider {
    fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<AuthUser>;
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser>;
    fn sign_out(&self) -> Result<()>;
    fn current_user(&self) -> Result<Option<AuthUser>>;

    /// Registers `listener`; it is called at once with the current user and
    /// again on every sign-in or sign-out.
    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription;
}

pub trait DocumentStore {
    /// Live query over a user's transactions. The current snapshot is delivered
    /// immediately, then again after every change to that collection.
    fn subscribe_transactions(&self, uid: &str, listener: SnapshotListener) -> Subscription;
    fn add_transaction(&self, uid: &str, tx: &NewTransaction) -> Result<String>;
    fn delete_transaction(&self, uid: &str, id: &str) -> Result<()>;
    fn put_profile(&self, profile: &UserProfile) -> Result<()>;
    fn profile(&self, uid: &str) -> Result<Option<UserProfile>>;
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
