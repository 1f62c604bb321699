// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{FinanceError, Result};
use crate::models::Transaction;
use crate::store::{DocumentStore, Snapshot, Subscription};

/// What the transaction views can show. Signed-out, loading and empty are
/// three different states.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    SignedOut,
    Loading,
    Ready(Vec<Transaction>),
    Failed(String),
}

impl FeedState {
    pub fn is_empty(&self) -> bool {
        matches!(self, FeedState::Ready(list) if list.is_empty())
    }
}

/// Client-side cache of the signed-in user's transactions. The subscription
/// callback is the only writer of the list.
pub struct TransactionFeed {
    state: Rc<RefCell<FeedState>>,
    uid: Option<String>,
    subscription: Option<Subscription>,
}

impl Default for TransactionFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionFeed {
    pub fn new() -> Self {
        TransactionFeed {
            state: Rc::new(RefCell::new(FeedState::SignedOut)),
            uid: None,
            subscription: None,
        }
    }

    pub fn attached_uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Starts mirroring `uid`'s collection, replacing any previous subscription.
    pub fn attach<D: DocumentStore + ?Sized>(&mut self, docs: &D, uid: &str) {
        self.detach();
        *self.state.borrow_mut() = FeedState::Loading;
        let sink = Rc::clone(&self.state);
        let sub = docs.subscribe_transactions(
            uid,
            Box::new(move |snapshot: &Snapshot| {
                let next = match snapshot {
                    Ok(list) => FeedState::Ready(list.clone()),
                    Err(e) => {
                        tracing::error!(error = %e, "error fetching transactions");
                        FeedState::Failed("Failed to load transactions.".to_string())
                    }
                };
                *sink.borrow_mut() = next;
            }),
        );
        self.uid = Some(uid.to_string());
        self.subscription = Some(sub);
    }

    /// Cancels the subscription and forgets the cached list.
    pub fn detach(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.cancel();
        }
        self.uid = None;
        *self.state.borrow_mut() = FeedState::SignedOut;
    }

    pub fn state(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Loaded transactions; empty in every state but `Ready`.
    pub fn transactions(&self) -> Vec<Transaction> {
        match &*self.state.borrow() {
            FeedState::Ready(list) => list.clone(),
            _ => Vec::new(),
        }
    }

    pub fn require_ready(&self) -> Result<Vec<Transaction>> {
        match &*self.state.borrow() {
            FeedState::SignedOut => Err(FinanceError::NotSignedIn),
            FeedState::Loading => Err(FinanceError::Loading),
            FeedState::Failed(msg) => Err(FinanceError::Store(msg.clone())),
            FeedState::Ready(list) => Ok(list.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTransaction, UserProfile};
    use crate::store::SnapshotListener;

    /// Never delivers a snapshot.
    struct Silent;

    impl DocumentStore for Silent {
        fn subscribe_transactions(&self, _uid: &str, _listener: SnapshotListener) -> Subscription {
            Subscription::new(|| {})
        }
        fn add_transaction(&self, _uid: &str, _tx: &NewTransaction) -> Result<String> {
            Err(FinanceError::Store("read-only".into()))
        }
        fn delete_transaction(&self, _uid: &str, _id: &str) -> Result<()> {
            Ok(())
        }
        fn put_profile(&self, _profile: &UserProfile) -> Result<()> {
            Ok(())
        }
        fn profile(&self, _uid: &str) -> Result<Option<UserProfile>> {
            Ok(None)
        }
    }

    #[test]
    fn signed_out_loading_and_empty_are_distinct() {
        let mut feed = TransactionFeed::new();
        assert!(matches!(feed.require_ready(), Err(FinanceError::NotSignedIn)));

        feed.attach(&Silent, "u1");
        assert_eq!(feed.state(), FeedState::Loading);
        assert!(matches!(feed.require_ready(), Err(FinanceError::Loading)));
        assert!(feed.transactions().is_empty());

        feed.detach();
        assert_eq!(feed.state(), FeedState::SignedOut);
    }
}
