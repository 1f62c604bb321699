// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{Duration, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use super::{
    AuthListener, AuthProvider, DocumentStore, KeyValueStore, Listeners, Snapshot,
    SnapshotListener, Subscription,
};
use crate::error::{AuthErrorCode, FinanceError, Result, ValidationError};
use crate::models::{AuthUser, Category, NewTransaction, Transaction, TransactionKind, UserProfile};
use crate::utils::{digest_hex, from_stored_timestamp, looks_like_email, to_stored_timestamp};

const MIN_PASSWORD_LEN: usize = 6;
const MAX_FAILED_ATTEMPTS: i64 = 5;
const LOCKOUT_MINUTES: i64 = 15;

/// SQLite-backed stand-in for the hosted auth provider, document store and
/// device key-value storage.
pub struct LocalBackend {
    conn: Connection,
    auth_listeners: Listeners<Option<AuthUser>>,
    tx_listeners: RefCell<HashMap<String, Listeners<Snapshot>>>,
    seq: Cell<u64>,
}

impl LocalBackend {
    /// Wraps a connection whose schema was created by `db::init_schema`.
    pub fn new(conn: Connection) -> Self {
        LocalBackend {
            conn,
            auth_listeners: Listeners::new(),
            tx_listeners: RefCell::new(HashMap::new()),
            seq: Cell::new(0),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Marks an account disabled; disabled accounts cannot sign in.
    pub fn set_user_disabled(&self, email: &str, disabled: bool) -> Result<()> {
        let n = self.conn.execute(
            "UPDATE users SET disabled=?1 WHERE email=?2",
            params![disabled, normalize_email(email)],
        )?;
        if n == 0 {
            return Err(FinanceError::Auth(AuthErrorCode::InvalidCredential));
        }
        Ok(())
    }

    fn next_id(&self, scope: &str) -> String {
        let n = self.seq.get() + 1;
        self.seq.set(n);
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        digest_hex(&[scope, &nanos.to_string(), &n.to_string()])[..20].to_string()
    }

    fn user_by_uid(&self, uid: &str) -> Result<Option<AuthUser>> {
        let row = self
            .conn
            .query_row(
                "SELECT uid, email, display_name, created_at FROM users WHERE uid=?1",
                params![uid],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, Option<String>>(2)?,
                        r.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        Ok(row.map(|(uid, email, display_name, created)| AuthUser {
            uid,
            email,
            display_name,
            creation_time: from_stored_timestamp(&created).unwrap_or_else(Utc::now),
        }))
    }

    fn start_session(&self, uid: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO auth_session(id, uid, signed_in_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET uid=excluded.uid, signed_in_at=excluded.signed_in_at",
            params![uid, to_stored_timestamp(&Utc::now())],
        )?;
        Ok(())
    }

    fn notify_auth(&self) {
        let current = self.current_user().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read auth session");
            None
        });
        self.auth_listeners.emit(&current);
    }

    fn listeners_for(&self, uid: &str) -> Listeners<Snapshot> {
        self.tx_listeners
            .borrow_mut()
            .entry(uid.to_string())
            .or_default()
            .clone()
    }

    fn notify_transactions(&self, uid: &str) {
        let listeners = self.tx_listeners.borrow().get(uid).cloned();
        if let Some(listeners) = listeners {
            if listeners.is_empty() {
                return;
            }
            let snapshot = self.query_transactions(uid);
            if let Ok(list) = &snapshot {
                tracing::debug!(uid, count = list.len(), "delivering transaction snapshot");
            }
            listeners.emit(&snapshot);
        }
    }

    /// A user's transactions ordered by date, newest first.
    pub fn query_transactions(&self, uid: &str) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, user_id, title, amount, type, category, date, created_at
             FROM transactions WHERE user_id=?1
             ORDER BY date DESC, created_at DESC, id DESC",
        )?;
        let mut rows = stmt.query(params![uid])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: String = r.get(0)?;
            let amount_s: String = r.get(3)?;
            let kind_s: String = r.get(4)?;
            let category_s: String = r.get(5)?;
            let date_s: String = r.get(6)?;
            let created_s: Option<String> = r.get(7)?;

            let amount = amount_s.parse::<Decimal>().unwrap_or_else(|_| {
                tracing::warn!(id = %id, amount = %amount_s, "unreadable amount, using 0");
                Decimal::ZERO
            });
            let (Ok(kind), Ok(category), Some(date)) = (
                kind_s.parse::<TransactionKind>(),
                category_s.parse::<Category>(),
                from_stored_timestamp(&date_s),
            ) else {
                tracing::warn!(id = %id, "skipping malformed transaction document");
                continue;
            };
            out.push(Transaction {
                id,
                user_id: r.get(1)?,
                title: r.get(2)?,
                amount,
                kind,
                category,
                date,
                created_at: created_s.as_deref().and_then(from_stored_timestamp),
            });
        }
        Ok(out)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn password_digest(salt: &str, password: &str) -> String {
    digest_hex(&[salt, password])
}

impl AuthProvider for LocalBackend {
    fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<AuthUser> {
        let email = normalize_email(email);
        if !looks_like_email(&email) {
            return Err(FinanceError::Auth(AuthErrorCode::InvalidEmail));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FinanceError::Auth(AuthErrorCode::WeakPassword));
        }
        let taken: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM users WHERE email=?1", params![email], |r| {
                r.get(0)
            })
            .optional()?;
        if taken.is_some() {
            return Err(FinanceError::Auth(AuthErrorCode::EmailAlreadyInUse));
        }

        let now = Utc::now();
        let uid = self.next_id(&email);
        let salt = digest_hex(&[&email, &to_stored_timestamp(&now), "salt"])[..32].to_string();
        let display_name = Some(display_name.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        self.conn.execute(
            "INSERT INTO users(uid, email, password_hash, salt, display_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                uid,
                email,
                password_digest(&salt, password),
                salt,
                display_name,
                to_stored_timestamp(&now)
            ],
        )?;
        self.start_session(&uid)?;
        tracing::info!(uid = %uid, "account created");
        self.notify_auth();
        self.user_by_uid(&uid)?
            .ok_or_else(|| FinanceError::Store(format!("user {} vanished after sign-up", uid)))
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        let email = normalize_email(email);
        if !looks_like_email(&email) {
            return Err(FinanceError::Auth(AuthErrorCode::InvalidEmail));
        }
        let row = self
            .conn
            .query_row(
                "SELECT uid, password_hash, salt, disabled, failed_attempts, last_failed_at
                 FROM users WHERE email=?1",
                params![email],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, bool>(3)?,
                        r.get::<_, i64>(4)?,
                        r.get::<_, Option<String>>(5)?,
                    ))
                },
            )
            .optional()?;
        let Some((uid, hash, salt, disabled, failed, last_failed)) = row else {
            return Err(FinanceError::Auth(AuthErrorCode::InvalidCredential));
        };
        if disabled {
            return Err(FinanceError::Auth(AuthErrorCode::UserDisabled));
        }
        let now = Utc::now();
        let locked = failed >= MAX_FAILED_ATTEMPTS
            && last_failed
                .as_deref()
                .and_then(from_stored_timestamp)
                .is_some_and(|t| now - t < Duration::minutes(LOCKOUT_MINUTES));
        if locked {
            return Err(FinanceError::Auth(AuthErrorCode::TooManyRequests));
        }
        if password_digest(&salt, password) != hash {
            self.conn.execute(
                "UPDATE users SET failed_attempts=failed_attempts+1, last_failed_at=?1 WHERE uid=?2",
                params![to_stored_timestamp(&now), uid],
            )?;
            tracing::info!(uid = %uid, "sign-in rejected");
            return Err(FinanceError::Auth(AuthErrorCode::InvalidCredential));
        }
        self.conn.execute(
            "UPDATE users SET failed_attempts=0, last_failed_at=NULL WHERE uid=?1",
            params![uid],
        )?;
        self.start_session(&uid)?;
        tracing::info!(uid = %uid, "signed in");
        self.notify_auth();
        self.user_by_uid(&uid)?
            .ok_or(FinanceError::Auth(AuthErrorCode::InvalidCredential))
    }

    fn sign_out(&self) -> Result<()> {
        self.conn.execute("DELETE FROM auth_session", [])?;
        tracing::info!("signed out");
        self.notify_auth();
        Ok(())
    }

    fn current_user(&self) -> Result<Option<AuthUser>> {
        let uid: Option<String> = self
            .conn
            .query_row("SELECT uid FROM auth_session WHERE id=1", [], |r| r.get(0))
            .optional()?;
        match uid {
            Some(uid) => self.user_by_uid(&uid),
            None => Ok(None),
        }
    }

    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        let sub = self.auth_listeners.register(listener);
        let current = self.current_user().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read auth session");
            None
        });
        self.auth_listeners.emit_latest(&current);
        sub
    }
}

impl DocumentStore for LocalBackend {
    fn subscribe_transactions(&self, uid: &str, listener: SnapshotListener) -> Subscription {
        let listeners = self.listeners_for(uid);
        let sub = listeners.register(listener);
        listeners.emit_latest(&self.query_transactions(uid));
        sub
    }

    fn add_transaction(&self, uid: &str, tx: &NewTransaction) -> Result<String> {
        if tx.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount(tx.amount.to_string()).into());
        }
        if !tx.category.belongs_to(tx.kind) {
            return Err(ValidationError::CategoryKindMismatch {
                category: tx.category.label().to_string(),
                kind: tx.kind.to_string(),
            }
            .into());
        }
        let id = self.next_id(uid);
        self.conn.execute(
            "INSERT INTO transactions(id, user_id, title, amount, type, category, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id,
                uid,
                tx.title,
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.category.label(),
                to_stored_timestamp(&tx.date),
                to_stored_timestamp(&Utc::now())
            ],
        )?;
        tracing::debug!(uid, id = %id, "transaction stored");
        self.notify_transactions(uid);
        Ok(id)
    }

    fn delete_transaction(&self, uid: &str, id: &str) -> Result<()> {
        let n = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, uid],
        )?;
        if n == 0 {
            return Err(FinanceError::Store(format!("Transaction '{}' not found", id)));
        }
        tracing::debug!(uid, id, "transaction deleted");
        self.notify_transactions(uid);
        Ok(())
    }

    fn put_profile(&self, profile: &UserProfile) -> Result<()> {
        self.conn.execute(
            "INSERT INTO profiles(uid, full_name, email, created_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(uid) DO UPDATE SET full_name=excluded.full_name, email=excluded.email",
            params![
                profile.uid,
                profile.full_name,
                profile.email,
                to_stored_timestamp(&profile.created_at)
            ],
        )?;
        Ok(())
    }

    fn profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        let row = self
            .conn
            .query_row(
                "SELECT uid, full_name, email, created_at FROM profiles WHERE uid=?1",
                params![uid],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        Ok(row.map(|(uid, full_name, email, created)| UserProfile {
            uid,
            full_name,
            email,
            created_at: from_stored_timestamp(&created).unwrap_or_else(Utc::now),
        }))
    }
}

impl KeyValueStore for LocalBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
