// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinanceError>;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", .0.message())]
    Auth(AuthErrorCode),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Transactions are still loading")]
    Loading,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FinanceError {
    /// True for errors raised before any collaborator was called.
    pub fn is_validation(&self) -> bool {
        matches!(self, FinanceError::Validation(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid amount '{0}': enter a valid amount greater than 0")]
    InvalidAmount(String),

    #[error("Select a type: is this money in or out?")]
    MissingType,

    #[error("Select a category: what kind of transaction is this?")]
    MissingCategory,

    #[error("Category '{category}' is not a {kind} category")]
    CategoryKindMismatch { category: String, kind: String },

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown transaction type '{0}', expected income or expense")]
    UnknownKind(String),

    #[error("Unsupported currency '{0}'")]
    UnknownCurrency(String),

    #[error("Date {0} is in the future")]
    FutureDate(String),

    #[error("{0}")]
    Form(&'static str),
}

/// Failure codes an authentication provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    InvalidEmail,
    UserDisabled,
    InvalidCredential,
    EmailAlreadyInUse,
    WeakPassword,
    OperationNotAllowed,
    TooManyRequests,
    Unknown,
}

impl AuthErrorCode {
    /// Maps a provider code such as `auth/invalid-email`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "auth/invalid-email" => AuthErrorCode::InvalidEmail,
            "auth/user-disabled" => AuthErrorCode::UserDisabled,
            "auth/user-not-found" | "auth/invalid-credential" | "auth/wrong-password" => {
                AuthErrorCode::InvalidCredential
            }
            "auth/email-already-in-use" => AuthErrorCode::EmailAlreadyInUse,
            "auth/weak-password" => AuthErrorCode::WeakPassword,
            "auth/operation-not-allowed" => AuthErrorCode::OperationNotAllowed,
            "auth/too-many-requests" => AuthErrorCode::TooManyRequests,
            _ => AuthErrorCode::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
            AuthErrorCode::UserDisabled => "auth/user-disabled",
            AuthErrorCode::InvalidCredential => "auth/invalid-credential",
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::OperationNotAllowed => "auth/operation-not-allowed",
            AuthErrorCode::TooManyRequests => "auth/too-many-requests",
            AuthErrorCode::Unknown => "auth/unknown",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthErrorCode::InvalidEmail => "Please enter a valid email address.",
            AuthErrorCode::UserDisabled => "This user account has been disabled.",
            AuthErrorCode::InvalidCredential => "Invalid email or password. Please try again.",
            AuthErrorCode::EmailAlreadyInUse => {
                "This email address is already registered. Please sign in or use a different email."
            }
            AuthErrorCode::WeakPassword => {
                "Password is too weak. It must be at least 6 characters long."
            }
            AuthErrorCode::OperationNotAllowed => {
                "Email/password sign-in is not enabled. Please contact support."
            }
            AuthErrorCode::TooManyRequests => {
                "Too many unsuccessful login attempts. Please try again later or reset your password."
            }
            AuthErrorCode::Unknown => "An unexpected error occurred. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_displays_friendly_message() {
        let err = FinanceError::Auth(AuthErrorCode::WeakPassword);
        assert!(err.to_string().contains("at least 6 characters"));
    }

    #[test]
    fn provider_codes_map_back_and_forth() {
        assert_eq!(
            AuthErrorCode::from_code("auth/user-not-found"),
            AuthErrorCode::InvalidCredential
        );
        assert_eq!(
            AuthErrorCode::from_code(AuthErrorCode::TooManyRequests.code()),
            AuthErrorCode::TooManyRequests
        );
        assert_eq!(AuthErrorCode::from_code("boom"), AuthErrorCode::Unknown);
    }

    #[test]
    fn validation_errors_are_flagged() {
        let err: FinanceError = ValidationError::MissingType.into();
        assert!(err.is_validation());
        assert!(!FinanceError::NotSignedIn.is_validation());
    }
}
