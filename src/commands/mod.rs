// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod exporter;
pub mod onboarding;
pub mod reports;
pub mod settings;
pub mod transactions;

use anyhow::{Context, Result, bail};

use crate::error::FinanceError;
use crate::models::{Currency, Transaction};
use crate::session::Session;
use crate::settings::SettingsStore;
use crate::store::LocalBackend;

pub type LocalSession<'a> = Session<'a, LocalBackend, LocalBackend>;

/// Value of a required argument.
pub(crate) fn arg_str<'m>(m: &'m clap::ArgMatches, name: &str) -> Result<&'m str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing --{}", name))
}

/// The signed-in user's loaded transactions.
pub(crate) fn loaded_transactions(session: &LocalSession<'_>) -> Result<Vec<Transaction>> {
    match session.feed().require_ready() {
        Err(FinanceError::NotSignedIn) => {
            bail!("Not signed in. Run `fintrack auth signin` first")
        }
        other => Ok(other?),
    }
}

pub(crate) fn display_currency(backend: &LocalBackend) -> Currency {
    SettingsStore::load(backend).get().currency
}
