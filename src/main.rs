// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use fintrack::commands::{self, LocalSession};
use fintrack::store::LocalBackend;
use fintrack::{cli, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::setup_logging(matches.get_flag("verbose"));

    let db_override = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = db::open_or_init(db_override.as_deref())?;
    let backend = LocalBackend::new(conn);
    let mut session = LocalSession::start(&backend, &backend);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Database initialized at {}",
                db::db_path(db_override.as_deref())?.display()
            );
        }
        Some(("auth", sub)) => commands::auth::handle(&mut session, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&backend, &mut session, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("report", sub)) => commands::reports::handle(&backend, &session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&backend, &session, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&backend, sub)?,
        Some(("onboarding", sub)) => commands::onboarding::handle(&backend, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
