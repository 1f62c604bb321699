// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::cli::build_cli;
use fintrack::commands::transactions::fill_wizard;
use fintrack::models::{Category, TransactionKind};
use fintrack::wizard::{EntryWizard, WizardStep};

fn tx_add_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["fintrack", "tx", "add"];
    argv.extend_from_slice(args);
    let m = build_cli().try_get_matches_from(argv).unwrap();
    let (_, tx) = m.subcommand().unwrap();
    let (_, add) = tx.subcommand().unwrap();
    add.clone()
}

#[test]
fn cli_definition_is_consistent() {
    build_cli().debug_assert();
}

#[test]
fn global_db_flag_is_accepted_after_subcommands() {
    let m = build_cli()
        .try_get_matches_from(["fintrack", "report", "daily", "--days", "14", "--db", "/tmp/x.sqlite"])
        .unwrap();
    assert_eq!(m.get_one::<String>("db").map(String::as_str), Some("/tmp/x.sqlite"));
    let (_, report) = m.subcommand().unwrap();
    let (name, daily) = report.subcommand().unwrap();
    assert_eq!(name, "daily");
    assert_eq!(daily.get_one::<u32>("days"), Some(&14));
}

#[test]
fn json_and_jsonl_conflict() {
    assert!(build_cli()
        .try_get_matches_from(["fintrack", "tx", "list", "--json", "--jsonl"])
        .is_err());
}

#[test]
fn flags_walk_the_wizard_to_review() {
    let m = tx_add_matches(&[
        "--amount", "45.10", "--type", "income", "--category", "tutoring", "--date", "2025-08-01",
    ]);
    let mut w = EntryWizard::new();
    fill_wizard(&mut w, &m).unwrap();
    assert_eq!(w.step(), WizardStep::Review);
    assert_eq!(w.form().kind, Some(TransactionKind::Income));
    assert_eq!(w.form().category, Some(Category::Tutoring));
}

#[test]
fn category_of_the_wrong_type_names_the_category_step() {
    let m = tx_add_matches(&["--amount", "3", "--type", "income", "--category", "Transport"]);
    let mut w = EntryWizard::new();
    let err = fill_wizard(&mut w, &m).unwrap_err();
    assert!(format!("{:#}", err).contains("Transport"));
    assert_eq!(w.step(), WizardStep::Category);
}

#[test]
fn type_without_category_uses_the_type_default() {
    let m = tx_add_matches(&["--amount", "3", "--type", "in"]);
    let mut w = EntryWizard::new();
    fill_wizard(&mut w, &m).unwrap();
    assert_eq!(w.form().category, Some(Category::PartTimeJob));
}

#[test]
fn bad_amount_flag_stops_at_amount() {
    let m = tx_add_matches(&["--amount", "-5"]);
    let mut w = EntryWizard::new();
    let err = fill_wizard(&mut w, &m).unwrap_err();
    assert_eq!(err.to_string(), "Step 1 of 6 (Amount)");
    assert!(format!("{:#}", err).contains("greater than 0"));
    assert_eq!(w.step(), WizardStep::Amount);
}
