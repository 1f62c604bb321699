// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").conflicts_with("jsonl"))
        .arg(arg!(--jsonl "Print one JSON object per line"))
}

fn kind_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .help("income|expense")
}

fn auth_cmd() -> Command {
    Command::new("auth")
        .about("Accounts and the signed-in session")
        .subcommand_required(true)
        .subcommand(
            Command::new("signup")
                .about("Create an account and sign in")
                .arg(arg!(--email <EMAIL>).required(true))
                .arg(arg!(--password <PASSWORD>).required(true))
                .arg(arg!(--confirm <PASSWORD> "Repeat the password").required(true))
                .arg(arg!(--name <FULL_NAME>).required(true)),
        )
        .subcommand(
            Command::new("signin")
                .about("Sign in to an existing account")
                .arg(arg!(--email <EMAIL>).required(true))
                .arg(arg!(--password <PASSWORD>).required(true)),
        )
        .subcommand(Command::new("signout").about("Sign out on this device"))
        .subcommand(output_flags(
            Command::new("whoami").about("Show the signed-in user"),
        ))
        .subcommand(
            Command::new("reset-password")
                .about("Request a password reset link")
                .arg(arg!(--email <EMAIL>).required(true)),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record, list and delete transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a transaction through the entry steps")
                .arg(arg!(--amount <AMOUNT>).required(true))
                .arg(kind_arg())
                .arg(arg!(--category <CATEGORY>).required(false))
                .arg(arg!(--note <NOTE>).required(false))
                .arg(arg!(--date <DATE> "YYYY-MM-DD or RFC 3339").required(false)),
        )
        .subcommand(output_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(kind_arg())
                .arg(arg!(--category <CATEGORY>).required(false))
                .arg(
                    arg!(--limit <N>)
                        .required(false)
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").value_name("ID").required(true))
                .arg(arg!(-y --yes "Skip the confirmation prompt")),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Totals and chart data")
        .subcommand_required(true)
        .subcommand(output_flags(
            Command::new("summary").about("Income, expenses and balance"),
        ))
        .subcommand(output_flags(
            Command::new("categories")
                .about("Totals per category")
                .arg(kind_arg().default_value("expense")),
        ))
        .subcommand(output_flags(
            Command::new("daily").about("Daily income and expenses").arg(
                arg!(--days <N>)
                    .default_value("7")
                    .value_parser(value_parser!(u32)),
            ),
        ))
        .subcommand(output_flags(
            Command::new("monthly").about("Monthly income, expenses and net").arg(
                arg!(--months <N>)
                    .default_value("6")
                    .value_parser(value_parser!(u32)),
            ),
        ))
        .subcommand(output_flags(
            Command::new("overview").about("Income vs expenses"),
        ))
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Device preferences")
        .subcommand_required(true)
        .subcommand(output_flags(Command::new("show")))
        .subcommand(
            Command::new("set")
                .arg(arg!(--language <LANGUAGE>).required(false))
                .arg(arg!(--currency <CODE> "GBP|NGN|USD|EUR").required(false))
                .arg(
                    arg!(--notifications <ON_OFF>)
                        .required(false)
                        .value_parser(["on", "off"]),
                ),
        )
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal income and expense tracker")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .env("FINTRACK_DB")
                .global(true)
                .help("SQLite database file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(auth_cmd())
        .subcommand(tx_cmd())
        .subcommand(
            Command::new("category")
                .about("Built-in categories")
                .subcommand_required(true)
                .subcommand(output_flags(
                    Command::new("list").arg(kind_arg()),
                )),
        )
        .subcommand(settings_cmd())
        .subcommand(report_cmd())
        .subcommand(output_flags(
            Command::new("budget").about("50/30/20 split of available income"),
        ))
        .subcommand(
            Command::new("onboarding")
                .about("First-launch flag")
                .subcommand_required(true)
                .subcommand(Command::new("status"))
                .subcommand(Command::new("finish")),
        )
        .subcommand(
            Command::new("export")
                .about("Write transactions to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            arg!(--format <FORMAT>)
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(arg!(--out <PATH>).required(true)),
                ),
        )
}
