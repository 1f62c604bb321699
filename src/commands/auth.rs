// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, Timelike};
use serde::Serialize;

use super::{LocalSession, arg_str};
use crate::aggregate;
use crate::session::{SignInForm, SignUpForm, balance_status, initials};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(session: &mut LocalSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("signup", sub)) => signup(session, sub)?,
        Some(("signin", sub)) => signin(session, sub)?,
        Some(("signout", _)) => {
            session.sign_out()?;
            println!("Signed out");
        }
        Some(("whoami", sub)) => whoami(session, sub)?,
        Some(("reset-password", sub)) => {
            println!("{}", session.request_password_reset(arg_str(sub, "email")?)?);
        }
        _ => {}
    }
    Ok(())
}

fn signup(session: &mut LocalSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let form = SignUpForm {
        email: arg_str(sub, "email")?.to_string(),
        password: arg_str(sub, "password")?.to_string(),
        confirm_password: arg_str(sub, "confirm")?.to_string(),
        full_name: arg_str(sub, "name")?.to_string(),
    };
    let user = session.sign_up(&form)?;
    println!("Welcome, {}! Signed in as {}", form.full_name.trim(), user.email);
    Ok(())
}

fn signin(session: &mut LocalSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let form = SignInForm {
        email: arg_str(sub, "email")?.to_string(),
        password: arg_str(sub, "password")?.to_string(),
    };
    let user = session.sign_in(&form)?;
    println!("Signed in as {}", user.email);
    Ok(())
}

#[derive(Serialize)]
struct WhoAmI {
    uid: String,
    email: String,
    name: Option<String>,
    initials: String,
    greeting: String,
    status: &'static str,
}

fn whoami(session: &LocalSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let Some(user) = session.current_user() else {
        println!("Not signed in");
        return Ok(());
    };
    let name = session.display_name();
    let txs = session.feed().transactions();
    let info = WhoAmI {
        uid: user.uid.clone(),
        email: user.email.clone(),
        initials: initials(name.as_deref().unwrap_or(&user.email)),
        greeting: session.greeting(Local::now().hour()),
        status: balance_status(aggregate::balance(&txs), !txs.is_empty()),
        name,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &info)? {
        println!("{}", info.greeting);
        let rows = vec![
            vec!["Name".into(), info.name.clone().unwrap_or_default()],
            vec!["Initials".into(), info.initials.clone()],
            vec!["Email".into(), info.email.clone()],
            vec!["User ID".into(), info.uid.clone()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
        println!("{}", info.status);
    }
    Ok(())
}
