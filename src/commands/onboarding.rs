// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::settings::{is_first_launch, mark_launched};
use crate::store::LocalBackend;

pub fn handle(backend: &LocalBackend, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", _)) => {
            if is_first_launch(backend) {
                println!("Onboarding pending");
            } else {
                println!("Onboarding complete");
            }
        }
        Some(("finish", _)) => {
            mark_launched(backend)?;
            println!("Onboarding complete");
        }
        _ => {}
    }
    Ok(())
}
