// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::ExpenseStore;
use crate::utils::{get_display_currency, pretty_table, set_display_currency};
use anyhow::{Result, bail};
use std::path::Path;

pub fn handle(store: &ExpenseStore, m: &clap::ArgMatches, db_path: &Path) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["database".into(), db_path.display().to_string()],
                vec![
                    "display_currency".into(),
                    get_display_currency(store.connection())?,
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-currency", sub)) => {
            let code = sub
                .get_one::<String>("code")
                .map(|s| s.trim().to_uppercase())
                .unwrap_or_default();
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("Invalid currency code '{}', expected three letters", code);
            }
            set_display_currency(store.connection(), &code)?;
            println!("Display currency set to {}", code);
        }
        _ => {}
    }
    Ok(())
}
