// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use outlay::{cli, commands, db, logging, store::ExpenseStore};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));

    let path = db::db_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let store = ExpenseStore::from_connection(db::open_or_init(&path)?)?;
    tracing::debug!(path = %path.display(), "opened expense store");
    let today = chrono::Local::now().date_naive();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("add", sub)) => {
            commands::expenses::add(&store, sub)?;
        }
        Some(("list", sub)) => commands::expenses::list(&store, sub)?,
        Some(("show", sub)) => commands::expenses::show(&store, sub)?,
        Some(("edit", sub)) => {
            commands::expenses::edit(&store, sub)?;
        }
        Some(("rm", sub)) => commands::expenses::remove(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub, today)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("config", sub)) => commands::config::handle(&store, sub, &path)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
