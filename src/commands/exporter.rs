// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::export::{to_csv, to_json};
use crate::filter::{filter_expenses, sort_by_date_descending};
use crate::store::ExpenseStore;
use crate::utils::criteria_from_matches;
use anyhow::{Context, Result, bail};
use clap::parser::ValueSource;
use std::io::Write;
use tracing::info;

pub fn handle(store: &ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(store, sub),
        _ => Ok(()),
    }
}

fn export_expenses(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".into());
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let criteria = criteria_from_matches(sub)?;
    let mut records = filter_expenses(&store.list()?, &criteria);
    sort_by_date_descending(&mut records);
    let body = if fmt == "json" {
        to_json(&records)?
    } else {
        to_csv(&records)?
    };

    let out = match sub.get_one::<String>("out") {
        Some(o) if sub.value_source("out") != Some(ValueSource::DefaultValue) => o.clone(),
        _ => format!("expenses.{}", fmt),
    };
    if out == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(body.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }
    std::fs::write(&out, body).with_context(|| format!("Write {}", out))?;
    info!(count = records.len(), path = %out, format = %fmt, "exported expenses");
    println!("Exported {} expenses to {}", records.len(), out);
    Ok(())
}
