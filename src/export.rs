// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::Expense;

pub const CSV_HEADER: [&str; 4] = ["date", "description", "category", "amount"];

/// Render expenses as RFC 4180 CSV, one row per record in the given order.
pub fn to_csv(records: &[Expense]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for e in records {
        wtr.write_record([
            e.date.format("%Y-%m-%d").to_string(),
            e.description.clone(),
            e.category.name().to_string(),
            format!("{:.2}", e.amount.round_dp(2)),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

pub fn to_json(records: &[Expense]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
