// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::store::{ExpenseStore, RawExpenseRow, parse_timestamp};
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// (issue, id, detail) for every integrity problem found in the stored rows.
pub fn find_issues(rows: &[RawExpenseRow]) -> Vec<(String, String, String)> {
    let mut issues = Vec::new();
    let mut push = |issue: &str, r: &RawExpenseRow, detail: String| {
        issues.push((issue.to_string(), r.id.clone(), detail));
    };

    for r in rows {
        // 1) Amounts
        match r.amount.parse::<Decimal>() {
            Ok(a) if a < Decimal::ZERO => push("negative_amount", r, r.amount.clone()),
            Ok(_) => {}
            Err(_) => push("bad_amount", r, r.amount.clone()),
        }

        // 2) Categories outside the fixed set
        if r.category.parse::<Category>().is_err() {
            push("unknown_category", r, r.category.clone());
        }

        // 3) Dates
        if NaiveDate::parse_from_str(&r.date, "%Y-%m-%d").is_err() {
            push("bad_date", r, r.date.clone());
        }

        // 4) Timestamps
        match (parse_timestamp(&r.created_at), parse_timestamp(&r.updated_at)) {
            (Ok(c), Ok(u)) if u < c => push(
                "updated_before_created",
                r,
                format!("{} < {}", r.updated_at, r.created_at),
            ),
            (Ok(_), Ok(_)) => {}
            _ => push(
                "bad_timestamp",
                r,
                format!("{} / {}", r.created_at, r.updated_at),
            ),
        }
    }
    issues
}

pub fn handle(store: &ExpenseStore) -> Result<()> {
    let issues = find_issues(&store.scan_raw()?);
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|(issue, id, detail)| vec![issue, id, detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "ID", "Detail"], rows));
    }
    Ok(())
}
