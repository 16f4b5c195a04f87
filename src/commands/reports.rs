// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{category_breakdown, compute_stats, compute_summary, monthly_trend};
use crate::store::ExpenseStore;
use crate::utils::{
    category_cell, fmt_money, get_display_currency, maybe_print_json, parse_date, pretty_table,
};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;

/// `today` is supplied by the caller, normally the local calendar date.
pub fn handle(store: &ExpenseStore, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub, today)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("trend", sub)) => trend(store, sub, today)?,
        Some(("stats", sub)) => stats(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn date_or(sub: &clap::ArgMatches, name: &str, fallback: NaiveDate) -> Result<NaiveDate> {
    match sub.get_one::<String>(name) {
        Some(s) => parse_date(s),
        None => Ok(fallback),
    }
}

fn summary(store: &ExpenseStore, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let today = date_or(sub, "today", today)?;
    let records = store.list()?;
    let s = compute_summary(&records, today);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = get_display_currency(store.connection())?;

    let top = s
        .top_categories
        .first()
        .map(|c| c.category.to_string())
        .unwrap_or_else(|| "N/A".into());
    println!(
        "{}",
        pretty_table(
            &["Total Spending", "This Month", "Top Category", "Expenses"],
            vec![vec![
                fmt_money(&s.total_spending, &ccy),
                fmt_money(&s.monthly_spending, &ccy),
                top,
                s.expense_count.to_string(),
            ]],
        )
    );

    let mut shares = pretty_table(&["Category", "Total", "Count", "Share"], vec![]);
    for c in &s.top_categories {
        shares.add_row(vec![
            category_cell(c.category),
            Cell::new(fmt_money(&c.total, &ccy)),
            Cell::new(c.count),
            Cell::new(format!("{:.1}%", c.percentage.round_dp(1))),
        ]);
    }
    println!("{}", shares);

    let mut recent = pretty_table(&["Date", "Category", "Description", "Amount"], vec![]);
    for e in &s.recent_expenses {
        recent.add_row(vec![
            Cell::new(e.date),
            category_cell(e.category),
            Cell::new(&e.description),
            Cell::new(fmt_money(&e.amount, &ccy)),
        ]);
    }
    println!("{}", recent);
    Ok(())
}

fn categories(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let data = category_breakdown(&store.list()?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_display_currency(store.connection())?;
    let mut table = pretty_table(&["Category", "Total", "Count", "Average"], vec![]);
    for c in &data {
        table.add_row(vec![
            category_cell(c.category),
            Cell::new(fmt_money(&c.total, &ccy)),
            Cell::new(c.count),
            Cell::new(
                c.average
                    .map(|a| fmt_money(&a, &ccy))
                    .unwrap_or_else(|| "N/A".into()),
            ),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn trend(store: &ExpenseStore, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let months: u32 = *sub.get_one::<u32>("months").unwrap_or(&6);
    let anchor = date_or(sub, "anchor", today)?;
    let data = monthly_trend(&store.list()?, months, anchor);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_display_currency(store.connection())?;
    let rows = data
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                fmt_money(&b.total, &ccy),
                b.count.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Spent", "Expenses"], rows));
    Ok(())
}

fn stats(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let s = compute_stats(&store.list()?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = get_display_currency(store.connection())?;
    println!(
        "{}",
        pretty_table(
            &["Average Expense", "Total Expenses", "Categories Used"],
            vec![vec![
                fmt_money(&s.average_expense, &ccy),
                s.expense_count.to_string(),
                s.categories_used.to_string(),
            ]],
        )
    );
    Ok(())
}
