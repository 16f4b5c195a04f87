// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::{filter_expenses, sort_by_date_descending};
use crate::models::{Expense, ExpenseDraft, ExpensePatch};
use crate::store::ExpenseStore;
use crate::utils::{
    category_cell, criteria_from_matches, fmt_money, get_display_currency, maybe_print_json,
    parse_category, parse_date, parse_decimal, pretty_table,
};
use anyhow::{Context, Result};
use comfy_table::Cell;
use tracing::debug;

pub fn add(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<Expense> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let category = parse_category(required(sub, "category")?)?;
    let date = parse_date(required(sub, "date")?)?;
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();

    let expense = store.create(ExpenseDraft {
        amount,
        category,
        description,
        date,
    })?;
    let ccy = get_display_currency(store.connection())?;
    println!(
        "Recorded {} for {} on {} (id: {})",
        fmt_money(&expense.amount, &ccy),
        expense.category,
        expense.date,
        expense.id
    );
    Ok(expense)
}

pub fn list(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query(store, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = get_display_currency(store.connection())?;
    let mut table = pretty_table(&["Date", "Category", "Description", "Amount", "ID"], vec![]);
    for e in &data {
        table.add_row(vec![
            Cell::new(e.date),
            category_cell(e.category),
            Cell::new(&e.description),
            Cell::new(fmt_money(&e.amount, &ccy)),
            Cell::new(&e.id),
        ]);
    }
    println!("{}", table);
    println!("Showing {} of {} expenses", data.len(), store.count()?);
    Ok(())
}

/// Stored expenses narrowed by the list flags, newest first, cut to `--limit`.
pub fn query(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let criteria = criteria_from_matches(sub)?;
    let all = store.list()?;
    let mut data = filter_expenses(&all, &criteria);
    debug!(total = all.len(), matched = data.len(), ?criteria, "filtered expenses");
    sort_by_date_descending(&mut data);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

pub fn show(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.trim();
    let e = store.get(id)?;
    if maybe_print_json(sub.get_flag("json"), false, &e)? {
        return Ok(());
    }
    let ccy = get_display_currency(store.connection())?;
    let rows = vec![
        vec!["ID".into(), e.id.clone()],
        vec!["Date".into(), e.date.to_string()],
        vec!["Category".into(), e.category.to_string()],
        vec!["Description".into(), e.description.clone()],
        vec!["Amount".into(), fmt_money(&e.amount, &ccy)],
        vec!["Created".into(), e.created_at.to_rfc3339()],
        vec!["Updated".into(), e.updated_at.to_rfc3339()],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}

pub fn edit(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<Expense> {
    let id = required(sub, "id")?.trim();
    let patch = ExpensePatch {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        category: sub
            .get_one::<String>("category")
            .map(|s| parse_category(s))
            .transpose()?,
        description: sub.get_one::<String>("description").cloned(),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    let expense = store.update(id, patch)?;
    println!("Updated expense {}", expense.id);
    Ok(expense)
}

pub fn remove(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.trim();
    store.delete(id)?;
    println!("Removed expense {}", id);
    Ok(())
}

fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing --{}", name))
}
