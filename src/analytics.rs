// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Summary, category and monthly aggregations over a list of expenses.
//!
//! Everything here is a pure function of its inputs. "Today" is always passed
//! in by the caller so results never depend on the wall clock.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{
    Category, CategoryAverage, CategoryShare, Expense, ExpenseStats, ExpenseSummary, MonthBucket,
};

pub const RECENT_LIMIT: usize = 5;

/// Longest trend window; larger requests are cut to this many months.
pub const MAX_TREND_MONTHS: u32 = 1200;

fn total(records: &[Expense]) -> Decimal {
    records.iter().map(|e| e.amount).sum()
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Totals and counts per category, only for categories that occur.
fn group_by_category(records: &[Expense]) -> BTreeMap<Category, (Decimal, usize)> {
    let mut groups: BTreeMap<Category, (Decimal, usize)> = BTreeMap::new();
    for e in records {
        let entry = groups.entry(e.category).or_insert((Decimal::ZERO, 0));
        entry.0 += e.amount;
        entry.1 += 1;
    }
    groups
}

pub fn compute_summary(records: &[Expense], today: NaiveDate) -> ExpenseSummary {
    let total_spending = total(records);
    let monthly_spending: Decimal = records
        .iter()
        .filter(|e| same_month(e.date, today))
        .map(|e| e.amount)
        .sum();

    let mut top_categories: Vec<CategoryShare> = group_by_category(records)
        .into_iter()
        .map(|(category, (cat_total, count))| CategoryShare {
            category,
            total: cat_total,
            count,
            percentage: if total_spending.is_zero() {
                Decimal::ZERO
            } else {
                cat_total * Decimal::ONE_HUNDRED / total_spending
            },
        })
        .collect();
    top_categories.sort_by(|a, b| b.total.cmp(&a.total));

    ExpenseSummary {
        total_spending,
        monthly_spending,
        expense_count: records.len(),
        top_categories,
        recent_expenses: recent_expenses(records, RECENT_LIMIT),
    }
}

/// The `limit` latest expenses by date, newest first. Same-day entries go by
/// creation time, newest first.
pub fn recent_expenses(records: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted: Vec<&Expense> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
    sorted.into_iter().take(limit).cloned().collect()
}

/// One entry for every category, empty ones included, largest total first.
pub fn category_breakdown(records: &[Expense]) -> Vec<CategoryAverage> {
    let groups = group_by_category(records);
    let mut out: Vec<CategoryAverage> = Category::ALL
        .into_iter()
        .map(|category| {
            let (cat_total, count) = groups
                .get(&category)
                .copied()
                .unwrap_or((Decimal::ZERO, 0));
            CategoryAverage {
                category,
                total: cat_total,
                count,
                average: (count > 0).then(|| cat_total / Decimal::from(count)),
            }
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}

/// `window_months` consecutive calendar months ending with the month of
/// `anchor`, oldest first. The window is clamped to `1..=MAX_TREND_MONTHS`;
/// months before the earliest representable date are left out.
pub fn monthly_trend(
    records: &[Expense],
    window_months: u32,
    anchor: NaiveDate,
) -> Vec<MonthBucket> {
    let window = window_months.clamp(1, MAX_TREND_MONTHS);
    let first = anchor.with_day(1).unwrap_or(anchor);

    let starts: Vec<NaiveDate> = (0..window)
        .rev()
        .filter_map(|offset| first.checked_sub_months(Months::new(offset)))
        .collect();
    let by_month: BTreeMap<(i32, u32), usize> = starts
        .iter()
        .enumerate()
        .map(|(slot, d)| ((d.year(), d.month()), slot))
        .collect();
    let mut buckets: Vec<MonthBucket> = starts
        .iter()
        .map(|d| MonthBucket {
            month: d.format("%Y-%m").to_string(),
            label: d.format("%b %Y").to_string(),
            total: Decimal::ZERO,
            count: 0,
        })
        .collect();

    for e in records {
        if let Some(&slot) = by_month.get(&(e.date.year(), e.date.month())) {
            buckets[slot].total += e.amount;
            buckets[slot].count += 1;
        }
    }
    buckets
}

pub fn compute_stats(records: &[Expense]) -> ExpenseStats {
    let expense_count = records.len();
    let average_expense = if expense_count == 0 {
        Decimal::ZERO
    } else {
        total(records) / Decimal::from(expense_count)
    };
    ExpenseStats {
        expense_count,
        average_expense,
        categories_used: group_by_category(records).len(),
    }
}
