// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::Color;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ExpenseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Bills,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }

    /// Slice colour used by charts.
    pub fn chart_color(self) -> &'static str {
        match self {
            Category::Food => "#3B82F6",
            Category::Transportation => "#10B981",
            Category::Entertainment => "#8B5CF6",
            Category::Shopping => "#F59E0B",
            Category::Bills => "#EF4444",
            Category::Other => "#6B7280",
        }
    }

    /// Foreground colour for category cells in tables.
    pub fn badge_color(self) -> Color {
        match self {
            Category::Food => Color::Green,
            Category::Transportation => Color::Blue,
            Category::Entertainment => Color::DarkMagenta,
            Category::Shopping => Color::Magenta,
            Category::Bills => Color::Red,
            Category::Other => Color::Grey,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ExpenseError::validation(format!(
                    "unknown category '{}' (expected one of: {})",
                    wanted,
                    Category::ALL.map(Category::name).join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied fields of a new expense; the store fills in the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<Decimal>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}

/// A category's share of overall spending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub total: Decimal,
    pub count: usize,
    /// `total / total_spending * 100`.
    pub percentage: Decimal,
}

/// Per-category totals with the average expense size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAverage {
    pub category: Category,
    pub total: Decimal,
    pub count: usize,
    /// `total / count`; `None` when the category has no expenses.
    pub average: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month: String, // YYYY-MM
    pub label: String, // Mon YYYY
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total_spending: Decimal,
    pub monthly_spending: Decimal,
    pub expense_count: usize,
    pub top_categories: Vec<CategoryShare>,
    pub recent_expenses: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseStats {
    pub expense_count: usize,
    pub average_expense: Decimal,
    pub categories_used: usize,
}
