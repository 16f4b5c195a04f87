// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use crate::models::{Category, Expense};

/// Criteria for narrowing the expense list. Unset fields match everything;
/// set fields are ANDed together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the description or the category name.
    pub search_query: Option<String>,
    pub category: Option<Category>,
    /// Inclusive.
    pub start_date: Option<NaiveDate>,
    /// Inclusive.
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn matches(&self, e: &Expense) -> bool {
        if let Some(q) = self.search_needle() {
            let in_description = e.description.to_lowercase().contains(&q);
            let in_category = e.category.name().to_lowercase().contains(&q);
            if !in_description && !in_category {
                return false;
            }
        }
        if self.category.is_some_and(|c| c != e.category) {
            return false;
        }
        if self.start_date.is_some_and(|start| e.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| e.date > end) {
            return false;
        }
        true
    }

    fn search_needle(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/// Keep the records matching `criteria`, preserving their relative order.
pub fn filter_expenses(records: &[Expense], criteria: &FilterCriteria) -> Vec<Expense> {
    records
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect()
}

/// Newest date first; same-day entries by id, descending.
pub fn sort_by_date_descending(records: &mut [Expense]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}
