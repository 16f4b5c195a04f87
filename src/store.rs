// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed expense store.
//!
//! The store is an ordinary value: construct it once and hand a reference to
//! whatever needs persistence. It is the only place expense rows are
//! validated, so everything downstream may assume well-formed records.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db;
use crate::errors::{ExpenseError, Result};
use crate::models::{Category, Expense, ExpenseDraft, ExpensePatch};

/// 999 999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);
pub const MAX_DESCRIPTION_CHARS: usize = 200;

const SELECT_COLUMNS: &str = "id, amount, category, description, date, created_at, updated_at";

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct ExpenseStore {
    conn: Connection,
    clock: Clock,
}

/// An `expenses` row exactly as stored, before any decoding.
#[derive(Debug, Clone)]
pub struct RawExpenseRow {
    pub id: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl RawExpenseRow {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawExpenseRow {
            id: r.get(0)?,
            amount: r.get(1)?,
            category: r.get(2)?,
            description: r.get(3)?,
            date: r.get(4)?,
            created_at: r.get(5)?,
            updated_at: r.get(6)?,
        })
    }

    pub fn decode(self) -> Result<Expense> {
        let corrupt = |reason: String| ExpenseError::CorruptRecord {
            id: self.id.clone(),
            reason,
        };
        let amount = self
            .amount
            .parse::<Decimal>()
            .map_err(|e| corrupt(format!("amount '{}': {}", self.amount, e)))?;
        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| corrupt(e.to_string()))?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| corrupt(format!("date '{}': {}", self.date, e)))?;
        let created_at = parse_timestamp(&self.created_at)
            .map_err(|e| corrupt(format!("created_at '{}': {}", self.created_at, e)))?;
        let updated_at = parse_timestamp(&self.updated_at)
            .map_err(|e| corrupt(format!("updated_at '{}': {}", self.updated_at, e)))?;
        if amount < Decimal::ZERO {
            return Err(corrupt(format!("negative amount {}", amount)));
        }
        if updated_at < created_at {
            return Err(corrupt(format!(
                "updated_at {} precedes created_at {}",
                self.updated_at, self.created_at
            )));
        }
        Ok(Expense {
            id: self.id,
            amount,
            category,
            description: self.description,
            date,
            created_at,
            updated_at,
        })
    }
}

pub fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|d| d.with_timezone(&Utc))
}

fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Check amount and description, returning the normalised pair.
pub fn validate_fields(amount: Decimal, description: &str) -> Result<(Decimal, String)> {
    if amount < Decimal::ZERO {
        return Err(ExpenseError::validation(format!(
            "amount must not be negative (got {})",
            amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(ExpenseError::validation(format!(
            "amount {} exceeds the maximum of {}",
            amount, MAX_AMOUNT
        )));
    }
    let description = description.trim();
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ExpenseError::validation(format!(
            "description is longer than {} characters",
            MAX_DESCRIPTION_CHARS
        )));
    }
    Ok((amount.round_dp(2), description.to_string()))
}

impl ExpenseStore {
    pub fn from_connection(conn: Connection) -> Result<Self> {
        db::init_schema(&conn)?;
        Ok(ExpenseStore {
            conn,
            clock: Box::new(Utc::now),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Replace the timestamp source used for `created_at` / `updated_at`.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn list(&self) -> Result<Vec<Expense>> {
        self.scan_raw()?
            .into_iter()
            .map(RawExpenseRow::decode)
            .collect()
    }

    /// Every row undecoded, in insertion order.
    pub fn scan_raw(&self) -> Result<Vec<RawExpenseRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY created_at, rowid",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], RawExpenseRow::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        debug!(count = out.len(), "scanned expenses");
        Ok(out)
    }

    pub fn get(&self, id: &str) -> Result<Expense> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {} FROM expenses WHERE id=?1", SELECT_COLUMNS),
                params![id],
                RawExpenseRow::from_row,
            )
            .optional()?;
        match raw {
            Some(r) => r.decode(),
            None => Err(ExpenseError::NotFound(id.to_string())),
        }
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?;
        Ok(n as usize)
    }

    pub fn create(&self, draft: ExpenseDraft) -> Result<Expense> {
        let (amount, description) = validate_fields(draft.amount, &draft.description)?;
        let now = (self.clock)();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            amount,
            category: draft.category,
            description,
            date: draft.date,
            created_at: now,
            updated_at: now,
        };
        self.conn.execute(
            "INSERT INTO expenses(id, amount, category, description, date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                expense.id,
                expense.amount.to_string(),
                expense.category.name(),
                expense.description,
                expense.date,
                format_timestamp(expense.created_at),
                format_timestamp(expense.updated_at),
            ],
        )?;
        info!(id = %expense.id, amount = %expense.amount, category = %expense.category, "created expense");
        Ok(expense)
    }

    pub fn update(&self, id: &str, patch: ExpensePatch) -> Result<Expense> {
        if patch.is_empty() {
            return Err(ExpenseError::validation("nothing to update"));
        }
        let current = self.get(id)?;
        let (amount, description) = validate_fields(
            patch.amount.unwrap_or(current.amount),
            patch.description.as_deref().unwrap_or(&current.description),
        )?;
        let updated_at = (self.clock)().max(current.created_at);
        let expense = Expense {
            amount,
            description,
            category: patch.category.unwrap_or(current.category),
            date: patch.date.unwrap_or(current.date),
            updated_at,
            ..current
        };
        let changed = self.conn.execute(
            "UPDATE expenses SET amount=?2, category=?3, description=?4, date=?5, updated_at=?6
             WHERE id=?1",
            params![
                expense.id,
                expense.amount.to_string(),
                expense.category.name(),
                expense.description,
                expense.date,
                format_timestamp(expense.updated_at),
            ],
        )?;
        if changed == 0 {
            warn!(id, "expense vanished during update");
            return Err(ExpenseError::NotFound(id.to_string()));
        }
        info!(id, "updated expense");
        Ok(expense)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id=?1", params![id])?;
        if changed == 0 {
            return Err(ExpenseError::NotFound(id.to_string()));
        }
        info!(id, "deleted expense");
        Ok(())
    }
}
