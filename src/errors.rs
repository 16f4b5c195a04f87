// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the expense store.
///
/// The aggregation, filter and export code never produces these; they only
/// come out of the persistence boundary.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Malformed input to create/update. Meant for inline feedback, never corrected silently.
    #[error("Invalid expense: {0}")]
    Validation(String),

    #[error("Expense '{0}' no longer exists")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    #[error("Stored expense '{id}' is corrupt: {reason}")]
    CorruptRecord { id: String, reason: String },
}

impl ExpenseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ExpenseError::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ExpenseError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
