// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::filter::FilterCriteria;
use crate::models::Category;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Accepts `YYYY-MM-DD` or a full ISO-8601 date-time; only the calendar date is kept.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_category(s: &str) -> Result<Category> {
    Ok(s.parse::<Category>()?)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn category_cell(c: Category) -> Cell {
    Cell::new(c.name()).fg(c.badge_color())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Read the shared list/export filter flags.
pub fn criteria_from_matches(sub: &clap::ArgMatches) -> Result<FilterCriteria> {
    let start_date = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let end_date = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    let category = sub
        .get_one::<String>("category")
        .map(|s| parse_category(s))
        .transpose()?;
    Ok(FilterCriteria {
        search_query: sub.get_one::<String>("search").cloned(),
        category,
        start_date,
        end_date,
    })
}

// Display settings
pub fn get_display_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='display_currency'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_display_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('display_currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_datetimes() {
        let want = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("2024-01-05").unwrap(), want);
        assert_eq!(parse_date("2024-01-05T23:10:00Z").unwrap(), want);
        assert_eq!(parse_date("2024-01-05T08:00:00.000+02:00").unwrap(), want);
        assert_eq!(parse_date("2024-01-05T08:00:00").unwrap(), want);
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn fmt_money_pads_two_places() {
        assert_eq!(fmt_money(&Decimal::from(3), "EUR"), "EUR 3.00");
    }
}
