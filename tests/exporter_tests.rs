// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use outlay::export::to_csv;
use outlay::models::{Category, ExpenseDraft};
use outlay::store::ExpenseStore;
use outlay::{cli, commands::exporter};
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::tempdir;

fn seeded_store() -> ExpenseStore {
    let store = ExpenseStore::open_in_memory().unwrap();
    let rows = [
        ("12.5", Category::Food, "Corner Shop, \"weekly\" run", "2025-01-02"),
        ("80", Category::Bills, "Power\nand gas", "2025-01-03"),
        ("3.333", Category::Other, "", "2025-01-01"),
    ];
    for (amount, category, description, date) in rows {
        store
            .create(ExpenseDraft {
                amount: Decimal::from_str(amount).unwrap(),
                category,
                description: description.into(),
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            })
            .unwrap();
    }
    store
}

fn run_export(store: &ExpenseStore, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["outlay", "export", "expenses"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(store, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn csv_parses_back_to_header_plus_one_row_per_record() {
    let store = seeded_store();
    let records = store.list().unwrap();
    let text = to_csv(&records).unwrap();

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), records.len() + 1);
    assert_eq!(
        rows[0].iter().collect::<Vec<_>>(),
        ["date", "description", "category", "amount"]
    );

    for (row, e) in rows[1..].iter().zip(&records) {
        assert_eq!(NaiveDate::parse_from_str(&row[0], "%Y-%m-%d").unwrap(), e.date);
        assert_eq!(&row[1], e.description);
        assert_eq!(row[2].parse::<Category>().unwrap(), e.category);
        assert_eq!(Decimal::from_str(&row[3]).unwrap(), e.amount.round_dp(2));
        assert_eq!(row[3].split('.').nth(1).map(str::len), Some(2));
    }
}

#[test]
fn export_writes_csv_file_newest_first() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&store, &["--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut rdr = csv::Reader::from_reader(contents.as_bytes());
    let dates: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    assert_eq!(dates, ["2025-01-03", "2025-01-02", "2025-01-01"]);
    assert!(contents.contains("\"Corner Shop, \"\"weekly\"\" run\""));
    assert!(contents.contains("\"Power\nand gas\""));
    assert!(contents.contains("2025-01-01,,Other,3.33\n"));
}

#[test]
fn export_applies_filters() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("food.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&store, &["--category", "food", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains(",Food,12.50"));
}

#[test]
fn export_json_keeps_all_fields() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&store, &["--format", "json", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["category"], "Bills");
    assert_eq!(items[0]["date"], "2025-01-03");
    for key in ["id", "amount", "description", "created_at", "updated_at"] {
        assert!(items[0].get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn export_rejects_unknown_format() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(run_export(&store, &["--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}
