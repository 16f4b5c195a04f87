// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use outlay::models::Category;
use outlay::store::ExpenseStore;
use outlay::{cli, commands::expenses};

fn matches_for(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["outlay"];
    argv.extend_from_slice(args);
    cli::build_cli().get_matches_from(argv)
}

fn run_add(store: &ExpenseStore, args: &[&str]) -> anyhow::Result<outlay::models::Expense> {
    let mut argv = vec!["add"];
    argv.extend_from_slice(args);
    let m = matches_for(&argv);
    match m.subcommand() {
        Some(("add", sub)) => expenses::add(store, sub),
        _ => panic!("no add subcommand"),
    }
}

fn setup() -> ExpenseStore {
    let store = ExpenseStore::open_in_memory().unwrap();
    for (amount, category, date, description) in [
        ("10", "food", "2025-01-01", "bagel"),
        ("20", "Bills", "2025-01-03T08:30:00Z", "internet"),
        ("30", "FOOD", "2025-01-02", "dinner"),
    ] {
        run_add(
            &store,
            &[
                "--amount",
                amount,
                "--category",
                category,
                "--date",
                date,
                "--description",
                description,
            ],
        )
        .unwrap();
    }
    store
}

fn query(store: &ExpenseStore, args: &[&str]) -> Vec<outlay::models::Expense> {
    let mut argv = vec!["list"];
    argv.extend_from_slice(args);
    let m = matches_for(&argv);
    match m.subcommand() {
        Some(("list", sub)) => expenses::query(store, sub).unwrap(),
        _ => panic!("no list subcommand"),
    }
}

#[test]
fn add_parses_category_case_insensitively_and_keeps_calendar_date() {
    let store = setup();
    let all = store.list().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].category, Category::Food);
    assert_eq!(all[1].category, Category::Bills);
    assert_eq!(all[1].date.to_string(), "2025-01-03");
}

#[test]
fn add_rejects_unknown_category_and_negative_amount() {
    let store = setup();
    assert!(
        run_add(
            &store,
            &["--amount", "5", "--category", "Rent", "--date", "2025-01-01"]
        )
        .is_err()
    );
    assert!(
        run_add(
            &store,
            &["--amount", "-5", "--category", "Other", "--date", "2025-01-01"]
        )
        .is_err()
    );
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn list_is_newest_first_and_respects_limit() {
    let store = setup();
    let rows = query(&store, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "internet");
    assert_eq!(rows[1].description, "dinner");
}

#[test]
fn list_filters_by_category_search_and_dates() {
    let store = setup();
    let food = query(&store, &["--category", "Food"]);
    assert_eq!(food.len(), 2);
    assert!(food.iter().all(|e| e.category == Category::Food));

    let searched = query(&store, &["--search", "INTER"]);
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].description, "internet");

    let ranged = query(&store, &["--from", "2025-01-02", "--to", "2025-01-02"]);
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].description, "dinner");
}

#[test]
fn edit_changes_only_given_fields() {
    let store = setup();
    let target = store.list().unwrap().remove(0);
    let m = matches_for(&["edit", "--id", &target.id, "--amount", "11.50"]);
    let updated = match m.subcommand() {
        Some(("edit", sub)) => expenses::edit(&store, sub).unwrap(),
        _ => panic!("no edit subcommand"),
    };
    assert_eq!(format!("{:.2}", updated.amount), "11.50");
    assert_eq!(updated.description, "bagel");
    assert_eq!(updated.created_at, target.created_at);
}

#[test]
fn rm_of_missing_id_reports_not_found() {
    let store = setup();
    let m = matches_for(&["rm", "--id", "nope"]);
    let err = match m.subcommand() {
        Some(("rm", sub)) => expenses::remove(&store, sub).unwrap_err(),
        _ => panic!("no rm subcommand"),
    };
    assert!(err.to_string().contains("no longer exists"));
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn rm_trims_id_argument() {
    let store = setup();
    let id = store.list().unwrap()[0].id.clone();
    let padded = format!(" {} ", id);
    let m = matches_for(&["rm", "--id", &padded]);
    if let Some(("rm", sub)) = m.subcommand() {
        expenses::remove(&store, sub).unwrap();
    } else {
        panic!("no rm subcommand");
    }
    assert_eq!(store.count().unwrap(), 2);
}
