// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::{category_cell, maybe_print_json, pretty_table};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

#[derive(Serialize)]
pub struct CategoryRow {
    pub name: &'static str,
    pub chart_color: &'static str,
}

pub fn rows() -> Vec<CategoryRow> {
    Category::ALL
        .into_iter()
        .map(|c| CategoryRow {
            name: c.name(),
            chart_color: c.chart_color(),
        })
        .collect()
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows())? {
            return Ok(());
        }
        let mut table = pretty_table(&["Category", "Chart Colour"], vec![]);
        for c in Category::ALL {
            table.add_row(vec![category_cell(c), Cell::new(c.chart_color())]);
        }
        println!("{}", table);
    }
    Ok(())
}
