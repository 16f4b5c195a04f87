// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive match on description or category"),
    )
    .arg(Arg::new("category").long("category").short('c'))
    .arg(Arg::new("from").long("from").help("Earliest date (inclusive)"))
    .arg(Arg::new("to").long("to").help("Latest date (inclusive)"))
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Expense id")
}

pub fn build_cli() -> Command {
    Command::new("outlay")
        .about("Personal expense tracker")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (repeatable)"),
        )
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(
            Command::new("add")
                .about("Record an expense")
                .arg(Arg::new("amount").long("amount").short('a').required(true))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .required(true),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .short('d')
                        .required(true)
                        .help("YYYY-MM-DD or ISO-8601 date-time"),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('m')
                        .default_value(""),
                ),
        )
        .subcommand(json_flags(filter_args(
            Command::new("list").about("List expenses, newest first").arg(
                Arg::new("limit")
                    .long("limit")
                    .short('n')
                    .value_parser(value_parser!(usize)),
            ),
        )))
        .subcommand(
            Command::new("show")
                .about("Show one expense")
                .arg(id_arg())
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of an expense")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").short('a'))
                .arg(Arg::new("category").long("category").short('c'))
                .arg(Arg::new("date").long("date").short('d'))
                .arg(Arg::new("description").long("description").short('m')),
        )
        .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg()))
        .subcommand(
            Command::new("report")
                .about("Summaries and analytics")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Totals, this month, top categories, recent expenses")
                        .arg(
                            Arg::new("today")
                                .long("today")
                                .help("Evaluate as of this date instead of the local date"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("categories").about("Every category with total, count and average"),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .about("Monthly totals")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32).range(1..=120))
                                .default_value("6"),
                        )
                        .arg(
                            Arg::new("anchor")
                                .long("anchor")
                                .help("Last month of the window (defaults to today)"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("stats").about("Average expense, count and categories used"),
                )),
        )
        .subcommand(
            Command::new("export").about("Export expenses").subcommand(filter_args(
                Command::new("expenses")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .short('f')
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .short('o')
                            .default_value("expenses.csv")
                            .help("Output file, or - for stdout"),
                    ),
            )),
        )
        .subcommand(
            Command::new("category")
                .about("Expense categories")
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("config")
                .about("Display settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency")
                        .arg(Arg::new("code").required(true).help("e.g. USD, EUR")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored expenses for integrity problems"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_command_tree() {
        build_cli().debug_assert();
    }
}
