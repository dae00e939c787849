// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("search").long("search").short('s').help("Match name or brand"))
        .arg(Arg::new("category").long("category").help("Exact category"))
        .arg(Arg::new("subcategory").long("subcategory").help("Exact subcategory"))
        .arg(Arg::new("brand").long("brand").help("Exact brand"))
        .arg(
            Arg::new("min")
                .long("min")
                .allow_hyphen_values(true)
                .help("Minimum price (ignored if not a number)"),
        )
        .arg(
            Arg::new("max")
                .long("max")
                .allow_hyphen_values(true)
                .help("Maximum price (ignored if not a number)"),
        )
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id")
}

pub fn build_cli() -> Command {
    Command::new("shopbook")
        .version(crate_version!())
        .about("Shop catalog, income/expense ledger and keypad calculator")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Data file (default: $SHOPBOOK_DB or the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the data file and print its location"))
        .subcommand(
            Command::new("product")
                .about("Manage the product catalog")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a product")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("price").long("price").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(Arg::new("brand").long("brand"))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("out_of_stock")
                                .long("out-of-stock")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("image").long("image").help("Photo reference (path or URI)"))
                        .arg(Arg::new("audio").long("audio").help("Audio note reference")),
                )
                .subcommand(json_args(filter_args(
                    Command::new("list").about("List products grouped by category"),
                )))
                .subcommand(Command::new("rm").about("Delete a product").arg(id_arg()))
                .subcommand(
                    Command::new("buy")
                        .about("Record a purchase of the product as an expense")
                        .arg(id_arg()),
                )
                .subcommand(
                    Command::new("cost")
                        .about("Cost price overrides used for profit estimates")
                        .subcommand_required(true)
                        .subcommand(
                            Command::new("set")
                                .arg(id_arg())
                                .arg(Arg::new("amount").required(true)),
                        )
                        .subcommand(Command::new("clear").arg(id_arg())),
                )
                .subcommand(
                    Command::new("categories").about("Show categories, subcategories and brands"),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("time").long("time").help("HH:MM, default now"))
                        .arg(Arg::new("audio").long("audio"))
                        .arg(Arg::new("photo").long("photo")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg())),
        )
        .subcommand(
            Command::new("calc")
                .about("Run keypad input through the calculator, e.g. \"12+3×2=\"")
                .arg(Arg::new("keys").required(true).allow_hyphen_values(true))
                .arg(
                    Arg::new("commit")
                        .long("commit")
                        .value_parser(["income", "expense"])
                        .help("Record the result as a transaction"),
                )
                .arg(Arg::new("name").long("name").requires("commit")),
        )
        .subcommand(
            Command::new("report")
                .about("Profit and loss views")
                .subcommand_required(true)
                .subcommand(json_args(
                    Command::new("pnl").about("Income vs expense from the ledger"),
                ))
                .subcommand(json_args(filter_args(
                    Command::new("catalog").about("Catalog value, cost and margin"),
                ))),
        )
        .subcommand(
            Command::new("export")
                .about("Export documents")
                .subcommand_required(true)
                .subcommand(export_args(Command::new("transactions")))
                .subcommand(export_args(Command::new("products"))),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand_required(true)
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}

fn export_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("format")
            .long("format")
            .default_value("csv")
            .help("csv|json"),
    )
    .arg(Arg::new("out").long("out").required(true))
}
