// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
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
            .help("Print as JSON lines"),
    )
}

fn user_arg() -> Arg {
    Arg::new("user").long("user").required(true)
}

fn amount_arg() -> Arg {
    Arg::new("amount").long("amount").required(true)
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .help("Transaction date yyyy/M/d, optionally 'yyyy/M/d HH:mm' (default: now)")
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .version(clap::crate_version!())
        .about("CSV-backed personal ledger with rule-based budget recommendations")
        .subcommand(
            Command::new("account")
                .about("Open and inspect accounts")
                .subcommand(
                    Command::new("open")
                        .about("Register a new account")
                        .arg(user_arg())
                        .arg(Arg::new("password").long("password").default_value(""))
                        .arg(Arg::new("phone").long("phone").default_value(""))
                        .arg(Arg::new("email").long("email").default_value(""))
                        .arg(Arg::new("gender").long("gender").default_value(""))
                        .arg(Arg::new("address").long("address").default_value(""))
                        .arg(
                            Arg::new("admin")
                                .long("admin")
                                .action(ArgAction::SetTrue)
                                .help("Open an admin account instead of a personal one"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List all accounts"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("deposit")
                        .about("Add money to an account")
                        .arg(user_arg())
                        .arg(amount_arg())
                        .arg(Arg::new("merchant").long("merchant").default_value("ATM"))
                        .arg(date_arg()),
                )
                .subcommand(
                    Command::new("withdraw")
                        .about("Take money out of an account")
                        .arg(user_arg())
                        .arg(amount_arg())
                        .arg(Arg::new("merchant").long("merchant").default_value("ATM"))
                        .arg(date_arg()),
                )
                .subcommand(
                    Command::new("spend")
                        .about("Record an expense or payment")
                        .arg(user_arg())
                        .arg(amount_arg())
                        .arg(Arg::new("merchant").long("merchant").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("payment")
                                .long("payment")
                                .action(ArgAction::SetTrue)
                                .help("Record as Payment instead of Expense"),
                        )
                        .arg(date_arg()),
                )
                .subcommand(
                    Command::new("transfer")
                        .about("Move money between two accounts")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(amount_arg())
                        .arg(date_arg()),
                )
                .subcommand(
                    json_flags(
                        Command::new("list")
                            .about("List a user's transactions")
                            .arg(user_arg())
                            .arg(
                                Arg::new("month")
                                    .long("month")
                                    .help("Restrict to one month, any day of it as yyyy/M/d"),
                            ),
                    ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Budget overrides and recommendations")
                .subcommand(
                    Command::new("set")
                        .about("Set a custom monthly budget, overriding recommendations")
                        .arg(user_arg())
                        .arg(amount_arg()),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Drop the custom budget and return to recommendations")
                        .arg(user_arg()),
                )
                .subcommand(
                    json_flags(
                        Command::new("show")
                            .about("Show the current recommendation and month summary")
                            .arg(user_arg()),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly summaries")
                .subcommand(
                    json_flags(
                        Command::new("cashflow")
                            .about("Income vs expense per month")
                            .arg(user_arg())
                            .arg(
                                Arg::new("months")
                                    .long("months")
                                    .value_parser(clap::value_parser!(u32))
                                    .default_value("12"),
                            ),
                    ),
                )
                .subcommand(
                    json_flags(
                        Command::new("spend-by-category")
                            .about("Expense per category for one month")
                            .arg(user_arg())
                            .arg(Arg::new("month").long("month").required(true)),
                    ),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Watch monthly spend against the active budget")
                .arg(user_arg())
                .arg(
                    Arg::new("once")
                        .long("once")
                        .action(ArgAction::SetTrue)
                        .help("Run a single check instead of the periodic loop"),
                ),
        )
}
