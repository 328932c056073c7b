// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("splittab")
        .version(clap::crate_version!())
        .about("Shared expense tracking from the terminal")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .value_name("URL")
                .help("Backend base URL (overrides env and config file)"),
        )
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add")
                        .about("Create a user")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("color").long("color").value_name("HEX")),
                )
                .subcommand(json_flags(Command::new("list").about("List users")))
                .subcommand(
                    Command::new("set")
                        .about("Update a user")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("color").long("color").value_name("HEX")),
                )
                .subcommand(
                    Command::new("rm").about("Delete a user").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Create a category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("color").long("color").value_name("HEX"))
                        .arg(
                            Arg::new("default")
                                .long("default")
                                .action(ArgAction::SetTrue)
                                .help("Mark as the default category"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("set")
                        .about("Update a category")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("color").long("color").value_name("HEX"))
                        .arg(
                            Arg::new("default")
                                .long("default")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("rm").about("Delete a category").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and browse expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .value_name("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("user").long("user").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List expenses")
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                        .arg(Arg::new("user").long("user"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Update an expense")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("user").long("user"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm").about("Delete an expense").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Spending summaries")
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Monthly summary (current month when omitted)")
                        .arg(Arg::new("month").value_name("YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("range")
                        .about("Summary over a custom date range")
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .required(true)
                                .value_name("YYYY-MM-DD"),
                        )
                        .arg(
                            Arg::new("end")
                                .long("end")
                                .required(true)
                                .value_name("YYYY-MM-DD"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .about("Monthly totals over a trailing window")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("6")
                                .value_parser(value_parser!(u32).range(1..)),
                        ),
                )),
        )
        .subcommand(
            Command::new("import").about("Import CSV data").subcommand(
                Command::new("expenses")
                    .about("Preview a CSV file and optionally import it")
                    .arg(Arg::new("path").long("path").required(true))
                    .arg(
                        Arg::new("commit")
                            .long("commit")
                            .action(ArgAction::SetTrue)
                            .help("Persist the valid rows after previewing"),
                    )
                    .arg(
                        Arg::new("json")
                            .long("json")
                            .action(ArgAction::SetTrue)
                            .help("Print the preview as JSON"),
                    ),
            ),
        )
        .subcommand(
            Command::new("export").about("Export CSV data").subcommand(
                Command::new("expenses")
                    .about("Download expenses as CSV")
                    .arg(
                        Arg::new("range")
                            .long("range")
                            .default_value("current")
                            .value_name("current|last3months|all|custom"),
                    )
                    .arg(Arg::new("start").long("start").value_name("YYYY-MM-DD"))
                    .arg(Arg::new("end").long("end").value_name("YYYY-MM-DD"))
                    .arg(Arg::new("user").long("user"))
                    .arg(Arg::new("category").long("category"))
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .value_name("FILE")
                            .help("Output path (defaults to the server-suggested filename)"),
                    ),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Client configuration")
                .subcommand(
                    Command::new("set-url")
                        .about("Persist the backend base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(Command::new("show").about("Print the resolved configuration")),
        )
}
