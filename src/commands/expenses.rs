// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::{Expense, ExpenseFilter, NewExpense};
use crate::utils::{
    category_id_by_name, fmt_money, maybe_print_json, month_end, month_start, parse_date,
    parse_decimal, parse_month, pretty_table, user_id_by_name,
};
use anyhow::Result;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("set", sub)) => set(client, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_expense(id)?;
            println!("Removed expense {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let user_id = user_id_by_name(client, sub.get_one::<String>("user").unwrap())?;
    let category_id = category_id_by_name(client, sub.get_one::<String>("category").unwrap())?;
    let description = sub.get_one::<String>("description").map(|s| s.to_string());

    let expense = client.create_expense(&NewExpense {
        amount,
        description,
        date,
        user_id,
        category_id,
    })?;
    println!(
        "Recorded {} on {} for @{} in {} (id {})",
        fmt_money(&expense.amount),
        expense.date,
        expense.user.name,
        expense.category.name,
        expense.id
    );
    Ok(())
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let mut filter = ExpenseFilter::default();
    if let Some(month) = sub.get_one::<String>("month") {
        let (year, m) = parse_month(month)?;
        filter.start_date = Some(month_start(year, m)?);
        filter.end_date = Some(month_end(year, m)?);
    }
    if let Some(user) = sub.get_one::<String>("user") {
        filter.user_id = Some(user_id_by_name(client, user)?);
    }
    if let Some(category) = sub.get_one::<String>("category") {
        filter.category_id = Some(category_id_by_name(client, category)?);
    }
    filter.limit = sub.get_one::<usize>("limit").copied();

    let expenses = client.list_expenses(&filter)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &expenses)? {
        let rows = expenses.iter().map(row_cells).collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Amount", "Category", "User", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn set(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let current = client.get_expense(id)?;

    let update = NewExpense {
        amount: match sub.get_one::<String>("amount") {
            Some(raw) => parse_decimal(raw)?,
            None => current.amount,
        },
        date: match sub.get_one::<String>("date") {
            Some(raw) => parse_date(raw)?,
            None => current.date,
        },
        user_id: match sub.get_one::<String>("user") {
            Some(name) => user_id_by_name(client, name)?,
            None => current.user_id,
        },
        category_id: match sub.get_one::<String>("category") {
            Some(name) => category_id_by_name(client, name)?,
            None => current.category_id,
        },
        description: sub
            .get_one::<String>("description")
            .map(|s| s.to_string())
            .or(current.description),
    };

    let expense = client.update_expense(id, &update)?;
    println!(
        "Updated expense {}: {} on {}",
        expense.id,
        fmt_money(&expense.amount),
        expense.date
    );
    Ok(())
}

fn row_cells(e: &Expense) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.date.to_string(),
        fmt_money(&e.amount),
        e.category.name.clone(),
        e.user.name.clone(),
        e.description.clone().unwrap_or_default(),
    ]
}
