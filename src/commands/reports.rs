// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::core::export::DateRange;
use crate::core::{summary, trend};
use crate::models::{ExpenseFilter, PeriodSummary};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table};
use anyhow::Result;
use chrono::Utc;

// Matches the backend's export ceiling; a range report needs the whole
// window, not the default page.
const RANGE_FETCH_LIMIT: usize = 10000;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(client, sub)?,
        Some(("range", sub)) => range(client, sub)?,
        Some(("trend", sub)) => trend_report(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn month(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let monthly = match sub.get_one::<String>("month") {
        Some(raw) => {
            let (year, month) = parse_month(raw)?;
            client.monthly_summary(year, month)?
        }
        None => client.current_month_summary()?,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &monthly)? {
        println!(
            "{}",
            trend::month_label(monthly.year, monthly.month).to_uppercase()
        );
        print_summary(&monthly.summary);
    }
    Ok(())
}

fn range(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = parse_date(sub.get_one::<String>("end").unwrap())?;
    let period = DateRange::new(start, end)?;

    let expenses = client.list_expenses(&ExpenseFilter {
        start_date: Some(period.start),
        end_date: Some(period.end),
        limit: Some(RANGE_FETCH_LIMIT),
        ..Default::default()
    })?;
    let report = summary::summarize(&expenses, &period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        println!("{} .. {} ({} days)", period.start, period.end, period.days());
        print_summary(&report);
    }
    Ok(())
}

fn trend_report(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let months = *sub.get_one::<u32>("months").unwrap();
    let today = Utc::now().date_naive();
    let series = trend::sample(months, today, |year, month| {
        client.monthly_summary(year, month)
    });

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        let rows = series
            .points
            .iter()
            .map(|p| vec![p.label.clone(), fmt_money(&p.amount)])
            .collect();
        println!("{}", pretty_table(&["Month", "Total"], rows));
        if !series.failed.is_empty() {
            eprintln!(
                "note: no data returned for {} (shown as $0)",
                series.failed.join(", ")
            );
        }
    }
    Ok(())
}

fn print_summary(s: &PeriodSummary) {
    println!(
        "Total {}  ({} expenses, {} / day)",
        fmt_money(&s.total_amount),
        s.expense_count,
        fmt_money(&s.daily_average)
    );
    let category_rows = s
        .categories
        .iter()
        .map(|c| {
            vec![
                c.category_name.clone(),
                fmt_money(&c.total_amount),
                c.expense_count.to_string(),
                format!("{}%", c.percentage.round_dp(1)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Total", "Count", "Share"], category_rows)
    );
    let user_rows = s
        .users
        .iter()
        .map(|u| {
            vec![
                format!("@{}", u.user_name),
                fmt_money(&u.total_amount),
                u.expense_count.to_string(),
                format!("{}%", u.percentage.round_dp(1)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["User", "Total", "Count", "Share"], user_rows)
    );
}
