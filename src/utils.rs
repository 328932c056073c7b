// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

const UA: &str = concat!(
    "splittab/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/splittab)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let d = chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((chrono::Datelike::year(&d), chrono::Datelike::month(&d)))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${}", d.round_dp(2))
}

pub fn user_id_by_name(client: &crate::api::ApiClient, name: &str) -> Result<i64> {
    let users = client.list_users()?;
    match users.iter().find(|u| u.name.eq_ignore_ascii_case(name)) {
        Some(u) => Ok(u.id),
        None => Err(crate::error::Error::NotFound(format!("user '{}' not found", name)).into()),
    }
}

pub fn category_id_by_name(client: &crate::api::ApiClient, name: &str) -> Result<i64> {
    let categories = client.list_categories()?;
    match categories.iter().find(|c| c.name.eq_ignore_ascii_case(name)) {
        Some(c) => Ok(c.id),
        None => {
            Err(crate::error::Error::NotFound(format!("category '{}' not found", name)).into())
        }
    }
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

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let last = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if chrono::NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(anyhow::anyhow!("Invalid month number {}", month)),
    };
    Ok(last)
}

pub fn month_start(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{:02}", year, month))
}

pub fn month_end(year: i32, month: u32) -> Result<NaiveDate> {
    let last = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, last)
        .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{:02}", year, month))
}

/// The (year, month) pair `back` whole months before the given one.
pub fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year as i64 * 12 + (month as i64 - 1) - back as i64;
    (total.div_euclid(12) as i32, (total.rem_euclid(12) + 1) as u32)
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
        // If v is an array, stream each element; else stream single line
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
