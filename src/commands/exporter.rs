// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::core::export::{ExportRange, ExportRequest};
use crate::utils::{category_id_by_name, parse_date, user_id_by_name};
use anyhow::{Context, Result};
use chrono::Utc;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(client, sub),
        _ => Ok(()),
    }
}

fn export_expenses(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub.get_one::<String>("range").unwrap();
    let start = sub
        .get_one::<String>("start")
        .map(|s| parse_date(s))
        .transpose()?;
    let end = sub
        .get_one::<String>("end")
        .map(|s| parse_date(s))
        .transpose()?;
    let range = ExportRange::from_args(kind, start, end)?;

    let user_id = sub
        .get_one::<String>("user")
        .map(|name| user_id_by_name(client, name))
        .transpose()?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|name| category_id_by_name(client, name))
        .transpose()?;

    let request = ExportRequest {
        range,
        user_id,
        category_id,
    };
    let params = request.query_params(Utc::now().date_naive())?;
    let payload = client.export_csv(&params)?;

    let out = sub
        .get_one::<String>("out")
        .map(|s| s.to_string())
        .unwrap_or_else(|| payload.filename.clone());
    std::fs::write(&out, payload.csv_content.as_bytes())
        .with_context(|| format!("Write CSV {}", out))?;
    println!("Exported expenses to {}", out);
    Ok(())
}
