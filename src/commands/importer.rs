// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::core::reconcile::{self, ImportPreview};
use crate::utils::fmt_money;
use anyhow::{Context, Result};

const PREVIEW_ROWS: usize = 5;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => import_expenses(client, sub),
        _ => Ok(()),
    }
}

fn import_expenses(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Open CSV {}", path))?;

    let categories = client.list_categories()?;
    let users = client.list_users()?;
    let preview = reconcile::preview(&content, &categories, &users)?;

    if sub.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        print_preview(&preview);
    }

    if sub.get_flag("commit") {
        let created = reconcile::confirm(&preview, &categories, &users, client)?;
        println!("Imported {} expenses from {}", created, path);
    } else if preview.summary.valid_count > 0 {
        println!(
            "Re-run with --commit to import {} expenses",
            preview.summary.valid_count
        );
    }
    Ok(())
}

fn print_preview(preview: &ImportPreview) {
    let s = &preview.summary;
    println!(
        "{} rows: {} valid, {} with errors, {} new users",
        s.total_rows, s.valid_count, s.error_count, s.new_user_count
    );
    for row in preview.valid_rows.iter().take(PREVIEW_ROWS) {
        println!(
            "  {} | {} | {} | {} | @{}",
            row.date,
            fmt_money(&row.amount),
            row.category,
            row.description.as_deref().unwrap_or(""),
            row.user
        );
    }
    if preview.valid_rows.len() > PREVIEW_ROWS {
        println!("  ... and {} more", preview.valid_rows.len() - PREVIEW_ROWS);
    }
    for err in &preview.error_rows {
        eprintln!("  row {}: {}", err.row, err.error);
    }
    if !preview.new_users.is_empty() {
        println!("New users to create: {}", preview.new_users.join(", "));
    }
}
