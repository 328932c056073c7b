// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Error;
use crate::models::{Category, Expense, NewExpense, NewUser, User};

/// Persistence seam for `confirm`. The API client implements it against
/// the backend; tests implement it in memory.
pub trait ImportTarget {
    fn create_user(&self, user: &NewUser) -> Result<User, Error>;
    fn create_expense(&self, expense: &NewExpense) -> Result<Expense, Error>;
}

/// Untouched field strings of one CSV data row, kept for error display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawRow {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidRow {
    pub row: usize,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRow {
    pub row: usize,
    pub error: String,
    pub data: RawRow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ImportCounts {
    pub total_rows: usize,
    pub valid_count: usize,
    pub error_count: usize,
    pub new_user_count: usize,
}

/// Dry-run outcome of a CSV import. Purely derived from the file content
/// and the category/user sets it was previewed against; previewing the
/// same input twice yields an identical value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportPreview {
    pub valid_rows: Vec<ValidRow>,
    pub error_rows: Vec<ErrorRow>,
    pub new_users: Vec<String>,
    pub summary: ImportCounts,
}

/// Parse and validate a CSV upload with header
/// `date,amount,category,description,user`. Columns are matched by
/// header name, so their order does not matter. Data rows are numbered
/// from 1. A row referencing an unknown user stays valid; the name is
/// collected into `new_users` (deduplicated case-insensitively, first
/// spelling wins).
pub fn preview(
    content: &str,
    categories: &[Category],
    users: &[User],
) -> Result<ImportPreview, Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = rdr.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let date_col = col("date");
    let amount_col = col("amount");
    let category_col = col("category");
    let description_col = col("description");
    let user_col = col("user");

    let known_categories: HashSet<String> =
        categories.iter().map(|c| c.name.to_lowercase()).collect();
    let known_users: HashSet<String> = users.iter().map(|u| u.name.to_lowercase()).collect();

    let mut valid_rows: Vec<ValidRow> = Vec::new();
    let mut error_rows: Vec<ErrorRow> = Vec::new();
    let mut new_users: Vec<String> = Vec::new();
    let mut seen_new: HashSet<String> = HashSet::new();

    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record?;
        let field = |idx: Option<usize>| {
            idx.and_then(|j| record.get(j))
                .unwrap_or("")
                .trim()
                .to_string()
        };
        let data = RawRow {
            date: field(date_col),
            amount: field(amount_col),
            category: field(category_col),
            description: field(description_col),
            user: field(user_col),
        };

        let mut missing = Vec::new();
        for (name, value) in [
            ("date", &data.date),
            ("amount", &data.amount),
            ("category", &data.category),
            ("user", &data.user),
        ] {
            if value.is_empty() {
                missing.push(name);
            }
        }
        if !missing.is_empty() {
            error_rows.push(ErrorRow {
                row,
                error: format!("missing required fields: {}", missing.join(", ")),
                data,
            });
            continue;
        }

        let date = match NaiveDate::parse_from_str(&data.date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                error_rows.push(ErrorRow {
                    row,
                    error: format!("invalid date '{}', expected YYYY-MM-DD", data.date),
                    data,
                });
                continue;
            }
        };

        let amount = match data.amount.parse::<Decimal>() {
            Ok(a) if a >= Decimal::ZERO => a,
            _ => {
                error_rows.push(ErrorRow {
                    row,
                    error: format!(
                        "invalid amount '{}', expected a non-negative number",
                        data.amount
                    ),
                    data,
                });
                continue;
            }
        };

        if !known_categories.contains(&data.category.to_lowercase()) {
            error_rows.push(ErrorRow {
                row,
                error: format!("unknown category: {}", data.category),
                data,
            });
            continue;
        }

        if !known_users.contains(&data.user.to_lowercase())
            && seen_new.insert(data.user.to_lowercase())
        {
            new_users.push(data.user.clone());
        }

        valid_rows.push(ValidRow {
            row,
            date,
            amount,
            category: data.category,
            description: if data.description.is_empty() {
                None
            } else {
                Some(data.description)
            },
            user: data.user,
        });
    }

    let summary = ImportCounts {
        total_rows: valid_rows.len() + error_rows.len(),
        valid_count: valid_rows.len(),
        error_count: error_rows.len(),
        new_user_count: new_users.len(),
    };
    Ok(ImportPreview {
        valid_rows,
        error_rows,
        new_users,
        summary,
    })
}

/// Persist a previewed import: previously-unseen users are created
/// first, then every valid row becomes an expense, in file order. A
/// failing row aborts with its row number in the error; rows already
/// created stay (no rollback). Returns the number of expenses created.
pub fn confirm<T: ImportTarget>(
    preview: &ImportPreview,
    categories: &[Category],
    users: &[User],
    target: &T,
) -> Result<usize, Error> {
    if preview.valid_rows.is_empty() {
        return Err(Error::Validation(
            "nothing to import: the preview has no valid rows".into(),
        ));
    }

    let mut user_ids: HashMap<String, i64> = users
        .iter()
        .map(|u| (u.name.to_lowercase(), u.id))
        .collect();
    let category_ids: HashMap<String, i64> = categories
        .iter()
        .map(|c| (c.name.to_lowercase(), c.id))
        .collect();

    for name in &preview.new_users {
        let created = target.create_user(&NewUser {
            name: name.clone(),
            color: None,
        })?;
        user_ids.insert(name.to_lowercase(), created.id);
        user_ids.insert(created.name.to_lowercase(), created.id);
    }

    let mut created = 0usize;
    for row in &preview.valid_rows {
        let user_id = *user_ids
            .get(&row.user.to_lowercase())
            .ok_or_else(|| Error::NotFound(format!("user '{}' for row {}", row.user, row.row)))?;
        let category_id = *category_ids.get(&row.category.to_lowercase()).ok_or_else(|| {
            Error::NotFound(format!("category '{}' for row {}", row.category, row.row))
        })?;
        target
            .create_expense(&NewExpense {
                amount: row.amount,
                description: row.description.clone(),
                date: row.date,
                user_id,
                category_id,
            })
            .map_err(|e| with_row(e, row.row))?;
        created += 1;
    }
    Ok(created)
}

fn with_row(e: Error, row: usize) -> Error {
    match e {
        Error::Validation(m) => Error::Validation(format!("row {}: {}", row, m)),
        Error::NotFound(m) => Error::NotFound(format!("row {}: {}", row, m)),
        Error::Transport(m) => Error::Transport(format!("row {}: {}", row, m)),
    }
}
