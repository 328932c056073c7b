// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub is_default: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub user_id: i64,
    pub category_id: i64,
    pub user: User,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewExpense {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub user_id: i64,
    pub category_id: i64,
}

/// Optional filters for the expense list endpoint; unset fields are not
/// sent as query parameters.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(skip) = self.skip {
            params.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(user_id) = self.user_id {
            params.push(("user_id", user_id.to_string()));
        }
        if let Some(category_id) = self.category_id {
            params.push(("category_id", category_id.to_string()));
        }
        if let Some(start) = self.start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category_name: String,
    pub category_color: String,
    pub total_amount: Decimal,
    pub expense_count: usize,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBreakdown {
    pub user_name: String,
    pub user_color: String,
    pub total_amount: Decimal,
    pub expense_count: usize,
    pub percentage: Decimal,
}

/// Aggregate totals over the expenses of one period. Category totals and
/// user totals each sum to `total_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub total_amount: Decimal,
    pub expense_count: usize,
    pub daily_average: Decimal,
    pub categories: Vec<CategoryBreakdown>,
    pub users: Vec<UserBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    #[serde(flatten)]
    pub summary: PeriodSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPayload {
    pub csv_content: String,
    pub filename: String,
}
