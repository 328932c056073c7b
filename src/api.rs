// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::core::reconcile::ImportTarget;
use crate::error::Error;
use crate::models::{
    Category, Expense, ExpenseFilter, ExportPayload, MonthlySummary, NewCategory, NewExpense,
    NewUser, User,
};
use crate::utils::http_client;

/// Blocking client for the expense-tracker REST backend. One instance per
/// process; every call is an independent request/response with no shared
/// state beyond the connection pool.
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn parse<T: DeserializeOwned>(resp: reqwest::blocking::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json()
                .map_err(|e| Error::Transport(format!("decode response: {}", e)));
        }
        Err(Error::from_status(status, detail_message(resp)))
    }

    fn expect_ok(resp: reqwest::blocking::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Error::from_status(status, detail_message(resp)))
    }

    // ----- users -----

    pub fn list_users(&self) -> Result<Vec<User>, Error> {
        Self::parse(self.http.get(self.url("/users")).send()?)
    }

    pub fn get_user(&self, id: i64) -> Result<User, Error> {
        Self::parse(self.http.get(self.url(&format!("/users/{}", id))).send()?)
    }

    pub fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        Self::parse(self.http.post(self.url("/users")).json(user).send()?)
    }

    pub fn update_user(&self, id: i64, user: &NewUser) -> Result<User, Error> {
        Self::parse(
            self.http
                .put(self.url(&format!("/users/{}", id)))
                .json(user)
                .send()?,
        )
    }

    pub fn delete_user(&self, id: i64) -> Result<(), Error> {
        Self::expect_ok(
            self.http
                .delete(self.url(&format!("/users/{}", id)))
                .send()?,
        )
    }

    // ----- categories -----

    pub fn list_categories(&self) -> Result<Vec<Category>, Error> {
        Self::parse(self.http.get(self.url("/categories")).send()?)
    }

    pub fn get_category(&self, id: i64) -> Result<Category, Error> {
        Self::parse(
            self.http
                .get(self.url(&format!("/categories/{}", id)))
                .send()?,
        )
    }

    pub fn create_category(&self, category: &NewCategory) -> Result<Category, Error> {
        Self::parse(
            self.http
                .post(self.url("/categories"))
                .json(category)
                .send()?,
        )
    }

    pub fn update_category(&self, id: i64, category: &NewCategory) -> Result<Category, Error> {
        Self::parse(
            self.http
                .put(self.url(&format!("/categories/{}", id)))
                .json(category)
                .send()?,
        )
    }

    pub fn delete_category(&self, id: i64) -> Result<(), Error> {
        Self::expect_ok(
            self.http
                .delete(self.url(&format!("/categories/{}", id)))
                .send()?,
        )
    }

    // ----- expenses -----

    pub fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error> {
        Self::parse(
            self.http
                .get(self.url("/expenses"))
                .query(&filter.query_params())
                .send()?,
        )
    }

    pub fn get_expense(&self, id: i64) -> Result<Expense, Error> {
        Self::parse(
            self.http
                .get(self.url(&format!("/expenses/{}", id)))
                .send()?,
        )
    }

    pub fn create_expense(&self, expense: &NewExpense) -> Result<Expense, Error> {
        Self::parse(self.http.post(self.url("/expenses")).json(expense).send()?)
    }

    pub fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<Expense, Error> {
        Self::parse(
            self.http
                .put(self.url(&format!("/expenses/{}", id)))
                .json(expense)
                .send()?,
        )
    }

    pub fn delete_expense(&self, id: i64) -> Result<(), Error> {
        Self::expect_ok(
            self.http
                .delete(self.url(&format!("/expenses/{}", id)))
                .send()?,
        )
    }

    // ----- summaries -----

    pub fn monthly_summary(&self, year: i32, month: u32) -> Result<MonthlySummary, Error> {
        Self::parse(
            self.http
                .get(self.url(&format!("/summary/monthly/{}/{}", year, month)))
                .send()?,
        )
    }

    pub fn current_month_summary(&self) -> Result<MonthlySummary, Error> {
        Self::parse(self.http.get(self.url("/summary/current-month")).send()?)
    }

    // ----- export -----

    pub fn export_csv(&self, params: &[(&'static str, String)]) -> Result<ExportPayload, Error> {
        Self::parse(
            self.http
                .get(self.url("/export/csv"))
                .query(params)
                .send()?,
        )
    }
}

impl ImportTarget for ApiClient {
    fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        ApiClient::create_user(self, user)
    }

    fn create_expense(&self, expense: &NewExpense) -> Result<Expense, Error> {
        ApiClient::create_expense(self, expense)
    }
}

/// Pull a human-readable message out of an error response body. The
/// backend sends `{"detail": ...}` where detail is a string or, for
/// field-level validation, a list.
fn detail_message(resp: reqwest::blocking::Response) -> String {
    let fallback = resp
        .status()
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();
    let Ok(body) = resp.text() else {
        return fallback;
    };
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(v) => match v.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => fallback,
        },
        Err(_) if !body.is_empty() => body,
        Err(_) => fallback,
    }
}
