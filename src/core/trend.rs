// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Error;
use crate::models::MonthlySummary;
use crate::utils::months_before;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub amount: Decimal,
}

/// Monthly spending series, oldest month first. Months whose fetch
/// failed contribute a zero-amount point and are listed in `failed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
    pub failed: Vec<String>,
}

pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%b %Y").to_string(),
        None => format!("{}-{:02}", year, month),
    }
}

/// Sample the `months_back` trailing months ending at `today`'s month
/// (inclusive), one `fetch` call per month. The series always has
/// exactly `months_back` points: a failed month is absorbed as amount 0
/// rather than aborting the sweep.
pub fn sample<F>(months_back: u32, today: NaiveDate, mut fetch: F) -> TrendSeries
where
    F: FnMut(i32, u32) -> Result<MonthlySummary, Error>,
{
    let mut series = TrendSeries::default();
    for back in (0..months_back).rev() {
        let (year, month) = months_before(today.year(), today.month(), back);
        let label = month_label(year, month);
        let amount = match fetch(year, month) {
            Ok(summary) => summary.summary.total_amount,
            Err(_) => {
                series.failed.push(label.clone());
                Decimal::ZERO
            }
        };
        series.points.push(TrendPoint { label, amount });
    }
    series
}
