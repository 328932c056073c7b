// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};

use crate::error::Error;
use crate::utils::{month_end, month_start, months_before};

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, Error> {
        if end < start {
            return Err(Error::Validation(format!(
                "end date {} precedes start date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn month(year: i32, month: u32) -> Result<Self, Error> {
        let start = month_start(year, month).map_err(|e| Error::Validation(e.to_string()))?;
        let end = month_end(year, month).map_err(|e| Error::Validation(e.to_string()))?;
        Ok(Self { start, end })
    }

    /// Number of calendar days covered, counting both endpoints.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Symbolic range selector resolved against a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRange {
    Current,
    Last3Months,
    All,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ExportRange {
    /// Build a range from CLI-style arguments. `custom` requires both
    /// bounds; the other selectors ignore them.
    pub fn from_args(
        kind: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, Error> {
        match kind {
            "current" => Ok(ExportRange::Current),
            "last3months" => Ok(ExportRange::Last3Months),
            "all" => Ok(ExportRange::All),
            "custom" => match (start, end) {
                (Some(start), Some(end)) => Ok(ExportRange::Custom { start, end }),
                _ => Err(Error::Validation(
                    "custom range requires both --start and --end".into(),
                )),
            },
            other => Err(Error::Validation(format!(
                "unknown range '{}' (use current|last3months|all|custom)",
                other
            ))),
        }
    }

    /// Resolve to concrete bounds. `All` resolves to `None`: no date
    /// bounds are sent at all.
    pub fn resolve(&self, today: NaiveDate) -> Result<Option<DateRange>, Error> {
        match *self {
            ExportRange::Current => DateRange::month(today.year(), today.month()).map(Some),
            ExportRange::Last3Months => {
                let (from_year, from_month) = months_before(today.year(), today.month(), 2);
                let start =
                    month_start(from_year, from_month).map_err(|e| Error::Validation(e.to_string()))?;
                let end = month_end(today.year(), today.month())
                    .map_err(|e| Error::Validation(e.to_string()))?;
                Ok(Some(DateRange { start, end }))
            }
            ExportRange::All => Ok(None),
            ExportRange::Custom { start, end } => DateRange::new(start, end).map(Some),
        }
    }
}

/// A fully specified export request: range selector plus passthrough
/// user/category filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRequest {
    pub range: ExportRange,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl ExportRequest {
    pub fn query_params(&self, today: NaiveDate) -> Result<Vec<(&'static str, String)>, Error> {
        let mut params = Vec::new();
        if let Some(range) = self.range.resolve(today)? {
            params.push(("start_date", range.start.to_string()));
            params.push(("end_date", range.end.to_string()));
        }
        if let Some(user_id) = self.user_id {
            params.push(("user_id", user_id.to_string()));
        }
        if let Some(category_id) = self.category_id {
            params.push(("category_id", category_id.to_string()));
        }
        Ok(params)
    }
}
