// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::core::export::DateRange;
use crate::models::{CategoryBreakdown, Expense, PeriodSummary, UserBreakdown};

/// Aggregate a set of expenses over a period. Pure function: totals and
/// per-category/per-user breakdowns with percentage of the grand total,
/// sorted descending by amount (ties by name). Daily average divides by
/// the period's inclusive day count.
pub fn summarize(expenses: &[Expense], period: &DateRange) -> PeriodSummary {
    let total_amount: Decimal = expenses.iter().map(|e| e.amount).sum();
    let days = period.days();
    let daily_average = if days > 0 {
        total_amount / Decimal::from(days)
    } else {
        Decimal::ZERO
    };

    let mut by_category: HashMap<i64, (String, String, Decimal, usize)> = HashMap::new();
    let mut by_user: HashMap<i64, (String, String, Decimal, usize)> = HashMap::new();
    for e in expenses {
        let cat = by_category.entry(e.category_id).or_insert_with(|| {
            (
                e.category.name.clone(),
                e.category.color.clone(),
                Decimal::ZERO,
                0,
            )
        });
        cat.2 += e.amount;
        cat.3 += 1;
        let user = by_user
            .entry(e.user_id)
            .or_insert_with(|| (e.user.name.clone(), e.user.color.clone(), Decimal::ZERO, 0));
        user.2 += e.amount;
        user.3 += 1;
    }

    let mut categories: Vec<CategoryBreakdown> = by_category
        .into_values()
        .map(|(name, color, total, count)| CategoryBreakdown {
            category_name: name,
            category_color: color,
            total_amount: total,
            expense_count: count,
            percentage: percentage_of(total, total_amount),
        })
        .collect();
    categories.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });

    let mut users: Vec<UserBreakdown> = by_user
        .into_values()
        .map(|(name, color, total, count)| UserBreakdown {
            user_name: name,
            user_color: color,
            total_amount: total,
            expense_count: count,
            percentage: percentage_of(total, total_amount),
        })
        .collect();
    users.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.user_name.cmp(&b.user_name))
    });

    PeriodSummary {
        total_amount,
        expense_count: expenses.len(),
        daily_average,
        categories,
        users,
    }
}

fn percentage_of(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        part * Decimal::ONE_HUNDRED / total
    }
}
