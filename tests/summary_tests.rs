// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use splittab::core::export::DateRange;
use splittab::core::summary::summarize;
use splittab::models::{Category, Expense, User};

fn ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        color: "#4ecdc4".to_string(),
        created_at: ts(),
    }
}

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        color: "#ff6b6b".to_string(),
        is_default: 0,
        created_at: ts(),
    }
}

fn expense(id: i64, amount: &str, date: &str, user: &User, category: &Category) -> Expense {
    Expense {
        id,
        amount: amount.parse().unwrap(),
        description: None,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        created_at: ts(),
        updated_at: None,
        user_id: user.id,
        category_id: category.id,
        user: user.clone(),
        category: category.clone(),
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn september_example() {
    let alice = user(1, "Alice");
    let bob = user(2, "Bob");
    let food = category(1, "Food");
    let transport = category(2, "Transport");
    let expenses = vec![
        expense(1, "45.67", "2025-09-01", &alice, &food),
        expense(2, "12.50", "2025-09-02", &bob, &transport),
    ];
    let period = DateRange::month(2025, 9).unwrap();

    let s = summarize(&expenses, &period);
    assert_eq!(s.total_amount, dec("58.17"));
    assert_eq!(s.expense_count, 2);
    assert_eq!(s.daily_average.round_dp(3), dec("1.939"));

    assert_eq!(s.categories[0].category_name, "Food");
    assert_eq!(s.categories[0].percentage.round_dp(1), dec("78.5"));
    assert_eq!(s.categories[1].category_name, "Transport");
    assert_eq!(s.categories[1].percentage.round_dp(1), dec("21.5"));
}

#[test]
fn category_and_user_totals_match_grand_total() {
    let alice = user(1, "Alice");
    let bob = user(2, "Bob");
    let food = category(1, "Food");
    let transport = category(2, "Transport");
    let expenses = vec![
        expense(1, "10.00", "2025-03-01", &alice, &food),
        expense(2, "20.50", "2025-03-02", &bob, &food),
        expense(3, "5.25", "2025-03-10", &alice, &transport),
    ];
    let s = summarize(&expenses, &DateRange::month(2025, 3).unwrap());

    let category_sum: Decimal = s.categories.iter().map(|c| c.total_amount).sum();
    let user_sum: Decimal = s.users.iter().map(|u| u.total_amount).sum();
    assert_eq!(category_sum, s.total_amount);
    assert_eq!(user_sum, s.total_amount);
    assert_eq!(s.total_amount, dec("35.75"));
}

#[test]
fn zero_total_yields_zero_percentages() {
    let alice = user(1, "Alice");
    let food = category(1, "Food");
    let transport = category(2, "Transport");
    let expenses = vec![
        expense(1, "0", "2025-03-01", &alice, &food),
        expense(2, "0", "2025-03-02", &alice, &transport),
    ];
    let s = summarize(&expenses, &DateRange::month(2025, 3).unwrap());

    assert_eq!(s.total_amount, Decimal::ZERO);
    assert!(s.categories.iter().all(|c| c.percentage.is_zero()));
    assert!(s.users.iter().all(|u| u.percentage.is_zero()));
}

#[test]
fn empty_input_yields_empty_summary() {
    let s = summarize(&[], &DateRange::month(2025, 6).unwrap());
    assert_eq!(s.total_amount, Decimal::ZERO);
    assert_eq!(s.expense_count, 0);
    assert_eq!(s.daily_average, Decimal::ZERO);
    assert!(s.categories.is_empty());
    assert!(s.users.is_empty());
}

#[test]
fn breakdown_sorted_by_total_then_name() {
    let alice = user(1, "Alice");
    let zoo = category(1, "Zoo");
    let art = category(2, "Art");
    let food = category(3, "Food");
    let expenses = vec![
        expense(1, "5.00", "2025-03-01", &alice, &zoo),
        expense(2, "5.00", "2025-03-02", &alice, &art),
        expense(3, "9.00", "2025-03-03", &alice, &food),
    ];
    let s = summarize(&expenses, &DateRange::month(2025, 3).unwrap());

    let names: Vec<&str> = s
        .categories
        .iter()
        .map(|c| c.category_name.as_str())
        .collect();
    assert_eq!(names, ["Food", "Art", "Zoo"]);
}

#[test]
fn groups_accumulate_amounts_and_counts() {
    let alice = user(1, "Alice");
    let food = category(1, "Food");
    let expenses = vec![
        expense(1, "1.10", "2025-03-01", &alice, &food),
        expense(2, "2.20", "2025-03-02", &alice, &food),
        expense(3, "3.30", "2025-03-03", &alice, &food),
    ];
    let s = summarize(&expenses, &DateRange::month(2025, 3).unwrap());

    assert_eq!(s.categories.len(), 1);
    assert_eq!(s.categories[0].total_amount, dec("6.60"));
    assert_eq!(s.categories[0].expense_count, 3);
    assert_eq!(s.users[0].expense_count, 3);
}

#[test]
fn custom_range_daily_average_uses_inclusive_day_count() {
    let alice = user(1, "Alice");
    let food = category(1, "Food");
    let expenses = vec![expense(1, "10.00", "2025-03-05", &alice, &food)];
    let period = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
    )
    .unwrap();

    let s = summarize(&expenses, &period);
    assert_eq!(s.daily_average, dec("2.00"));
}
