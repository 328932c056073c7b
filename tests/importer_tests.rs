// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use splittab::core::reconcile::{confirm, preview, ImportTarget};
use splittab::error::Error;
use splittab::models::{Category, Expense, NewExpense, NewUser, User};
use tempfile::NamedTempFile;

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

fn base_categories() -> Vec<Category> {
    vec![category(1, "Food"), category(2, "Transport")]
}

fn base_users() -> Vec<User> {
    vec![user(1, "Alice")]
}

/// In-memory stand-in for the backend, recording what confirm creates.
#[derive(Default)]
struct MemoryBackend {
    users: RefCell<Vec<User>>,
    expenses: RefCell<Vec<NewExpense>>,
    fail_on_expense: Option<usize>,
}

impl ImportTarget for MemoryBackend {
    fn create_user(&self, new: &NewUser) -> Result<User, Error> {
        let mut users = self.users.borrow_mut();
        let created = user(100 + users.len() as i64, &new.name);
        users.push(created.clone());
        Ok(created)
    }

    fn create_expense(&self, new: &NewExpense) -> Result<Expense, Error> {
        let mut expenses = self.expenses.borrow_mut();
        if self.fail_on_expense == Some(expenses.len() + 1) {
            return Err(Error::Transport("backend unreachable".to_string()));
        }
        expenses.push(new.clone());
        Ok(Expense {
            id: expenses.len() as i64,
            amount: new.amount,
            description: new.description.clone(),
            date: new.date,
            created_at: ts(),
            updated_at: None,
            user_id: new.user_id,
            category_id: new.category_id,
            user: user(new.user_id, "stub"),
            category: category(new.category_id, "stub"),
        })
    }
}

#[test]
fn preview_classifies_valid_and_error_rows() {
    let csv = "date,amount,category,description,user\n\
               2025-09-01,45.67,Food,Groceries,Alice\n\
               2025-09-02,abc,Transport,Bus fare,Alice\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();

    assert_eq!(p.summary.total_rows, 2);
    assert_eq!(p.summary.valid_count, 1);
    assert_eq!(p.summary.error_count, 1);
    assert_eq!(p.valid_rows[0].amount, "45.67".parse::<Decimal>().unwrap());
    assert_eq!(p.error_rows[0].row, 2);
    assert!(!p.error_rows[0].error.is_empty());
    assert_eq!(p.error_rows[0].data.amount, "abc");
}

#[test]
fn preview_rejects_negative_amount_but_allows_zero() {
    let csv = "date,amount,category,description,user\n\
               2025-09-01,-3.50,Food,,Alice\n\
               2025-09-02,0,Food,,Alice\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();

    assert_eq!(p.summary.error_count, 1);
    assert!(p.error_rows[0].error.contains("non-negative"));
    assert_eq!(p.summary.valid_count, 1);
    assert_eq!(p.valid_rows[0].amount, Decimal::ZERO);
}

#[test]
fn preview_rejects_unparseable_date() {
    let csv = "date,amount,category,description,user\n2025-13-40,5.00,Food,,Alice\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();

    assert_eq!(p.summary.valid_count, 0);
    assert!(p.error_rows[0].error.contains("YYYY-MM-DD"));
}

#[test]
fn preview_rejects_unknown_category_case_insensitively() {
    let csv = "date,amount,category,description,user\n\
               2025-09-01,5.00,fOOd,,Alice\n\
               2025-09-02,5.00,Rent,,Alice\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();

    assert_eq!(p.summary.valid_count, 1);
    assert_eq!(p.valid_rows[0].category, "fOOd");
    assert_eq!(p.error_rows[0].error, "unknown category: Rent");
}

#[test]
fn preview_rejects_missing_required_fields() {
    let csv = "date,amount,category,description,user\n2025-09-01,5.00,Food,Lunch,\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();

    assert_eq!(p.summary.valid_count, 0);
    assert!(p.error_rows[0].error.contains("user"));
}

#[test]
fn preview_normalizes_empty_description_to_absent() {
    let csv = "date,amount,category,description,user\n2025-09-01,5.00,Food,,Alice\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();

    assert_eq!(p.valid_rows[0].description, None);
}

#[test]
fn preview_collects_new_users_deduplicated() {
    let csv = "date,amount,category,description,user\n\
               2025-09-01,5.00,Food,,Bob\n\
               2025-09-02,6.00,Food,,bob\n\
               2025-09-03,7.00,Food,,Carol\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();

    assert_eq!(p.summary.valid_count, 3);
    assert_eq!(p.new_users, ["Bob", "Carol"]);
    assert_eq!(p.summary.new_user_count, 2);
}

#[test]
fn preview_matches_columns_by_header_name() {
    let csv = "user,description,amount,date,category\nAlice,Groceries,45.67,2025-09-01,Food\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();

    assert_eq!(p.summary.valid_count, 1);
    assert_eq!(p.valid_rows[0].user, "Alice");
    assert_eq!(p.valid_rows[0].date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
}

#[test]
fn preview_is_deterministic() {
    let csv = "date,amount,category,description,user\n\
               2025-09-01,45.67,Food,Groceries,Bob\n\
               2025-09-02,abc,Transport,,Alice\n";
    let first = preview(csv, &base_categories(), &base_users()).unwrap();
    let second = preview(csv, &base_categories(), &base_users()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn preview_reads_file_content_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,amount,category,description,user\n2025-09-01,45.67,Food,Groceries,Alice"
    )
    .unwrap();
    file.flush().unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    let p = preview(&content, &base_categories(), &base_users()).unwrap();
    assert_eq!(p.summary.valid_count, 1);
}

#[test]
fn confirm_creates_new_users_then_expenses_in_file_order() {
    let csv = "date,amount,category,description,user\n\
               2025-09-02,12.50,Transport,Bus fare,Bob\n\
               2025-09-01,45.67,Food,Groceries,Alice\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();
    let backend = MemoryBackend::default();

    let created = confirm(&p, &base_categories(), &base_users(), &backend).unwrap();
    assert_eq!(created, 2);

    let users = backend.users.borrow();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Bob");

    let expenses = backend.expenses.borrow();
    assert_eq!(expenses[0].date, NaiveDate::from_ymd_opt(2025, 9, 2).unwrap());
    assert_eq!(expenses[0].user_id, users[0].id);
    assert_eq!(expenses[1].user_id, 1);
    assert_eq!(expenses[1].category_id, 1);
}

#[test]
fn confirm_rejects_preview_without_valid_rows() {
    let csv = "date,amount,category,description,user\n2025-09-01,abc,Food,,Alice\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();
    let backend = MemoryBackend::default();

    let err = confirm(&p, &base_categories(), &base_users(), &backend).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(backend.expenses.borrow().is_empty());
}

#[test]
fn confirm_reports_failing_row_and_keeps_earlier_rows() {
    let csv = "date,amount,category,description,user\n\
               2025-09-01,1.00,Food,,Alice\n\
               2025-09-02,2.00,Food,,Alice\n";
    let p = preview(csv, &base_categories(), &base_users()).unwrap();
    let backend = MemoryBackend {
        fail_on_expense: Some(2),
        ..Default::default()
    };

    let err = confirm(&p, &base_categories(), &base_users(), &backend).unwrap_err();
    assert!(err.to_string().contains("row 2"));
    assert_eq!(backend.expenses.borrow().len(), 1);
}

#[test]
fn import_cli_accepts_path_and_commit_flag() {
    let cli = splittab::cli::build_cli();
    let matches = cli.get_matches_from([
        "splittab",
        "import",
        "expenses",
        "--path",
        "  expenses.csv  ",
        "--commit",
    ]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    let Some(("expenses", sub)) = import_m.subcommand() else {
        panic!("no expenses subcommand");
    };
    assert_eq!(
        sub.get_one::<String>("path").unwrap().trim(),
        "expenses.csv"
    );
    assert!(sub.get_flag("commit"));
}
