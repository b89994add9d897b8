// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::ledger::LedgerStore;
use pocketbook::models::{BudgetAlert, Operation, TransactionRecord};
use pocketbook::monitor::{Session, ThresholdMonitor};
use pocketbook::overrides::OverrideStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    ledger: Arc<LedgerStore>,
    overrides: Arc<OverrideStore>,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let ledger = Arc::new(LedgerStore::new(dir.path().join("transactions.csv")));
    let overrides = Arc::new(OverrideStore::open(dir.path().join("user_budget.csv")));
    Fixture {
        _dir: dir,
        ledger,
        overrides,
    }
}

fn spend(ledger: &LedgerStore, amount: i64, day: u32) {
    ledger
        .append(&TransactionRecord {
            user: "alice".into(),
            operation: Operation::Expense,
            amount: Decimal::from(amount),
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            time: None,
            merchant: "x".into(),
            category: None,
        })
        .unwrap();
}

fn monitor(f: &Fixture) -> ThresholdMonitor {
    ThresholdMonitor::new(
        f.ledger.clone(),
        f.overrides.clone(),
        Arc::new(Session::new("alice")),
    )
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()
}

// Budget 1000, spend reaches 850: one warning with remaining 150, and the
// next check in the same session stays quiet even as spend grows.
#[test]
fn warns_once_per_session() {
    let f = fixture();
    f.overrides.set("alice", Decimal::from(1000)).unwrap();
    spend(&f.ledger, 850, 5);

    let m = monitor(&f);
    let alert = m.check(today()).unwrap();
    assert_eq!(
        alert,
        BudgetAlert::Approaching {
            spent: Decimal::from(850),
            budget: Decimal::from(1000),
            remaining: Decimal::from(150),
        }
    );

    spend(&f.ledger, 50, 6);
    assert_eq!(m.check(today()), None);
    assert_eq!(m.check(today()), None);
}

#[test]
fn fresh_session_can_warn_again() {
    let f = fixture();
    f.overrides.set("alice", Decimal::from(1000)).unwrap();
    spend(&f.ledger, 900, 5);

    let first = monitor(&f);
    assert!(first.check(today()).is_some());
    assert_eq!(first.check(today()), None);

    // A new session gets a fresh warned flag.
    let second = monitor(&f);
    assert!(second.check(today()).is_some());
}

#[test]
fn exceeding_the_budget_reports_overage() {
    let f = fixture();
    f.overrides.set("alice", Decimal::from(1000)).unwrap();
    spend(&f.ledger, 1100, 5);

    let alert = monitor(&f).check(today()).unwrap();
    assert_eq!(
        alert,
        BudgetAlert::Exceeded {
            spent: Decimal::from(1100),
            budget: Decimal::from(1000),
            overage: Decimal::from(100),
        }
    );
}

#[test]
fn under_eighty_percent_stays_quiet() {
    let f = fixture();
    f.overrides.set("alice", Decimal::from(1000)).unwrap();
    spend(&f.ledger, 799, 5);
    assert_eq!(monitor(&f).check(today()), None);
}

#[test]
fn exactly_eighty_percent_warns() {
    let f = fixture();
    f.overrides.set("alice", Decimal::from(1000)).unwrap();
    spend(&f.ledger, 800, 5);
    assert!(matches!(
        monitor(&f).check(today()),
        Some(BudgetAlert::Approaching { .. })
    ));
}

#[test]
fn no_active_budget_means_no_warning() {
    let f = fixture();
    // No override and no income, so the recommended budget is zero.
    spend(&f.ledger, 5000, 5);
    assert_eq!(monitor(&f).check(today()), None);
}

#[test]
fn falls_back_to_recommended_budget_without_override() {
    let f = fixture();
    // Income 1000 this month, no history: Normal mode budget is 800.
    f.ledger
        .append(&TransactionRecord {
            user: "alice".into(),
            operation: Operation::Deposit,
            amount: Decimal::from(1000),
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            time: None,
            merchant: "x".into(),
            category: None,
        })
        .unwrap();
    spend(&f.ledger, 700, 5);

    let alert = monitor(&f).check(today()).unwrap();
    assert_eq!(
        alert,
        BudgetAlert::Approaching {
            spent: Decimal::from(700),
            budget: Decimal::from(800),
            remaining: Decimal::from(100),
        }
    );
}

#[test]
fn spawned_monitor_delivers_the_session_start_alert() {
    let f = fixture();
    f.overrides.set("alice", Decimal::from(1000)).unwrap();
    // The background loop checks against the wall clock, so the spend has
    // to land in the real current month.
    f.ledger
        .append(&TransactionRecord {
            user: "alice".into(),
            operation: Operation::Expense,
            amount: Decimal::from(900),
            date: chrono::Local::now().date_naive(),
            time: None,
            merchant: "x".into(),
            category: None,
        })
        .unwrap();

    let m = ThresholdMonitor::new(
        f.ledger.clone(),
        f.overrides.clone(),
        Arc::new(Session::new("alice")),
    );
    let (handle, alerts) = m.spawn();
    // The session-start check runs immediately; the alert arrives without
    // waiting for a timer tick.
    let alert = alerts
        .recv_timeout(std::time::Duration::from_secs(5))
        .unwrap();
    assert!(matches!(alert, BudgetAlert::Approaching { .. }));
    handle.stop();
}
