// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime};
use pocketbook::ledger::LedgerStore;
use pocketbook::models::{Operation, TransactionRecord};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::TempDir;

fn record(user: &str, op: Operation, amount: i64, date: (i32, u32, u32)) -> TransactionRecord {
    TransactionRecord {
        user: user.into(),
        operation: op,
        amount: Decimal::from(amount),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        time: None,
        merchant: "CornerShop".into(),
        category: Some("Food".into()),
    }
}

#[test]
fn append_then_scan_round_trips() {
    let dir = TempDir::new().unwrap();
    let ledger = LedgerStore::new(dir.path().join("transactions.csv"));

    let mut rec = record("alice", Operation::Deposit, 250, (2024, 5, 2));
    rec.time = Some(NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    ledger.append(&rec).unwrap();

    let got = ledger.scan("alice", None, None);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].user, "alice");
    assert_eq!(got[0].operation, Operation::Deposit);
    assert_eq!(got[0].amount, Decimal::from(250));
    assert_eq!(got[0].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    assert_eq!(got[0].time, Some(NaiveTime::from_hms_opt(9, 15, 0).unwrap()));
    assert_eq!(got[0].merchant, "CornerShop");
    assert_eq!(got[0].category.as_deref(), Some("Food"));
}

#[test]
fn scan_filters_by_user_and_date_range() {
    let dir = TempDir::new().unwrap();
    let ledger = LedgerStore::new(dir.path().join("transactions.csv"));
    ledger.append(&record("alice", Operation::Deposit, 100, (2024, 5, 1))).unwrap();
    ledger.append(&record("alice", Operation::Withdrawal, 20, (2024, 5, 15))).unwrap();
    ledger.append(&record("alice", Operation::Withdrawal, 30, (2024, 6, 1))).unwrap();
    ledger.append(&record("bob", Operation::Deposit, 999, (2024, 5, 15))).unwrap();

    // Bounds are inclusive on both ends.
    let got = ledger.scan(
        "alice",
        Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
        Some(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()),
    );
    assert_eq!(got.len(), 2);
    assert!(got.iter().all(|r| r.user == "alice"));

    let all = ledger.scan("alice", None, None);
    assert_eq!(all.len(), 3);
}

#[test]
fn scan_preserves_insertion_order() {
    let dir = TempDir::new().unwrap();
    let ledger = LedgerStore::new(dir.path().join("transactions.csv"));
    ledger.append(&record("alice", Operation::Deposit, 3, (2024, 5, 30))).unwrap();
    ledger.append(&record("alice", Operation::Deposit, 1, (2024, 5, 1))).unwrap();
    ledger.append(&record("alice", Operation::Deposit, 2, (2024, 5, 15))).unwrap();

    let amounts: Vec<Decimal> = ledger
        .scan("alice", None, None)
        .iter()
        .map(|r| r.amount)
        .collect();
    // No re-sorting by date: rows come back in the order they went in.
    assert_eq!(
        amounts,
        vec![Decimal::from(3), Decimal::from(1), Decimal::from(2)]
    );
}

#[test]
fn malformed_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "user,operation,amount,time,merchant").unwrap();
    writeln!(file, "alice,Deposit,250.00,2024/05/02 09:15,ATM").unwrap();
    writeln!(file, "alice,Deposit,not-a-number,2024/05/03,ATM").unwrap();
    writeln!(file, "alice,Teleport,10.00,2024/05/03,ATM").unwrap();
    writeln!(file, "alice,Deposit,10.00,last tuesday,ATM").unwrap();
    writeln!(file, "alice,Deposit,-10.00,2024/05/03,ATM").unwrap();
    drop(file);

    let ledger = LedgerStore::new(&path);
    let got = ledger.scan("alice", None, None);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].amount, Decimal::from(250));
}

#[test]
fn minimal_five_column_rows_are_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "user,operation,amount,time,merchant").unwrap();
    writeln!(file, "alice,Withdrawal,80.00,2024/5/3,CornerShop").unwrap();
    drop(file);

    let ledger = LedgerStore::new(&path);
    let got = ledger.scan("alice", None, None);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].operation, Operation::Withdrawal);
    assert_eq!(got[0].category, None);
    assert_eq!(got[0].date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
}

#[test]
fn transfer_wire_names_round_trip() {
    let dir = TempDir::new().unwrap();
    let ledger = LedgerStore::new(dir.path().join("transactions.csv"));
    ledger.append(&record("alice", Operation::TransferOut, 40, (2024, 5, 4))).unwrap();
    ledger.append(&record("alice", Operation::TransferIn, 60, (2024, 5, 5))).unwrap();

    let got = ledger.scan("alice", None, None);
    assert_eq!(got[0].operation, Operation::TransferOut);
    assert_eq!(got[1].operation, Operation::TransferIn);

    let raw = std::fs::read_to_string(dir.path().join("transactions.csv")).unwrap();
    assert!(raw.contains("Transfer Out"));
    assert!(raw.contains("Transfer In"));
}

#[test]
fn append_to_empty_file_writes_the_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.csv");
    std::fs::File::create(&path).unwrap();

    let ledger = LedgerStore::new(&path);
    ledger.append(&record("alice", Operation::Deposit, 100, (2024, 5, 1))).unwrap();

    // The first record survives the scan instead of being read as a header.
    let got = ledger.scan("alice", None, None);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].amount, Decimal::from(100));
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("user,operation,amount"));
}

#[test]
fn missing_file_scans_empty() {
    let dir = TempDir::new().unwrap();
    let ledger = LedgerStore::new(dir.path().join("never-created.csv"));
    assert!(ledger.scan("alice", None, None).is_empty());
}
