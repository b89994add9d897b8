// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketbook::accounts::AccountStore;
use pocketbook::errors::StoreError;
use pocketbook::models::{Account, AccountRole, AccountStatus};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::TempDir;

fn account(user: &str, balance: i64) -> Account {
    Account {
        username: user.into(),
        password: "secret".into(),
        phone: "555-1000".into(),
        email: format!("{}@x.com", user),
        gender: "F".into(),
        address: "1 Main St".into(),
        created: "2024/01/01 00:00".into(),
        status: AccountStatus::Active,
        role: AccountRole::Personal,
        balance: Decimal::from(balance),
    }
}

#[test]
fn insert_and_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = AccountStore::new(dir.path().join("accounts.csv"));
    store.insert(account("alice", 1000)).unwrap();
    store.insert(account("bob", 50)).unwrap();

    let all = store.load();
    assert_eq!(all.len(), 2);
    let alice = store.find("alice").unwrap();
    assert_eq!(alice.balance, Decimal::from(1000));
    assert_eq!(alice.role, AccountRole::Personal);
    assert_eq!(alice.status, AccountStatus::Active);
}

#[test]
fn insert_rejects_duplicate_username() {
    let dir = TempDir::new().unwrap();
    let store = AccountStore::new(dir.path().join("accounts.csv"));
    store.insert(account("alice", 0)).unwrap();
    assert!(matches!(
        store.insert(account("alice", 0)),
        Err(StoreError::AlreadyExists(_))
    ));
}

#[test]
fn mutate_unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = AccountStore::new(dir.path().join("accounts.csv"));
    store.insert(account("alice", 0)).unwrap();
    let err = store.mutate("nobody", |_| Ok(())).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn failing_closure_aborts_the_rewrite() {
    let dir = TempDir::new().unwrap();
    let store = AccountStore::new(dir.path().join("accounts.csv"));
    store.insert(account("alice", 100)).unwrap();

    let res = store.mutate("alice", |a| {
        a.balance = Decimal::from(999);
        Err(StoreError::InsufficientBalance {
            have: Decimal::from(100),
            need: Decimal::from(200),
        })
    });
    assert!(res.is_err());
    assert_eq!(store.find("alice").unwrap().balance, Decimal::from(100));
}

#[test]
fn mutate_leaves_other_rows_untouched() {
    let dir = TempDir::new().unwrap();
    let store = AccountStore::new(dir.path().join("accounts.csv"));
    store.insert(account("alice", 100)).unwrap();
    store.insert(account("bob", 200)).unwrap();

    store
        .mutate("alice", |a| {
            a.balance += Decimal::from(50);
            Ok(())
        })
        .unwrap();

    let bob = store.find("bob").unwrap();
    assert_eq!(bob.balance, Decimal::from(200));
    assert_eq!(bob.email, "bob@x.com");
    assert_eq!(store.find("alice").unwrap().balance, Decimal::from(150));
}

#[test]
fn malformed_rows_are_dropped_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("accounts.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "Username,Password,Phone,Email,Gender,Address,CreationTime,AccountStatus,AccountType,Balance"
    )
    .unwrap();
    writeln!(
        file,
        "alice,secret,555-1000,a@x.com,F,1 Main St,2024/01/01 00:00,ACTIVE,personal,1000.00"
    )
    .unwrap();
    writeln!(
        file,
        "bob,secret,555-2000,b@x.com,M,2 Main St,2024/01/01 00:00,SLEEPING,personal,10.00"
    )
    .unwrap();
    writeln!(
        file,
        "carol,secret,555-3000,c@x.com,F,3 Main St,2024/01/01 00:00,ACTIVE,personal,lots"
    )
    .unwrap();
    drop(file);

    let store = AccountStore::new(&path);
    let all = store.load();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].username, "alice");
}

#[test]
fn status_and_role_parse_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("accounts.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "Username,Password,Phone,Email,Gender,Address,CreationTime,AccountStatus,AccountType,Balance"
    )
    .unwrap();
    writeln!(
        file,
        "root,secret,,,,,2024/01/01 00:00,active,ADMIN,-5.00"
    )
    .unwrap();
    writeln!(
        file,
        "dave,secret,,,,,2024/01/01 00:00,frozen,Personal,7.00"
    )
    .unwrap();
    drop(file);

    let store = AccountStore::new(&path);
    let root = store.find("root").unwrap();
    assert_eq!(root.role, AccountRole::Admin);
    assert_eq!(root.status, AccountStatus::Active);
    let dave = store.find("dave").unwrap();
    assert_eq!(dave.role, AccountRole::Personal);
    assert_eq!(dave.status, AccountStatus::Frozen);
}

#[test]
fn rewrite_does_not_leave_temp_files() {
    let dir = TempDir::new().unwrap();
    let store = AccountStore::new(dir.path().join("accounts.csv"));
    store.insert(account("alice", 0)).unwrap();
    store
        .mutate("alice", |a| {
            a.balance = Decimal::from(1);
            Ok(())
        })
        .unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["accounts.csv".to_string()]);
}
