// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{Result, StoreError};
use crate::models::{Account, AccountRole, AccountStatus};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{error, warn};

const HEADER: [&str; 10] = [
    "Username",
    "Password",
    "Phone",
    "Email",
    "Gender",
    "Address",
    "CreationTime",
    "AccountStatus",
    "AccountType",
    "Balance",
];

/// Balance-bearing account records. Updates are whole-file rewrites under the
/// write lock, staged through a temp file and renamed into place so a crash
/// mid-rewrite leaves the previous file intact.
pub struct AccountStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl AccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AccountStore {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn load(&self) -> Vec<Account> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        self.read_all()
    }

    pub fn find(&self, user: &str) -> Option<Account> {
        self.load().into_iter().find(|a| a.username == user)
    }

    /// Creates a new account row. Fails if the username is already taken.
    pub fn insert(&self, account: Account) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut accounts = self.read_all();
        if accounts.iter().any(|a| a.username == account.username) {
            return Err(StoreError::AlreadyExists(account.username));
        }
        accounts.push(account);
        self.write_all(&accounts)
    }

    /// Loads every account, applies `f` to the one matching `user`, and
    /// rewrites the store. `f` carries the caller's validation; returning an
    /// error aborts the rewrite. The store itself only checks existence.
    pub fn mutate(
        &self,
        user: &str,
        f: impl FnOnce(&mut Account) -> Result<()>,
    ) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut accounts = self.read_all();
        let target = accounts
            .iter_mut()
            .find(|a| a.username == user)
            .ok_or_else(|| StoreError::NotFound(user.to_string()))?;
        f(target)?;
        self.write_all(&accounts)
    }

    fn read_all(&self) -> Vec<Account> {
        let mut rdr = match ReaderBuilder::new().has_headers(true).from_path(&self.path) {
            Ok(r) => r,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "account store unavailable");
                return Vec::new();
            }
        };
        let mut out = Vec::new();
        for row in rdr.records() {
            let row = match row {
                Ok(r) => r,
                Err(e) => {
                    error!(error = %e, "dropping unreadable account row");
                    continue;
                }
            };
            match parse_account(&row) {
                Some(a) => out.push(a),
                None => error!(row = ?row, "dropping malformed account row"),
            }
        }
        out
    }

    fn write_all(&self, accounts: &[Account]) -> Result<()> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut w = WriterBuilder::new().has_headers(false).from_path(&tmp)?;
            w.write_record(HEADER)?;
            for a in accounts {
                let balance = a.balance.to_string();
                w.write_record([
                    a.username.as_str(),
                    a.password.as_str(),
                    a.phone.as_str(),
                    a.email.as_str(),
                    a.gender.as_str(),
                    a.address.as_str(),
                    a.created.as_str(),
                    status_str(a.status),
                    role_str(a.role),
                    balance.as_str(),
                ])?;
            }
            w.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn status_str(s: AccountStatus) -> &'static str {
    match s {
        AccountStatus::Active => "ACTIVE",
        AccountStatus::Frozen => "FROZEN",
    }
}

fn role_str(r: AccountRole) -> &'static str {
    match r {
        AccountRole::Personal => "personal",
        AccountRole::Admin => "Admin",
    }
}

fn parse_account(row: &StringRecord) -> Option<Account> {
    if row.len() < 10 {
        return None;
    }
    let status = match row.get(7)?.trim() {
        s if s.eq_ignore_ascii_case("ACTIVE") => AccountStatus::Active,
        s if s.eq_ignore_ascii_case("FROZEN") => AccountStatus::Frozen,
        _ => return None,
    };
    let role = match row.get(8)?.trim() {
        s if s.eq_ignore_ascii_case("personal") => AccountRole::Personal,
        s if s.eq_ignore_ascii_case("admin") => AccountRole::Admin,
        _ => return None,
    };
    let balance = row.get(9)?.trim().parse::<Decimal>().ok()?;
    Some(Account {
        username: row.get(0)?.trim().to_string(),
        password: row.get(1)?.to_string(),
        phone: row.get(2)?.trim().to_string(),
        email: row.get(3)?.trim().to_string(),
        gender: row.get(4)?.trim().to_string(),
        address: row.get(5)?.trim().to_string(),
        created: row.get(6)?.trim().to_string(),
        status,
        role,
        balance,
    })
}
