// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accounts::AccountStore;
use crate::errors::{Result, StoreError};
use crate::ledger::LedgerStore;
use crate::models::{Account, AccountRole, AccountStatus, Operation, TransactionRecord};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::error;

#[derive(Debug, Clone, Copy)]
pub enum SpendKind {
    Expense,
    Payment,
}

impl SpendKind {
    fn operation(self) -> Operation {
        match self {
            SpendKind::Expense => Operation::Expense,
            SpendKind::Payment => Operation::Payment,
        }
    }
}

/// Money-movement operations. Every balance change pairs an account rewrite
/// with a ledger append; when the append fails after the balance already
/// moved, the stores disagree and the error is surfaced as `Consistency`
/// so operators can reconcile by hand.
pub struct Teller<'a> {
    accounts: &'a AccountStore,
    ledger: &'a LedgerStore,
}

impl<'a> Teller<'a> {
    pub fn new(accounts: &'a AccountStore, ledger: &'a LedgerStore) -> Self {
        Teller { accounts, ledger }
    }

    pub fn deposit(
        &self,
        user: &str,
        amount: Decimal,
        merchant: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
    ) -> Result<()> {
        check_amount(amount)?;
        self.accounts.mutate(user, |a| {
            check_active(a)?;
            a.balance += amount;
            Ok(())
        })?;
        self.record(entry(user, Operation::Deposit, amount, merchant, None, date, time))
    }

    pub fn withdraw(
        &self,
        user: &str,
        amount: Decimal,
        merchant: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
    ) -> Result<()> {
        check_amount(amount)?;
        self.accounts.mutate(user, |a| {
            check_active(a)?;
            check_funds(a, amount)?;
            a.balance -= amount;
            Ok(())
        })?;
        self.record(entry(user, Operation::Withdrawal, amount, merchant, None, date, time))
    }

    pub fn spend(
        &self,
        user: &str,
        kind: SpendKind,
        amount: Decimal,
        merchant: &str,
        category: Option<&str>,
        date: NaiveDate,
        time: Option<NaiveTime>,
    ) -> Result<()> {
        check_amount(amount)?;
        self.accounts.mutate(user, |a| {
            check_active(a)?;
            check_funds(a, amount)?;
            a.balance -= amount;
            Ok(())
        })?;
        self.record(entry(user, kind.operation(), amount, merchant, category, date, time))
    }

    /// Debits `from`, credits `to`, and appends a `Transfer Out`/`Transfer In`
    /// pair with the counterparty as merchant.
    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
        date: NaiveDate,
        time: Option<NaiveTime>,
    ) -> Result<()> {
        check_amount(amount)?;
        // Recipient problems are validation failures; they must surface
        // before the sender's balance moves.
        match self.accounts.find(to) {
            Some(recipient) => check_active(&recipient)?,
            None => return Err(StoreError::NotFound(to.to_string())),
        }
        self.accounts.mutate(from, |a| {
            check_active(a)?;
            check_funds(a, amount)?;
            a.balance -= amount;
            Ok(())
        })?;
        // The sender's balance has moved; any failure past this point leaves
        // the stores inconsistent.
        self.accounts
            .mutate(to, |a| {
                check_active(a)?;
                a.balance += amount;
                Ok(())
            })
            .map_err(|e| consistency(from, e))?;
        self.record(entry(from, Operation::TransferOut, amount, to, None, date, time))
            .map_err(|e| consistency(from, e))?;
        self.record(entry(to, Operation::TransferIn, amount, from, None, date, time))
            .map_err(|e| consistency(to, e))
    }

    fn record(&self, rec: TransactionRecord) -> Result<()> {
        self.ledger.append(&rec).map_err(|e| {
            error!(user = %rec.user, error = %e, "balance updated but ledger append failed");
            consistency(&rec.user, e)
        })
    }
}

fn consistency(user: &str, e: StoreError) -> StoreError {
    match e {
        already @ StoreError::Consistency { .. } => already,
        other => StoreError::Consistency {
            user: user.to_string(),
            detail: other.to_string(),
        },
    }
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(StoreError::NonPositiveAmount(amount));
    }
    Ok(())
}

fn check_active(a: &Account) -> Result<()> {
    if a.status == AccountStatus::Frozen {
        return Err(StoreError::Frozen(a.username.clone()));
    }
    Ok(())
}

/// Personal balances may not go negative; admin accounts are unconstrained.
fn check_funds(a: &Account, amount: Decimal) -> Result<()> {
    if a.role == AccountRole::Personal && a.balance < amount {
        return Err(StoreError::InsufficientBalance {
            have: a.balance,
            need: amount,
        });
    }
    Ok(())
}

fn entry(
    user: &str,
    operation: Operation,
    amount: Decimal,
    merchant: &str,
    category: Option<&str>,
    date: NaiveDate,
    time: Option<NaiveTime>,
) -> TransactionRecord {
    TransactionRecord {
        user: user.to_string(),
        operation,
        amount,
        date,
        time,
        merchant: merchant.to_string(),
        category: category.map(str::to_string),
    }
}
