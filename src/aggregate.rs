// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{
    LARGE_CONSUMPTION_FLOOR, LARGE_CONSUMPTION_RATIO, LARGE_TRANSACTION_THRESHOLD,
    LEARNING_MONTHS, UNSTABLE_TRANSACTION_COUNT,
};
use crate::ledger::LedgerStore;
use crate::models::{MonthlyAggregate, TransactionRecord};
use crate::utils::{month_add, month_end, month_start};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Stateless monthly roll-ups over ledger scans. Every call re-reads the
/// ledger; nothing is cached here.
pub struct Aggregator<'a> {
    ledger: &'a LedgerStore,
}

impl<'a> Aggregator<'a> {
    pub fn new(ledger: &'a LedgerStore) -> Self {
        Aggregator { ledger }
    }

    /// Income/expense/category totals for the month containing `month`.
    pub fn monthly_totals(&self, user: &str, month: NaiveDate) -> MonthlyAggregate {
        let records = self.month_records(user, month);
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        let mut category_totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for rec in &records {
            if rec.operation.is_income() {
                total_income += rec.amount;
            } else {
                total_expense += rec.amount;
                let cat = rec
                    .category
                    .clone()
                    .unwrap_or_else(|| "Unclassified".to_string());
                *category_totals.entry(cat).or_insert(Decimal::ZERO) += rec.amount;
            }
        }
        MonthlyAggregate {
            user: user.to_string(),
            year: month.year(),
            month: month.month(),
            total_income,
            total_expense,
            category_totals,
        }
    }

    /// Mean of `expense/income` over the months before `as_of` that had
    /// positive income, plus whether every one of the lookback months did.
    /// The flag is the `has_past_data` the advisor reports.
    pub fn average_consumption_ratio(&self, user: &str, as_of: NaiveDate) -> (Decimal, bool) {
        let mut sum = Decimal::ZERO;
        let mut months_with_income = 0u32;
        for i in 1..=LEARNING_MONTHS {
            let month = month_add(as_of, -(i as i32));
            let totals = self.monthly_totals(user, month);
            if totals.total_income > Decimal::ZERO {
                sum += totals.total_expense / totals.total_income;
                months_with_income += 1;
            }
        }
        let ratio = if months_with_income > 0 {
            sum / Decimal::from(months_with_income)
        } else {
            Decimal::ZERO
        };
        (ratio, months_with_income == LEARNING_MONTHS)
    }

    /// A month is unstable when it holds at least three expense-classified
    /// records above the large-transaction threshold, counted over the whole
    /// month.
    pub fn had_unstable_spending(&self, user: &str, month: NaiveDate) -> bool {
        let large = self
            .month_records(user, month)
            .iter()
            .filter(|r| !r.operation.is_income() && r.amount > *LARGE_TRANSACTION_THRESHOLD)
            .count();
        large >= UNSTABLE_TRANSACTION_COUNT
    }

    /// Expense records above 7% of the month's income (floor 100), the ones
    /// worth calling out individually.
    pub fn large_consumptions(&self, user: &str, month: NaiveDate) -> Vec<TransactionRecord> {
        let totals = self.monthly_totals(user, month);
        let threshold =
            (totals.total_income * *LARGE_CONSUMPTION_RATIO).max(*LARGE_CONSUMPTION_FLOOR);
        self.month_records(user, month)
            .into_iter()
            .filter(|r| !r.operation.is_income() && r.amount > threshold)
            .collect()
    }

    fn month_records(&self, user: &str, month: NaiveDate) -> Vec<TransactionRecord> {
        self.ledger
            .scan(user, Some(month_start(month)), Some(month_end(month)))
    }
}
