// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Deposit,
    Withdrawal,
    TransferIn,
    TransferOut,
    Expense,
    Payment,
}

impl Operation {
    /// Wire names match the CSV layout; `Transfer In`/`Transfer Out` carry a
    /// space, everything else is a single word.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Deposit => "Deposit",
            Operation::Withdrawal => "Withdrawal",
            Operation::TransferIn => "Transfer In",
            Operation::TransferOut => "Transfer Out",
            Operation::Expense => "Expense",
            Operation::Payment => "Payment",
        }
    }

    pub fn parse(s: &str) -> Option<Operation> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("Deposit") {
            Some(Operation::Deposit)
        } else if s.eq_ignore_ascii_case("Withdrawal") {
            Some(Operation::Withdrawal)
        } else if s.eq_ignore_ascii_case("Transfer In") {
            Some(Operation::TransferIn)
        } else if s.eq_ignore_ascii_case("Transfer Out") {
            Some(Operation::TransferOut)
        } else if s.eq_ignore_ascii_case("Expense") {
            Some(Operation::Expense)
        } else if s.eq_ignore_ascii_case("Payment") {
            Some(Operation::Payment)
        } else {
            None
        }
    }

    /// Deposits and incoming transfers add money; every other kind spends it.
    /// Stored amounts are never negative, the sign is implied by the kind.
    pub fn is_income(&self) -> bool {
        matches!(self, Operation::Deposit | Operation::TransferIn)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub user: String,
    pub operation: Operation,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub merchant: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    Personal,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Frozen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub phone: String,
    pub email: String,
    pub gender: String,
    pub address: String,
    pub created: String,
    pub status: AccountStatus,
    pub role: AccountRole,
    pub balance: Decimal,
}

/// Per-month totals derived from a ledger scan. Never persisted; recomputed
/// on every request.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyAggregate {
    pub user: String,
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub category_totals: BTreeMap<String, Decimal>,
}

impl MonthlyAggregate {
    /// Expense category with the largest total, if any expense was recorded.
    pub fn top_category(&self) -> Option<(&str, Decimal)> {
        self.category_totals
            .iter()
            .max_by_key(|(_, v)| **v)
            .map(|(k, v)| (k.as_str(), *v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetMode {
    Normal,
    EconomicalUnstable,
    EconomicalFestival,
    Custom,
}

impl BudgetMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            BudgetMode::Normal => "Normal Mode",
            BudgetMode::EconomicalUnstable | BudgetMode::EconomicalFestival => "Economical Mode",
            BudgetMode::Custom => "Custom Mode",
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            BudgetMode::Normal => "Consumption is stable and predictable now.",
            BudgetMode::EconomicalUnstable => "Users' spending is unstable.",
            BudgetMode::EconomicalFestival => "Next month is the shopping festival.",
            BudgetMode::Custom => "Following your defined budget.",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub mode: BudgetMode,
    pub suggested_budget: Decimal,
    pub suggested_saving: Decimal,
    pub reason: &'static str,
    pub has_past_data: bool,
}

/// Raised by the threshold monitor, at most once per session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BudgetAlert {
    Approaching {
        spent: Decimal,
        budget: Decimal,
        remaining: Decimal,
    },
    Exceeded {
        spent: Decimal,
        budget: Decimal,
        overage: Decimal,
    },
}
