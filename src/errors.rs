// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures surfaced by the ledger, account, and override stores.
///
/// Row-level parse problems are not represented here: malformed rows are
/// skipped and logged at the scan site, never returned to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account '{0}' not found")]
    NotFound(String),

    #[error("account '{0}' already registered")]
    AlreadyExists(String),

    #[error("account '{0}' is frozen")]
    Frozen(String),

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Decimal, need: Decimal },

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// The account balance was rewritten but the paired ledger append (or
    /// the reverse) failed. The stores now disagree and need manual
    /// reconciliation; this is deliberately distinct from validation errors.
    #[error("ledger and account store diverged for '{user}': {detail}")]
    Consistency { user: String, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
