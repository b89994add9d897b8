// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketbook", "pocketbook"));

/// Fraction of income set aside in Normal mode when there is no usable
/// history (suggested budget = income * (1 - ratio)).
pub static DEFAULT_SAVING_RATIO: Lazy<Decimal> = Lazy::new(|| Decimal::new(2, 1));

/// Extra saving applied on top of the default in either Economical mode.
pub static ECONOMICAL_SAVING_INCREASE: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 1));

/// A single expense above this amount counts toward the unstable-spending
/// check. Source variants disagreed (500 vs 1000); 1000 is canonical here.
pub static LARGE_TRANSACTION_THRESHOLD: Lazy<Decimal> = Lazy::new(|| Decimal::from(1000));

/// At least this many over-threshold expenses in a month flag it unstable.
pub const UNSTABLE_TRANSACTION_COUNT: usize = 3;

/// Months of history consulted for the average consumption ratio.
pub const LEARNING_MONTHS: u32 = 3;

/// A warning fires once monthly expense reaches this fraction of the budget.
pub static WARNING_RATIO: Lazy<Decimal> = Lazy::new(|| Decimal::new(8, 1));

/// Large-consumption listing threshold: 7% of month income, floor of 100.
pub static LARGE_CONSUMPTION_RATIO: Lazy<Decimal> = Lazy::new(|| Decimal::new(7, 2));
pub static LARGE_CONSUMPTION_FLOOR: Lazy<Decimal> = Lazy::new(|| Decimal::from(100));

/// Period of the background budget check.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Locations of the three backing files. Tests point this at a temp dir.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub ledger: PathBuf,
    pub accounts: PathBuf,
    pub budgets: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path) -> Self {
        DataPaths {
            ledger: dir.join("transactions.csv"),
            accounts: dir.join("accounts.csv"),
            budgets: dir.join("user_budget.csv"),
        }
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let dir = proj.data_dir();
    fs::create_dir_all(dir).context("Failed to create data dir")?;
    Ok(dir.to_path_buf())
}

pub fn default_paths() -> Result<DataPaths> {
    Ok(DataPaths::in_dir(&data_dir()?))
}
