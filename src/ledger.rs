// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Result;
use crate::models::{Operation, TransactionRecord};
use crate::utils::{fmt_ledger_timestamp, parse_ledger_timestamp};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::warn;

const HEADER: [&str; 13] = [
    "user",
    "operation",
    "amount",
    "time",
    "merchant",
    "type",
    "remark",
    "category",
    "payment_method",
    "location",
    "tag",
    "attachment",
    "recurrence",
];

/// Append-only transaction log, one CSV row per record.
///
/// A single writer and any number of readers share the file; the internal
/// lock serializes `append` against itself and against `scan` so a reader
/// never observes a partially written line.
pub struct LedgerStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LedgerStore {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn append(&self, rec: &TransactionRecord) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        // An existing zero-byte file still needs the header, or the first
        // record would be eaten as the header row on scan.
        let fresh = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut w = WriterBuilder::new().has_headers(false).from_writer(file);
        if fresh {
            w.write_record(HEADER)?;
        }
        let amount = rec.amount.to_string();
        let time = fmt_ledger_timestamp(rec.date, rec.time);
        w.write_record([
            rec.user.as_str(),
            rec.operation.as_str(),
            amount.as_str(),
            time.as_str(),
            rec.merchant.as_str(),
            rec.category.as_deref().unwrap_or(""),
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ])?;
        w.flush()?;
        Ok(())
    }

    /// All records for `user` inside the inclusive date bounds, in insertion
    /// order. Malformed rows are skipped and logged; a missing or unreadable
    /// file yields an empty result rather than an error.
    pub fn scan(
        &self,
        user: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<TransactionRecord> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        let mut rdr = match ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
        {
            Ok(r) => r,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ledger unavailable, empty scan");
                return Vec::new();
            }
        };
        let mut out = Vec::new();
        for row in rdr.records() {
            let row = match row {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable ledger row");
                    continue;
                }
            };
            let Some(rec) = parse_row(&row) else {
                warn!(row = ?row, "skipping malformed ledger row");
                continue;
            };
            if rec.user != user {
                continue;
            }
            if from.is_some_and(|f| rec.date < f) || to.is_some_and(|t| rec.date > t) {
                continue;
            }
            out.push(rec);
        }
        out
    }
}

/// Accepts both the full 13-column layout and the minimal 5-column one.
/// Amounts are stored unsigned; a negative amount marks the row malformed.
fn parse_row(row: &StringRecord) -> Option<TransactionRecord> {
    if row.len() < 5 {
        return None;
    }
    let user = row.get(0)?.trim();
    if user.is_empty() {
        return None;
    }
    let operation = Operation::parse(row.get(1)?)?;
    let amount = row.get(2)?.trim().parse::<Decimal>().ok()?;
    if amount.is_sign_negative() {
        return None;
    }
    let (date, time) = parse_ledger_timestamp(row.get(3)?)?;
    let merchant = row.get(4)?.trim().to_string();
    let category = row
        .get(5)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Some(TransactionRecord {
        user: user.to_string(),
        operation,
        amount,
        date,
        time,
        merchant,
        category,
    })
}
