// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{Result, StoreError};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::warn;

/// User-supplied budget amounts that preempt computed recommendations.
///
/// Backing file is a headerless `username,amount` CSV. The in-memory map is
/// loaded once at construction and kept write-through: every `set`/`clear`
/// updates the map and rewrites the file before returning.
pub struct OverrideStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, Decimal>>,
}

impl OverrideStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = load_file(&path);
        OverrideStore {
            path,
            cache: RwLock::new(cache),
        }
    }

    pub fn get(&self, user: &str) -> Option<Decimal> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        cache.get(user).copied()
    }

    pub fn set(&self, user: &str, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(StoreError::NonPositiveAmount(amount));
        }
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.insert(user.to_string(), amount);
        self.write_file(&cache)
    }

    pub fn clear(&self, user: &str) -> Result<()> {
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.remove(user);
        self.write_file(&cache)
    }

    fn write_file(&self, cache: &HashMap<String, Decimal>) -> Result<()> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut w = WriterBuilder::new().has_headers(false).from_path(&tmp)?;
            let mut entries: Vec<_> = cache.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (user, amount) in entries {
                let amount = amount.round_dp(2).to_string();
                w.write_record([user.as_str(), amount.as_str()])?;
            }
            w.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn load_file(path: &Path) -> HashMap<String, Decimal> {
    let mut map = HashMap::new();
    let mut rdr = match ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
    {
        Ok(r) => r,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "no budget overrides loaded");
            return map;
        }
    };
    for row in rdr.records() {
        let Ok(row) = row else { continue };
        if row.len() < 2 {
            warn!(row = ?row, "skipping invalid budget override row");
            continue;
        }
        let user = row.get(0).unwrap_or("").trim();
        // Overrides are positive by definition; a hand-edited zero or
        // negative row is as bad as an unparsable one.
        match row.get(1).unwrap_or("").trim().parse::<Decimal>() {
            Ok(amount) if amount > Decimal::ZERO && !user.is_empty() => {
                map.insert(user.to_string(), amount);
            }
            _ => warn!(row = ?row, "skipping invalid budget override row"),
        }
    }
    map
}
