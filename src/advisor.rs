// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Aggregator;
use crate::config::{DEFAULT_SAVING_RATIO, ECONOMICAL_SAVING_INCREASE};
use crate::ledger::LedgerStore;
use crate::models::{BudgetMode, Recommendation};
use crate::overrides::OverrideStore;
use crate::utils::month_add;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Rule-based budget recommendation. Pure function of the ledger, the
/// override store, and the calendar date; nothing is cached between calls.
pub struct Advisor<'a> {
    aggregator: Aggregator<'a>,
    overrides: &'a OverrideStore,
}

impl<'a> Advisor<'a> {
    pub fn new(ledger: &'a LedgerStore, overrides: &'a OverrideStore) -> Self {
        Advisor {
            aggregator: Aggregator::new(ledger),
            overrides,
        }
    }

    pub fn recommend(&self, user: &str, today: NaiveDate) -> Recommendation {
        let income = self.aggregator.monthly_totals(user, today).total_income;

        // A user-defined budget wins outright and skips every computation.
        if let Some(budget) = self.overrides.get(user) {
            return Recommendation {
                mode: BudgetMode::Custom,
                suggested_budget: budget,
                suggested_saving: (income - budget).max(Decimal::ZERO),
                reason: BudgetMode::Custom.reason(),
                has_past_data: false,
            };
        }

        let mode = if self
            .aggregator
            .had_unstable_spending(user, month_add(today, -1))
        {
            BudgetMode::EconomicalUnstable
        } else if is_festival_month(month_add(today, 1)) {
            BudgetMode::EconomicalFestival
        } else {
            BudgetMode::Normal
        };

        let (avg_ratio, has_past_data) = self.aggregator.average_consumption_ratio(user, today);

        let consumption_ratio = match mode {
            BudgetMode::EconomicalUnstable | BudgetMode::EconomicalFestival => {
                Decimal::ONE - (*DEFAULT_SAVING_RATIO + *ECONOMICAL_SAVING_INCREASE)
            }
            _ if has_past_data => avg_ratio,
            _ => Decimal::ONE - *DEFAULT_SAVING_RATIO,
        };

        let suggested_budget = (income * consumption_ratio).max(Decimal::ZERO);
        let suggested_saving = (income - suggested_budget).max(Decimal::ZERO);

        Recommendation {
            mode,
            suggested_budget,
            suggested_saving,
            reason: mode.reason(),
            has_past_data,
        }
    }
}

/// March, June, November, and December are shopping-festival months.
fn is_festival_month(d: NaiveDate) -> bool {
    matches!(d.month(), 3 | 6 | 11 | 12)
}
