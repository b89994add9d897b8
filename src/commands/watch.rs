// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accounts::AccountStore;
use crate::config::DataPaths;
use crate::errors::StoreError;
use crate::ledger::LedgerStore;
use crate::models::BudgetAlert;
use crate::monitor::{Session, ThresholdMonitor};
use crate::overrides::OverrideStore;
use anyhow::Result;
use std::sync::Arc;

pub fn handle(paths: &DataPaths, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim().to_string();

    let accounts = AccountStore::new(&paths.accounts);
    if accounts.find(&user).is_none() {
        return Err(StoreError::NotFound(user).into());
    }

    let ledger = Arc::new(LedgerStore::new(&paths.ledger));
    let overrides = Arc::new(OverrideStore::open(&paths.budgets));
    let session = Arc::new(Session::new(user));
    let monitor = ThresholdMonitor::new(ledger, overrides, session);

    if sub.get_flag("once") {
        match monitor.check(chrono::Local::now().date_naive()) {
            Some(alert) => print_alert(&alert),
            None => println!("Spending is within budget."),
        }
        return Ok(());
    }

    println!("Watching budget; press Ctrl-C to stop.");
    let (_handle, alerts) = monitor.spawn();
    for alert in alerts {
        print_alert(&alert);
    }
    Ok(())
}

fn print_alert(alert: &BudgetAlert) {
    match alert {
        BudgetAlert::Approaching {
            spent,
            budget,
            remaining,
        } => println!(
            "Budget warning: spent {:.2} of {:.2}; {:.2} remaining this month.",
            spent, budget, remaining
        ),
        BudgetAlert::Exceeded {
            spent,
            budget,
            overage,
        } => println!(
            "Budget exceeded: spent {:.2} of {:.2}; over by {:.2} this month.",
            spent, budget, overage
        ),
    }
}
