// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Aggregator;
use crate::ledger::LedgerStore;
use crate::utils::{maybe_print_json, month_add, parse_ledger_timestamp, pretty_table};
use anyhow::{anyhow, Result};

pub fn handle(ledger: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(ledger, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn cashflow(ledger: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap().trim();
    let months = *sub.get_one::<u32>("months").unwrap();
    let today = chrono::Local::now().date_naive();

    let aggregator = Aggregator::new(ledger);
    let mut data = Vec::new();
    for back in (0..months).rev() {
        let month = month_add(today, -(back as i32));
        let totals = aggregator.monthly_totals(user, month);
        if totals.total_income.is_zero() && totals.total_expense.is_zero() {
            continue;
        }
        data.push(vec![
            format!("{}-{:02}", totals.year, totals.month),
            format!("{:.2}", totals.total_income),
            format!("{:.2}", totals.total_expense),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn spend_by_category(ledger: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap().trim();
    let month_raw = sub.get_one::<String>("month").unwrap();
    let (month, _) = parse_ledger_timestamp(month_raw)
        .ok_or_else(|| anyhow!("Invalid month '{}', expected yyyy/M/d", month_raw))?;

    let totals = Aggregator::new(ledger).monthly_totals(user, month);
    let mut items: Vec<_> = totals.category_totals.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let data: Vec<Vec<String>> = items
        .into_iter()
        .map(|(cat, amt)| vec![cat, format!("{:.2}", amt)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}
