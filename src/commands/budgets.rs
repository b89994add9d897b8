// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::Advisor;
use crate::aggregate::Aggregator;
use crate::ledger::LedgerStore;
use crate::overrides::OverrideStore;
use crate::utils::{fmt_ledger_timestamp, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &LedgerStore, overrides: &OverrideStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(overrides, sub)?,
        Some(("clear", sub)) => clear(overrides, sub)?,
        Some(("show", sub)) => show(ledger, overrides, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(overrides: &OverrideStore, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    overrides.set(user, amount)?;
    println!("Custom budget for '{}' = {}", user, amount);
    Ok(())
}

fn clear(overrides: &OverrideStore, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim();
    overrides.clear(user)?;
    println!("Cleared custom budget for '{}'", user);
    Ok(())
}

fn show(ledger: &LedgerStore, overrides: &OverrideStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap().trim();
    let today = chrono::Local::now().date_naive();

    let recommendation = Advisor::new(ledger, overrides).recommend(user, today);
    let aggregator = Aggregator::new(ledger);
    let totals = aggregator.monthly_totals(user, today);

    if maybe_print_json(json_flag, jsonl_flag, &recommendation)? {
        return Ok(());
    }

    println!(
        "{}: {}",
        recommendation.mode.display_name(),
        recommendation.reason
    );
    let mut rows = vec![
        vec!["Suggested budget".into(), format!("{:.2}", recommendation.suggested_budget)],
        vec!["Suggested saving".into(), format!("{:.2}", recommendation.suggested_saving)],
        vec!["Income this month".into(), format!("{:.2}", totals.total_income)],
        vec!["Expense this month".into(), format!("{:.2}", totals.total_expense)],
    ];
    if let Some((category, spent)) = totals.top_category() {
        rows.push(vec!["Top category".into(), format!("{} ({:.2})", category, spent)]);
    }
    println!("{}", pretty_table(&["", ""], rows));

    let large = aggregator.large_consumptions(user, today);
    if !large.is_empty() {
        let rows: Vec<Vec<String>> = large
            .iter()
            .map(|r| {
                vec![
                    fmt_ledger_timestamp(r.date, r.time),
                    format!("{:.2}", r.amount),
                    r.category.clone().unwrap_or_else(|| "Unclassified".into()),
                ]
            })
            .collect();
        println!("Large consumptions this month:");
        println!("{}", pretty_table(&["Time", "Amount", "Category"], rows));
    }
    Ok(())
}
