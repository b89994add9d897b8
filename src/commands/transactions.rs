// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accounts::AccountStore;
use crate::ledger::LedgerStore;
use crate::ops::{SpendKind, Teller};
use crate::utils::{
    fmt_ledger_timestamp, maybe_print_json, month_end, month_start, parse_decimal,
    parse_ledger_timestamp, pretty_table,
};
use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

pub fn handle(accounts: &AccountStore, ledger: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    let teller = Teller::new(accounts, ledger);
    match m.subcommand() {
        Some(("deposit", sub)) => deposit(&teller, sub)?,
        Some(("withdraw", sub)) => withdraw(&teller, sub)?,
        Some(("spend", sub)) => spend(&teller, sub)?,
        Some(("transfer", sub)) => transfer(&teller, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn when(sub: &clap::ArgMatches) -> Result<(NaiveDate, Option<NaiveTime>)> {
    match sub.get_one::<String>("date") {
        Some(s) => parse_ledger_timestamp(s)
            .ok_or_else(|| anyhow!("Invalid date '{}', expected yyyy/M/d [HH:mm]", s)),
        None => {
            let now = chrono::Local::now().naive_local();
            Ok((now.date(), Some(now.time())))
        }
    }
}

fn deposit(teller: &Teller, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let merchant = sub.get_one::<String>("merchant").unwrap();
    let (date, time) = when(sub)?;
    teller.deposit(user, amount, merchant, date, time)?;
    println!("Deposited {} for '{}'", amount, user);
    Ok(())
}

fn withdraw(teller: &Teller, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let merchant = sub.get_one::<String>("merchant").unwrap();
    let (date, time) = when(sub)?;
    teller.withdraw(user, amount, merchant, date, time)?;
    println!("Withdrew {} for '{}'", amount, user);
    Ok(())
}

fn spend(teller: &Teller, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let merchant = sub.get_one::<String>("merchant").unwrap();
    let category = sub.get_one::<String>("category").map(|s| s.trim());
    let kind = if sub.get_flag("payment") {
        SpendKind::Payment
    } else {
        SpendKind::Expense
    };
    let (date, time) = when(sub)?;
    teller.spend(user, kind, amount, merchant, category, date, time)?;
    println!("Recorded {} at '{}' for '{}'", amount, merchant, user);
    Ok(())
}

fn transfer(teller: &Teller, sub: &clap::ArgMatches) -> Result<()> {
    let from = sub.get_one::<String>("from").unwrap().trim();
    let to = sub.get_one::<String>("to").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let (date, time) = when(sub)?;
    teller.transfer(from, to, amount, date, time)?;
    println!("Transferred {} from '{}' to '{}'", amount, from, to);
    Ok(())
}

#[derive(Serialize)]
struct TransactionRow {
    time: String,
    operation: &'static str,
    amount: String,
    merchant: String,
    category: String,
}

fn list(ledger: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap().trim();
    let (from, to) = match sub.get_one::<String>("month") {
        Some(s) => {
            let (d, _) = parse_ledger_timestamp(s)
                .ok_or_else(|| anyhow!("Invalid month '{}', expected yyyy/M/d", s))?;
            (Some(month_start(d)), Some(month_end(d)))
        }
        None => (None, None),
    };
    let data: Vec<TransactionRow> = ledger
        .scan(user, from, to)
        .into_iter()
        .map(|r| TransactionRow {
            time: fmt_ledger_timestamp(r.date, r.time),
            operation: r.operation.as_str(),
            amount: format!("{:.2}", r.amount),
            merchant: r.merchant,
            category: r.category.unwrap_or_default(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.time.clone(),
                    r.operation.to_string(),
                    r.amount.clone(),
                    r.merchant.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Time", "Operation", "Amount", "Merchant", "Category"], rows)
        );
    }
    Ok(())
}
