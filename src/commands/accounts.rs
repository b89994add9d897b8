// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accounts::AccountStore;
use crate::models::{Account, AccountRole, AccountStatus};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(accounts: &AccountStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("open", sub)) => open(accounts, sub)?,
        Some(("list", sub)) => list(accounts, sub)?,
        _ => {}
    }
    Ok(())
}

fn open(accounts: &AccountStore, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim().to_string();
    let role = if sub.get_flag("admin") {
        AccountRole::Admin
    } else {
        AccountRole::Personal
    };
    let account = Account {
        username: user.clone(),
        password: sub.get_one::<String>("password").unwrap().clone(),
        phone: sub.get_one::<String>("phone").unwrap().clone(),
        email: sub.get_one::<String>("email").unwrap().clone(),
        gender: sub.get_one::<String>("gender").unwrap().clone(),
        address: sub.get_one::<String>("address").unwrap().clone(),
        created: chrono::Local::now().format("%Y/%m/%d %H:%M").to_string(),
        status: AccountStatus::Active,
        role,
        balance: Decimal::ZERO,
    };
    accounts.insert(account)?;
    println!("Opened account '{}'", user);
    Ok(())
}

fn list(accounts: &AccountStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let all = accounts.load();
    if !maybe_print_json(json_flag, jsonl_flag, &all)? {
        let rows: Vec<Vec<String>> = all
            .iter()
            .map(|a| {
                vec![
                    a.username.clone(),
                    format!("{:?}", a.status),
                    format!("{:?}", a.role),
                    format!("{:.2}", a.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Username", "Status", "Type", "Balance"], rows)
        );
    }
    Ok(())
}
