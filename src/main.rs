// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pocketbook::{accounts::AccountStore, cli, commands, config, ledger::LedgerStore, overrides::OverrideStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let paths = config::default_paths()?;
    let ledger = LedgerStore::new(&paths.ledger);
    let accounts = AccountStore::new(&paths.accounts);
    let overrides = OverrideStore::open(&paths.budgets);

    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(&accounts, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&accounts, &ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&ledger, &overrides, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("watch", sub)) => commands::watch::handle(&paths, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
