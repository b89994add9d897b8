// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::Advisor;
use crate::aggregate::Aggregator;
use crate::config::{CHECK_INTERVAL, WARNING_RATIO};
use crate::ledger::LedgerStore;
use crate::models::BudgetAlert;
use crate::overrides::OverrideStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

/// Explicit session context. Replaces any notion of a process-wide current
/// user: callers create one at login and drop it at logout.
pub struct Session {
    user: String,
    warned: AtomicBool,
}

impl Session {
    pub fn new(user: impl Into<String>) -> Self {
        Session {
            user: user.into(),
            warned: AtomicBool::new(false),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// True once a budget alert has fired; stays true for the session.
    pub fn has_warned(&self) -> bool {
        self.warned.load(Ordering::SeqCst)
    }
}

/// Watches cumulative monthly expense against the active budget and raises
/// at most one alert per session. Runs once at session start and then on a
/// fixed period; both paths share the session's warned flag.
pub struct ThresholdMonitor {
    ledger: Arc<LedgerStore>,
    overrides: Arc<OverrideStore>,
    session: Arc<Session>,
}

impl ThresholdMonitor {
    pub fn new(
        ledger: Arc<LedgerStore>,
        overrides: Arc<OverrideStore>,
        session: Arc<Session>,
    ) -> Self {
        ThresholdMonitor {
            ledger,
            overrides,
            session,
        }
    }

    /// Single evaluation. Returns the alert to deliver, or `None` when the
    /// session already warned, no budget is active, or spend is below the
    /// warning line. The active budget is the override when present, else
    /// the advisor's suggestion.
    pub fn check(&self, today: NaiveDate) -> Option<BudgetAlert> {
        if self.session.has_warned() {
            return None;
        }
        let user = self.session.user();
        let spent = Aggregator::new(&self.ledger)
            .monthly_totals(user, today)
            .total_expense;
        let budget = self.overrides.get(user).unwrap_or_else(|| {
            Advisor::new(&self.ledger, &self.overrides)
                .recommend(user, today)
                .suggested_budget
        });
        if budget <= Decimal::ZERO || spent < budget * *WARNING_RATIO {
            return None;
        }
        self.session.warned.store(true, Ordering::SeqCst);
        let alert = if spent >= budget {
            BudgetAlert::Exceeded {
                spent,
                budget,
                overage: spent - budget,
            }
        } else {
            BudgetAlert::Approaching {
                spent,
                budget,
                remaining: budget - spent,
            }
        };
        warn!(user, %spent, %budget, "budget threshold reached");
        Some(alert)
    }

    /// Starts the background check loop: one immediate session-start check,
    /// then one per interval until the handle is stopped. Alerts arrive on
    /// the returned channel.
    pub fn spawn(self) -> (MonitorHandle, Receiver<BudgetAlert>) {
        let (alert_tx, alert_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            loop {
                let today = chrono::Local::now().date_naive();
                if let Some(alert) = self.check(today) {
                    // Receiver gone means the session ended; just stop.
                    if alert_tx.send(alert).is_err() {
                        break;
                    }
                }
                match stop_rx.recv_timeout(CHECK_INTERVAL) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("budget monitor stopped");
        });
        (
            MonitorHandle {
                stop: stop_tx,
                handle,
            },
            alert_rx,
        )
    }
}

pub struct MonitorHandle {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.handle.join();
    }
}
