// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod utils;
pub mod ledger;
pub mod accounts;
pub mod overrides;
pub mod aggregate;
pub mod advisor;
pub mod monitor;
pub mod ops;
pub mod commands;
