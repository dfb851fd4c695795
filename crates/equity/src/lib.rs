// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker equity calculator.
//!
//! Given the players hole cards and a partial or complete board, computes
//! each player share of the pot by enumerating all the board completions or
//! by sampling random completions when there are too many:
//!
//! ```
//! # use showdown_equity::{EquityConfig, Strategy, Table, calculate};
//! let table = Table::parse(&["AsAh", "KsKh"], "2c7dTh9s").unwrap();
//! let equities = calculate(&table, &EquityConfig::default()).unwrap();
//!
//! assert_eq!(equities.strategy, Strategy::Exhaustive { completions: 44 });
//! assert_eq!(equities.players[1].equity, 2.0 / 44.0);
//! ```
//!
//! The [api] module has the JSON request and response types.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod api;
mod config;
mod engine;
mod error;
mod table;
mod tally;

pub use api::{OddsRequest, OddsResponse, compute_equities};
pub use config::EquityConfig;
pub use engine::{Equities, Strategy, calculate};
pub use error::EquityError;
pub use table::Table;
pub use tally::{PlayerEquity, Tally};
