// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown odds calculator.
//!
//! Reads a JSON request like `{"players": ["AsAh", "KsKh"], "board": "2c7dTh"}`
//! from stdin and writes the players equities as JSON to stdout, an invalid
//! request writes `{"error": "..."}` to stderr and exits with status 1.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result};
use clap::Parser;
use log::error;
use std::{
    io::{self, Read},
    process::ExitCode,
    time::Duration,
};

use showdown_equity::{
    EquityConfig,
    api::{Reply, handle_json},
};

#[derive(Debug, Parser)]
struct Cli {
    /// Enumerate all board completions up to this many.
    #[clap(long, default_value_t = EquityConfig::EXACT_THRESHOLD as u64,
        value_parser = clap::value_parser!(u64).range(0..=2_000_000))]
    exact_threshold: u64,
    /// Number of random board completions when not enumerating.
    #[clap(long, default_value_t = EquityConfig::SAMPLES as u64,
        value_parser = clap::value_parser!(u64).range(1..=10_000_000))]
    samples: u64,
    /// Number of parallel tasks, defaults to the available parallelism.
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..=256))]
    tasks: Option<u16>,
    /// Return a partial result after this many milliseconds.
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,
    /// Seed for reproducible sampling.
    #[clap(long)]
    seed: Option<u64>,
    /// Pretty print the response.
    #[clap(long)]
    pretty: bool,
}

impl Cli {
    fn config(&self) -> EquityConfig {
        let mut config = EquityConfig {
            exact_threshold: self.exact_threshold as usize,
            samples: self.samples as usize,
            timeout: self.timeout_ms.map(Duration::from_millis),
            seed: self.seed,
            ..EquityConfig::default()
        };

        if let Some(tasks) = self.tasks {
            config.num_tasks = tasks as usize;
        }

        config
    }
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match run(&cli.config(), cli.pretty) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(config: &EquityConfig, pretty: bool) -> Result<ExitCode> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read request")?;

    match handle_json(input.trim(), config, pretty)? {
        Reply::Odds(json) => {
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Reply::Invalid(json) => {
            eprintln!("{json}");
            Ok(ExitCode::from(1))
        }
    }
}
