// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example par_equity -- --board 2c7dTh AsAh KsKh
// ```
use clap::Parser;
use log::error;
use std::time::Instant;

use showdown_equity::{EquityConfig, Table, calculate};

#[derive(Debug, Parser)]
struct Cli {
    /// The players hole cards.
    #[clap(num_args = 2..=9, required = true)]
    players: Vec<String>,
    /// The board cards.
    #[clap(long, short, default_value = "")]
    board: String,
    /// Number of parallel tasks.
    #[clap(long, short, default_value_t = 4)]
    tasks: usize,
    /// Enumerate up to this many completions.
    #[clap(long, default_value_t = EquityConfig::EXACT_THRESHOLD)]
    exact_threshold: usize,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let table = match Table::parse(cli.players.as_slice(), &cli.board) {
        Ok(table) => table,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    let config = EquityConfig {
        num_tasks: cli.tasks,
        exact_threshold: cli.exact_threshold,
        ..EquityConfig::default()
    };

    let now = Instant::now();
    let equities = match calculate(&table, &config) {
        Ok(equities) => equities,
        Err(e) => {
            error!("{e}");
            return;
        }
    };
    let elapsed = now.elapsed().as_secs_f64();

    println!("Strategy:        {}", equities.strategy);
    println!("Trials:          {}", equities.trials);
    println!("Elapsed:         {elapsed:.3}s");
    println!(
        "Hands/sec:       {:.0}\n",
        (equities.trials * table.players().len() as u64) as f64 / elapsed
    );

    for (hole, player) in table.players().iter().zip(&equities.players) {
        println!(
            "{}{}  equity {:>6.2}%  win {:>6.2}%  tie {:>6.2}%",
            hole[0],
            hole[1],
            player.equity * 100.0,
            player.win() * 100.0,
            player.tie() * 100.0
        );
    }
}
