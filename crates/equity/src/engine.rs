// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity engine.
//!
//! The engine completes the board with the cards left in the deck, either by
//! enumerating every completion when there are few enough of them or by
//! sampling random completions, and evaluates every player hand for each
//! completion. Completions are split across parallel tasks, each task counts
//! the outcomes in its own [Tally] and the tallies are summed at the end.
use log::{debug, info, warn};
use serde::Serialize;
use std::{
    cmp::Ordering,
    fmt,
    ops::ControlFlow,
    sync::atomic::{self, AtomicBool},
    time::Instant,
};

use showdown_cards::{Card, nck};
use showdown_eval::HandValue;

use crate::{EquityConfig, EquityError, PlayerEquity, Table, Tally};

/// How the board completions are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The board is complete, a single trial.
    Complete,
    /// Every board completion is evaluated once.
    Exhaustive {
        /// The number of completions.
        completions: usize,
    },
    /// Random board completions.
    Sampled {
        /// The number of samples.
        samples: usize,
    },
}

impl Strategy {
    /// Chooses a strategy for a table.
    pub fn select(table: &Table, config: &EquityConfig) -> Self {
        let missing = table.missing();
        if missing == 0 {
            return Strategy::Complete;
        }

        let completions = nck(table.deck().count(), missing);
        if completions <= config.exact_threshold {
            Strategy::Exhaustive { completions }
        } else {
            Strategy::Sampled {
                samples: config.samples.max(1),
            }
        }
    }

    /// The number of trials this strategy runs to completion.
    pub fn trials(&self) -> u64 {
        match self {
            Strategy::Complete => 1,
            Strategy::Exhaustive { completions } => *completions as u64,
            Strategy::Sampled { samples } => *samples as u64,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Complete => write!(f, "complete board"),
            Strategy::Exhaustive { completions } => write!(f, "exhaustive {completions}"),
            Strategy::Sampled { samples } => write!(f, "sampled {samples}"),
        }
    }
}

/// The players equities for a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equities {
    /// The players equities in table order.
    pub players: Vec<PlayerEquity>,
    /// The number of evaluated trials.
    pub trials: u64,
    /// The strategy used to generate trials.
    pub strategy: Strategy,
    /// Set if the calculation timed out before running all trials.
    pub partial: bool,
}

/// Computes the players equities for a table.
pub fn calculate(table: &Table, config: &EquityConfig) -> Result<Equities, EquityError> {
    let strategy = Strategy::select(table, config);
    debug!(
        "Selected {strategy} for {} players, {} board cards, {} deck cards",
        table.players().len(),
        table.board().len(),
        table.deck().count()
    );

    let start = Instant::now();
    let control = Control {
        stop: AtomicBool::new(false),
        deadline: config.timeout.map(|t| start + t),
    };

    let num_tasks = config.num_tasks.max(1);
    let init = |_task_id: usize| Task::new(table, &control);
    let trial = |task: &mut Task<'_>, completion: &[Card]| task.run(completion);

    let tasks = match strategy {
        Strategy::Complete => {
            let mut task = init(0);
            let _ = task.run(&[]);
            vec![task]
        }
        // With a deadline a task may stop at any point, scatter the hands so
        // that the completions visited so far are spread over the deck.
        Strategy::Exhaustive { .. } if control.deadline.is_some() => table
            .deck()
            .par_for_each_scattered(num_tasks, table.missing(), init, trial),
        Strategy::Exhaustive { .. } => {
            table
                .deck()
                .par_for_each(num_tasks, table.missing(), init, trial)
        }
        Strategy::Sampled { samples } => table.deck().par_sample(
            num_tasks,
            samples,
            table.missing(),
            config.seed,
            init,
            trial,
        ),
    };

    let mut tally = Tally::new(table.players().len());
    for task in tasks {
        if let Some(err) = task.error {
            return Err(err);
        }

        tally.merge(&task.tally);
    }

    let partial = tally.trials() < strategy.trials();
    if partial {
        warn!(
            "Timed out after {} of {} trials",
            tally.trials(),
            strategy.trials()
        );
    }

    let mut players = tally.aggregate();
    for (idx, player) in players.iter_mut().enumerate() {
        player.hand = table.made_hand(idx);
    }

    info!(
        "Evaluated {} trials in {:.3}s{}",
        tally.trials(),
        start.elapsed().as_secs_f64(),
        if partial { " (partial)" } else { "" }
    );

    Ok(Equities {
        players,
        trials: tally.trials(),
        strategy,
        partial,
    })
}

/// Stop signal shared by the tasks.
struct Control {
    stop: AtomicBool,
    deadline: Option<Instant>,
}

/// A parallel task state.
struct Task<'a> {
    table: &'a Table,
    control: &'a Control,
    tally: Tally,
    error: Option<EquityError>,
}

impl<'a> Task<'a> {
    /// Check the clock every this many trials.
    const CLOCK_INTERVAL: u64 = 64;

    fn new(table: &'a Table, control: &'a Control) -> Self {
        Self {
            table,
            control,
            tally: Tally::new(table.players().len()),
            error: None,
        }
    }

    /// Runs a trial and checks if the task should stop.
    fn run(&mut self, completion: &[Card]) -> ControlFlow<()> {
        if let Err(e) = self.evaluate(completion) {
            self.error = Some(e);
            self.control.stop.store(true, atomic::Ordering::Relaxed);
            return ControlFlow::Break(());
        }

        if self.control.stop.load(atomic::Ordering::Relaxed) {
            return ControlFlow::Break(());
        }

        let expired = self.control.deadline.is_some_and(|deadline| {
            self.tally.trials() % Self::CLOCK_INTERVAL == 0 && Instant::now() >= deadline
        });

        if expired {
            self.control.stop.store(true, atomic::Ordering::Relaxed);
            return ControlFlow::Break(());
        }

        ControlFlow::Continue(())
    }

    /// Evaluates all players hands for a board completion.
    fn evaluate(&mut self, completion: &[Card]) -> Result<(), EquityError> {
        let board = self.table.board();

        let completion_mask = completion.iter().fold(0u64, |acc, c| acc | c.mask());
        if completion_mask & self.table.dealt() != 0
            || completion_mask.count_ones() as usize != completion.len()
            || board.len() + completion.len() != Table::BOARD_SIZE
        {
            return Err(EquityError::InvariantViolation(format!(
                "invalid board completion {completion:?}"
            )));
        }

        // Hole cards go in the first two slots.
        let mut hand = [self.table.players()[0][0]; 7];
        hand[2..2 + board.len()].copy_from_slice(board);
        hand[2 + board.len()..].copy_from_slice(completion);

        let mut best: Option<HandValue> = None;
        let mut winners = 0u16;
        for (idx, hole) in self.table.players().iter().enumerate() {
            hand[..2].copy_from_slice(hole);
            let value = HandValue::eval(&hand);

            match best.map(|b| value.cmp(&b)) {
                None | Some(Ordering::Greater) => {
                    best = Some(value);
                    winners = 1 << idx;
                }
                Some(Ordering::Equal) => winners |= 1 << idx,
                Some(Ordering::Less) => {}
            }
        }

        self.tally.record(winners)
    }
}
