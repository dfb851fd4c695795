// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Trials outcomes counters and equities aggregation.
use serde::Serialize;

use showdown_eval::HandRank;

use crate::{EquityError, Table};

/// Per player trials outcomes.
///
/// For each player the tally counts the trials won in a group of winners of
/// each size, a trial won alone counts as a win and a trial won with other
/// players counts as a tie. Tallies from parallel tasks are merged by adding
/// counters so the result doesn't depend on how trials are split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    /// `shares[player][n - 1]` is the number of trials the player won with
    /// n - 1 other players.
    shares: Vec<[u64; Table::MAX_PLAYERS]>,
    trials: u64,
}

impl Tally {
    /// Creates a tally for the given number of players.
    pub fn new(num_players: usize) -> Self {
        assert!(num_players <= Table::MAX_PLAYERS);
        Self {
            shares: vec![[0; Table::MAX_PLAYERS]; num_players],
            trials: 0,
        }
    }

    /// Records a trial outcome, `winners` has bit i set if player i has the
    /// best hand.
    pub fn record(&mut self, winners: u16) -> Result<(), EquityError> {
        let num_winners = winners.count_ones() as usize;
        if num_winners == 0 || (winners >> self.shares.len()) != 0 {
            return Err(EquityError::InvariantViolation(format!(
                "invalid winners set 0x{winners:x} for {} players",
                self.shares.len()
            )));
        }

        for (player, shares) in self.shares.iter_mut().enumerate() {
            if winners & (1 << player) != 0 {
                shares[num_winners - 1] += 1;
            }
        }

        self.trials += 1;
        Ok(())
    }

    /// Adds the counters of another tally to this tally.
    pub fn merge(&mut self, other: &Tally) {
        assert_eq!(self.shares.len(), other.shares.len());

        for (shares, other) in self.shares.iter_mut().zip(&other.shares) {
            shares.iter_mut().zip(other).for_each(|(s, o)| *s += o);
        }

        self.trials += other.trials;
    }

    /// The number of recorded trials.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Computes each player equity, a tied trial gives each winner an equal
    /// share of the pot.
    pub fn aggregate(&self) -> Vec<PlayerEquity> {
        self.shares
            .iter()
            .map(|shares| {
                let wins = shares[0];
                let ties = shares[1..].iter().sum();

                let equity = if self.trials == 0 {
                    0.0
                } else {
                    let pots = shares
                        .iter()
                        .enumerate()
                        .map(|(idx, &count)| count as f64 / (idx + 1) as f64)
                        .sum::<f64>();
                    pots / self.trials as f64
                };

                PlayerEquity {
                    equity,
                    wins,
                    ties,
                    trials: self.trials,
                    hand: None,
                }
            })
            .collect()
    }
}

/// A player equity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerEquity {
    /// The fraction of the pot this player is expected to win.
    pub equity: f64,
    /// The trials won alone.
    pub wins: u64,
    /// The trials won with other players.
    pub ties: u64,
    /// Total number of trials.
    pub trials: u64,
    /// The player made hand if the flop has been dealt.
    pub hand: Option<HandRank>,
}

impl PlayerEquity {
    /// The fraction of trials won alone.
    pub fn win(&self) -> f64 {
        fraction(self.wins, self.trials)
    }

    /// The fraction of trials won with other players.
    pub fn tie(&self) -> f64 {
        fraction(self.ties, self.trials)
    }
}

fn fraction(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
