// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity calculation errors.
use thiserror::Error;

use showdown_cards::{Card, ParseCardError};

/// Errors returned by the equity calculator.
///
/// All variants but [EquityError::InvariantViolation] are validation errors
/// detected before any trial runs and can be fixed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquityError {
    /// A card token could not be parsed.
    #[error(transparent)]
    InvalidCardFormat(#[from] ParseCardError),
    /// The same card was dealt more than once.
    #[error("Duplicate card {0}")]
    DuplicateCard(Card),
    /// The number of players is not in the valid range.
    #[error("Invalid number of players {0}, expected 2 to 9 players")]
    InvalidPlayerCount(usize),
    /// A player doesn't have exactly two hole cards.
    #[error("Player {player} has {count} hole cards, expected 2 cards")]
    InvalidHoleCardCount {
        /// The player index.
        player: usize,
        /// The number of cards.
        count: usize,
    },
    /// The board doesn't have 0, 3, 4, or 5 cards.
    #[error("Invalid board length {0}, expected 0, 3, 4, or 5 cards")]
    InvalidBoardLength(usize),
    /// The deck bookkeeping is broken, the request must be aborted.
    #[error("Internal invariant violation: {0}")]
    InvariantViolation(String),
}

impl EquityError {
    /// Checks if this error is caused by invalid input.
    pub fn is_validation(&self) -> bool {
        !matches!(self, EquityError::InvariantViolation(_))
    }
}
