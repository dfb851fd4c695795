// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit, parse_cards};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!("Ah".parse::<Card>().unwrap(), ah);
//!
//! let hand = parse_cards("Ah Kd").unwrap();
//! assert_eq!(hand, vec![ah, Card::new(Rank::King, Suit::Diamonds)]);
//! ```
//!
//! and a [Deck] type for shuffling, sampling, and iterating cards in the deck.
//!
//! For example to iterate through all 5 cards hands:
//!
//! ```no_run
//! # use std::ops::ControlFlow;
//! # use showdown_cards::Deck;
//! // Iterate through all 5 cards hands (2.6M hands).
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     counter += 1;
//!     ControlFlow::Continue(())
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
//!
//! to sample 10 random 5-cards hands:
//!
//! ```
//! # use showdown_cards::Deck;
//! let mut counter = 0;
//! Deck::default().sample(&mut rand::rng(), 10, 5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 10);
//! ```
//!
//! The **`parallel`** feature enables parallel sampling and iteration with
//! a given number of tasks, each task owns a state built from its task id
//! that is returned when all tasks are done, the following example uses 4
//! tasks to count all 5 cards hands:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use std::ops::ControlFlow;
//! # use showdown_cards::Deck;
//! let counts = Deck::default().par_for_each(4, 5, |_task_id| 0u64, |count, hand| {
//!     assert_eq!(hand.len(), 5);
//!     *count += 1;
//!     ControlFlow::Continue(())
//! });
//! assert_eq!(counts.iter().sum::<u64>(), 2_598_960);
//! # }
//! ```
//!
//! for parallel sampling the following uses 4 tasks to sample 40 7-cards hands:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_sample() {
//! # use std::ops::ControlFlow;
//! # use showdown_cards::Deck;
//! let counts = Deck::default().par_sample(4, 40, 7, None, |_task_id| 0u64, |count, hand| {
//!     assert_eq!(hand.len(), 7);
//!     *count += 1;
//!     ControlFlow::Continue(())
//! });
//! assert_eq!(counts.iter().sum::<u64>(), 40);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit, nck, parse_cards};
