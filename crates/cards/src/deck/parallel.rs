// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration.
use rand::prelude::*;
use std::{ops::ControlFlow, panic, thread};

use super::{
    Card, Deck, Rank, Suit, nck, partial_shuffle,
    subset::{for_each_ksubset, nth_ksubset},
};

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards hand.
    ///
    /// The hands are split in `num_tasks` contiguous ranges, each task owns a
    /// state created by `init(task_id)` that is passed to `f` together with a
    /// slice of cards of length k. A task stops early when `f` breaks. Returns
    /// the tasks states ordered by task id.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn par_for_each<T, I, F>(&self, num_tasks: usize, k: usize, init: I, f: F) -> Vec<T>
    where
        T: Send,
        I: Fn(usize) -> T + Sync,
        F: Fn(&mut T, &[Card]) -> ControlFlow<()> + Sync,
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        let num_hands = if k > n { 0 } else { nck(n, k) };
        let hands_per_task = num_hands.div_ceil(num_tasks);

        thread::scope(|s| {
            let handles = (0..num_tasks)
                .map(|task_id| {
                    let (init, f) = (&init, &f);
                    s.spawn(move || {
                        let mut state = init(task_id);
                        let start = task_id * hands_per_task;
                        if start >= num_hands {
                            return state;
                        }

                        let count = hands_per_task.min(num_hands - start);
                        let mut h = [Card::new(Rank::Ace, Suit::Diamonds); 7];
                        let _ = for_each_ksubset(n, k, start, count, |p| {
                            for (idx, &pos) in p.iter().enumerate() {
                                h[idx] = self.cards[pos];
                            }

                            f(&mut state, &h[..k])
                        });

                        state
                    })
                })
                .collect::<Vec<_>>();

            handles.into_iter().map(join).collect()
        })
    }

    /// Parallel for each that visits the k-cards hands in a scattered order.
    ///
    /// Every hand is visited once as with [Deck::par_for_each], but task `t`
    /// takes the hands at positions `t`, `t + num_tasks`, ... of a fixed
    /// permutation of the hands indices, so that the hands visited by any
    /// prefix of a task are spread over the whole deck. This is slower than
    /// `par_for_each` as each hand is built from its index.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn par_for_each_scattered<T, I, F>(
        &self,
        num_tasks: usize,
        k: usize,
        init: I,
        f: F,
    ) -> Vec<T>
    where
        T: Send,
        I: Fn(usize) -> T + Sync,
        F: Fn(&mut T, &[Card]) -> ControlFlow<()> + Sync,
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        let num_hands = if k > n { 0 } else { nck(n, k) };
        let step = scatter_step(num_hands) as u64;

        thread::scope(|s| {
            let handles = (0..num_tasks)
                .map(|task_id| {
                    let (init, f) = (&init, &f);
                    s.spawn(move || {
                        let mut state = init(task_id);
                        let mut h = [Card::new(Rank::Ace, Suit::Diamonds); 7];
                        for pos in (task_id..num_hands).step_by(num_tasks) {
                            let nth = (pos as u64 * step % num_hands as u64) as usize;
                            let p = nth_ksubset(nth, k);
                            for (card, &idx) in h.iter_mut().zip(&p[..k]) {
                                *card = self.cards[idx];
                            }

                            if f(&mut state, &h[..k]).is_break() {
                                break;
                            }
                        }

                        state
                    })
                })
                .collect::<Vec<_>>();

            handles.into_iter().map(join).collect()
        })
    }

    /// Calls the given closure from `num_tasks` parallel tasks generating
    /// `samples` samples of size k in total.
    ///
    /// Each task draws from its own copy of the deck with a partial shuffle,
    /// when a `seed` is given task `i` uses a generator seeded with `seed + i`
    /// so that the samples are reproducible. A task stops early when `f`
    /// breaks. Returns the tasks states ordered by task id.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn par_sample<T, I, F>(
        &self,
        num_tasks: usize,
        samples: usize,
        k: usize,
        seed: Option<u64>,
        init: I,
        f: F,
    ) -> Vec<T>
    where
        T: Send,
        I: Fn(usize) -> T + Sync,
        F: Fn(&mut T, &[Card]) -> ControlFlow<()> + Sync,
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");
        assert!(num_tasks > 0);

        let samples = if k > self.cards.len() { 0 } else { samples };

        thread::scope(|s| {
            let handles = (0..num_tasks)
                .map(|task_id| {
                    let (init, f) = (&init, &f);
                    // Spread the remainder over the first tasks.
                    let task_samples =
                        samples / num_tasks + usize::from(task_id < samples % num_tasks);

                    s.spawn(move || {
                        let mut state = init(task_id);
                        let mut rng = match seed {
                            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(task_id as u64)),
                            None => SmallRng::from_os_rng(),
                        };

                        let mut cards = self.cards.clone();
                        for _ in 0..task_samples {
                            let hand = partial_shuffle(&mut cards, k, &mut rng);
                            if f(&mut state, hand).is_break() {
                                break;
                            }
                        }

                        state
                    })
                })
                .collect::<Vec<_>>();

            handles.into_iter().map(join).collect()
        })
    }
}

/// Returns a step coprime with `total` close to `total / phi`, multiplying
/// the indices 0..total by the step modulo total is a permutation that moves
/// consecutive indices far apart.
fn scatter_step(total: usize) -> usize {
    if total <= 2 {
        return 1;
    }

    let mut step = (total as f64 * 0.618_033_988_75) as usize;
    while gcd(step, total) != 1 {
        step += 1;
    }

    step
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }

    a
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| panic::resume_unwind(payload))
}
