// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --features=parallel --example par_eval_all7
// ```
use std::{ops::ControlFlow, time::Instant};

use showdown_eval::*;

fn main() {
    // Evaluate all 133M hands with 4 parallel tasks.
    const NUM_TASKS: usize = 4;

    let now = Instant::now();

    // Each task counts in its own array, counts are summed when tasks are done.
    let task_counts = Deck::default().par_for_each(
        NUM_TASKS,
        7,
        |_| [0u64; 9],
        |counts, hand| {
            counts[HandValue::eval(hand).rank() as usize] += 1;
            ControlFlow::Continue(())
        },
    );

    let elapsed = now.elapsed().as_secs_f64();

    let agg = task_counts.iter().fold([0u64; 9], |mut acc, counts| {
        acc.iter_mut().zip(counts).for_each(|(a, c)| *a += c);
        acc
    });

    let total = agg.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Elapsed:         {elapsed:.3}s");
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for rank in HandRank::ranks() {
        println!("{:<17}{}", format!("{rank}:"), agg[rank as usize]);
    }
}
