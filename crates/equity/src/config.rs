// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity calculator configuration.
use std::{thread, time::Duration};

/// Equity calculator config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquityConfig {
    /// Enumerate every board completion when there are at most this many.
    pub exact_threshold: usize,
    /// Number of random board completions when there are too many to enumerate.
    pub samples: usize,
    /// Number of parallel tasks.
    pub num_tasks: usize,
    /// Stop and return a partial result after this time.
    pub timeout: Option<Duration>,
    /// Seed for reproducible sampling.
    pub seed: Option<u64>,
}

impl EquityConfig {
    /// Default exact enumeration threshold.
    pub const EXACT_THRESHOLD: usize = 20_000;

    /// Default number of samples.
    pub const SAMPLES: usize = 30_000;
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            exact_threshold: Self::EXACT_THRESHOLD,
            samples: Self::SAMPLES,
            num_tasks: thread::available_parallelism().map_or(1, |n| n.get()),
            timeout: None,
            seed: None,
        }
    }
}
