// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Indexed k-subsets iteration.
use std::ops::ControlFlow;

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u32; 8]; 53] {
    let mut t = [[0u32; 8]; 53];
    let mut n = 0;

    while n <= 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= 7 && k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u32; 8]; 53] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= 52, "n={n} must be 0 <= n <= 52");
    assert!(k <= 7, "k={k} must be 0 <= k <= 7");
    NCKS[n][k] as usize
}

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 260 Knuth 4a).
pub(super) fn nth_ksubset(mut n: usize, k: usize) -> [usize; 7] {
    assert!(k <= 7);

    let mut out = [0; 7];
    for k in (0..k).rev() {
        let mut c = k;
        while nck(c, k + 1) <= n {
            c += 1;
        }

        c -= 1;
        out[k] = c;

        n -= nck(c, k + 1);
    }

    out
}

/// Calls the given closure for count k-subsets of 0..n starting from the nth
/// ksubset, stops when the closure breaks or the subsets are exhausted.
pub(super) fn for_each_ksubset<F>(
    n: usize,
    k: usize,
    nth: usize,
    count: usize,
    mut f: F,
) -> ControlFlow<()>
where
    F: FnMut(&[usize]) -> ControlFlow<()>,
{
    if count == 0 || k == 0 || k > n {
        return ControlFlow::Continue(());
    }

    // Algorithm L from TAOCP 4a
    let mut c = vec![0usize; k + 3];

    let ks = nth_ksubset(nth, k);
    c[1..=k].copy_from_slice(&ks[..k]);
    c[k + 1] = n;

    let mut counter = 1;
    loop {
        f(&c[1..=k])?;

        counter += 1;
        if counter > count {
            break;
        }

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > k {
            break;
        }

        c[j] += 1;
    }

    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nck() {
        // For n < k = 0
        assert_eq!(nck(2, 3), 0);
        assert_eq!(nck(0, 0), 1);

        [1, 52, 1326, 22100, 270725, 2598960, 20358520, 133784560]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(52, k), v));

        [1, 48, 1128, 17296, 194580, 1712304, 12271512, 73629072]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(48, k), v));

        [1, 5, 10, 10, 5, 1, 0, 0]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(5, k), v));

        [1, 1, 0, 0, 0, 0, 0, 0]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(1, k), v));
    }

    #[test]
    fn test_nth_ksubset_small() {
        for k in 1..=5 {
            let mut counter = 0;
            let count = nck(20, k);
            let _ = for_each_ksubset(20, k, 0, count, |s| {
                let ks = nth_ksubset(counter, k);
                assert_eq!(s, &ks[..k]);
                assert!(s.windows(2).all(|w| w[0] < w[1]));
                counter += 1;
                ControlFlow::Continue(())
            });

            assert_eq!(count, counter, "k={k}");
        }
    }

    #[test]
    fn test_for_each_ksubset_ranges() {
        // Splitting the subsets in ranges visits every subset once.
        let (n, k) = (30, 3);
        let total = nck(n, k);
        let per_range = 777;

        let mut seen = Vec::new();
        let mut start = 0;
        while start < total {
            let count = per_range.min(total - start);
            let _ = for_each_ksubset(n, k, start, count, |s| {
                seen.push(s.to_vec());
                ControlFlow::Continue(())
            });
            start += count;
        }

        assert_eq!(seen.len(), total);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_for_each_ksubset_overflow_count() {
        // A count past the last subset stops at the last subset.
        let mut counter = 0;
        let _ = for_each_ksubset(10, 2, 40, 100, |_| {
            counter += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(counter, nck(10, 2) - 40);
    }

    // This takes a while to run in debug mode as it goes through 200M subsets.
    #[test]
    #[ignore]
    fn test_nth_ksubset() {
        let mut counter = 0;
        let count = nck(52, 7);
        let _ = for_each_ksubset(52, 7, 0, count, |s| {
            let ks = nth_ksubset(counter, 7);
            s.iter().zip(ks).for_each(|(&l, r)| assert_eq!(l, r));
            counter += 1;
            ControlFlow::Continue(())
        });

        assert_eq!(count, counter);
    }
}
