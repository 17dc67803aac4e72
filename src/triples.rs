use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::search::binary_search;

/// Which counter the harness times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Sort, then binary-search the third value for every pair. O(n^2 log n).
    #[default]
    Fast,
    /// Check every index triple directly. O(n^3).
    Brute,
}

impl Algorithm {
    /// Count zero-sum triples in `values`. `Fast` leaves the buffer sorted.
    pub fn count(self, values: &mut [i64]) -> u64 {
        match self {
            Algorithm::Fast => count_triples_in_place(values),
            Algorithm::Brute => count_triples_brute(values),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fast => "fast",
            Algorithm::Brute => "brute",
        }
    }
}

/// Sort `values` ascending, then count pairs `(i, j)` whose negated sum is
/// found at an index past `j`.
///
/// Inputs with repeated values can be miscounted: the search returns an
/// arbitrary matching copy, and a copy at or before `j` is treated as a miss.
pub fn count_triples_in_place(values: &mut [i64]) -> u64 {
    values.sort_unstable();

    let n = values.len();
    let mut count = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let target = -(values[i] + values[j]);
            if let Some(k) = binary_search(target, values)
                && k > j
            {
                count += 1;
            }
        }
    }
    count
}

/// Same as [`count_triples_in_place`] but works on a private copy.
pub fn count_triples(values: &[i64]) -> u64 {
    let mut scratch = values.to_vec();
    count_triples_in_place(&mut scratch)
}

/// Exhaustive `i < j < k` scan.
pub fn count_triples_brute(values: &[i64]) -> u64 {
    let n = values.len();
    let mut count = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if values[i] + values[j] + values[k] == 0 {
                    count += 1;
                }
            }
        }
    }
    count
}
