//! Measure how the sort + binary-search three-sum counter scales.
//!
//! [`triples::count_triples`] counts index triples whose values sum to zero
//! in O(n^2 log n). [`harness::run_experiment`] times it over doubling input
//! sizes with per-thread CPU time and writes a two-column table that gnuplot
//! can read directly.

pub mod clock;
pub mod config;
pub mod errors;
pub mod harness;
pub mod input;
pub mod report;
pub mod search;
pub mod triples;
pub mod verify;

#[cfg(test)]
mod cross_module_tests {
    use crate::input::InputGenerator;
    use crate::input::ValueRange;
    use crate::search::binary_search;
    use crate::triples::{count_triples, count_triples_brute};

    #[test]
    fn search_finds_every_element_of_sorted_random_input() {
        let mut generator = InputGenerator::new(ValueRange::default(), Some(5));
        let mut values = generator.generate(500);
        values.sort_unstable();
        values.dedup();
        for (idx, &v) in values.iter().enumerate() {
            assert_eq!(binary_search(v, &values), Some(idx));
        }
    }

    #[test]
    fn fast_and_brute_agree_on_deduplicated_random_input() {
        let range = ValueRange::new(-500, 500).unwrap();
        let mut generator = InputGenerator::new(range, Some(9));
        for _ in 0..10 {
            let mut values = generator.generate(120);
            values.sort_unstable();
            values.dedup();
            assert_eq!(count_triples(&values), count_triples_brute(&values));
        }
    }
}
