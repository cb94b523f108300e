//! Re-orders streamed solver results
//!
//! Results arrive in whatever order the thread pool finishes them. Each one
//! is held until every result with a smaller (year, day, part) key that the
//! run expects has been emitted.

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Keys not yet emitted, smallest on top
    expected: BinaryHeap<Reverse<ResultKey>>,
    /// Received results waiting for an earlier key
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(&Reverse(next_expected)) = self.expected.peek() {
            if self.pending.first_key_value().map(|(key, _)| *key) != Some(next_expected) {
                break;
            }
            self.expected.pop();
            ready.extend(self.pending.pop_first().map(|(_, r)| r));
        }
        ready
    }

    /// Remove whatever is still buffered, in key order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{}/{}/{}", year, day, part)),
            source: None,
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    fn parts(results: &[SolverResult]) -> Vec<(u16, u8, u8)> {
        results.iter().map(|r| (r.year, r.day, r.part)).collect()
    }

    #[test]
    fn test_in_order_results_stream_immediately() {
        let mut agg = ResultAggregator::new(vec![key(2025, 4, 1), key(2025, 4, 2)]);

        assert_eq!(parts(&agg.add(make_result(2025, 4, 1))), vec![(2025, 4, 1)]);
        assert!(!agg.is_complete());
        assert_eq!(parts(&agg.add(make_result(2025, 4, 2))), vec![(2025, 4, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_late_result_releases_buffered_ones() {
        let mut agg = ResultAggregator::new(vec![
            key(2025, 12, 1),
            key(2025, 3, 2),
            key(2025, 3, 1),
            key(2024, 25, 1),
        ]);

        assert!(agg.add(make_result(2025, 3, 1)).is_empty());
        assert!(agg.add(make_result(2025, 12, 1)).is_empty());
        assert!(agg.add(make_result(2025, 3, 2)).is_empty());

        let ready = agg.add(make_result(2024, 25, 1));
        assert_eq!(
            parts(&ready),
            vec![(2024, 25, 1), (2025, 3, 1), (2025, 3, 2), (2025, 12, 1)]
        );
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_returns_stragglers_sorted() {
        let mut agg = ResultAggregator::new(vec![key(2025, 9, 1), key(2025, 9, 2), key(2025, 10, 1)]);

        agg.add(make_result(2025, 10, 1));
        agg.add(make_result(2025, 9, 2));

        assert_eq!(parts(&agg.drain()), vec![(2025, 9, 2), (2025, 10, 1)]);
        assert!(!agg.is_complete());
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_is_emitted_sorted(
            (sorted, arrival) in proptest::collection::btree_set((1u8..=25, 1u8..=2), 1..20)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>())
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let mut agg = ResultAggregator::new(
                sorted.iter().map(|&(day, part)| key(2025, day, part)).collect(),
            );
            let mut emitted = Vec::new();
            for (day, part) in arrival {
                emitted.extend(parts(&agg.add(make_result(2025, day, part))));
            }

            let expected: Vec<_> = sorted.iter().map(|&(day, part)| (2025, day, part)).collect();
            prop_assert_eq!(emitted, expected);
            prop_assert!(agg.is_complete());
            prop_assert!(agg.drain().is_empty());
        }
    }
}
