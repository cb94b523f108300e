//! Day 5: fresh ingredient ID ranges

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;

use crate::utils::string_utils::{split_once_trimmed, to_num};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["2025", "intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct Inventory {
    /// Sorted inclusive ranges, merged so that none touch
    fresh: Vec<(u64, u64)>,
    available: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Inventory;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut lines = aoc_solver::input::lines(input).enumerate();

        let mut ranges = Vec::new();
        for (i, line) in lines.by_ref() {
            if line.trim().is_empty() {
                break;
            }
            let (lo, hi) = split_once_trimmed(line, "-")
                .and_then(|(lo, hi)| Ok((to_num::<u64>(lo)?, to_num::<u64>(hi)?)))
                .map_err(|e| ParseError::InvalidFormat(format!("line {}: {e}", i + 1)))?;
            if lo > hi {
                return Err(ParseError::InvalidFormat(format!(
                    "line {}: range {lo}-{hi} is reversed",
                    i + 1
                )));
            }
            ranges.push((lo, hi));
        }

        let available = lines
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                to_num(line).map_err(|e| ParseError::InvalidFormat(format!("line {}: {e}", i + 1)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Inventory {
            fresh: merge(ranges),
            available,
        })
    }
}

fn merge(mut ranges: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    ranges.sort_unstable();
    ranges
        .into_iter()
        .coalesce(|a, b| {
            if b.0 <= a.1.saturating_add(1) {
                Ok((a.0, a.1.max(b.1)))
            } else {
                Err((a, b))
            }
        })
        .collect()
}

impl Inventory {
    fn is_fresh(&self, id: u64) -> bool {
        let i = self.fresh.partition_point(|&(_, hi)| hi < id);
        self.fresh.get(i).is_some_and(|&(lo, _)| lo <= id)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = shared
            .available
            .iter()
            .filter(|&&id| shared.is_fresh(id))
            .count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.fresh.iter().map(|&(lo, hi)| hi - lo + 1).sum();
        Ok(total.to_string())
    }
}
