//! Day 1: a 100-position dial turned left and right from 50

use anyhow::bail;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::string_utils::to_num;

const DIAL_SIZE: i64 = 100;
const DIAL_START: i64 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["2025", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct Rotations {
    /// Signed click counts, left turns negative
    turns: Vec<i64>,
    zeros: Option<ZeroCounts>,
}

#[derive(Debug, Clone, Copy)]
struct ZeroCounts {
    rests_at_zero: u64,
    clicks_at_zero: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Rotations;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let turns = aoc_solver::input::lines(input)
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                parse_turn(line.trim())
                    .map_err(|e| ParseError::InvalidFormat(format!("line {}: {e}", i + 1)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Rotations { turns, zeros: None })
    }
}

/// `L68` is -68 clicks, `R14` is +14.
fn parse_turn(line: &str) -> anyhow::Result<i64> {
    let Some((direction, clicks)) = line.split_at_checked(1) else {
        bail!("expected 'L' or 'R', got '{line}'");
    };
    let sign = match direction {
        "L" => -1,
        "R" => 1,
        _ => bail!("expected 'L' or 'R', got '{line}'"),
    };
    let clicks: u32 = to_num(clicks)?;
    Ok(sign * i64::from(clicks))
}

impl Rotations {
    fn zero_counts(&mut self) -> ZeroCounts {
        let turns = &self.turns;
        *self.zeros.get_or_insert_with(|| {
            let mut dial = DIAL_START;
            let mut counts = ZeroCounts {
                rests_at_zero: 0,
                clicks_at_zero: 0,
            };
            for &turn in turns {
                counts.clicks_at_zero += zero_clicks(dial, turn);
                dial = (dial + turn).rem_euclid(DIAL_SIZE);
                if dial == 0 {
                    counts.rests_at_zero += 1;
                }
            }
            counts
        })
    }
}

/// Clicks that land on 0 while turning `turn` from `dial`.
fn zero_clicks(dial: i64, turn: i64) -> u64 {
    let clicks = turn.unsigned_abs();
    // Clicks needed before the first 0 comes up
    let first = match (turn > 0, dial) {
        (_, 0) => DIAL_SIZE,
        (true, d) => DIAL_SIZE - d,
        (false, d) => d,
    };
    let first = first as u64;
    if clicks < first {
        0
    } else {
        1 + (clicks - first) / DIAL_SIZE as u64
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.zero_counts().rests_at_zero.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.zero_counts().clicks_at_zero.to_string())
    }
}
