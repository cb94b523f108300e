//! Day 6: cephalopod math worksheet
//!
//! Problems sit side by side, separated by columns of spaces, with the
//! operator in the bottom row. Part 1 reads each row of a problem as a
//! number; part 2 reads each column, top digit first.

use std::ops::Range;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["2025", "grid", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn fold(self, values: impl Iterator<Item = u64>) -> u64 {
        match self {
            Op::Add => values.sum(),
            Op::Mul => values.product(),
        }
    }
}

#[derive(Debug)]
struct Problem {
    columns: Range<usize>,
    op: Op,
}

#[derive(Debug)]
pub struct Worksheet {
    grid: Grid<u8>,
    problems: Vec<Problem>,
}

impl AocParser for Solver {
    type SharedData<'a> = Worksheet;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut lines: Vec<&str> = aoc_solver::input::lines(input).collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() < 2 {
            return Err(ParseError::MissingData(
                "expected number rows and an operator row".into(),
            ));
        }

        // Rows may lose trailing spaces; pad them all to the widest
        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);
        let mut grid = Grid::new(lines.len(), width, 1, b' ', b' ');
        for (r, line) in lines.iter().enumerate() {
            let row = grid.row_mut(r);
            row[..line.len()].copy_from_slice(line.as_bytes());
        }

        let op_row = grid.rows() - 1;
        for r in 0..op_row {
            if let Some(&bad) = grid.row(r).iter().find(|b| !b.is_ascii_digit() && **b != b' ') {
                return Err(ParseError::InvalidFormat(format!(
                    "line {}: unexpected '{}'",
                    r + 1,
                    bad as char
                )));
            }
        }

        let problems = column_blocks(&grid)
            .into_iter()
            .map(|columns| {
                let op = match grid.row(op_row)[columns.clone()].iter().find(|&&b| b != b' ') {
                    Some(b'+') => Op::Add,
                    Some(b'*') => Op::Mul,
                    other => {
                        return Err(ParseError::InvalidFormat(format!(
                            "columns {}..{}: expected '+' or '*', got {:?}",
                            columns.start,
                            columns.end,
                            other.map(|&b| b as char)
                        )));
                    }
                };
                Ok(Problem { columns, op })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Worksheet { grid, problems })
    }
}

/// Maximal runs of columns that are not blank in every row.
fn column_blocks(grid: &Grid<u8>) -> Vec<Range<usize>> {
    let blank = |c: usize| (0..grid.rows()).all(|r| grid[(r, c)] == b' ');
    let mut blocks = Vec::new();
    let mut start = None;
    for c in 0..grid.cols() {
        match (blank(c), start) {
            (false, None) => start = Some(c),
            (true, Some(s)) => {
                blocks.push(s..c);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        blocks.push(s..grid.cols());
    }
    blocks
}

/// Number spelled by the digits in `cells`, skipping spaces.
fn read_digits(cells: impl Iterator<Item = u8>) -> Option<u64> {
    cells
        .filter(u8::is_ascii_digit)
        .fold(None, |acc, d| Some(acc.unwrap_or(0) * 10 + u64::from(d - b'0')))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid = &shared.grid;
        let total: u64 = shared
            .problems
            .iter()
            .map(|p| {
                let rows = (0..grid.rows() - 1)
                    .filter_map(|r| read_digits(grid.row(r)[p.columns.clone()].iter().copied()));
                p.op.fold(rows)
            })
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid = &shared.grid;
        let total: u64 = shared
            .problems
            .iter()
            .map(|p| {
                let columns = p
                    .columns
                    .clone()
                    .rev()
                    .filter_map(|c| read_digits((0..grid.rows() - 1).map(|r| grid[(r, c)])));
                p.op.fold(columns)
            })
            .sum();
        Ok(total.to_string())
    }
}
