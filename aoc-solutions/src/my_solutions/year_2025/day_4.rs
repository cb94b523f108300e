//! Day 4: paper rolls a forklift can reach

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::grid::{Connectivity, Grid};

const ROLL: u8 = b'@';
const EMPTY: u8 = b'.';
/// A roll is accessible with fewer than this many rolls around it
const CROWDED: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["2025", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let lines: Vec<&str> = aoc_solver::input::lines(input)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("empty floor plan".into()));
        }
        if let Some((i, _)) = lines
            .iter()
            .enumerate()
            .find(|(_, l)| l.bytes().any(|b| b != ROLL && b != EMPTY))
        {
            return Err(ParseError::InvalidFormat(format!(
                "line {}: only '@' and '.' are allowed",
                i + 1
            )));
        }
        Ok(Grid::from_lines(&lines, 1, EMPTY))
    }
}

fn accessible(grid: &Grid<u8>) -> Vec<usize> {
    grid.active_indices()
        .filter(|&idx| {
            grid[idx] == ROLL && grid.count_neighbours(idx, &ROLL, Connectivity::Eight) < CROWDED
        })
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(accessible(shared).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut floor = shared.clone();
        let mut removed = 0;
        loop {
            let batch = accessible(&floor);
            if batch.is_empty() {
                break;
            }
            removed += batch.len();
            for idx in batch {
                floor[idx] = EMPTY;
            }
        }
        Ok(removed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "13");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "43");
        // Part 2 works on a copy
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "13");
    }

    #[test]
    fn test_full_block_peels_from_corners() {
        let mut shared = Solver::parse("@@@\n@@@\n@@@\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "9");
    }

    #[test]
    fn test_rejects_other_symbols() {
        assert!(matches!(Solver::parse("@.\n#@\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("\n"), Err(ParseError::MissingData(_))));
    }
}
