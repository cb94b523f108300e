//! Day 7: tachyon beams through a manifold of splitters

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::grid::Grid;

const SPLITTER: i64 = -1;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["2025", "grid", "dp"])]
pub struct Solver;

#[derive(Debug)]
pub struct Manifold {
    /// Splitters are `SPLITTER`, the source holds one beam, the rest 0
    grid: Grid<i64>,
    beams: Option<BeamCount>,
}

#[derive(Debug, Clone, Copy)]
struct BeamCount {
    splits: u64,
    timelines: i64,
}

impl AocParser for Solver {
    type SharedData<'a> = Manifold;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let lines: Vec<&str> = aoc_solver::input::lines(input)
            .filter(|l| !l.is_empty())
            .collect();
        if let Some((r, line)) = lines
            .iter()
            .enumerate()
            .find(|(_, l)| l.bytes().any(|b| !matches!(b, b'.' | b'^' | b'S')))
        {
            return Err(ParseError::InvalidFormat(format!(
                "line {}: unexpected character in '{line}'",
                r + 1
            )));
        }
        let sources = lines.iter().map(|l| l.matches('S').count()).sum::<usize>();
        if sources != 1 {
            return Err(ParseError::InvalidFormat(format!(
                "expected exactly one 'S', found {sources}"
            )));
        }

        let grid = Grid::from_lines_with(
            &lines,
            |b| match b {
                b'^' => SPLITTER,
                b'S' => 1,
                _ => 0,
            },
            1,
            0,
        );
        Ok(Manifold { grid, beams: None })
    }
}

impl Manifold {
    fn beams(&mut self) -> BeamCount {
        let grid = &self.grid;
        *self.beams.get_or_insert_with(|| propagate(grid.clone()))
    }
}

/// Push beam counts down row by row, splitting them around every splitter.
///
/// A split half that lands on a neighbouring splitter, or off the side of
/// the manifold, is dropped rather than counted on that cell.
fn propagate(mut grid: Grid<i64>) -> BeamCount {
    let stride = grid.stride();
    let mut splits = 0;
    for r in 0..grid.rows().saturating_sub(1) {
        for c in 0..grid.cols() {
            let idx = grid.index_of(r, c);
            let beams = grid[idx];
            if beams <= 0 {
                continue;
            }
            let below = idx + stride;
            if grid[below] == SPLITTER {
                splits += 1;
                for side in [below - 1, below + 1] {
                    // Padding columns are off the manifold
                    let col = side % stride;
                    let inside = (grid.padding()..grid.padding() + grid.cols()).contains(&col);
                    if inside && grid[side] != SPLITTER {
                        grid[side] += beams;
                    }
                }
            } else {
                grid[below] += beams;
            }
        }
    }

    let timelines = match grid.rows() {
        0 => 0,
        rows => grid.row(rows - 1).iter().filter(|&&v| v > 0).sum(),
    };
    BeamCount { splits, timelines }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.beams().splits.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.beams().timelines.to_string())
    }
}
