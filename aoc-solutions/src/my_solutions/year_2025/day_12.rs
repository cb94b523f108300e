//! Day 12: packing presents under the Christmas trees

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::grid::Grid;
use crate::utils::string_utils::{extract_numbers, split_once_trimmed, to_num};

const EMPTY: u8 = b'.';
const WALL: u8 = b'#';
const SKIPPED: u8 = b'x';

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2025, day = 12, tags = ["2025", "grid", "backtracking"])]
pub struct Solver;

/// One present in every distinct orientation
#[derive(Debug, Clone)]
struct Shape {
    area: usize,
    /// Longer side of the bounding box
    extent: usize,
    /// Cells of each orientation relative to its first cell in row-major
    /// order, so `(0, 0)` always comes first
    variants: Vec<Vec<(isize, isize)>>,
}

impl Shape {
    fn from_rows(rows: &[&str]) -> Option<Self> {
        let cells: Vec<(isize, isize)> = rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'#')
                    .map(move |(c, _)| (r as isize, c as isize))
            })
            .collect();
        if cells.is_empty() {
            return None;
        }

        let mut variants: Vec<Vec<(isize, isize)>> = Vec::with_capacity(8);
        for flip in [false, true] {
            let mut current: Vec<(isize, isize)> = cells
                .iter()
                .map(|&(r, c)| if flip { (r, -c) } else { (r, c) })
                .collect();
            for _ in 0..4 {
                let variant = anchored(&current);
                if !variants.contains(&variant) {
                    variants.push(variant);
                }
                current = current.iter().map(|&(r, c)| (c, -r)).collect();
            }
        }

        let span = |axis: fn(&(isize, isize)) -> isize| {
            let (lo, hi) = cells
                .iter()
                .map(axis)
                .fold((isize::MAX, isize::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
            (hi - lo) as usize + 1
        };
        let extent = span(|&(r, _)| r).max(span(|&(_, c)| c));
        Some(Self {
            area: cells.len(),
            extent,
            variants,
        })
    }
}

/// Sort cells row-major and shift them so the first one sits at the origin.
fn anchored(cells: &[(isize, isize)]) -> Vec<(isize, isize)> {
    let mut cells = cells.to_vec();
    cells.sort_unstable();
    let (r0, c0) = cells[0];
    cells.iter().map(|&(r, c)| (r - r0, c - c0)).collect()
}

#[derive(Debug, Clone)]
struct Region {
    width: usize,
    height: usize,
    /// How many of each shape must fit
    counts: Vec<usize>,
}

#[derive(Debug)]
pub struct Farm {
    shapes: Vec<Shape>,
    regions: Vec<Region>,
}

impl AocParser for Solver {
    type SharedData<'a> = Farm;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let at_line = |i: usize| move |e: ParseError| ParseError::InvalidFormat(format!("line {}: {e}", i + 1));

        let mut shapes = Vec::new();
        let mut regions = Vec::new();
        let mut lines = aoc_solver::input::lines(input).enumerate().peekable();
        while let Some((i, line)) = lines.next() {
            if line.trim().is_empty() {
                continue;
            }
            let (head, rest) = split_once_trimmed(line, ":").map_err(at_line(i))?;

            if let Some((w, h)) = head.split_once('x') {
                let mut counts: Vec<usize> = extract_numbers(rest).map_err(at_line(i))?;
                if counts.len() > shapes.len() {
                    return Err(at_line(i)(ParseError::Other(format!(
                        "{} counts for {} shapes",
                        counts.len(),
                        shapes.len()
                    ))));
                }
                counts.resize(shapes.len(), 0);
                regions.push(Region {
                    width: to_num(w).map_err(at_line(i))?,
                    height: to_num(h).map_err(at_line(i))?,
                    counts,
                });
                continue;
            }

            let index: usize = to_num(head).map_err(at_line(i))?;
            if index != shapes.len() || !regions.is_empty() {
                return Err(at_line(i)(ParseError::Other(format!(
                    "shape {index} out of order"
                ))));
            }
            let mut rows = Vec::new();
            while let Some((_, row)) = lines.next_if(|(_, l)| !l.trim().is_empty()) {
                rows.push(row.trim());
            }
            let shape = Shape::from_rows(&rows)
                .ok_or_else(|| at_line(i)(ParseError::MissingData(format!("shape {index} is empty"))))?;
            shapes.push(shape);
        }

        Ok(Farm { shapes, regions })
    }
}

/// Cells still free and presents still to place
struct Board {
    grid: Grid<u8>,
    remaining: Vec<usize>,
}

impl Board {
    fn fits(&self, anchor: usize, cells: &[isize]) -> bool {
        cells
            .iter()
            .all(|&off| self.grid[anchor.wrapping_add_signed(off)] == EMPTY)
    }

    fn mark(&mut self, anchor: usize, cells: &[isize], value: u8) {
        for &off in cells {
            self.grid[anchor.wrapping_add_signed(off)] = value;
        }
    }
}

/// Backtracking placement over a padded grid.
///
/// The first empty cell is either covered by a present anchored there or
/// left empty, which spends one cell of slack.
struct Packer {
    /// Active flat indices in row-major order
    order: Vec<usize>,
    /// Flat offsets of each variant of each shape
    offsets: Vec<Vec<Vec<isize>>>,
}

impl Packer {
    fn new(shapes: &[Shape], region: &Region) -> (Self, Board) {
        let padding = shapes
            .iter()
            .map(|s| s.extent)
            .max()
            .unwrap_or(1)
            .saturating_sub(1)
            .max(1);
        // Rows run along the longer side so the scan front stays short;
        // every shape is tried in all orientations, so transposing is free
        let (rows, cols) = (
            region.width.max(region.height),
            region.width.min(region.height),
        );
        let grid = Grid::new(rows, cols, padding, EMPTY, WALL);
        let stride = grid.stride() as isize;
        let offsets = shapes
            .iter()
            .map(|shape| {
                shape
                    .variants
                    .iter()
                    .map(|cells| cells.iter().map(|&(r, c)| r * stride + c).collect())
                    .collect()
            })
            .collect();
        let packer = Self {
            order: grid.active_indices().collect(),
            offsets,
        };
        let board = Board {
            grid,
            remaining: region.counts.clone(),
        };
        (packer, board)
    }

    fn solve(&self, board: &mut Board, from: usize, slack: usize) -> bool {
        if board.remaining.iter().all(|&n| n == 0) {
            return true;
        }
        let Some(pos) = (from..self.order.len()).find(|&p| board.grid[self.order[p]] == EMPTY)
        else {
            return false;
        };
        let anchor = self.order[pos];

        for (shape, variants) in self.offsets.iter().enumerate() {
            if board.remaining[shape] == 0 {
                continue;
            }
            for cells in variants {
                if !board.fits(anchor, cells) {
                    continue;
                }
                board.mark(anchor, cells, b'A' + (shape % 26) as u8);
                board.remaining[shape] -= 1;
                let done = self.solve(board, pos + 1, slack);
                board.remaining[shape] += 1;
                if done {
                    return true;
                }
                board.mark(anchor, cells, EMPTY);
            }
        }

        if slack > 0 {
            board.grid[anchor] = SKIPPED;
            if self.solve(board, pos + 1, slack - 1) {
                return true;
            }
            board.grid[anchor] = EMPTY;
        }
        false
    }
}

/// Present cells needed by `region`
fn needed_cells(shapes: &[Shape], region: &Region) -> usize {
    shapes
        .iter()
        .zip(&region.counts)
        .map(|(s, &n)| s.area * n)
        .sum()
}

/// Search for a packing; on success the grid holds one letter per shape.
fn pack(shapes: &[Shape], region: &Region) -> Option<Grid<u8>> {
    let cells = region.width * region.height;
    let slack = cells.checked_sub(needed_cells(shapes, region))?;
    let (packer, mut board) = Packer::new(shapes, region);
    packer.solve(&mut board, 0, slack).then_some(board.grid)
}

fn region_fits(shapes: &[Shape], region: &Region) -> bool {
    if needed_cells(shapes, region) > region.width * region.height {
        return false;
    }

    // Every present fits in its own box without overlapping the others
    let boxed = shapes.iter().map(|s| s.extent).max().unwrap_or(1);
    let presents: usize = region.counts.iter().sum();
    if (region.width / boxed) * (region.height / boxed) >= presents {
        return true;
    }

    match pack(shapes, region) {
        Some(grid) => {
            log::debug!("{}x{} packing:\n{}", region.width, region.height, grid);
            true
        }
        None => false,
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fitting = shared
            .regions
            .iter()
            .filter(|region| region_fits(&shared.shapes, region))
            .count();
        Ok(fitting.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.shapes.len(), 6);
        assert_eq!(shared.regions.len(), 3);
        assert_eq!(Solver::PARTS, 1);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
    }

    #[test]
    fn test_per_region() {
        let farm = Solver::parse(EXAMPLE).unwrap();
        let fits: Vec<bool> = farm
            .regions
            .iter()
            .map(|r| region_fits(&farm.shapes, r))
            .collect();
        assert_eq!(fits, vec![true, true, false]);
    }

    #[test]
    fn test_packing_covers_exactly_the_needed_cells() {
        let farm = Solver::parse(EXAMPLE).unwrap();
        let region = &farm.regions[1];
        let grid = pack(&farm.shapes, region).expect("second region packs");

        let covered = grid
            .active_indices()
            .filter(|&i| grid[i].is_ascii_uppercase())
            .count();
        assert_eq!(covered, needed_cells(&farm.shapes, region));
        assert_eq!(covered, 6 * 7);

        // Each letter covers a whole number of presents of that shape
        for (index, (shape, &count)) in farm.shapes.iter().zip(&region.counts).enumerate() {
            let letter = b'A' + index as u8;
            let cells = grid.active_indices().filter(|&i| grid[i] == letter).count();
            assert_eq!(cells, shape.area * count);
        }
    }

    #[test]
    fn test_search_rejects_region_with_enough_area() {
        let farm = Solver::parse(EXAMPLE).unwrap();
        let region = &farm.regions[2];
        assert!(needed_cells(&farm.shapes, region) <= region.width * region.height);
        assert!(pack(&farm.shapes, region).is_none());
    }

    #[test]
    fn test_orientations_are_deduplicated() {
        let square = Shape::from_rows(&["##", "##"]).unwrap();
        assert_eq!(square.variants.len(), 1);
        assert_eq!(square.extent, 2);

        let bar = Shape::from_rows(&["###"]).unwrap();
        assert_eq!(bar.variants.len(), 2);

        let ell = Shape::from_rows(&["#..", "###"]).unwrap();
        assert_eq!(ell.variants.len(), 8);
        assert!(ell.variants.iter().all(|v| v[0] == (0, 0)));
    }

    #[test]
    fn test_tight_fit_needs_search() {
        // Two bars fill a 3x2 region exactly; a 2x3 region only by rotating
        let bar = Shape::from_rows(&["###"]).unwrap();
        let shapes = vec![bar];
        let wide = Region { width: 3, height: 2, counts: vec![2] };
        let tall = Region { width: 2, height: 3, counts: vec![2] };
        let square = Region { width: 2, height: 2, counts: vec![1] };
        assert!(region_fits(&shapes, &wide));
        assert!(region_fits(&shapes, &tall));
        assert!(!region_fits(&shapes, &square));
    }

    #[test]
    fn test_shapes_must_be_in_order() {
        assert!(Solver::parse("1:\n#\n").is_err());
        assert!(Solver::parse("0:\n#\n\n2x2: 1 1\n").is_err());
    }
}
