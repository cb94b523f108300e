//! Day 9: largest rectangle between two red tiles

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;

use crate::utils::string_utils::extract_numbers;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["2025", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    x: i64,
    y: i64,
}

/// Axis-aligned rectangle with `lo` bottom-left and `hi` top-right
#[derive(Debug, Clone, Copy)]
struct Rect {
    lo: Tile,
    hi: Tile,
}

impl Rect {
    fn spanning(a: Tile, b: Tile) -> Self {
        Self {
            lo: Tile {
                x: a.x.min(b.x),
                y: a.y.min(b.y),
            },
            hi: Tile {
                x: a.x.max(b.x),
                y: a.y.max(b.y),
            },
        }
    }

    /// Tiles covered, edges included
    fn area(&self) -> i64 {
        (self.hi.x - self.lo.x + 1) * (self.hi.y - self.lo.y + 1)
    }

    fn strictly_contains(&self, t: Tile) -> bool {
        self.lo.x < t.x && t.x < self.hi.x && self.lo.y < t.y && t.y < self.hi.y
    }
}

impl AocParser for Solver {
    /// Red tiles in polygon order
    type SharedData<'a> = Vec<Tile>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        aoc_solver::input::lines(input)
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| match extract_numbers::<i64>(line)?.as_slice() {
                &[x, y] => Ok(Tile { x, y }),
                other => Err(ParseError::InvalidFormat(format!(
                    "line {}: expected 2 coordinates, got {}",
                    i + 1,
                    other.len()
                ))),
            })
            .collect()
    }
}

/// Polygon edges as `(vertex, previous vertex)`, closing the loop.
fn edges(polygon: &[Tile]) -> impl Iterator<Item = (Tile, Tile)> + '_ {
    polygon.iter().copied().zip(polygon.iter().copied().cycle().skip(polygon.len().saturating_sub(1)))
}

/// Even-odd ray cast towards +x from `(x2 / 2, y2 / 2)`.
///
/// Coordinates are doubled so the centre of any rectangle is integral.
fn inside_doubled(x2: i64, y2: i64, polygon: &[Tile]) -> bool {
    let mut inside = false;
    for (a, b) in edges(polygon) {
        let (ay, by) = (2 * a.y, 2 * b.y);
        if (ay > y2) != (by > y2) {
            let (ax, bx) = (2 * a.x, 2 * b.x);
            // x2 < ax + (bx - ax) * (y2 - ay) / (by - ay), without dividing
            let lhs = (x2 - ax) * (by - ay);
            let rhs = (bx - ax) * (y2 - ay);
            let left_of_edge = if by > ay { lhs < rhs } else { lhs > rhs };
            if left_of_edge {
                inside = !inside;
            }
        }
    }
    inside
}

/// Whether `rect` lies within the polygon traced by `polygon`.
fn fits_inside(rect: &Rect, polygon: &[Tile]) -> bool {
    if polygon.iter().any(|&t| rect.strictly_contains(t)) {
        return false;
    }

    // An edge crossing the whole rectangle splits it
    let cut = edges(polygon).any(|(a, b)| {
        if a.x == b.x {
            let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
            rect.lo.x < a.x && a.x < rect.hi.x && y0 <= rect.lo.y && y1 >= rect.hi.y
        } else if a.y == b.y {
            let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
            rect.lo.y < a.y && a.y < rect.hi.y && x0 <= rect.lo.x && x1 >= rect.hi.x
        } else {
            false
        }
    });
    if cut {
        return false;
    }

    // Entirely inside or entirely outside: the centre decides
    inside_doubled(rect.lo.x + rect.hi.x, rect.lo.y + rect.hi.y, polygon)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| Rect::spanning(a, b).area())
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let polygon = shared.as_slice();
        let mut best = 0;
        for (&a, &b) in polygon.iter().tuple_combinations() {
            if a == b {
                continue;
            }
            let rect = Rect::spanning(a, b);
            if rect.area() > best && fits_inside(&rect, polygon) {
                best = rect.area();
            }
        }
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "50");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "24");
    }

    #[test]
    fn test_parse_keeps_polygon_order() {
        let tiles: Vec<Tile> = Solver::parse("7,1\n11,1\n\n11,7\n").unwrap();
        assert_eq!(
            tiles,
            vec![Tile { x: 7, y: 1 }, Tile { x: 11, y: 1 }, Tile { x: 11, y: 7 }]
        );
    }

    #[test]
    fn test_edges_close_the_loop() {
        let square = [
            Tile { x: 0, y: 0 },
            Tile { x: 4, y: 0 },
            Tile { x: 4, y: 4 },
            Tile { x: 0, y: 4 },
        ];
        let pairs: Vec<_> = edges(&square).collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], (square[0], square[3]));
        assert_eq!(pairs[1], (square[1], square[0]));
    }

    #[test]
    fn test_ray_cast_on_l_shape() {
        // L: full bottom row, left column going up
        let l = [
            Tile { x: 0, y: 0 },
            Tile { x: 6, y: 0 },
            Tile { x: 6, y: 2 },
            Tile { x: 2, y: 2 },
            Tile { x: 2, y: 6 },
            Tile { x: 0, y: 6 },
        ];
        assert!(inside_doubled(2, 2, &l));
        assert!(inside_doubled(2, 10, &l));
        assert!(!inside_doubled(8, 8, &l));
        assert!(fits_inside(&Rect::spanning(l[0], l[3]), &l));
        assert!(!fits_inside(&Rect::spanning(l[1], l[4]), &l));
    }

    #[test]
    fn test_bad_line() {
        assert!(matches!(
            Solver::parse("1,2\n3\n"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
