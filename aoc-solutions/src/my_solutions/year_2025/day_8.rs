//! Day 8: wiring junction boxes into circuits

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;

use crate::utils::string_utils::extract_signed_numbers;

/// The real input has this many boxes and joins as many closest pairs;
/// smaller inputs (the example) join ten.
const FULL_INPUT_BOXES: usize = 1000;
const SMALL_INPUT_JOINS: usize = 10;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["2025", "union-find", "geometry"])]
pub struct Solver;

#[derive(Debug)]
pub struct Playground {
    boxes: Vec<[i64; 3]>,
    /// Every pair `(i, j)` with `i < j`, closest first
    pairs: Vec<(usize, usize)>,
}

impl AocParser for Solver {
    type SharedData<'a> = Playground;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let boxes = aoc_solver::input::lines(input)
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                let coords: Vec<i64> = extract_signed_numbers(line)?;
                <[i64; 3]>::try_from(coords).map_err(|coords| {
                    ParseError::InvalidFormat(format!(
                        "line {}: expected 3 coordinates, got {}",
                        i + 1,
                        coords.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut pairs: Vec<(i64, usize, usize)> = (0..boxes.len())
            .tuple_combinations()
            .map(|(i, j)| (distance_squared(&boxes[i], &boxes[j]), i, j))
            .collect();
        pairs.sort_unstable();
        let pairs = pairs.into_iter().map(|(_, i, j)| (i, j)).collect();

        Ok(Playground { boxes, pairs })
    }
}

fn distance_squared(a: &[i64; 3], b: &[i64; 3]) -> i64 {
    a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum()
}

/// Disjoint sets with union by size and path halving
struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            count: n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns `false` when `a` and `b` were already connected.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.count -= 1;
        true
    }

    fn sizes(&mut self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.count);
        for x in 0..self.parent.len() {
            if self.find(x) == x {
                sizes.push(self.size[x]);
            }
        }
        sizes
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let joins = if shared.boxes.len() == FULL_INPUT_BOXES {
            FULL_INPUT_BOXES
        } else {
            SMALL_INPUT_JOINS
        };

        let mut circuits = Circuits::new(shared.boxes.len());
        for &(i, j) in shared.pairs.iter().take(joins) {
            circuits.union(i, j);
        }

        let product: usize = circuits
            .sizes()
            .into_iter()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .take(3)
            .product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut circuits = Circuits::new(shared.boxes.len());
        for &(i, j) in &shared.pairs {
            if circuits.union(i, j) && circuits.count == 1 {
                return Ok((shared.boxes[i][0] * shared.boxes[j][0]).to_string());
            }
        }
        Err(SolveError::SolveFailed(
            "fewer than two junction boxes".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.pairs.len(), 20 * 19 / 2);
        assert_eq!(shared.pairs[0], (0, 19));
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "40");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "25272");
    }

    #[test]
    fn test_circuits_merge_by_size() {
        let mut circuits = Circuits::new(5);
        assert!(circuits.union(0, 1));
        assert!(circuits.union(2, 1));
        assert!(!circuits.union(0, 2));
        let mut sizes = circuits.sizes();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 1, 3]);
        assert_eq!(circuits.count, 3);
    }

    #[test]
    fn test_single_box_cannot_connect() {
        let mut shared = Solver::parse("1,2,3\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1");
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_wrong_arity() {
        assert!(matches!(
            Solver::parse("1,2,3\n4,5\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("line 2")
        ));
    }
}
