//! Breadth-first search over a [`Grid`]
//!
//! Which steps are legal is decided by a [`StepPredicate`], so the same
//! traversal serves mazes, height maps and flood fills. The grid itself is
//! never written to.

use std::collections::VecDeque;

use super::grid::{Connectivity, Grid};

/// Decides whether a search may move from one flat index to a neighbour.
///
/// Border cells are offered like any other neighbour and must be rejected
/// here. Any `FnMut(&Grid<T>, usize, usize) -> bool` is a predicate.
pub trait StepPredicate<T> {
    fn can_step(&mut self, grid: &Grid<T>, from: usize, to: usize) -> bool;
}

impl<T, F> StepPredicate<T> for F
where
    F: FnMut(&Grid<T>, usize, usize) -> bool,
{
    #[inline]
    fn can_step(&mut self, grid: &Grid<T>, from: usize, to: usize) -> bool {
        self(grid, from, to)
    }
}

/// Shortest path from `start` to `end`, both ends included.
///
/// Returns `None` when `end` cannot be reached. Among equally short paths
/// the one found first in neighbour-offset order wins. The search stops
/// when `end` is taken off the queue.
///
/// ```
/// use aoc_solutions::utils::grid::{Connectivity, Grid};
/// use aoc_solutions::utils::grid_graph::bfs_path;
///
/// let grid: Grid<u8> = Grid::from_lines(&["S#.", "..E"], 1, b'#');
/// let start = grid.index_of(0, 0);
/// let end = grid.index_of(1, 2);
/// let path = bfs_path(&grid, start, end, |g: &Grid<u8>, _: usize, to: usize| g[to] != b'#', Connectivity::Four);
/// assert_eq!(path.map(|p| p.len()), Some(4));
/// ```
pub fn bfs_path<T, P>(
    grid: &Grid<T>,
    start: usize,
    end: usize,
    mut can_step: P,
    connectivity: Connectivity,
) -> Option<Vec<usize>>
where
    P: StepPredicate<T>,
{
    if start == end {
        return Some(vec![start]);
    }

    // parent[start] == start marks it as seen
    let mut parent: Vec<Option<usize>> = vec![None; grid.len()];
    parent[start] = Some(start);
    let mut queue = VecDeque::from([start]);
    let mut reached = false;

    while let Some(current) = queue.pop_front() {
        if current == end {
            reached = true;
            break;
        }
        for next in grid.neighbours(current, connectivity) {
            if parent[next].is_none() && can_step.can_step(grid, current, next) {
                parent[next] = Some(current);
                queue.push_back(next);
            }
        }
    }

    if !reached {
        return None;
    }

    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = parent[current]?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

/// Hop distance from `start` to every cell, indexed by flat index.
///
/// Cells the search never reaches, padding included, are `None`.
pub fn bfs_map<T, P>(
    grid: &Grid<T>,
    start: usize,
    mut can_step: P,
    connectivity: Connectivity,
) -> Vec<Option<u32>>
where
    P: StepPredicate<T>,
{
    let mut dist: Vec<Option<u32>> = vec![None; grid.len()];
    dist[start] = Some(0);
    let mut queue = VecDeque::from([(start, 0u32)]);

    while let Some((current, d)) = queue.pop_front() {
        for next in grid.neighbours(current, connectivity) {
            if dist[next].is_none() && can_step.can_step(grid, current, next) {
                dist[next] = Some(d + 1);
                queue.push_back((next, d + 1));
            }
        }
    }
    dist
}
