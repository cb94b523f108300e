//! Benchmark of padded-grid BFS against a bounds-checked baseline.
//!
//! Run with: cargo run --example maze_bfs_benchmark --release
//!
//! Random mazes are solved three ways:
//! - `bfs_path` on a padded `Grid<u8>` (no bounds checks in the loop)
//! - `bfs_map` on the same grid (full distance map)
//! - a plain `Vec<Vec<u8>>` BFS that checks every coordinate

use aoc_solutions::utils::grid::{Connectivity, Grid};
use aoc_solutions::utils::grid_graph::{bfs_map, bfs_path};
use std::collections::VecDeque;
use std::time::Instant;

const MAZE_SIZE: usize = 200;
const NUM_MAZES: usize = 50;
/// Out of 100
const WALL_PERCENT: u64 = 28;

fn generate_maze(seed: u64, size: usize) -> Vec<Vec<u8>> {
    let mut rng = seed;
    let mut maze: Vec<Vec<u8>> = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| {
                    rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
                    if (rng >> 33) % 100 < WALL_PERCENT {
                        b'#'
                    } else {
                        b'.'
                    }
                })
                .collect()
        })
        .collect();
    maze[0][0] = b'.';
    maze[size - 1][size - 1] = b'.';
    maze
}

fn to_grid(maze: &[Vec<u8>]) -> Grid<u8> {
    let mut grid = Grid::new(maze.len(), maze[0].len(), 1, b'.', b'#');
    for (r, row) in maze.iter().enumerate() {
        grid.row_mut(r).copy_from_slice(row);
    }
    grid
}

fn open(grid: &Grid<u8>, _from: usize, to: usize) -> bool {
    grid[to] != b'#'
}

/// Path length in cells, bounds-checked on every step
fn baseline_path_len(maze: &[Vec<u8>]) -> Option<usize> {
    let (rows, cols) = (maze.len(), maze[0].len());
    let mut dist = vec![vec![usize::MAX; cols]; rows];
    dist[0][0] = 1;
    let mut queue = VecDeque::from([(0usize, 0usize)]);
    while let Some((r, c)) = queue.pop_front() {
        if (r, c) == (rows - 1, cols - 1) {
            return Some(dist[r][c]);
        }
        for (dr, dc) in [(-1isize, 0isize), (0, -1), (0, 1), (1, 0)] {
            let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                continue;
            };
            if nr < rows && nc < cols && maze[nr][nc] != b'#' && dist[nr][nc] == usize::MAX {
                dist[nr][nc] = dist[r][c] + 1;
                queue.push_back((nr, nc));
            }
        }
    }
    None
}

fn main() {
    println!("Maze BFS Benchmark ({MAZE_SIZE}x{MAZE_SIZE}, {NUM_MAZES} mazes)");
    println!("==========================================\n");

    let mazes: Vec<Vec<Vec<u8>>> = (0..NUM_MAZES)
        .map(|i| generate_maze(42 + i as u64, MAZE_SIZE))
        .collect();
    let grids: Vec<Grid<u8>> = mazes.iter().map(|m| to_grid(m)).collect();

    let start = Instant::now();
    let baseline: Vec<Option<usize>> = mazes.iter().map(|m| baseline_path_len(m)).collect();
    let baseline_time = start.elapsed();
    println!("Baseline Vec<Vec<u8>>:  {:?}", baseline_time);

    let start = Instant::now();
    let paths: Vec<Option<usize>> = grids
        .iter()
        .map(|g| {
            let from = g.index_of(0, 0);
            let to = g.index_of(MAZE_SIZE - 1, MAZE_SIZE - 1);
            bfs_path(g, from, to, open, Connectivity::Four).map(|p| p.len())
        })
        .collect();
    let path_time = start.elapsed();
    println!("bfs_path (padded):      {:?}", path_time);

    let start = Instant::now();
    let reachable: usize = grids
        .iter()
        .map(|g| {
            bfs_map(g, g.index_of(0, 0), open, Connectivity::Four)
                .iter()
                .filter(|d| d.is_some())
                .count()
        })
        .sum();
    let map_time = start.elapsed();
    println!("bfs_map (padded):       {:?}", map_time);

    assert_eq!(baseline, paths, "padded BFS disagrees with baseline");

    let solvable = paths.iter().filter(|p| p.is_some()).count();
    println!("\nSolvable mazes: {solvable}/{NUM_MAZES}");
    println!("Reachable cells (total): {reachable}");
    println!(
        "Speedup bfs_path vs baseline: {:.2}x",
        baseline_time.as_secs_f64() / path_time.as_secs_f64().max(f64::EPSILON)
    );
}
