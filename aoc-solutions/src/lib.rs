//! Advent of Code puzzle solutions with automatic registration
//!
//! [`utils`] holds the shared toolkit: a padded [`Grid`](utils::grid::Grid)
//! with precomputed neighbour offsets, breadth-first search over it, number
//! extraction and a memoizing DP cache. Solutions live under
//! `my_solutions` and register themselves through `#[derive(AutoRegisterSolver)]`.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
