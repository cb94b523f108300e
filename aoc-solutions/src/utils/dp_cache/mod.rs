//! Memoized recursion over an acyclic dependency graph
//!
//! A [`DpProblem`] says which indices a value depends on and how to combine
//! them; [`DpCache`] resolves the dependencies lazily and keeps every
//! computed value in a [`Backend`]:
//!
//! - [`VecBackend`] for dense `usize` indices
//! - [`HashMapBackend`] for anything hashable
//!
//! There is no cycle detection. Callers must make sure the dependencies
//! form a DAG.
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
//!
//! // Paths to node 3 in 0 -> {1, 2}, 1 -> {3}, 2 -> {1, 3}
//! struct Paths { edges: Vec<Vec<usize>> }
//!
//! impl DpProblem<usize, u64> for Paths {
//!     fn deps(&self, n: &usize) -> Vec<usize> {
//!         if *n == 3 { vec![] } else { self.edges[*n].clone() }
//!     }
//!     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
//!         if *n == 3 { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let problem = Paths { edges: vec![vec![1, 2], vec![3], vec![1, 3], vec![]] };
//! let cache = DpCache::with_problem(VecBackend::new(), problem);
//! assert_eq!(cache.get(&0), 3);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
