//! Problem definitions for the DP cache.

use std::marker::PhantomData;

/// Dependency structure and combine step of a memoized recursion.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
///
/// // Lattice paths from (0, 0) to (n, n), indexed by row-major position
/// struct Lattice { side: usize }
///
/// impl DpProblem<usize, u64> for Lattice {
///     fn deps(&self, idx: &usize) -> Vec<usize> {
///         let (r, c) = (idx / self.side, idx % self.side);
///         let mut deps = Vec::new();
///         if r > 0 { deps.push(idx - self.side); }
///         if c > 0 { deps.push(idx - 1); }
///         deps
///     }
///
///     fn compute(&self, _idx: &usize, deps: Vec<u64>) -> u64 {
///         if deps.is_empty() { 1 } else { deps.iter().sum() }
///     }
/// }
///
/// let cache = DpCache::with_problem(VecBackend::new(), Lattice { side: 5 });
/// assert_eq!(cache.get(&24), 70);
/// ```
pub trait DpProblem<I, K> {
    /// Indices `index` depends on; empty for base cases.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value of `index` given the values of its deps, in `deps()` order.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// Adapts a pair of closures to [`DpProblem`].
pub struct ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    dep_fn: D,
    compute_fn: C,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, D, C> ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    pub fn new(dep_fn: D, compute_fn: C) -> Self {
        Self {
            dep_fn,
            compute_fn,
            _phantom: PhantomData,
        }
    }
}

impl<I, K, D, C> DpProblem<I, K> for ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    fn deps(&self, index: &I) -> Vec<I> {
        (self.dep_fn)(index)
    }

    fn compute(&self, index: &I, deps: Vec<K>) -> K {
        (self.compute_fn)(index, deps)
    }
}
