//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use super::*;

/// Paths from a node to `target` in an adjacency list
struct PathCount<'a> {
    edges: &'a [Vec<usize>],
    target: usize,
    computed: Rc<Cell<usize>>,
}

impl DpProblem<usize, u64> for PathCount<'_> {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n == self.target {
            vec![]
        } else {
            self.edges[*n].clone()
        }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        self.computed.set(self.computed.get() + 1);
        if *n == self.target {
            1
        } else {
            deps.iter().sum()
        }
    }
}

#[test]
fn test_base_case_without_deps() {
    let cache = DpCache::new(
        VecBackend::new(),
        |_n: &usize| vec![],
        |n: &usize, _deps: Vec<i64>| *n as i64 * 2,
    );

    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&7), 14);
    assert_eq!(cache.get(&100), 200);
}

#[test]
fn test_diamond_computes_shared_dep_once() {
    // 0 -> {1, 2}, both -> 3
    let edges = vec![vec![1, 2], vec![3], vec![3], vec![]];
    let computed = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        VecBackend::new(),
        PathCount {
            edges: &edges,
            target: 3,
            computed: computed.clone(),
        },
    );

    assert_eq!(cache.get(&0), 2);
    assert_eq!(computed.get(), 4);

    assert_eq!(cache.get(&0), 2);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(computed.get(), 4);
}

#[test]
fn test_dead_end_counts_zero() {
    // 2 has no way out and is not the target
    let edges = vec![vec![1, 2], vec![3], vec![], vec![]];
    let cache = DpCache::with_problem(
        VecBackend::new(),
        PathCount {
            edges: &edges,
            target: 3,
            computed: Rc::default(),
        },
    );

    assert_eq!(cache.get(&2), 0);
    assert_eq!(cache.get(&0), 1);
}

#[test]
fn test_path_counts_grow_exponentially() {
    // Chain of diamonds: 2^k paths through k layers
    let layers = 40;
    let mut edges = Vec::new();
    for layer in 0..layers {
        let base = layer * 3;
        edges.push(vec![base + 1, base + 2]);
        edges.push(vec![base + 3]);
        edges.push(vec![base + 3]);
    }
    edges.push(vec![]);
    let target = layers * 3;

    let computed = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        VecBackend::with_capacity(edges.len()),
        PathCount {
            edges: &edges,
            target,
            computed: computed.clone(),
        },
    );

    assert_eq!(cache.get(&0), 1u64 << layers);
    assert_eq!(computed.get(), edges.len());
}

#[test]
fn test_vec_backend_keeps_first_value() {
    let mut backend: VecBackend<i32> = VecBackend::new();
    assert_eq!(backend.get(&5), None);

    assert_eq!(*backend.get_or_insert(5, || 42), 42);
    assert_eq!(*backend.get_or_insert(5, || 999), 42);
    assert_eq!(backend.get(&5), Some(&42));
    assert_eq!(backend.get(&4), None);
    assert_eq!(backend.get(&10), None);
}

#[test]
fn test_hashmap_backend_keeps_first_value() {
    let mut backend: HashMapBackend<(i32, i32), &str> = HashMapBackend::new();
    assert_eq!(backend.get(&(1, -1)), None);

    assert_eq!(*backend.get_or_insert((1, -1), || "first"), "first");
    assert_eq!(*backend.get_or_insert((1, -1), || "second"), "first");
    assert_eq!(backend.get(&(1, -1)), Some(&"first"));
}

#[test]
fn test_hashmap_backend_with_tuple_indices() {
    // Monotone lattice paths on a grid keyed by (row, col)
    let cache = DpCache::new(
        HashMapBackend::new(),
        |&(r, c): &(u32, u32)| {
            let mut deps = Vec::new();
            if r > 0 {
                deps.push((r - 1, c));
            }
            if c > 0 {
                deps.push((r, c - 1));
            }
            deps
        },
        |_pos: &(u32, u32), deps: Vec<u64>| {
            if deps.is_empty() { 1 } else { deps.iter().sum() }
        },
    );

    assert_eq!(cache.get(&(2, 2)), 6);
    assert_eq!(cache.get(&(4, 4)), 70);
    assert_eq!(cache.get(&(16, 16)), 601_080_390);
}

#[test]
fn test_trait_and_closure_agree() {
    let edges = vec![vec![1, 2, 3], vec![2, 4], vec![4], vec![4], vec![]];
    let by_trait = DpCache::with_problem(
        HashMapBackend::new(),
        PathCount {
            edges: &edges,
            target: 4,
            computed: Rc::default(),
        },
    );
    let by_closure = DpCache::new(
        HashMapBackend::new(),
        |n: &usize| if *n == 4 { vec![] } else { edges[*n].clone() },
        |n: &usize, deps: Vec<u64>| if *n == 4 { 1 } else { deps.iter().sum() },
    );

    for node in 0..edges.len() {
        assert_eq!(by_trait.get(&node), by_closure.get(&node));
    }
    assert_eq!(by_trait.get(&0), 4);
}
