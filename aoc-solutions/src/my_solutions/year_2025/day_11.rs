//! Day 11: counting paths through the reactor's device graph

use std::collections::HashMap;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::string_utils::split_once_trimmed;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["2025", "dp", "graph"])]
pub struct Solver;

/// Device graph with names interned to dense ids
#[derive(Debug)]
pub struct Reactor<'a> {
    ids: HashMap<&'a str, usize>,
    outputs: Vec<Vec<usize>>,
}

impl<'a> Reactor<'a> {
    fn intern(&mut self, name: &'a str) -> usize {
        let next = self.ids.len();
        let id = *self.ids.entry(name).or_insert(next);
        if id == next {
            self.outputs.push(Vec::new());
        }
        id
    }

    fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    fn require(&self, name: &str) -> Result<usize, SolveError> {
        self.id(name)
            .ok_or_else(|| SolveError::SolveFailed(format!("no device named '{name}'").into()))
    }

    /// Number of paths from `from` to `to`; 0 when `to` is unknown.
    fn paths(&self, from: usize, to: &str) -> u64 {
        let Some(target) = self.id(to) else {
            return 0;
        };
        let cache = DpCache::with_problem(
            VecBackend::with_capacity(self.outputs.len()),
            PathsTo {
                outputs: &self.outputs,
                target,
            },
        );
        cache.get(&from)
    }
}

struct PathsTo<'g> {
    outputs: &'g [Vec<usize>],
    target: usize,
}

impl DpProblem<usize, u64> for PathsTo<'_> {
    fn deps(&self, device: &usize) -> Vec<usize> {
        if *device == self.target {
            Vec::new()
        } else {
            self.outputs[*device].clone()
        }
    }

    fn compute(&self, device: &usize, deps: Vec<u64>) -> u64 {
        if *device == self.target {
            1
        } else {
            deps.iter().sum()
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Reactor<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut reactor = Reactor {
            ids: HashMap::new(),
            outputs: Vec::new(),
        };
        for (i, line) in aoc_solver::input::lines(input).enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (device, outputs) = split_once_trimmed(line, ":")
                .map_err(|e| ParseError::InvalidFormat(format!("line {}: {e}", i + 1)))?;
            if device.is_empty() {
                return Err(ParseError::InvalidFormat(format!(
                    "line {}: missing device name",
                    i + 1
                )));
            }
            let from = reactor.intern(device);
            for name in outputs.split_whitespace() {
                let to = reactor.intern(name);
                reactor.outputs[from].push(to);
            }
        }
        Ok(reactor)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let you = shared.require("you")?;
        Ok(shared.paths(you, "out").to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let svr = shared.require("svr")?;
        let via = |first: &str, second: &str| -> u64 {
            let (Some(a), Some(b)) = (shared.id(first), shared.id(second)) else {
                return 0;
            };
            shared.paths(svr, first) * shared.paths(a, second) * shared.paths(b, "out")
        };
        Ok((via("fft", "dac") + via("dac", "fft")).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
aaa: you hhh
you: bbb ccc
bbb: ddd eee
ccc: ddd eee fff
ddd: ggg
eee: out
fff: out
ggg: out
hhh: ccc fff iii
iii: out
";

    const EXAMPLE_2: &str = "\
svr: aaa bbb
aaa: fft
fft: ccc
bbb: tty
tty: ccc
ccc: ddd eee
ddd: hub
hub: fff
eee: dac
dac: fff
fff: ggg hhh
ggg: out
hhh: out
";

    #[test]
    fn test_example_part_1() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "5");
    }

    #[test]
    fn test_example_part_2() {
        let mut shared = Solver::parse(EXAMPLE_2).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2");
    }

    #[test]
    fn test_missing_start_device() {
        let mut shared = Solver::parse(EXAMPLE_2).unwrap();
        assert!(matches!(
            Solver::solve_part(&mut shared, 1),
            Err(SolveError::SolveFailed(_))
        ));
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert!(matches!(
            Solver::solve_part(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_interning_borrows_names() {
        let reactor = Solver::parse("a: b c\nb: c\n").unwrap();
        assert_eq!(reactor.ids.len(), 3);
        assert_eq!(reactor.outputs[reactor.id("a").unwrap()].len(), 2);
        assert_eq!(reactor.paths(reactor.id("a").unwrap(), "c"), 2);
        assert_eq!(reactor.paths(reactor.id("a").unwrap(), "zzz"), 0);
    }

    #[test]
    fn test_line_without_colon() {
        assert!(matches!(
            Solver::parse("aaa bbb\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("line 1")
        ));
    }
}
