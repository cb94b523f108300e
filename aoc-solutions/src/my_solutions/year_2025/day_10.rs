//! Day 10: factory machines with indicator lights and joltage counters

use std::collections::{HashSet, VecDeque};
use std::sync::OnceLock;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use regex::Regex;

use crate::utils::string_utils::extract_numbers;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["2025", "bfs", "linear-algebra"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Bit `i` set when light `i` must end up on
    lights: u64,
    /// Counters wired to each button
    buttons: Vec<Vec<usize>>,
    joltage: Vec<u32>,
}

fn machine_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[(?<lights>[^\]]*)\]|\((?<button>[^)]*)\)|\{(?<joltage>[^}]*)\}").unwrap()
    })
}

fn parse_machine(line: &str) -> Result<Machine, ParseError> {
    let mut lights = None;
    let mut buttons = Vec::new();
    let mut joltage = None;

    for caps in machine_regex().captures_iter(line) {
        if let Some(pattern) = caps.name("lights") {
            let pattern = pattern.as_str();
            if pattern.len() > 64 || pattern.bytes().any(|b| b != b'#' && b != b'.') {
                return Err(ParseError::InvalidFormat(format!("bad light pattern [{pattern}]")));
            }
            let mask = pattern
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .fold(0u64, |mask, (i, _)| mask | 1 << i);
            lights = Some((pattern.len(), mask));
        } else if let Some(wires) = caps.name("button") {
            buttons.push(extract_numbers::<usize>(wires.as_str())?);
        } else if let Some(levels) = caps.name("joltage") {
            joltage = Some(extract_numbers::<u32>(levels.as_str())?);
        }
    }

    let (width, lights) =
        lights.ok_or_else(|| ParseError::MissingData("light pattern [...]".into()))?;
    let joltage = joltage.ok_or_else(|| ParseError::MissingData("joltage {...}".into()))?;
    let limit = width.min(joltage.len());
    if let Some(&bad) = buttons.iter().flatten().find(|&&w| w >= limit) {
        return Err(ParseError::InvalidFormat(format!(
            "button wired to {bad}, machine has {limit}"
        )));
    }

    Ok(Machine {
        lights,
        buttons,
        joltage,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        aoc_solver::input::lines(input)
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                parse_machine(line).map_err(|e| ParseError::InvalidFormat(format!("line {}: {e}", i + 1)))
            })
            .collect()
    }
}

/// Fewest presses that switch on exactly `machine.lights`, starting all off.
fn min_presses_for_lights(machine: &Machine) -> Option<u64> {
    let masks: Vec<u64> = machine
        .buttons
        .iter()
        .map(|wires| wires.iter().fold(0, |m, &w| m | 1 << w))
        .collect();

    let mut seen = HashSet::from([0u64]);
    let mut queue = VecDeque::from([(0u64, 0u64)]);
    while let Some((state, presses)) = queue.pop_front() {
        if state == machine.lights {
            return Some(presses);
        }
        for &mask in &masks {
            let next = state ^ mask;
            if seen.insert(next) {
                queue.push_back((next, presses + 1));
            }
        }
    }
    None
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

/// Integer matrix `[A | b]` reduced so that every pivot column is zero
/// outside its pivot row.
struct Reduced {
    rows: Vec<Vec<i64>>,
    /// `(row, column)` of each pivot
    pivots: Vec<(usize, usize)>,
    free: Vec<usize>,
}

/// Fraction-free Gauss-Jordan elimination of `[A | b]`.
///
/// Returns `None` when the system has no solution at all.
fn eliminate(mut rows: Vec<Vec<i64>>, vars: usize) -> Option<Reduced> {
    let mut pivots = Vec::new();
    let mut free = Vec::new();
    let mut rank = 0;

    for col in 0..vars {
        let Some(found) = (rank..rows.len()).find(|&r| rows[r][col] != 0) else {
            free.push(col);
            continue;
        };
        rows.swap(rank, found);
        if rows[rank][col] < 0 {
            rows[rank].iter_mut().for_each(|v| *v = -*v);
        }

        let pivot_row = rows[rank].clone();
        let p = pivot_row[col];
        for (r, row) in rows.iter_mut().enumerate() {
            let factor = row[col];
            if r == rank || factor == 0 {
                continue;
            }
            for (v, &pv) in row.iter_mut().zip(&pivot_row) {
                *v = *v * p - pv * factor;
            }
            let g = row.iter().fold(0, |g, &v| gcd(g, v));
            if g > 1 {
                row.iter_mut().for_each(|v| *v /= g);
            }
        }
        pivots.push((rank, col));
        rank += 1;
    }

    // Leftover rows read 0 = rhs
    if rows[rank..].iter().any(|row| row[vars] != 0) {
        return None;
    }
    Some(Reduced { rows, pivots, free })
}

/// Fewest total presses so every counter reaches its joltage exactly.
///
/// Each button adds 1 to its counters, so presses solve `A x = t` over
/// non-negative integers. After elimination only the free variables are
/// searched; see [`FreeSearch`] for how their ranges are narrowed.
fn min_presses_for_joltage(machine: &Machine) -> Option<u64> {
    let vars = machine.buttons.len();
    let counters = machine.joltage.len();

    let mut rows = vec![vec![0i64; vars + 1]; counters];
    for (j, wires) in machine.buttons.iter().enumerate() {
        for &w in wires {
            rows[w][j] = 1;
        }
    }
    for (row, &target) in rows.iter_mut().zip(&machine.joltage) {
        row[vars] = i64::from(target);
    }

    let bounds: Vec<i64> = machine
        .buttons
        .iter()
        .map(|wires| {
            wires
                .iter()
                .map(|&w| i64::from(machine.joltage[w]))
                .min()
                .unwrap_or(0)
        })
        .collect();

    let reduced = eliminate(rows, vars)?;
    let mut search = FreeSearch::new(&reduced, &bounds);
    let mut rhs: Vec<i64> = reduced.pivots.iter().map(|&(r, _)| reduced.rows[r][vars]).collect();
    search.run(0, &mut rhs, 0);
    search.best.map(|b| b as u64)
}

/// Depth-first search over the free variables of a reduced system.
///
/// Pivot row `i` reads `p_i x_c + sum_k a_ik y_k = b_i` with `p_i > 0`, so
/// `x_c >= 0` holds exactly when `sum_k a_ik y_k <= b_i`. Once the free
/// variables before `y_k` are fixed, every row bounds `y_k` from one side
/// after assuming the most favourable value for each later free variable.
struct FreeSearch {
    /// `coeffs[i][k]`: coefficient of free variable `k` in pivot row `i`
    coeffs: Vec<Vec<i64>>,
    /// Pivot coefficient of each pivot row
    pivots: Vec<i64>,
    /// Upper bound of each free variable from the smallest target it feeds
    upper: Vec<i64>,
    /// `lowest[k][i]`: least value `sum_{j >= k} a_ij y_j` can take in row `i`
    lowest: Vec<Vec<i64>>,
    best: Option<i64>,
}

impl FreeSearch {
    fn new(reduced: &Reduced, bounds: &[i64]) -> Self {
        let coeffs: Vec<Vec<i64>> = reduced
            .pivots
            .iter()
            .map(|&(r, _)| reduced.free.iter().map(|&f| reduced.rows[r][f]).collect())
            .collect();
        let pivots = reduced.pivots.iter().map(|&(r, c)| reduced.rows[r][c]).collect();
        let upper: Vec<i64> = reduced.free.iter().map(|&f| bounds[f]).collect();

        let n = upper.len();
        let mut lowest = vec![vec![0i64; coeffs.len()]; n + 1];
        for k in (0..n).rev() {
            for (i, row) in coeffs.iter().enumerate() {
                lowest[k][i] = lowest[k + 1][i] + (row[k] * upper[k]).min(0);
            }
        }

        Self {
            coeffs,
            pivots,
            upper,
            lowest,
            best: None,
        }
    }

    /// `rhs[i]` is `b_i` minus the contribution of the free variables already fixed.
    fn run(&mut self, k: usize, rhs: &mut [i64], partial: i64) {
        if self.best.is_some_and(|b| partial >= b) {
            return;
        }

        if k == self.upper.len() {
            let mut total = partial;
            for (&numerator, &p) in rhs.iter().zip(&self.pivots) {
                if numerator < 0 || numerator % p != 0 {
                    return;
                }
                total += numerator / p;
            }
            if self.best.is_none_or(|b| total < b) {
                self.best = Some(total);
            }
            return;
        }

        let Some((lo, hi)) = self.range(k, rhs) else {
            return;
        };
        for v in lo..=hi {
            for (r, row) in rhs.iter_mut().zip(&self.coeffs) {
                *r -= row[k] * v;
            }
            self.run(k + 1, rhs, partial + v);
            for (r, row) in rhs.iter_mut().zip(&self.coeffs) {
                *r += row[k] * v;
            }
        }
    }

    /// Values of free variable `k` that leave every pivot row satisfiable.
    fn range(&self, k: usize, rhs: &[i64]) -> Option<(i64, i64)> {
        let (mut lo, mut hi) = (0, self.upper[k]);
        for (i, row) in self.coeffs.iter().enumerate() {
            let a = row[k];
            let room = rhs[i] - self.lowest[k + 1][i];
            match a.signum() {
                1 => hi = hi.min(room.div_euclid(a)),
                // a * y <= room with a < 0 is y >= ceil(room / a)
                -1 => lo = lo.max(-room.div_euclid(-a)),
                _ if room < 0 => return None,
                _ => {}
            }
        }
        (lo <= hi).then_some((lo, hi))
    }
}

fn total_presses<F>(machines: &[Machine], what: &str, solve: F) -> Result<String, SolveError>
where
    F: Fn(&Machine) -> Option<u64>,
{
    let mut total = 0;
    for (i, machine) in machines.iter().enumerate() {
        match solve(machine) {
            Some(presses) => {
                log::trace!("machine {}: {} presses for {}", i + 1, presses, what);
                total += presses;
            }
            None => {
                log::warn!("machine {} cannot reach its {}", i + 1, what);
                return Err(SolveError::SolveFailed(
                    format!("machine {} cannot reach its {what}", i + 1).into(),
                ));
            }
        }
    }
    Ok(total.to_string())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_presses(shared, "light pattern", min_presses_for_lights)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_presses(shared, "joltage targets", min_presses_for_joltage)
    }
}
