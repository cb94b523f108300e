//! Day 3: largest joltage from each bank of battery digits

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["2025", "greedy"])]
pub struct Solver;

impl AocParser for Solver {
    /// One digit vector per bank
    type SharedData<'a> = Vec<Vec<u8>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        aoc_solver::input::lines(input)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| {
                line.bytes()
                    .map(|b| match b {
                        b'0'..=b'9' => Ok(b - b'0'),
                        _ => Err(ParseError::InvalidFormat(format!(
                            "line {}: unexpected '{}'",
                            i + 1,
                            b as char
                        ))),
                    })
                    .collect::<Result<Vec<u8>, _>>()
            })
            .collect()
    }
}

/// Largest `count`-digit number formed by keeping digits of `bank` in order.
///
/// Each digit is the leftmost maximum among the positions that still leave
/// room for the digits after it.
fn max_joltage(bank: &[u8], count: usize) -> u64 {
    let mut start = 0;
    let mut value = 0u64;
    for reserved in (0..count).rev() {
        let window = &bank[start..bank.len() - reserved];
        let (offset, &digit) = window
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, d)| *d)
            .unwrap_or((0, &0));
        value = value * 10 + u64::from(digit);
        start += offset + 1;
    }
    value
}

fn total_joltage(banks: &[Vec<u8>], count: usize) -> Result<String, SolveError> {
    if let Some(short) = banks.iter().position(|b| b.len() < count) {
        return Err(SolveError::SolveFailed(
            format!("bank {} has fewer than {count} batteries", short + 1).into(),
        ));
    }
    Ok(banks
        .iter()
        .map(|bank| max_joltage(bank, count))
        .sum::<u64>()
        .to_string())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 2)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
987654321111111
811111111111119
234234234234278
818181911112111
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "357");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "3121910778619");
    }

    #[test]
    fn test_leftmost_maximum_is_kept() {
        assert_eq!(max_joltage(&[9, 9, 1], 2), 99);
        assert_eq!(max_joltage(&[8, 1, 9], 2), 89);
        assert_eq!(max_joltage(&[1, 2, 3], 3), 123);
    }

    #[test]
    fn test_short_bank_fails() {
        let mut shared = Solver::parse("12345\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "45");
        assert!(matches!(
            Solver::solve_part(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
