//! Solver traits: one parser per puzzle, one solver per part

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle text into the data every part works on.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Walls;
///
/// impl AocParser for Walls {
///     // Number of `#` cells per row
///     type SharedData<'a> = Vec<usize>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.lines().map(|l| l.bytes().filter(|&b| b == b'#').count()).collect())
///     }
/// }
///
/// assert_eq!(Walls::parse("#.#\n...\n").unwrap(), vec![2, 0]);
/// ```
pub trait AocParser {
    /// Parsed input plus any intermediate results shared between parts.
    ///
    /// Borrowing from the input (`&'a str`) is allowed when no
    /// transformation is needed.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// `#[derive(AocSolver)]` wires every `PartSolver<1..=max_parts>` into
/// [`Solver::solve_part`].
///
/// ```
/// use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
///
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 1)]
/// struct Count;
///
/// impl AocParser for Count {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input)
///     }
/// }
///
/// impl PartSolver<1> for Count {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.lines().count().to_string())
///     }
/// }
///
/// let mut shared = Count::parse("a\nb\nc").unwrap();
/// assert_eq!(Count::solve_part(&mut shared, 1).unwrap(), "3");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Part-number dispatch for a puzzle.
///
/// Implementations return `SolveError::PartNotImplemented` for parts they
/// do not know; range checking against `PARTS` lives in [`SolverExt`].
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked entry point used by solver instances.
pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
