//! Advent of Code Solver Library
//!
//! Framework shared by every puzzle in the workspace: each puzzle is a type
//! that parses its input once and answers one or more parts from the parsed
//! data.
//!
//! - [`AocParser`], [`PartSolver`] and [`Solver`] describe a puzzle
//! - [`SolverRegistry`] maps year/day to solver factories, filled from
//!   [`SolverPlugin`]s that `#[derive(AutoRegisterSolver)]` submits
//! - [`DynSolver`] runs parts on a parsed instance and times them
//! - [`input`] loads puzzle text from a file, the stored input or stdin
//!
//! # Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//! use aoc_solver::RegisterableSolver;
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<u32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or(0).to_string())
//!     }
//! }
//!
//! let registry = Depths
//!     .register_with(SolverRegistryBuilder::new(), 2025, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2025, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "3");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub mod input;

pub use error::{InputError, ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// The derive macros expand to paths under `::aoc_solver`
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
