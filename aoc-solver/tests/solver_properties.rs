//! Property tests for part dispatch, range checking and the registry

use aoc_solver::{
    AocParser, AocSolver, ParseError, PartSolver, RegisterableSolver,
    RegistrationError, SolveError, Solver, SolverError, SolverExt, SolverRegistryBuilder,
};
use proptest::prelude::*;

/// Parses rows of digits; part 1 sums row maxima, part 2 reuses them
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct RowMax;

#[derive(Debug)]
struct Rows {
    rows: Vec<Vec<u32>>,
    maxima: Option<Vec<u32>>,
}

impl Rows {
    fn maxima(&mut self) -> &[u32] {
        let rows = &self.rows;
        self.maxima.get_or_insert_with(|| {
            rows.iter()
                .map(|r| r.iter().copied().max().unwrap_or(0))
                .collect()
        })
    }
}

impl AocParser for RowMax {
    type SharedData<'a> = Rows;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rows = input
            .lines()
            .map(|line| {
                line.chars()
                    .map(|c| {
                        c.to_digit(10)
                            .ok_or_else(|| ParseError::InvalidFormat(format!("not a digit: {c}")))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Rows { rows, maxima: None })
    }
}

impl PartSolver<1> for RowMax {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.maxima().iter().sum::<u32>().to_string())
    }
}

impl PartSolver<2> for RowMax {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.maxima().iter().product::<u32>().to_string())
    }
}

fn digits_input() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[1-9]{1,6}", 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_out_of_range_parts_rejected(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = RowMax::parse("12\n3").unwrap();
        match RowMax::solve_part_checked_range(&mut shared, part) {
            Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn prop_dispatch_matches_direct_call(rows in digits_input(), part in 1u8..=2) {
        let input = rows.join("\n");
        let mut via_solver = RowMax::parse(&input).unwrap();
        let mut direct = RowMax::parse(&input).unwrap();

        let dispatched = RowMax::solve_part(&mut via_solver, part).unwrap();
        let expected = match part {
            1 => <RowMax as PartSolver<1>>::solve(&mut direct).unwrap(),
            _ => <RowMax as PartSolver<2>>::solve(&mut direct).unwrap(),
        };
        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn prop_part_one_result_is_reused(rows in digits_input()) {
        let input = rows.join("\n");
        let mut shared = RowMax::parse(&input).unwrap();
        RowMax::solve_part(&mut shared, 1).unwrap();
        prop_assert!(shared.maxima.is_some());
        prop_assert_eq!(shared.maxima.as_ref().map(Vec::len), Some(rows.len()));
    }
}

#[test]
fn test_instance_solves_both_parts_with_timing() {
    let registry = RowMax
        .register_with(SolverRegistryBuilder::new(), 2024, 3)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2024, 3, "19\n42\n7").unwrap();
    assert_eq!(solver.parts(), 2);
    assert_eq!((solver.year(), solver.day()), (2024, 3));
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());

    let first = solver.solve(1).unwrap();
    assert_eq!(first.answer, "20");
    assert!(first.duration() >= chrono::TimeDelta::zero());
    assert_eq!(solver.solve(2).unwrap().answer, "252");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn test_duplicate_registration_rejected() {
    let builder = RowMax
        .register_with(SolverRegistryBuilder::new(), 2024, 3)
        .unwrap();
    assert!(matches!(
        RowMax.register_with(builder, 2024, 3),
        Err(RegistrationError::DuplicateFactory(2024, 3))
    ));
}

#[test]
fn test_out_of_range_dates_rejected() {
    assert!(matches!(
        RowMax.register_with(SolverRegistryBuilder::new(), 2014, 1),
        Err(RegistrationError::InvalidYearDay(2014, 1))
    ));
    assert!(matches!(
        RowMax.register_with(SolverRegistryBuilder::new(), 2024, 26),
        Err(RegistrationError::InvalidYearDay(2024, 26))
    ));
}

#[test]
fn test_registry_lookup_errors() {
    let registry = SolverRegistryBuilder::new().build();
    assert!(registry.is_empty());
    assert!(matches!(
        registry.create_solver(2024, 3, "1"),
        Err(SolverError::NotFound(2024, 3))
    ));
    assert!(matches!(
        registry.create_solver(1999, 3, "1"),
        Err(SolverError::InvalidYearDay(1999, 3))
    ));
}

#[test]
fn test_parse_failure_is_reported() {
    let registry = RowMax
        .register_with(SolverRegistryBuilder::new(), 2024, 3)
        .unwrap()
        .build();
    assert!(matches!(
        registry.create_solver(2024, 3, "1x"),
        Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
    ));
}
