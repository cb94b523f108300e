use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, Solver,
    SolverRegistryBuilder,
};

/// Counts `#` and `.` cells of a small map
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 24, tags = ["macro-test", "grid"])]
struct CellCounter;

impl AocParser for CellCounter {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rows: Vec<&str> = input.lines().collect();
        if rows.is_empty() {
            return Err(ParseError::MissingData("empty map".into()));
        }
        Ok(rows)
    }
}

impl PartSolver<1> for CellCounter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|r| r.matches('#').count()).sum::<usize>().to_string())
    }
}

impl PartSolver<2> for CellCounter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|r| r.matches('.').count()).sum::<usize>().to_string())
    }
}

/// Single part solver without tags
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2015, day = 25)]
struct OnlyOnePart;

impl AocParser for OnlyOnePart {
    type SharedData<'a> = usize;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.len())
    }
}

impl PartSolver<1> for OnlyOnePart {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_string())
    }
}

#[test]
fn test_parts_dispatch_to_part_solvers() {
    let mut shared = CellCounter::parse("#.#\n..#").unwrap();
    assert_eq!(CellCounter::PARTS, 2);
    assert_eq!(CellCounter::solve_part(&mut shared, 1).unwrap(), "3");
    assert_eq!(CellCounter::solve_part(&mut shared, 2).unwrap(), "3");
}

#[test]
fn test_unknown_part_is_not_implemented() {
    let mut shared = CellCounter::parse("#").unwrap();
    assert!(matches!(
        CellCounter::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
    assert!(matches!(
        CellCounter::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
}

#[test]
fn test_auto_registered_solvers_are_discovered() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2015 && plugin.day >= 24)
        .expect("plugins should register")
        .build();

    let info = registry.get_info(2015, 24).expect("day 24 registered");
    assert_eq!(info.parts, 2);
    assert_eq!(registry.get_info(2015, 25).map(|i| i.parts), Some(1));

    let mut solver = registry.create_solver(2015, 24, "##.\n...").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "2");
    assert_eq!(solver.solve(2).unwrap().answer, "4");
}

#[test]
fn test_tag_filter_selects_tagged_plugin_only() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert!(registry.contains(2015, 24));
    assert!(!registry.contains(2015, 25));
}

#[test]
fn test_parse_error_surfaces_through_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2015 && plugin.day == 24)
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2015, 24, ""),
        Err(aoc_solver::SolverError::ParseError(ParseError::MissingData(_)))
    ));
}
