//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::store::InputStore;
use aoc_solver::input::{self, InputSource};
use aoc_solver::{DynSolver, InputError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Where the input came from; `None` when it could not be loaded
    pub source: Option<InputSource>,
    /// Set on the first result of each parsed instance only
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    store: InputStore,
    input: Option<PathBuf>,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

/// How a work item gets its input
#[derive(Clone, Copy)]
struct InputPolicy<'a> {
    explicit: Option<&'a Path>,
    stdin_allowed: bool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                store: InputStore::new(config.input_dir.clone()),
                input: config.input.clone(),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn store(&self) -> &InputStore {
        &self.sync_executor_config.store
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0, // Empty range - intentional
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        // One stdin stream cannot feed several puzzles
        let policy = InputPolicy {
            explicit: self.sync_executor_config.input.as_deref(),
            stdin_allowed: work_items.len() == 1,
        };

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_solver(&work, policy, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, policy, &tx)
            }
            // Day and Part both fan out over work items; Part also splits each item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                self.execute_parallel(work_items, policy, &tx)
            }
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        policy: InputPolicy<'_>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_solver(&work, policy, tx, sync_executor_config).err())
                .reduce_with(merge_errors)
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        policy: InputPolicy<'_>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_solver(&work, policy, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(merge_errors)
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (first, second) {
        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
        (a, b) => a.or(b),
    }
}

/// Read the input for one puzzle.
///
/// Input read from stdin is saved to the store so the next run finds it;
/// a failed save is only logged.
fn load_input(
    year: u16,
    day: u8,
    policy: InputPolicy<'_>,
    store: &InputStore,
) -> Result<(InputSource, String), InputError> {
    let stored = store.path(year, day);
    let source = input::resolve_source(policy.explicit, &stored, policy.stdin_allowed)
        .ok_or(InputError::Unavailable { year, day })?;
    let text = input::load(&source)?;

    if source == InputSource::Stdin
        && let Err(err) = store.put(year, day, &text)
    {
        log::warn!(
            "{}",
            ExecutorError::StoreWrite {
                year,
                day,
                source: err,
            }
        );
    }
    Ok((source, text))
}

/// A puzzle whose input has been read
#[derive(Clone, Copy)]
struct LoadedPuzzle<'a> {
    year: u16,
    day: u8,
    source: &'a InputSource,
    input: &'a str,
}

impl LoadedPuzzle<'_> {
    fn error_result(&self, part: u8, error: SolverError) -> SolverResult {
        SolverResult {
            source: Some(self.source.clone()),
            ..error_result(self.year, self.day, part, error)
        }
    }
}

fn error_result(year: u16, day: u8, part: u8, error: SolverError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        source: None,
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Load the input for one work item and solve its parts.
///
/// A missing or unreadable input is reported as an error result for every
/// part rather than failing the whole run.
fn run_solver(
    work: &WorkItem,
    policy: InputPolicy<'_>,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (source, input) = match load_input(work.year, work.day, policy, &sync_executor_config.store)
    {
        Ok(loaded) => loaded,
        Err(e) => {
            for part in work.parts.clone() {
                send(
                    tx,
                    error_result(work.year, work.day, part, SolverError::Input(e.clone())),
                )?;
            }
            return Ok(());
        }
    };
    let puzzle = LoadedPuzzle {
        year: work.year,
        day: work.day,
        source: &source,
        input: &input,
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_solver_parts_parallel(puzzle, work.parts.clone(), tx, &sync_executor_config.registry)
    } else {
        run_solver_sequential(puzzle, work.parts.clone(), tx, &sync_executor_config.registry)
    }
}

/// Parse the puzzle input.
///
/// A parse failure becomes an error result for each of `parts` and yields
/// `None`; any other registry error aborts the work item.
fn create_solver<'a>(
    registry: &SolverRegistry,
    puzzle: LoadedPuzzle<'a>,
    parts: RangeInclusive<u8>,
    tx: &Sender<SolverResult>,
) -> Result<Option<Box<dyn DynSolver + 'a>>, ArcExecutorError> {
    match registry.create_solver(puzzle.year, puzzle.day, puzzle.input) {
        Ok(solver) => Ok(Some(solver)),
        Err(SolverError::ParseError(e)) => {
            for part in parts {
                send(tx, puzzle.error_result(part, SolverError::ParseError(e.clone())))?;
            }
            Ok(None)
        }
        Err(e) => Err(ExecutorError::Solver(e).into()),
    }
}

/// Run solver with part-level parallelism, buffering results to emit in order
fn run_solver_parts_parallel(
    puzzle: LoadedPuzzle<'_>,
    parts: RangeInclusive<u8>,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();

    // Every part parses its own instance, so each result carries its parse time
    parts
        .clone()
        .into_par_iter()
        .try_for_each_with(result_tx, |rtx, part| -> Result<(), ArcExecutorError> {
            if let Some(mut solver) = create_solver(registry, puzzle, part..=part, rtx)? {
                send(rtx, solve_part_internal(puzzle, part, &mut *solver, true))?;
            }
            Ok(())
        })?;

    // Buffer and emit results in part order
    let start_part = *parts.start();
    let mut buffer: Vec<Option<SolverResult>> = parts.clone().map(|_| None).collect();
    let mut next_part = start_part;

    for result in result_rx {
        let idx = (result.part - start_part) as usize;
        if idx < buffer.len() {
            buffer[idx] = Some(result);
        }
        while let Some(result) = buffer
            .get_mut((next_part - start_part) as usize)
            .and_then(Option::take)
        {
            send(tx, result)?;
            next_part += 1;
        }
    }
    Ok(())
}

/// Parse once and solve the parts in order on a helper thread, forwarding
/// each result as soon as it is ready
fn run_solver_sequential(
    puzzle: LoadedPuzzle<'_>,
    parts: RangeInclusive<u8>,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (solve_tx, solve_rx) = std::sync::mpsc::channel();
    let LoadedPuzzle { year, day, .. } = puzzle;

    std::thread::scope(|s| {
        let producer = s.spawn(move || -> Result<(), ArcExecutorError> {
            let Some(mut solver) = create_solver(registry, puzzle, parts.clone(), &solve_tx)?
            else {
                return Ok(());
            };
            let first = *parts.start();
            for part in parts {
                let result = solve_part_internal(puzzle, part, &mut *solver, part == first);
                if solve_tx.send(result).is_err() {
                    break;
                }
            }
            Ok(())
        });

        for result in solve_rx {
            send(tx, result)?;
        }

        producer
            .join()
            .map_err(|_| ArcExecutorError::from(ExecutorError::SolverPanicked { year, day }))?
    })
}

/// Solve a single part on an already parsed instance.
///
/// `report_parse` attaches the instance's parse time to this result.
fn solve_part_internal(
    puzzle: LoadedPuzzle<'_>,
    part: u8,
    solver: &mut dyn DynSolver,
    report_parse: bool,
) -> SolverResult {
    let parse_duration = report_parse.then(|| solver.parse_duration());
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year: puzzle.year,
            day: puzzle.day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            source: Some(puzzle.source.clone()),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..puzzle.error_result(part, e.into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_file_used_and_not_stored() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().join("store"));
        let file = temp.path().join("maze.txt");
        std::fs::write(&file, "S.#\n..E\n").unwrap();

        let policy = InputPolicy {
            explicit: Some(&file),
            stdin_allowed: true,
        };
        let (source, text) = load_input(2025, 4, policy, &store).unwrap();
        assert_eq!(source, InputSource::File(file.clone()));
        assert_eq!(text, "S.#\n..E\n");
        assert!(!store.contains(2025, 4));
    }

    #[test]
    fn test_stored_input_used_without_explicit_file() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        store.put(2025, 5, "3-5\n\n4\n").unwrap();

        let policy = InputPolicy {
            explicit: None,
            stdin_allowed: false,
        };
        let (source, text) = load_input(2025, 5, policy, &store).unwrap();
        assert_eq!(source, InputSource::Stored(store.path(2025, 5)));
        assert_eq!(text, "3-5\n\n4\n");
    }

    #[test]
    fn test_missing_input_is_unavailable_when_stdin_disallowed() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        let policy = InputPolicy {
            explicit: None,
            stdin_allowed: false,
        };
        assert!(matches!(
            load_input(2025, 6, policy, &store),
            Err(InputError::Unavailable { year: 2025, day: 6 })
        ));
    }

    #[test]
    fn test_missing_explicit_file_becomes_error_per_part() {
        let temp = TempDir::new().unwrap();
        let config = SyncExecutorConfig {
            registry: aoc_solver::SolverRegistryBuilder::new().build(),
            store: InputStore::new(temp.path().to_path_buf()),
            input: None,
            parallelize_by: ParallelizeBy::Day,
            year_filter: None,
            day_filter: None,
            part_filter: None,
        };
        let missing = temp.path().join("missing.txt");
        let policy = InputPolicy {
            explicit: Some(&missing),
            stdin_allowed: false,
        };
        let work = WorkItem {
            year: 2025,
            day: 9,
            parts: 1..=2,
        };

        let (tx, rx) = std::sync::mpsc::channel();
        run_solver(&work, policy, &tx, &config).unwrap();
        drop(tx);

        let results: Vec<_> = rx.iter().collect();
        assert_eq!(results.len(), 2);
        for (result, part) in results.iter().zip(1..) {
            assert_eq!(result.part, part);
            assert!(matches!(
                result.answer,
                Err(SolverError::Input(InputError::Open { .. }))
            ));
        }
    }

    fn solve_day_3(parallelize_by: ParallelizeBy) -> (PathBuf, Vec<SolverResult>) {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("banks.txt");
        std::fs::write(&file, "987654321111111\n").unwrap();
        let config = SyncExecutorConfig {
            registry: aoc_solver::SolverRegistryBuilder::new()
                .register_all_plugins()
                .unwrap()
                .build(),
            store: InputStore::new(temp.path().join("store")),
            input: None,
            parallelize_by,
            year_filter: None,
            day_filter: None,
            part_filter: None,
        };
        let policy = InputPolicy {
            explicit: Some(&file),
            stdin_allowed: false,
        };
        let work = WorkItem {
            year: 2025,
            day: 3,
            parts: 1..=2,
        };

        let (tx, rx) = std::sync::mpsc::channel();
        run_solver(&work, policy, &tx, &config).unwrap();
        drop(tx);
        (file.clone(), rx.iter().collect())
    }

    #[test]
    fn test_results_carry_source_and_single_parse_time() {
        let (file, results) = solve_day_3(ParallelizeBy::Day);
        let answers: Vec<_> = results.iter().map(|r| r.answer.as_ref().unwrap().as_str()).collect();
        assert_eq!(answers, vec!["98", "987654321111"]);
        for result in &results {
            assert_eq!(result.source, Some(InputSource::File(file.clone())));
        }
        // One instance served both parts
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());
    }

    #[test]
    fn test_part_parallel_reports_each_parse() {
        let (_, results) = solve_day_3(ParallelizeBy::Part);
        assert_eq!(results.iter().map(|r| r.part).collect::<Vec<_>>(), vec![1, 2]);
        assert!(results.iter().all(|r| r.parse_duration.is_some()));
    }
}
