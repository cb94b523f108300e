//! Output formatting for solver results
//!
//! Results arrive ordered by puzzle and part. Each puzzle gets one header
//! naming its input and parse time, followed by one line per part. A puzzle
//! whose input is missing or fails to parse is reported once instead.

use crate::executor::SolverResult;
use aoc_solver::SolverError;
use aoc_solver::input::InputSource;
use chrono::TimeDelta;
use std::collections::BTreeSet;

/// One line of output and the stream it belongs on
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Out(String),
    Err(String),
}

impl Line {
    fn print(&self) {
        match self {
            Line::Out(s) => println!("{}", s),
            Line::Err(s) => eprintln!("{}", s),
        }
    }
}

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
    /// Puzzle of the last printed result
    current: Option<(u16, u8)>,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
            current: None,
        }
    }

    /// Print a single result, preceded by its puzzle header when it is the
    /// first result of that puzzle
    pub fn print_result(&mut self, result: &SolverResult) {
        for line in self.lines_for(result) {
            line.print();
        }
    }

    fn lines_for(&mut self, result: &SolverResult) -> Vec<Line> {
        let key = (result.year, result.day);
        let first_of_puzzle = self.current != Some(key);
        self.current = Some(key);
        let label = format!("{}/{:02}", result.year, result.day);

        // Input and parse failures repeat for every part, so only the first counts
        match &result.answer {
            Err(SolverError::Input(e)) => {
                return first_of_puzzle
                    .then(|| Line::Err(format!("{}: no input - {}", label, e)))
                    .into_iter()
                    .collect();
            }
            Err(SolverError::ParseError(e)) => {
                return first_of_puzzle
                    .then(|| {
                        Line::Err(format!(
                            "{}: parse failed ({}) - {}",
                            label,
                            describe_source(result.source.as_ref()),
                            e
                        ))
                    })
                    .into_iter()
                    .collect();
            }
            _ => {}
        }

        if self.quiet {
            return vec![match &result.answer {
                Ok(answer) => Line::Out(answer.clone()),
                Err(e) => Line::Err(format!("{} Part {}: {}", label, result.part, e)),
            }];
        }

        let mut lines = Vec::new();
        let mut parse_shown = false;
        if first_of_puzzle {
            let mut header = format!("{} [{}]", label, describe_source(result.source.as_ref()));
            if let Some(parse) = result.parse_duration {
                header.push_str(&format!(" parse: {}", format_duration(parse)));
                parse_shown = true;
            }
            lines.push(Line::Out(header));
        }

        let prefix = format!("  Part {}", result.part);
        lines.push(match &result.answer {
            Ok(answer) => {
                // Part-parallel runs parse once per part
                let parse_timing = result
                    .parse_duration
                    .filter(|_| !parse_shown)
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                Line::Out(format!(
                    "{}: {} ({}solve: {})",
                    prefix,
                    answer,
                    parse_timing,
                    format_duration(result.solve_duration)
                ))
            }
            Err(e) => Line::Err(format!("{}: failed - {}", prefix, e)),
        });
        lines
    }

    /// Print a summary after all results
    /// Shows both total compute time and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let tally = Tally::of(results);
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", tally.solved, tally.failed);
        if tally.missing_input > 0 {
            println!("Puzzles without input: {}", tally.missing_input);
        }
        println!("Total parse time: {}", format_duration(tally.parse_time));
        println!("Total solve time: {}", format_duration(tally.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let compute = tally.parse_time + tally.solve_time;
            let compute_secs = compute.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            println!(
                "Speedup factor: {:.2}x",
                compute_secs / elapsed_time.as_secs_f64()
            );
        }
    }
}

/// Counts and times over a whole run
#[derive(Debug, PartialEq, Eq)]
struct Tally {
    solved: usize,
    /// Parts that had an input but produced no answer
    failed: usize,
    /// Puzzles, not parts
    missing_input: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Tally {
    fn of(results: &[SolverResult]) -> Self {
        let missing: BTreeSet<(u16, u8)> = results
            .iter()
            .filter(|r| matches!(r.answer, Err(SolverError::Input(_))))
            .map(|r| (r.year, r.day))
            .collect();
        let solved = results.iter().filter(|r| r.answer.is_ok()).count();
        let failed = results
            .iter()
            .filter(|r| matches!(&r.answer, Err(e) if !matches!(e, SolverError::Input(_))))
            .count();

        Self {
            solved,
            failed,
            missing_input: missing.len(),
            // Each parsed instance reports its parse time on one result only
            parse_time: results.iter().filter_map(|r| r.parse_duration).sum(),
            solve_time: results.iter().map(|r| r.solve_duration).sum(),
        }
    }
}

fn describe_source(source: Option<&InputSource>) -> String {
    match source {
        Some(InputSource::File(path)) => path.display().to_string(),
        Some(InputSource::Stored(path)) => format!("stored {}", path.display()),
        Some(InputSource::Stdin) => "stdin".to_string(),
        None => "no input".to_string(),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
