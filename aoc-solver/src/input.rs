//! Puzzle input loading
//!
//! Input is read once, in full, before any parsing starts. The source is
//! picked in this order:
//!
//! 1. a file named explicitly by the caller,
//! 2. the stored input for the puzzle, if present on disk,
//! 3. standard input.

use crate::error::InputError;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a puzzle input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file given on the command line
    File(PathBuf),
    /// A previously stored input for the puzzle
    Stored(PathBuf),
    /// The process's standard input
    Stdin,
}

/// Pick the input source for a puzzle.
///
/// Returns `None` when neither file applies and stdin is not allowed,
/// e.g. when several puzzles run in one go and cannot share one stream.
pub fn resolve_source(
    explicit: Option<&Path>,
    stored: &Path,
    stdin_allowed: bool,
) -> Option<InputSource> {
    if let Some(path) = explicit {
        return Some(InputSource::File(path.to_path_buf()));
    }
    if stored.is_file() {
        return Some(InputSource::Stored(stored.to_path_buf()));
    }
    stdin_allowed.then_some(InputSource::Stdin)
}

/// Read the whole input from `source` into one buffer.
pub fn load(source: &InputSource) -> Result<String, InputError> {
    match source {
        InputSource::File(path) => {
            log::info!("Using file: {}", path.display());
            read_file(path)
        }
        InputSource::Stored(path) => {
            log::info!("Using stored input: {}", path.display());
            read_file(path)
        }
        InputSource::Stdin => {
            log::info!("Reading from stdin");
            read_stream(std::io::stdin().lock()).map_err(|e| InputError::Stdin(Arc::new(e)))
        }
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source: Arc::new(source),
    })
}

/// Drain a reader into a `String`.
pub fn read_stream<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Split `input` into lines, dropping one trailing `\r` from each.
///
/// A final newline does not produce an extra empty line, but blank lines
/// in the middle of the input are kept.
pub fn lines(input: &str) -> impl Iterator<Item = &str> {
    input
        .split_inclusive('\n')
        .map(|line| line.strip_suffix('\n').unwrap_or(line))
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_lines_strip_carriage_returns() {
        let collected: Vec<_> = lines("a\r\nb\n\r\nc\r").collect();
        assert_eq!(collected, vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_lines_without_final_newline() {
        let collected: Vec<_> = lines("12\n34").collect();
        assert_eq!(collected, vec!["12", "34"]);
        assert_eq!(lines("").count(), 0);
        assert_eq!(lines("x\n").collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_blank_separator_line_is_kept() {
        let collected: Vec<_> = lines("3-5\n\n17\n").collect();
        assert_eq!(collected, vec!["3-5", "", "17"]);
    }

    #[test]
    fn test_explicit_path_wins() {
        let temp = TempDir::new().unwrap();
        let stored = temp.path().join("stored.txt");
        std::fs::write(&stored, "stored").unwrap();
        let explicit = temp.path().join("explicit.txt");

        let source = resolve_source(Some(&explicit), &stored, true);
        assert_eq!(source, Some(InputSource::File(explicit)));
    }

    #[test]
    fn test_stored_then_stdin_fallback() {
        let temp = TempDir::new().unwrap();
        let stored = temp.path().join("2025_day04.txt");

        assert_eq!(resolve_source(None, &stored, true), Some(InputSource::Stdin));
        assert_eq!(resolve_source(None, &stored, false), None);

        std::fs::write(&stored, "..@\n").unwrap();
        let source = resolve_source(None, &stored, false).unwrap();
        assert_eq!(source, InputSource::Stored(stored.clone()));
        assert_eq!(load(&source).unwrap(), "..@\n");
    }

    #[test]
    fn test_missing_explicit_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.txt");
        let err = load(&InputSource::File(missing.clone())).unwrap_err();
        match err {
            InputError::Open { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_stream_reads_everything() {
        let text = read_stream(Cursor::new("S..#\r\n..E.\r\n")).unwrap();
        assert_eq!(lines(&text).collect::<Vec<_>>(), vec!["S..#", "..E."]);
    }
}
