//! Number and field extraction from puzzle text

use std::fmt::Display;
use std::str::FromStr;

use aoc_solver::ParseError;

/// Parse a trimmed number, reporting the offending text on failure.
pub fn to_num<T>(s: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    let s = s.trim();
    s.parse()
        .map_err(|e| ParseError::InvalidFormat(format!("'{s}' is not a number: {e}")))
}

/// Every run of ASCII digits in `s`, in order; signs are ignored.
///
/// ```
/// use aoc_solutions::utils::string_utils::extract_numbers;
///
/// let n: Vec<u32> = extract_numbers("[.##.] (3) (1,3) {3,5,4,7}").unwrap();
/// assert_eq!(n, vec![3, 1, 3, 3, 5, 4, 7]);
/// ```
pub fn extract_numbers<T>(s: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(to_num)
        .collect()
}

/// Like [`extract_numbers`], keeping a `-` directly in front of a run.
pub fn extract_signed_numbers<T>(s: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    let bytes = s.as_bytes();
    let mut numbers = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let mut start = i;
        if start > 0 && bytes[start - 1] == b'-' {
            start -= 1;
        }
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        numbers.push(to_num(&s[start..i])?);
    }
    Ok(numbers)
}

/// Split on the first `sep` and trim both halves.
pub fn split_once_trimmed<'a>(s: &'a str, sep: &str) -> Result<(&'a str, &'a str), ParseError> {
    s.split_once(sep)
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| ParseError::InvalidFormat(format!("missing '{sep}' in '{s}'")))
}
