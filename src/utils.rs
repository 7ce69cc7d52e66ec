use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Non-empty lines with trailing whitespace (including `\r`) stripped.
#[inline]
pub fn lines(s: &str) -> impl Iterator<Item = &str> + '_ {
    s.lines().map(str::trim_end).filter(|line| !line.is_empty())
}

/// Groups of consecutive non-blank lines; groups are separated by one or more blank lines.
pub fn blocks(s: &str) -> Vec<Vec<&str>> {
    let mut blocks = vec![];
    let mut current = vec![];
    for line in s.lines().map(str::trim_end) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

#[inline]
pub fn parse_int<T>(word: &str, line: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    word.parse::<T>().map_err(|e| Error::parse(line, format!("{:?}: {}", word, e)))
}

/// Parses every whitespace-separated word of `s`; `line` is reported on failure.
pub fn parse_ints<T>(s: &str, line: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    s.split_whitespace().map(|word| parse_int(word, line)).collect()
}

/// Splits `line` once on `sep`, reporting a parse error naming `what` if it's missing.
#[inline]
pub fn split_once<'a>(line: &'a str, sep: &str, what: &str) -> Result<(&'a str, &'a str)> {
    line.split_once(sep).ok_or_else(|| Error::parse(line, format!("expected {}", what)))
}

#[test]
fn test_blocks() {
    let s = "a\nb\n\n\nc\r\n\r\nd\n";
    assert_eq!(blocks(s), vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    assert!(blocks("\n\n").is_empty());
}

#[test]
fn test_parse_ints() {
    assert_eq!(parse_ints::<i64>(" 1  -2 3", "").unwrap(), vec![1, -2, 3]);
    assert!(matches!(
        parse_ints::<u32>("1 x", "1 x"),
        Err(Error::Parse { line, .. }) if line == "1 x"
    ));
}
