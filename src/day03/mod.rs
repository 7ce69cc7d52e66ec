use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::utils::*;

pub const EXAMPLE: &str = "\
467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

type Cell = (usize, usize); // (row, col)

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Number {
    row: usize,
    col: usize,
    len: usize,
    value: u64,
}

struct Schematic<'a> {
    rows: Vec<&'a str>,
}

#[inline]
fn is_symbol(c: u8) -> bool {
    !c.is_ascii_digit() && c != b'.'
}

impl<'a> Schematic<'a> {
    pub fn parse(s: &'a str) -> Self {
        Self { rows: lines(s).collect() }
    }

    pub fn numbers(&self) -> Result<Vec<Number>> {
        let mut numbers = vec![];
        for (row, text) in self.rows.iter().enumerate() {
            let line = text.as_bytes();
            let mut col = 0;
            while col < line.len() {
                if !line[col].is_ascii_digit() {
                    col += 1;
                    continue;
                }
                let start = col;
                let mut value = 0_u64;
                while col < line.len() && line[col].is_ascii_digit() {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add((line[col] - b'0') as u64))
                        .ok_or_else(|| Error::parse(*text, "number overflows u64"))?;
                    col += 1;
                }
                numbers.push(Number { row, col: start, len: col - start, value });
            }
        }
        Ok(numbers)
    }

    /// Symbol cells in the box around `number`.
    pub fn adjacent_symbols(&self, number: &Number) -> Vec<Cell> {
        let rows = number.row.saturating_sub(1)..=number.row + 1;
        let mut cells = vec![];
        for row in rows {
            let Some(line) = self.rows.get(row).map(|r| r.as_bytes()) else { continue };
            for col in number.col.saturating_sub(1)..=number.col + number.len {
                if line.get(col).copied().is_some_and(is_symbol) {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    #[inline]
    pub fn at(&self, (row, col): Cell) -> u8 {
        self.rows[row].as_bytes()[col]
    }
}

fn overflow(s: &str, what: &str) -> Error {
    Error::parse(s, format!("{} overflows u64", what))
}

pub fn part1(s: &str) -> Result<u64> {
    let schematic = Schematic::parse(s);
    schematic
        .numbers()?
        .iter()
        .filter(|n| !schematic.adjacent_symbols(n).is_empty())
        .try_fold(0_u64, |total, n| total.checked_add(n.value))
        .ok_or_else(|| overflow(s, "part number sum"))
}

pub fn part2(s: &str) -> Result<u64> {
    let schematic = Schematic::parse(s);
    let mut gears = HashMap::<Cell, Vec<u64>>::new();
    for number in schematic.numbers()? {
        for cell in schematic.adjacent_symbols(&number) {
            if schematic.at(cell) == b'*' {
                gears.entry(cell).or_default().push(number.value);
            }
        }
    }
    gears
        .values()
        .filter(|parts| parts.len() == 2)
        .try_fold(0_u64, |total, parts| total.checked_add(parts[0].checked_mul(parts[1])?))
        .ok_or_else(|| overflow(s, "gear ratio"))
}

#[test]
fn test_day03_part1() {
    assert_eq!(part1(EXAMPLE).unwrap(), 4361);
}

#[test]
fn test_day03_part2() {
    assert_eq!(part2(EXAMPLE).unwrap(), 467835);
}

#[test]
fn test_day03_numbers() {
    let schematic = Schematic::parse("12.3\n..45");
    let numbers = schematic.numbers().unwrap();
    let values: Vec<_> = numbers.iter().map(|n| (n.row, n.col, n.value)).collect();
    assert_eq!(values, vec![(0, 0, 12), (0, 3, 3), (1, 2, 45)]);
}

#[test]
fn test_day03_large_numbers() {
    let big = "9".repeat(19);
    assert_eq!(part1(&format!("{}*", big)).unwrap(), 9_999_999_999_999_999_999);
    let err = part1(&format!("{}9*", big)).unwrap_err();
    assert!(matches!(err, Error::Parse { ref reason, .. } if reason == "number overflows u64"));

    assert_eq!(part2("100000*100000").unwrap(), 10_000_000_000);
    let gear = format!("{}*{}", big, big);
    let err = part2(&gear).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse { ref reason, .. } if reason == "gear ratio overflows u64"
    ));
}
