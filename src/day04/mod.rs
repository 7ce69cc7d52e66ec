use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::utils::*;

pub const EXAMPLE: &str = "\
Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub number: u32,
    pub winning: Vec<u32>,
    pub have: Vec<u32>,
}

impl Card {
    pub fn parse(line: &str) -> Result<Self> {
        let (head, numbers) = split_once(line, ":", "'Card <n>: '")?;
        let number = head
            .strip_prefix("Card")
            .ok_or_else(|| Error::parse(line, "expected 'Card <n>'"))?;
        let number = parse_int(number.trim(), line)?;
        let (winning, have) = split_once(numbers, "|", "'<winning> | <have>'")?;
        Ok(Self { number, winning: parse_ints(winning, line)?, have: parse_ints(have, line)? })
    }

    pub fn matches(&self) -> usize {
        let winning: HashSet<_> = self.winning.iter().collect();
        self.have.iter().filter(|n| winning.contains(n)).count()
    }
}

/// Cards in input order; calling it again on the same text starts over.
pub fn cards(s: &str) -> impl Iterator<Item = Result<Card>> + '_ {
    lines(s).map(Card::parse)
}

pub fn part1(s: &str) -> Result<u64> {
    lines(s).try_fold(0, |total: u64, line| -> Result<u64> {
        let matches = Card::parse(line)?.matches();
        let score = match matches {
            0 => Some(0),
            n => u32::try_from(n - 1).ok().and_then(|shift| 1_u64.checked_shl(shift)),
        };
        score
            .and_then(|score| total.checked_add(score))
            .ok_or_else(|| Error::parse(line, "score overflows"))
    })
}

pub fn part2(s: &str) -> Result<u64> {
    let matches = cards(s).map(|card| card.map(|c| c.matches())).collect::<Result<Vec<_>>>()?;
    let overflow = || Error::parse(s, "card count overflows");
    let mut copies = vec![1_u64; matches.len()];
    for (i, &n) in matches.iter().enumerate() {
        let count = copies[i];
        for next in copies.iter_mut().skip(i + 1).take(n) {
            *next = next.checked_add(count).ok_or_else(overflow)?;
        }
    }
    copies.iter().try_fold(0_u64, |total, &n| total.checked_add(n)).ok_or_else(overflow)
}

#[test]
fn test_day04_part1() {
    assert_eq!(part1(EXAMPLE).unwrap(), 13);
}

#[test]
fn test_day04_part2() {
    assert_eq!(part2(EXAMPLE).unwrap(), 30);
}

#[test]
fn test_day04_cards_restart() {
    let first: Vec<_> = cards(EXAMPLE).map(|c| c.unwrap().number).collect();
    let again: Vec<_> = cards(EXAMPLE).map(|c| c.unwrap().number).collect();
    assert_eq!(first, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(first, again);
    assert_eq!(Card::parse("Card   3:  1 21 | 21  1").unwrap().matches(), 2);
}

#[cfg(test)]
fn card_with_matches(n: u32) -> String {
    let numbers = (1..=n).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
    format!("Card 1: {} | {}", numbers, numbers)
}

#[test]
fn test_day04_many_matches() {
    assert_eq!(part1(&card_with_matches(40)).unwrap(), 1 << 39);
    assert_eq!(part1(&card_with_matches(64)).unwrap(), 1 << 63);
    let err = part1(&card_with_matches(65)).unwrap_err();
    assert!(matches!(err, Error::Parse { ref reason, .. } if reason == "score overflows"));
    let two = format!("{}\n{}", card_with_matches(64), card_with_matches(64));
    assert!(matches!(part1(&two), Err(Error::Parse { .. })));
}

#[test]
fn test_day04_parse_errors() {
    assert!(matches!(part1("Card 1: 1 2 3"), Err(Error::Parse { .. })));
    assert!(matches!(part2("Card x: 1 | 2"), Err(Error::Parse { .. })));
}
