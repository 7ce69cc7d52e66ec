use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::utils::*;

pub const EXAMPLE: &str = "\
32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483
";

const N: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl HandType {
    /// `groups` holds the size of each group of equal cards, largest first.
    fn from_groups(groups: &[usize]) -> Self {
        match groups {
            [5, ..] => Self::FiveOfAKind,
            [4, ..] => Self::FourOfAKind,
            [3, 2, ..] => Self::FullHouse,
            [3, ..] => Self::ThreeOfAKind,
            [2, 2, ..] => Self::TwoPair,
            [2, ..] => Self::OnePair,
            _ => Self::HighCard,
        }
    }
}

pub trait Rules {
    /// Cards from weakest to strongest.
    const ORDER: &'static [u8; 13];

    fn hand_type(cards: &[u8]) -> HandType;

    fn strength(card: u8) -> Option<u8> {
        Self::ORDER.iter().position(|&c| c == card).map(|i| i as u8)
    }
}

fn groups(cards: impl IntoIterator<Item = u8>) -> ArrayVec<usize, N> {
    cards.into_iter().counts().into_values().sorted_unstable_by(|a, b| b.cmp(a)).collect()
}

pub struct Standard;

impl Rules for Standard {
    const ORDER: &'static [u8; 13] = b"23456789TJQKA";

    fn hand_type(cards: &[u8]) -> HandType {
        HandType::from_groups(&groups(cards.iter().copied()))
    }
}

/// `J` is the weakest card but joins whichever group is already largest.
pub struct Jokers;

impl Rules for Jokers {
    const ORDER: &'static [u8; 13] = b"J23456789TQKA";

    fn hand_type(cards: &[u8]) -> HandType {
        let jokers = cards.iter().filter(|&&c| c == b'J').count();
        let mut groups = groups(cards.iter().copied().filter(|&c| c != b'J'));
        match groups.first_mut() {
            Some(largest) => *largest += jokers,
            None => groups.push(jokers),
        }
        HandType::from_groups(&groups)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Hand {
    kind: HandType,
    strengths: [u8; N],
    bid: u64,
}

impl Hand {
    fn parse<R: Rules>(line: &str) -> Result<Self> {
        let (cards, bid) = split_once(line, " ", "'<cards> <bid>'")?;
        let cards = cards.as_bytes();
        if cards.len() != N {
            return Err(Error::parse(line, format!("expected {} cards", N)));
        }
        let mut strengths = [0; N];
        for (strength, &card) in strengths.iter_mut().zip(cards) {
            *strength = R::strength(card)
                .ok_or_else(|| Error::parse(line, format!("unknown card {:?}", card as char)))?;
        }
        Ok(Self { kind: R::hand_type(cards), strengths, bid: parse_int(bid.trim(), line)? })
    }
}

fn winnings<R: Rules>(s: &str) -> Result<u64> {
    let mut hands = lines(s).map(Hand::parse::<R>).collect::<Result<Vec<_>>>()?;
    hands.sort_unstable_by_key(|hand| (hand.kind, hand.strengths));
    Ok(hands.iter().zip(1..).map(|(hand, rank)| rank * hand.bid).sum())
}

pub fn part1(s: &str) -> Result<u64> {
    winnings::<Standard>(s)
}

pub fn part2(s: &str) -> Result<u64> {
    winnings::<Jokers>(s)
}

#[test]
fn test_day07_part1() {
    assert_eq!(part1(EXAMPLE).unwrap(), 6440);
}

#[test]
fn test_day07_part2() {
    assert_eq!(part2(EXAMPLE).unwrap(), 5905);
}

#[test]
fn test_day07_hand_types() {
    use HandType::*;
    assert_eq!(Standard::hand_type(b"32T3K"), OnePair);
    assert_eq!(Standard::hand_type(b"KK677"), TwoPair);
    assert_eq!(Standard::hand_type(b"T55J5"), ThreeOfAKind);
    assert_eq!(Standard::hand_type(b"23332"), FullHouse);
    assert_eq!(Standard::hand_type(b"23456"), HighCard);
    assert_eq!(Jokers::hand_type(b"KTJJT"), FourOfAKind);
    assert_eq!(Jokers::hand_type(b"JJJJJ"), FiveOfAKind);
    assert_eq!(Jokers::hand_type(b"2345J"), OnePair);
    assert_eq!(Jokers::hand_type(b"22J33"), FullHouse);
}

#[test]
fn test_day07_parse_errors() {
    assert!(matches!(part1("32T3 765"), Err(Error::Parse { .. })));
    assert!(matches!(part1("32T3X 765"), Err(Error::Parse { .. })));
    assert!(matches!(part1("32T3K"), Err(Error::Parse { .. })));
    assert!(matches!(part2("32T3K bid"), Err(Error::Parse { .. })));
}
