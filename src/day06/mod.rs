use itertools::Itertools;

use crate::error::{Error, Result};
use crate::utils::*;

pub const EXAMPLE: &str = "\
Time:      7  15   30
Distance:  9  40  200
";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Race {
    time: u64,
    distance: u64,
}

impl Race {
    #[inline]
    fn wins(&self, hold: u64) -> bool {
        (hold as u128) * ((self.time - hold) as u128) > self.distance as u128
    }

    /// Number of hold times that beat the record.
    ///
    /// `hold * (time - hold) > distance` holds strictly between the roots of
    /// `x^2 - time * x + distance`; the float estimate of the lower root is
    /// nudged onto the exact integer boundary, and the winning set is
    /// symmetric around `time / 2`.
    fn ways(&self) -> u64 {
        let mid = self.time / 2;
        if !self.wins(mid) {
            return 0;
        }
        let t = self.time as f64;
        let disc = (t * t - 4. * self.distance as f64).max(0.);
        let mut lo = (((t - disc.sqrt()) / 2.).floor().max(0.) as u64).min(mid);
        while lo > 0 && self.wins(lo - 1) {
            lo -= 1;
        }
        while !self.wins(lo) {
            lo += 1;
        }
        self.time - 2 * lo + 1
    }
}

fn fields<'a>(line: Option<&'a str>, label: &str) -> Result<&'a str> {
    let line = line.ok_or_else(|| Error::parse("", format!("missing '{}' line", label)))?;
    line.strip_prefix(label).ok_or_else(|| Error::parse(line, format!("expected '{}'", label)))
}

fn parse(s: &str) -> Result<(&str, &str)> {
    let mut lines = lines(s);
    Ok((fields(lines.next(), "Time:")?, fields(lines.next(), "Distance:")?))
}

pub fn part1(s: &str) -> Result<u64> {
    let (times, distances) = parse(s)?;
    let (times, distances) = (parse_ints::<u64>(times, times)?, parse_ints(distances, distances)?);
    if times.len() != distances.len() {
        return Err(Error::parse(s, "time and distance counts differ"));
    }
    let races = times.into_iter().zip(distances).map(|(time, distance)| Race { time, distance });
    Ok(races.map(|race| race.ways()).product())
}

pub fn part2(s: &str) -> Result<u64> {
    let (time, distance) = parse(s)?;
    let joined = |s: &str| s.split_whitespace().join("");
    let (time, distance) = (joined(time), joined(distance));
    let race = Race { time: parse_int(&time, &time)?, distance: parse_int(&distance, &distance)? };
    Ok(race.ways())
}

#[test]
fn test_day06_part1() {
    assert_eq!(part1(EXAMPLE).unwrap(), 288);
}

#[test]
fn test_day06_part2() {
    assert_eq!(part2(EXAMPLE).unwrap(), 71503);
}

#[test]
fn test_day06_ways_matches_brute_force() {
    for time in 0..60 {
        for distance in 0..400 {
            let race = Race { time, distance };
            let brute = (0..=time).filter(|&hold| race.wins(hold)).count() as u64;
            assert_eq!(race.ways(), brute, "{:?}", race);
        }
    }
}

#[test]
fn test_day06_parse_errors() {
    assert!(matches!(part1("Time: 1 2\nDistance: 3\n"), Err(Error::Parse { .. })));
    assert!(matches!(part1("Time: 1\n"), Err(Error::Parse { .. })));
    assert!(matches!(part2("Time: x\nDistance: 3\n"), Err(Error::Parse { .. })));
}
