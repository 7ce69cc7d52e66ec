mod interval;
mod stage;

use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};
use crate::utils::*;

pub use self::interval::{Interval, Segment, MAX};
pub use self::stage::{Lowest, Stage};

pub const EXAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

#[derive(Clone, Debug)]
pub struct Almanac {
    pub seeds: Vec<i64>,
    pub stages: Vec<Stage>,
}

impl Almanac {
    pub fn parse(s: &str) -> Result<Self> {
        let blocks = blocks(s);
        let (first, rest) = blocks.split_first().ok_or_else(|| Error::parse(s, "empty almanac"))?;
        let line = first.join(" ");
        let values = line.split_once(':').map_or(line.as_str(), |(_, values)| values);
        let seeds = parse_ints::<i64>(values, &line)?;
        if seeds.iter().any(|&seed| seed < 0) {
            return Err(Error::parse(line, "seeds must be non-negative"));
        }
        let stages = rest.iter().map(|block| Stage::parse(block)).collect::<Result<Vec<_>>>()?;
        debug!("almanac: {} seed values, {} stages", seeds.len(), stages.len());
        Ok(Self { seeds, stages })
    }

    fn seed_line(&self) -> String {
        format!("seeds: {}", self.seeds.iter().join(" "))
    }

    /// Seed values read as `start length` pairs.
    pub fn seed_ranges(&self) -> Result<Vec<Interval>> {
        let seeds = || self.seed_line();
        if self.seeds.len() % 2 != 0 {
            return Err(Error::parse(seeds(), "seed ranges need an even number of values"));
        }
        self.seeds
            .iter()
            .tuples()
            .map(|(&start, &len)| {
                Interval::with_len(start, len)
                    .ok_or_else(|| Error::parse(seeds(), "seed range end overflows i64"))
            })
            .collect()
    }

    /// All stages folded into a single end-to-end mapping.
    pub fn chain(&self) -> Result<Stage> {
        self.stages.iter().try_fold(Stage::identity(), |acc, stage| acc.compose(stage))
    }

    /// Pushes the seed ranges through every stage one at a time and returns
    /// the smallest start of the resulting ranges.
    pub fn lowest_by_ranges(&self) -> Result<Option<i64>> {
        let mut ranges = self.seed_ranges()?;
        for stage in &self.stages {
            ranges = ranges.into_iter().flat_map(|range| stage.apply_on(range)).collect();
        }
        Ok(ranges.iter().filter(|r| !r.is_empty()).map(|r| r.start).min())
    }
}

pub fn part1(s: &str) -> Result<i64> {
    let almanac = Almanac::parse(s)?;
    let no_seeds = || Error::parse(almanac.seed_line(), "almanac has no seeds");
    let mut values = almanac.seeds.clone();
    for stage in &almanac.stages {
        for value in &mut values {
            *value = stage.apply(*value)?;
        }
    }
    values.into_iter().min().ok_or_else(no_seeds)
}

pub fn part2(s: &str) -> Result<i64> {
    let almanac = Almanac::parse(s)?;
    let ranges = almanac.seed_ranges()?;
    let no_ranges = || Error::parse(almanac.seed_line(), "no non-empty seed ranges");
    let Lowest { input, output } = almanac.chain()?.lowest(&ranges)?.ok_or_else(no_ranges)?;
    debug!("lowest location {} comes from seed {}", output, input);
    Ok(output)
}

#[test]
fn test_day05_part1() {
    assert_eq!(part1(EXAMPLE).unwrap(), 35);
}

#[test]
fn test_day05_part2() {
    assert_eq!(part2(EXAMPLE).unwrap(), 46);
}

#[test]
fn test_day05_seed_locations() {
    let chain = Almanac::parse(EXAMPLE).unwrap().chain().unwrap();
    for (seed, location) in [(79, 82), (14, 43), (55, 86), (13, 35)] {
        assert_eq!(chain.apply(seed).unwrap(), location);
    }
}

#[test]
fn test_day05_lowest_by_ranges() {
    let almanac = Almanac::parse(EXAMPLE).unwrap();
    assert_eq!(
        almanac.seed_ranges().unwrap(),
        vec![Interval::new(79, 93), Interval::new(55, 68)]
    );
    assert_eq!(almanac.lowest_by_ranges().unwrap(), Some(46));
}

#[test]
fn test_day05_parse_errors() {
    assert!(matches!(part2("seeds: 1 2 3\n\nx map:\n1 2 3\n"), Err(Error::Parse { .. })));
    assert!(matches!(part1("seeds: 1 -2\n"), Err(Error::Parse { .. })));
    assert!(matches!(part1("seeds:\n\nx map:\n1 2 3\n"), Err(Error::Parse { .. })));
    assert!(matches!(part1(""), Err(Error::Parse { .. })));
    let err = part1("seeds: 1\n\nx map:\n1 2 three\n").unwrap_err();
    assert!(matches!(err, Error::Parse { ref line, .. } if line == "1 2 three"));
}

#[test]
fn test_day05_empty_seed_ranges() {
    let err = part2("seeds: 79 0 55 0\n\nx map:\n1 2 3\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse { ref line, ref reason }
            if line == "seeds: 79 0 55 0" && reason == "no non-empty seed ranges"
    ));
    let err = part1("seeds:\n\nx map:\n1 2 3\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse { ref line, ref reason }
            if line == "seeds: " && reason == "almanac has no seeds"
    ));
}

#[test]
fn test_day05_crlf() {
    assert_eq!(part1(&EXAMPLE.replace('\n', "\r\n")).unwrap(), 35);
}
