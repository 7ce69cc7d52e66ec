use log::{debug, trace};

use super::interval::{Interval, Segment, MAX};
use crate::error::{Error, InvariantViolation, Result};
use crate::utils::*;

/// A total piecewise-affine map over `[0, MAX)`.
///
/// Segments are sorted by source start, their sources never overlap and
/// together they cover the whole domain: any gaps left by the input are
/// filled with identity segments at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    segments: Vec<Segment>,
}

/// The smallest value a stage produces over a set of input ranges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lowest {
    pub input: i64,
    pub output: i64,
}

fn parse_segment(line: &str) -> Result<Segment> {
    let values = parse_ints::<i64>(line, line)?;
    let [dest, src, len] = <[i64; 3]>::try_from(values).map_err(|values| {
        Error::parse(line, format!("expected 3 integers, found {}", values.len()))
    })?;
    if dest < 0 || src < 0 || len < 0 {
        return Err(Error::parse(line, "values must be non-negative"));
    }
    let overflow = || Error::parse(line, "range end overflows i64");
    let source = Interval::with_len(src, len).ok_or_else(overflow)?;
    let destination = Interval::with_len(dest, len).ok_or_else(overflow)?;
    Ok(Segment::new(source, destination))
}

impl Stage {
    pub fn identity() -> Self {
        Self { segments: vec![Segment::identity(Interval::new(0, MAX))] }
    }

    /// Parses a block of lines: a label followed by `dest_start source_start length` triples.
    pub fn parse(block: &[&str]) -> Result<Self> {
        let segments = block.iter().skip(1).map(|line| parse_segment(line)).collect::<Result<_>>()?;
        let stage = Self::from_segments(segments)?;
        debug!(
            "parsed stage {:?}: {} segments after gap-filling",
            block.first().copied().unwrap_or_default(),
            stage.segments.len()
        );
        Ok(stage)
    }

    /// Builds a stage from a partial mapping, filling the holes with identity segments.
    pub fn from_segments(mut segments: Vec<Segment>) -> Result<Self> {
        segments.retain(|s| !s.source.is_empty());
        segments.sort_unstable_by_key(|s| s.source.start);

        let mut fillers = vec![];
        let mut cursor = 0;
        for segment in &segments {
            let (start, end) = (cursor, segment.source.start);
            if end < start {
                return Err(InvariantViolation::InvertedGap { start, end }.into());
            }
            if start < end {
                fillers.push(Segment::identity(Interval::new(start, end)));
            }
            cursor = segment.source.end;
        }
        if cursor < MAX {
            fillers.push(Segment::identity(Interval::new(cursor, MAX)));
        }

        segments.extend(fillers);
        segments.sort_unstable_by_key(|s| s.source.start);
        Ok(Self { segments })
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn apply(&self, n: i64) -> Result<i64> {
        let mut hits = self.segments.iter().filter(|s| s.source.contains(n));
        match (hits.next(), hits.count()) {
            (Some(segment), 0) => Ok(segment.apply(n)),
            (None, _) => Err(InvariantViolation::Uncovered { value: n }.into()),
            (Some(_), extra) => {
                Err(InvariantViolation::Ambiguous { value: n, hits: extra + 1 }.into())
            }
        }
    }

    /// Image of a whole range, split wherever it crosses a segment boundary.
    ///
    /// The output lengths always add up to the input length; parts that no
    /// segment covers are passed through unchanged. Output order is unspecified.
    pub fn apply_on(&self, range: Interval) -> Vec<Interval> {
        let mut out = vec![];
        let mut pending = vec![range];
        while let Some(range) = pending.pop() {
            if range.is_empty() {
                continue;
            }
            let hit = self.segments.iter().find_map(|s| range.intersect(s.source).map(|o| (s, o)));
            match hit {
                Some((segment, overlap)) => {
                    out.push(overlap.shift(segment.offset()));
                    pending.push(Interval::new(range.start, overlap.start));
                    pending.push(Interval::new(overlap.end, range.end));
                }
                None => out.push(range),
            }
        }
        out
    }

    /// The stage equivalent to applying `self` and then `next`.
    pub fn compose(&self, next: &Self) -> Result<Self> {
        let mut segments = Vec::with_capacity(self.segments.len() + next.segments.len());
        for a in &self.segments {
            for b in &next.segments {
                // the overlap lives in the intermediate basis: a's output, b's input
                if let Some(overlap) = a.destination.intersect(b.source) {
                    let source = Interval::new(a.unapply(overlap.start), a.unapply(overlap.end));
                    let destination = Interval::new(b.apply(overlap.start), b.apply(overlap.end));
                    segments.push(Segment::new(source, destination));
                }
            }
        }

        let span = segments.iter().map(|s| s.source.len() as i128).sum::<i128>();
        if span != MAX as i128 {
            return Err(InvariantViolation::CoverageMismatch { expected: MAX, actual: span }.into());
        }
        segments.sort_unstable_by_key(|s| s.source.start);
        debug!(
            "composed {} x {} segments into {}",
            self.segments.len(),
            next.segments.len(),
            segments.len()
        );
        Ok(Self { segments })
    }

    /// Minimum of `apply` over every integer of `ranges`, without enumerating them.
    ///
    /// Each segment is increasing, so within one range the minimum sits either
    /// at the range start or at the start of a segment inside the range.
    pub fn lowest(&self, ranges: &[Interval]) -> Result<Option<Lowest>> {
        let starts = ranges.iter().filter(|r| !r.is_empty()).map(|r| r.start);
        let breaks = self
            .segments
            .iter()
            .map(|s| s.source.start)
            .filter(|&x| ranges.iter().any(|r| r.contains(x)));

        let mut best: Option<Lowest> = None;
        for input in starts.chain(breaks) {
            let output = self.apply(input)?;
            trace!("candidate {} -> {}", input, output);
            if best.map_or(true, |b| output < b.output) {
                best = Some(Lowest { input, output });
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
fn seed_to_soil() -> Stage {
    Stage::parse(&["seed-to-soil map:", "50 98 2", "52 50 48"]).unwrap()
}

#[cfg(test)]
fn example_stages() -> Vec<Stage> {
    super::Almanac::parse(super::EXAMPLE).unwrap().stages
}

#[cfg(test)]
fn assert_partition(stage: &Stage) {
    let segments = stage.segments();
    assert_eq!(segments.first().unwrap().source.start, 0);
    assert_eq!(segments.last().unwrap().source.end, MAX);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].source.end, pair[1].source.start, "{:?}", segments);
    }
    for segment in segments {
        assert!(!segment.source.is_empty());
        assert_eq!(segment.source.len(), segment.destination.len());
    }
}

#[cfg(test)]
fn sample_values() -> Vec<i64> {
    let mut values: Vec<i64> = (0..128).collect();
    values.extend([1 << 20, 1 << 40, MAX - 100, MAX - 1]);
    values
}

#[test]
fn test_gap_filling() {
    let stage = seed_to_soil();
    assert_partition(&stage);
    let sources: Vec<_> = stage.segments().iter().map(|s| s.source).collect();
    assert_eq!(
        sources,
        vec![
            Interval::new(0, 50),
            Interval::new(50, 98),
            Interval::new(98, 100),
            Interval::new(100, MAX)
        ]
    );
    for stage in example_stages() {
        assert_partition(&stage);
    }
    assert_eq!(Stage::parse(&["empty map:"]).unwrap(), Stage::identity());
}

#[test]
fn test_apply_worked_example() {
    let stage = seed_to_soil();
    assert_eq!(stage.apply(79).unwrap(), 81);
    assert_eq!(stage.apply(14).unwrap(), 14);
    assert_eq!(stage.apply(55).unwrap(), 57);
    assert_eq!(stage.apply(13).unwrap(), 13);
    assert_eq!(stage.apply(98).unwrap(), 50);
    assert_eq!(stage.apply(99).unwrap(), 51);
    assert_eq!(stage.apply(100).unwrap(), 100);
}

#[test]
fn test_apply_is_total() {
    for stage in example_stages() {
        for x in sample_values() {
            assert!(stage.apply(x).is_ok(), "{} not covered", x);
        }
    }
}

#[test]
fn test_apply_rejects_broken_stages() {
    let overlapping = Stage {
        segments: vec![
            Segment::identity(Interval::new(0, 10)),
            Segment::new(Interval::new(5, 15), Interval::new(100, 110)),
        ],
    };
    assert!(matches!(
        overlapping.apply(7),
        Err(Error::Invariant(InvariantViolation::Ambiguous { value: 7, hits: 2 }))
    ));
    assert!(matches!(
        overlapping.apply(20),
        Err(Error::Invariant(InvariantViolation::Uncovered { value: 20 }))
    ));
}

#[test]
fn test_parse_errors() {
    let err = Stage::parse(&["x map:", "1 2"]).unwrap_err();
    assert!(matches!(err, Error::Parse { ref line, .. } if line == "1 2"), "{}", err);
    assert!(matches!(Stage::parse(&["x map:", "1 2 3 4"]), Err(Error::Parse { .. })));
    assert!(matches!(Stage::parse(&["x map:", "1 a 3"]), Err(Error::Parse { .. })));
    assert!(matches!(Stage::parse(&["x map:", "1 -2 3"]), Err(Error::Parse { .. })));
    let huge = format!("0 {} 2", MAX - 1);
    assert!(matches!(Stage::parse(&["x map:", &huge]), Err(Error::Parse { .. })));
}

#[test]
fn test_overlapping_sources_are_an_inverted_gap() {
    let err = Stage::parse(&["x map:", "0 10 10", "50 15 10"]).unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantViolation::InvertedGap { start: 20, end: 15 })
    ));
}

#[test]
fn test_compose_law() {
    let stages = example_stages();
    for pair in stages.windows(2) {
        let composed = pair[0].compose(&pair[1]).unwrap();
        assert_partition(&composed);
        for x in sample_values() {
            let expected = pair[1].apply(pair[0].apply(x).unwrap()).unwrap();
            assert_eq!(composed.apply(x).unwrap(), expected, "x = {}", x);
        }
    }

    let chain = stages.iter().try_fold(Stage::identity(), |acc, s| acc.compose(s)).unwrap();
    assert_partition(&chain);
    for x in sample_values() {
        let expected = stages.iter().try_fold(x, |v, s| s.apply(v)).unwrap();
        assert_eq!(chain.apply(x).unwrap(), expected, "x = {}", x);
    }
}

#[test]
fn test_compose_identity() {
    let stage = seed_to_soil();
    assert_eq!(Stage::identity().compose(&stage).unwrap(), stage);
    assert_eq!(stage.compose(&Stage::identity()).unwrap(), stage);
}

#[test]
fn test_compose_coverage_mismatch() {
    let partial = Stage { segments: vec![Segment::identity(Interval::new(0, 100))] };
    let err = partial.compose(&Stage::identity()).unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantViolation::CoverageMismatch { expected: MAX, actual: 100 })
    ));
}

#[test]
fn test_apply_on_preserves_length() {
    let stages = example_stages();
    let ranges = [(0, 10), (45, 105), (79, 93), (55, 68), (1 << 30, 1 << 31), (90, 91)];
    for stage in &stages {
        for &(start, end) in &ranges {
            let range = Interval::new(start, end);
            let total: i64 = stage.apply_on(range).iter().map(|r| r.len()).sum();
            assert_eq!(total, range.len(), "{:?}", range);
        }
    }
}

#[test]
fn test_apply_on_splits() {
    let stage = seed_to_soil();
    assert_eq!(stage.apply_on(Interval::new(60, 70)), vec![Interval::new(62, 72)]);

    let mut out = stage.apply_on(Interval::new(90, 100));
    out.sort();
    assert_eq!(out, vec![Interval::new(50, 52), Interval::new(92, 100)]);

    let mut out = stage.apply_on(Interval::new(40, 110));
    out.sort();
    assert_eq!(
        out,
        vec![
            Interval::new(40, 50),
            Interval::new(50, 52),
            Interval::new(52, 100),
            Interval::new(100, 110)
        ]
    );
}

#[test]
fn test_apply_on_edge_cases() {
    let stage = seed_to_soil();
    assert!(stage.apply_on(Interval::new(70, 70)).is_empty());
    // negative values lie outside the domain and pass through
    assert_eq!(stage.apply_on(Interval::new(-10, -5)), vec![Interval::new(-10, -5)]);
    let mut out = stage.apply_on(Interval::new(-5, 5));
    out.sort();
    assert_eq!(out, vec![Interval::new(-5, 0), Interval::new(0, 5)]);
}

#[test]
fn test_lowest() {
    let stages = example_stages();
    let chain = stages.iter().try_fold(Stage::identity(), |acc, s| acc.compose(s)).unwrap();
    let ranges = [Interval::new(79, 93), Interval::new(55, 68)];
    let Lowest { input, output } = chain.lowest(&ranges).unwrap().unwrap();
    assert_eq!(output, 46);
    assert_eq!(chain.apply(input).unwrap(), 46);
    assert!(ranges.iter().any(|r| r.contains(input)));

    // brute force agrees
    let brute = ranges
        .iter()
        .flat_map(|r| r.start..r.end)
        .map(|x| chain.apply(x).unwrap())
        .min()
        .unwrap();
    assert_eq!(brute, 46);

    assert_eq!(chain.lowest(&[]).unwrap(), None);
    assert_eq!(chain.lowest(&[Interval::new(5, 5)]).unwrap(), None);
}
