use std::cmp::{max, min};
use std::fmt::{self, Debug, Formatter};

/// Upper bound of the mapped domain; every stage covers `[0, MAX)`.
pub const MAX: i64 = i64::MAX;

/// Half-open interval `[start, end)`.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    #[inline]
    pub fn new(start: i64, end: i64) -> Self {
        debug_assert!(start <= end, "inverted interval [{}, {})", start, end);
        Self { start, end }
    }

    /// `[start, start + len)`, or `None` if the end doesn't fit into an `i64`.
    #[inline]
    pub fn with_len(start: i64, len: i64) -> Option<Self> {
        start.checked_add(len).map(|end| Self::new(start, end))
    }

    #[inline]
    pub fn len(self) -> i64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn contains(self, n: i64) -> bool {
        self.start <= n && n < self.end
    }

    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        max(self.start, other.start) < min(self.end, other.end)
    }

    #[inline]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let (start, end) = (max(self.start, other.start), min(self.end, other.end));
        (start < end).then(|| Self::new(start, end))
    }

    #[inline]
    pub fn shift(self, offset: i64) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Maps `source` onto `destination` with slope 1; both intervals have the same length.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub source: Interval,
    pub destination: Interval,
}

impl Segment {
    #[inline]
    pub fn new(source: Interval, destination: Interval) -> Self {
        debug_assert_eq!(source.len(), destination.len());
        Self { source, destination }
    }

    #[inline]
    pub fn identity(interval: Interval) -> Self {
        Self::new(interval, interval)
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        self.destination.start - self.source.start
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.offset() == 0
    }

    /// Also accepts `source.end` so that interval end points can be carried across.
    #[inline]
    pub fn apply(&self, x: i64) -> i64 {
        debug_assert!(self.source.contains(x) || x == self.source.end);
        x + self.offset()
    }

    #[inline]
    pub fn unapply(&self, y: i64) -> i64 {
        y - self.offset()
    }
}

impl Debug for Segment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?} -> {:?}", self.source, self.destination)
    }
}

#[test]
fn test_interval_overlap() {
    let a = Interval::new(10, 20);
    assert!(a.contains(10) && a.contains(19) && !a.contains(20) && !a.contains(9));
    assert!(a.overlaps(Interval::new(19, 30)));
    assert!(!a.overlaps(Interval::new(20, 30)));
    assert!(!a.overlaps(Interval::new(15, 15)));
    assert_eq!(a.intersect(Interval::new(0, 15)), Some(Interval::new(10, 15)));
    assert_eq!(a.intersect(Interval::new(0, 10)), None);
    assert_eq!(Interval::with_len(MAX - 1, 2), None);
}

#[test]
fn test_segment_unapply() {
    let segment = Segment::new(Interval::new(98, 100), Interval::new(50, 52));
    assert_eq!(segment.offset(), -48);
    for x in 98..=100 {
        assert_eq!(segment.unapply(segment.apply(x)), x);
    }
    assert_eq!(segment.apply(99), 51);
    assert!(Segment::identity(Interval::new(0, 5)).is_identity());
}
