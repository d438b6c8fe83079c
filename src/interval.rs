//! Axis specifier parsing for grid coordinates and duration keys.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("valid interval regex"));

/// A single 1-based index or an inclusive `"a-b"` range along one axis.
///
/// Ranges may run backwards (`"7-2"`) and both ends may be equal (`"3-3"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AxisSpec {
    /// A single 1-based index
    Index(i64),
    /// A range string such as `"1-8"` or `"10-7"`
    Range(String),
}

impl From<i32> for AxisSpec {
    fn from(n: i32) -> Self {
        AxisSpec::Index(n as i64)
    }
}

impl From<u32> for AxisSpec {
    fn from(n: u32) -> Self {
        AxisSpec::Index(n as i64)
    }
}

impl From<usize> for AxisSpec {
    fn from(n: usize) -> Self {
        AxisSpec::Index(n as i64)
    }
}

/// Text holding a bare number becomes [`AxisSpec::Index`]; anything else is
/// kept as a range string and checked when parsed.
impl From<&str> for AxisSpec {
    fn from(s: &str) -> Self {
        AxisSpec::from(s.to_string())
    }
}

impl From<String> for AxisSpec {
    fn from(s: String) -> Self {
        match bare_index(&s) {
            Some(n) => AxisSpec::Index(n),
            None => AxisSpec::Range(s),
        }
    }
}

fn bare_index(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisSpec::Index(n) => write!(f, "{n}"),
            AxisSpec::Range(s) => f.write_str(s),
        }
    }
}

/// Build an array of [`AxisSpec`] from mixed integer and string literals.
///
/// ```rust
/// use sprite_anim::{axes, AxisSpec};
///
/// let specs = axes!["1-3", 1, 2, 1];
/// assert_eq!(specs[0], AxisSpec::Range("1-3".into()));
/// assert_eq!(specs[3], AxisSpec::Index(1));
/// ```
#[macro_export]
macro_rules! axes {
    ($($spec:expr),* $(,)?) => {
        [$($crate::AxisSpec::from($spec)),*]
    };
}

/// A zero-based, stop-exclusive stepped range.
///
/// `max` is the exclusive stop; with a negative step it may be `-1` or any
/// other value that is not a valid index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    /// First index produced
    pub min: i64,
    /// Exclusive stop
    pub max: i64,
    /// `1` for ascending ranges, `-1` for descending ones
    pub step: i64,
}

impl Interval {
    /// Number of indices the range yields.
    pub fn len(&self) -> usize {
        let span = if self.step > 0 {
            i128::from(self.max) - i128::from(self.min)
        } else {
            i128::from(self.min) - i128::from(self.max)
        };
        let step = i128::from(self.step).abs();
        if span <= 0 || step == 0 {
            return 0;
        }
        usize::try_from((span + step - 1) / step).unwrap_or(usize::MAX)
    }

    /// Returns true if the range yields nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the zero-based indices in order.
    pub fn indices(&self) -> impl Iterator<Item = i64> {
        let Interval { min, step, .. } = *self;
        (0..self.len()).map(move |k| min + k as i64 * step)
    }

    /// The part of the range that falls inside `0..len`, in the same order.
    pub(crate) fn clamp_to(&self, len: i64) -> Interval {
        if self.step > 0 {
            let min = self.min.clamp(0, len);
            let max = self.max.clamp(min, len);
            Interval { min, max, step: self.step }
        } else {
            let min = self.min.clamp(-1, len - 1);
            let max = self.max.clamp(-1, min);
            Interval { min, max, step: self.step }
        }
    }
}

/// Parse an axis specifier into a zero-based stepped range.
///
/// ## Example
///
/// ```rust
/// use sprite_anim::{parse_interval, AxisSpec, Interval};
///
/// let single = parse_interval(&AxisSpec::Index(4)).unwrap();
/// assert_eq!(single, Interval { min: 3, max: 4, step: 1 });
///
/// let forward = parse_interval(&"1-8".into()).unwrap();
/// assert_eq!(forward, Interval { min: 0, max: 8, step: 1 });
///
/// let backward = parse_interval(&"7-2".into()).unwrap();
/// assert_eq!(backward, Interval { min: 6, max: 0, step: -1 });
/// assert_eq!(backward.indices().collect::<Vec<_>>(), vec![6, 5, 4, 3, 2, 1]);
/// ```
pub fn parse_interval(spec: &AxisSpec) -> Result<Interval> {
    match spec {
        AxisSpec::Index(n) => parse_index(*n).ok_or_else(|| Error::MalformedIntervalSpec(n.to_string())),
        AxisSpec::Range(s) => parse_range(s),
    }
}

fn parse_index(n: i64) -> Option<Interval> {
    Some(Interval {
        min: n.checked_sub(1)?,
        max: n,
        step: 1,
    })
}

fn parse_range(s: &str) -> Result<Interval> {
    let malformed = || Error::MalformedIntervalSpec(s.to_string());
    if let Some(n) = bare_index(s) {
        return parse_index(n).ok_or_else(malformed);
    }

    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = RANGE_RE.captures(&compact).ok_or_else(malformed)?;
    let from: i64 = caps[1].parse().map_err(|_| malformed())?;
    let to: i64 = caps[2].parse().map_err(|_| malformed())?;

    // Both ends are non-negative, so only the span itself can overflow
    let interval = if to >= from {
        Interval {
            min: from - 1,
            max: to,
            step: 1,
        }
    } else {
        Interval {
            min: from - 1,
            max: to - 2,
            step: -1,
        }
    };
    if interval.max.checked_sub(interval.min).is_none() || interval.min.checked_sub(interval.max).is_none() {
        return Err(malformed());
    }
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(spec: impl Into<AxisSpec>) -> Vec<i64> {
        parse_interval(&spec.into()).unwrap().indices().collect()
    }

    #[test]
    fn test_single_index() {
        for n in 1..50 {
            let interval = parse_interval(&AxisSpec::Index(n)).unwrap();
            assert_eq!(interval, Interval { min: n - 1, max: n, step: 1 });
            assert_eq!(interval.len(), 1);
        }
    }

    #[test]
    fn test_ascending_range() {
        assert_eq!(
            parse_interval(&"1-8".into()).unwrap(),
            Interval { min: 0, max: 8, step: 1 }
        );
        assert_eq!(indices("2-4"), vec![1, 2, 3]);
        assert_eq!(indices("3-3"), vec![2]);
    }

    #[test]
    fn test_descending_range() {
        assert_eq!(
            parse_interval(&"7-2".into()).unwrap(),
            Interval { min: 6, max: 0, step: -1 }
        );
        // Stop is below zero when the range ends at the first frame
        let to_first = parse_interval(&"7-1".into()).unwrap();
        assert_eq!(to_first.max, -1);
        assert_eq!(indices("7-1"), vec![6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(indices("10-7"), vec![9, 8, 7, 6]);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(indices(" 1 - 3 "), vec![0, 1, 2]);
        assert_eq!(indices("4 -\t2"), vec![3, 2, 1]);
    }

    #[test]
    fn test_malformed() {
        for bad in ["", "  ", "+1", "a-b", "1-", "-3", "1-2-3", "1..3", "-1-2"] {
            let result = parse_interval(&bad.into());
            assert!(
                matches!(result, Err(Error::MalformedIntervalSpec(ref s)) if s == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_overflowing_number_is_malformed() {
        let result = parse_interval(&"1-99999999999999999999999".into());
        assert!(matches!(result, Err(Error::MalformedIntervalSpec(_))));
    }

    #[test]
    fn test_span_overflow_is_malformed() {
        let result = parse_interval(&"9223372036854775807-0".into());
        assert_eq!(
            result,
            Err(Error::MalformedIntervalSpec("9223372036854775807-0".into()))
        );
        assert_eq!(
            parse_interval(&AxisSpec::Index(i64::MIN)),
            Err(Error::MalformedIntervalSpec(i64::MIN.to_string()))
        );

        // The widest spans that still fit are accepted
        let widest = parse_interval(&"9223372036854775807-1".into()).unwrap();
        assert_eq!(widest.len(), i64::MAX as usize);
        let top = parse_interval(&AxisSpec::Index(i64::MAX)).unwrap();
        assert_eq!(top.indices().collect::<Vec<_>>(), vec![i64::MAX - 1]);
    }

    #[test]
    fn test_bare_number_text_is_an_index() {
        assert_eq!(AxisSpec::from("3"), AxisSpec::Index(3));
        assert_eq!(AxisSpec::from(String::from(" 12 ")), AxisSpec::Index(12));
        assert_eq!(AxisSpec::from("3-3"), AxisSpec::Range("3-3".into()));
        assert_eq!(AxisSpec::from("-3"), AxisSpec::Range("-3".into()));

        // A range string holding a bare number parses the same way
        let built = parse_interval(&AxisSpec::Range("3".into())).unwrap();
        assert_eq!(built, parse_interval(&AxisSpec::Index(3)).unwrap());
    }

    #[test]
    fn test_clamp_to() {
        let forward = parse_interval(&"2-9".into()).unwrap().clamp_to(4);
        assert_eq!(forward.indices().collect::<Vec<_>>(), vec![1, 2, 3]);

        let backward = parse_interval(&"9-2".into()).unwrap().clamp_to(4);
        assert_eq!(backward.indices().collect::<Vec<_>>(), vec![3, 2, 1]);

        let below = parse_interval(&AxisSpec::Index(0)).unwrap().clamp_to(4);
        assert!(below.is_empty());
        let past = parse_interval(&"6-8".into()).unwrap().clamp_to(4);
        assert!(past.is_empty());
        let past_backward = parse_interval(&"8-6".into()).unwrap().clamp_to(4);
        assert!(past_backward.is_empty());
    }

    #[test]
    fn test_axes_macro_and_display() {
        let specs = axes![18, "8-11", 18usize, String::from("10-7")];
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].to_string(), "18");
        assert_eq!(specs[1].to_string(), "8-11");
        assert_eq!(specs[2], AxisSpec::Index(18));
        assert_eq!(specs[3], AxisSpec::Range("10-7".into()));
    }
}
