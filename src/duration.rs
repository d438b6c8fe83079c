//! Per-frame duration specs and their normalization.

use std::collections::BTreeMap;

use crate::{parse_interval, AxisSpec, Error, Result};

/// Durations keyed by frame index or range, in insertion order.
///
/// When two keys cover the same frame, the later one wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyedDurations(Vec<(AxisSpec, f64)>);

impl KeyedDurations {
    /// Create an empty set of keyed durations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key, builder style.
    pub fn with(mut self, key: impl Into<AxisSpec>, duration: f64) -> Self {
        self.push(key, duration);
        self
    }

    /// Append a key.
    pub fn push(&mut self, key: impl Into<AxisSpec>, duration: f64) {
        self.0.push((key.into(), duration));
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(AxisSpec, f64)] {
        &self.0
    }
}

impl<K: Into<AxisSpec>> FromIterator<(K, f64)> for KeyedDurations {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, d)| (k.into(), d)).collect())
    }
}

/// How long each frame of an animation is shown.
///
/// ## Example
///
/// ```rust
/// use sprite_anim::{Durations, KeyedDurations};
///
/// let uniform = Durations::from(0.1);
/// assert_eq!(uniform.normalize(3).unwrap().as_slice(), &[0.1, 0.1, 0.1]);
///
/// let list = Durations::from(vec![0.2, 1.0, 0.3]);
/// assert_eq!(list.normalize(3).unwrap().as_slice(), &[0.2, 1.0, 0.3]);
///
/// let keyed = Durations::from(KeyedDurations::new().with(1, 1.0).with("2-3", 0.1));
/// assert_eq!(keyed.normalize(3).unwrap().as_slice(), &[1.0, 0.1, 0.1]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Durations {
    /// Same duration for every frame
    Uniform(f64),
    /// One duration per frame, in order
    List(Vec<f64>),
    /// Durations for single frames or ranges of frames
    Keyed(KeyedDurations),
}

impl From<f64> for Durations {
    fn from(d: f64) -> Self {
        Durations::Uniform(d)
    }
}

impl From<Vec<f64>> for Durations {
    fn from(list: Vec<f64>) -> Self {
        Durations::List(list)
    }
}

impl<const N: usize> From<[f64; N]> for Durations {
    fn from(list: [f64; N]) -> Self {
        Durations::List(list.to_vec())
    }
}

impl From<KeyedDurations> for Durations {
    fn from(keyed: KeyedDurations) -> Self {
        Durations::Keyed(keyed)
    }
}

impl Durations {
    /// Expand into one duration per frame for `frame_count` frames.
    ///
    /// The result must cover indices `0..frame_count` exactly; otherwise
    /// [`Error::DurationCoverageMismatch`] is returned.
    pub fn normalize(&self, frame_count: usize) -> Result<DurationTable> {
        let table = match self {
            Durations::Uniform(d) => vec![*d; frame_count],
            Durations::List(list) => {
                if list.len() != frame_count {
                    return Err(Error::DurationCoverageMismatch {
                        expected: frame_count,
                        covered: list.len(),
                        stray: None,
                    });
                }
                list.clone()
            }
            Durations::Keyed(keyed) => normalize_keyed(keyed, frame_count)?,
        };

        if let Some((index, &value)) = table
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d < 0.0)
        {
            return Err(Error::InvalidDuration { index, value });
        }

        Ok(DurationTable(table))
    }
}

fn normalize_keyed(keyed: &KeyedDurations, frame_count: usize) -> Result<Vec<f64>> {
    let limit = i64::try_from(frame_count).unwrap_or(i64::MAX);
    let mut by_index = BTreeMap::new();
    let mut stray = None;

    for (key, duration) in keyed.entries() {
        let interval = parse_interval(key)?;
        // Only the part inside the sequence is walked
        let inside = interval.clamp_to(limit);
        if stray.is_none() && inside.len() < interval.len() {
            stray = Some(if inside.is_empty() || inside.min != interval.min {
                interval.min
            } else {
                inside.max
            });
        }
        for i in inside.indices() {
            by_index.insert(i, *duration);
        }
    }

    if stray.is_some() || by_index.len() != frame_count {
        return Err(Error::DurationCoverageMismatch {
            expected: frame_count,
            covered: by_index.len(),
            stray,
        });
    }

    Ok(by_index.into_values().collect())
}

/// Dense per-frame durations, index `i` holding frame `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct DurationTable(Vec<f64>);

impl DurationTable {
    /// Durations as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of frames covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table covers no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Duration of a single frame.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::KeyedDurations;
    use crate::AxisSpec;

    impl Serialize for KeyedDurations {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (key, duration) in &self.0 {
                map.serialize_entry(&key.to_string(), duration)?;
            }
            map.end()
        }
    }

    /// Map keys arrive as strings in most formats; text keys convert like
    /// any other string, so a bare number becomes [`AxisSpec::Index`].
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Index(i64),
        Text(String),
    }

    impl Key {
        fn into_spec(self) -> AxisSpec {
            match self {
                Key::Index(n) => AxisSpec::Index(n),
                Key::Text(s) => AxisSpec::from(s),
            }
        }
    }

    struct KeyedVisitor;

    impl<'de> Visitor<'de> for KeyedVisitor {
        type Value = KeyedDurations;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of frame index or range to duration")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut keyed = KeyedDurations::new();
            while let Some((key, duration)) = access.next_entry::<Key, f64>()? {
                keyed.push(key.into_spec(), duration);
            }
            Ok(keyed)
        }
    }

    impl<'de> Deserialize<'de> for KeyedDurations {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(KeyedVisitor)
        }
    }
}
