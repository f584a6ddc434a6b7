//! 16-point compass rose.
//!
//! Bearings are "wind-from" directions in degrees clockwise from
//! geographic north.

use serde::{
    de::{self, Deserializer},
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};
use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

/// Number of buckets on the compass rose.
pub const COMPASS_BUCKETS: usize = 16;

/// Degrees between neighboring compass directions.
const BUCKET_WIDTH_DEG: f64 = 360.0 / COMPASS_BUCKETS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompassDirection {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassDirection {
    /// All directions, in enumeration (clockwise from north) order.
    pub const ALL: [Self; COMPASS_BUCKETS] = [
        Self::N,
        Self::NNE,
        Self::NE,
        Self::ENE,
        Self::E,
        Self::ESE,
        Self::SE,
        Self::SSE,
        Self::S,
        Self::SSW,
        Self::SW,
        Self::WSW,
        Self::W,
        Self::WNW,
        Self::NW,
        Self::NNW,
    ];

    /// Position of this direction in [`CompassDirection::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wind-from bearing in degrees clockwise from north.
    #[allow(clippy::cast_precision_loss)]
    pub fn bearing(self) -> f64 {
        self.index() as f64 * BUCKET_WIDTH_DEG
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NNE => "NNE",
            Self::NE => "NE",
            Self::ENE => "ENE",
            Self::E => "E",
            Self::ESE => "ESE",
            Self::SE => "SE",
            Self::SSE => "SSE",
            Self::S => "S",
            Self::SSW => "SSW",
            Self::SW => "SW",
            Self::WSW => "WSW",
            Self::W => "W",
            Self::WNW => "WNW",
            Self::NW => "NW",
            Self::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompassDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("not a compass direction: {s}"))
    }
}

impl Serialize for CompassDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CompassDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// One value per compass direction.
///
/// Holding a fixed-size array makes it impossible to omit or
/// duplicate a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionMap<T>([T; COMPASS_BUCKETS]);

impl<T> DirectionMap<T> {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(CompassDirection) -> T,
    {
        Self(CompassDirection::ALL.map(&mut f))
    }

    /// Fallible version of [`DirectionMap::from_fn`]; stops at the
    /// first error.
    pub fn try_from_fn<F, E>(mut f: F) -> Result<Self, E>
    where
        F: FnMut(CompassDirection) -> Result<T, E>,
        T: Copy + Default,
    {
        let mut values = [T::default(); COMPASS_BUCKETS];
        for dir in CompassDirection::ALL {
            values[dir.index()] = f(dir)?;
        }
        Ok(Self(values))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CompassDirection, &T)> {
        CompassDirection::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> &[T; COMPASS_BUCKETS] {
        &self.0
    }

    pub fn map<U, F>(&self, mut f: F) -> DirectionMap<U>
    where
        F: FnMut(&T) -> U,
    {
        DirectionMap::from_fn(|dir| f(&self[dir]))
    }
}

impl<T> Index<CompassDirection> for DirectionMap<T> {
    type Output = T;

    fn index(&self, dir: CompassDirection) -> &T {
        &self.0[dir.index()]
    }
}

impl<T> IndexMut<CompassDirection> for DirectionMap<T> {
    fn index_mut(&mut self, dir: CompassDirection) -> &mut T {
        &mut self.0[dir.index()]
    }
}

/// Serializes as a `{ "N": .., "NNE": .., .. }` map in compass order.
impl<T: Serialize> Serialize for DirectionMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COMPASS_BUCKETS))?;
        for (dir, value) in self.iter() {
            map.serialize_entry(&dir, value)?;
        }
        map.end()
    }
}
