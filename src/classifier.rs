use crate::error::Error;
use crate::Coord;

use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// User-declared axis hint deciding which coordinate delta sets the crossing direction.
///
/// The hint is taken as given: the actual slope of the counting line is never inspected.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Compare `y`, yielding `Up` / `Down`.
    #[default]
    Vertical,
    /// Compare `x`, yielding `Left` / `Right`.
    Horizontal,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            other => Err(Error::UnknownOrientation(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Slot of this direction in a `[_; 4]` counter array.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the step `prev -> curr` along the axis picked by `orientation`.
///
/// Ties resolve to `Down` (vertical) and `Right` (horizontal).
#[inline]
pub fn classify<T: Coord>(
    prev: &na::Point2<T>,
    curr: &na::Point2<T>,
    orientation: Orientation,
) -> Direction {
    match orientation {
        Orientation::Vertical if curr.y < prev.y => Direction::Up,
        Orientation::Vertical => Direction::Down,
        Orientation::Horizontal if curr.x < prev.x => Direction::Left,
        Orientation::Horizontal => Direction::Right,
    }
}
