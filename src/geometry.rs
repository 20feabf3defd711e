use crate::error::Error;
use crate::Coord;

use nalgebra as na;

/// Counter-clockwise predicate: `true` when `c` lies strictly to the left of `a -> b`.
#[inline(always)]
fn ccw<T: Coord>(a: &na::Point2<T>, b: &na::Point2<T>, c: &na::Point2<T>) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Checks whether trajectory step `p1 -> p2` crosses the segment `line_start -> line_end`.
///
/// Both segments must straddle each other. Collinear touches are not crossings and
/// zero-length segments never cross anything.
#[inline]
pub fn intersects<T: Coord>(
    p1: &na::Point2<T>,
    p2: &na::Point2<T>,
    line_start: &na::Point2<T>,
    line_end: &na::Point2<T>,
) -> bool {
    ccw(p1, line_start, line_end) != ccw(p2, line_start, line_end)
        && ccw(p1, p2, line_start) != ccw(p1, p2, line_end)
}

#[inline(always)]
pub fn is_finite_point<T: Coord>(p: &na::Point2<T>) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Counting line endpoints, validated once and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    start: na::Point2<f32>,
    end: na::Point2<f32>,
}

impl LineSegment {
    pub fn new(start: na::Point2<f32>, end: na::Point2<f32>) -> Result<Self, Error> {
        if !is_finite_point(&start) || !is_finite_point(&end) {
            return Err(Error::NonFiniteLine);
        }

        if start == end {
            return Err(Error::DegenerateLine);
        }

        Ok(Self { start, end })
    }

    /// Builds a segment from `[x1, y1, x2, y2]`.
    pub fn from_coordinates(coords: &[f32]) -> Result<Self, Error> {
        match *coords {
            [x1, y1, x2, y2] => Self::new(na::Point2::new(x1, y1), na::Point2::new(x2, y2)),
            _ => Err(Error::InvalidLineLength(coords.len())),
        }
    }

    #[inline(always)]
    pub fn start(&self) -> na::Point2<f32> {
        self.start
    }

    #[inline(always)]
    pub fn end(&self) -> na::Point2<f32> {
        self.end
    }

    #[inline]
    pub fn length(&self) -> f32 {
        na::distance(&self.start, &self.end)
    }

    #[inline]
    pub fn crossed_by(&self, prev: &na::Point2<f32>, curr: &na::Point2<f32>) -> bool {
        intersects(prev, curr, &self.start, &self.end)
    }
}
