use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(transparent)]
pub struct BBox<F: BBoxFormat>([f32; 4], #[serde(skip)] PhantomData<F>);

impl<F: BBoxFormat> From<BBox<F>> for [f32; 4] {
    fn from(bbox: BBox<F>) -> Self {
        bbox.0
    }
}

impl<F: BBoxFormat> BBox<F> {
    #[inline]
    pub fn as_slice(&self) -> &[f32; 4] {
        &self.0
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: f32, x2: f32, x3: f32, x4: f32) -> Self {
        BBox([x1, x2, x3, x4], Default::default())
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    /// Box midpoint, the point used for line-crossing geometry.
    #[inline]
    pub fn centroid(&self) -> na::Point2<f32> {
        na::Point2::new(
            (self.left() + self.right()) / 2.0,
            (self.top() + self.bottom()) / 2.0,
        )
    }

    /// `true` when right < left or bottom < top.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.right() < self.left() || self.bottom() < self.top()
    }
}
