use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};
use nalgebra as na;

/// COCO-style numeric id for the class labels the counter usually sees, `0` otherwise.
pub fn class_id_for_label(label: &str) -> i32 {
    match label {
        "person" => 0,
        "car" => 2,
        "motorcycle" => 3,
        "bus" => 5,
        "truck" => 7,
        _ => 0,
    }
}

/// Why an observation was skipped for one tick.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeometryIssue {
    NonFiniteCentroid,
    InvertedBox,
}

/// One tracked object in one frame, as handed over by the tracker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackedObservation<I = u64> {
    #[serde(rename = "id")]
    pub identity: I,
    pub bbox: BBox<Ltrb>,
    #[serde(rename = "class")]
    pub class_label: String,
    #[serde(default)]
    pub class_id: Option<i32>,
    // None means the tracker had no detection confidence for this frame
    #[serde(default, rename = "p")]
    pub confidence: Option<f32>,
}

impl<I> TrackedObservation<I> {
    pub fn new(identity: I, bbox: BBox<Ltrb>, class_label: impl Into<String>) -> Self {
        let class_label = class_label.into();

        Self {
            identity,
            bbox,
            class_id: Some(class_id_for_label(&class_label)),
            class_label,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_class_id(mut self, class_id: i32) -> Self {
        self.class_id = Some(class_id);
        self
    }

    #[inline]
    pub fn centroid(&self) -> na::Point2<f32> {
        self.bbox.centroid()
    }

    /// Centroid, or the reason this observation's geometry can't be used.
    pub fn checked_centroid(&self) -> Result<na::Point2<f32>, GeometryIssue> {
        let c = self.bbox.centroid();

        if !self.bbox.is_finite() || !crate::geometry::is_finite_point(&c) {
            return Err(GeometryIssue::NonFiniteCentroid);
        }

        if self.bbox.is_inverted() {
            return Err(GeometryIssue::InvertedBox);
        }

        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_class_id_and_unknown_confidence() {
        let obs = TrackedObservation::new(3u64, BBox::ltrb(0.0, 0.0, 10.0, 10.0), "bus");
        assert_eq!(obs.class_id, Some(5));
        assert_eq!(obs.confidence, None);

        let obs = obs.with_confidence(0.8).with_class_id(42);
        assert_eq!(obs.confidence, Some(0.8));
        assert_eq!(obs.class_id, Some(42));
    }

    #[test]
    fn unknown_label_maps_to_zero() {
        assert_eq!(class_id_for_label("bicycle"), 0);
        assert_eq!(class_id_for_label("truck"), 7);
    }

    #[test]
    fn checked_centroid_flags_bad_geometry() {
        let ok = TrackedObservation::new(1u64, BBox::ltrb(0.0, 0.0, 10.0, 20.0), "car");
        assert_eq!(ok.checked_centroid(), Ok(na::Point2::new(5.0, 10.0)));

        let nan = TrackedObservation::new(1u64, BBox::ltrb(f32::NAN, 0.0, 10.0, 20.0), "car");
        assert_eq!(nan.checked_centroid(), Err(GeometryIssue::NonFiniteCentroid));

        let overflow =
            TrackedObservation::new(1u64, BBox::ltrb(f32::MAX, 0.0, f32::MAX, 1.0), "car");
        assert_eq!(
            overflow.checked_centroid(),
            Err(GeometryIssue::NonFiniteCentroid)
        );

        let inverted = TrackedObservation::new(1u64, BBox::ltrb(10.0, 0.0, 0.0, 20.0), "car");
        assert_eq!(inverted.checked_centroid(), Err(GeometryIssue::InvertedBox));
    }

    #[test]
    fn deserializes_tracker_record() {
        let obs: TrackedObservation = serde_json::from_str(
            r#"{"id": 7, "bbox": [600.0, 460.0, 680.0, 500.0], "class": "car", "p": 0.9}"#,
        )
        .unwrap();

        assert_eq!(obs.identity, 7);
        assert_eq!(obs.class_label, "car");
        assert_eq!(obs.class_id, None);
        assert_eq!(obs.confidence, Some(0.9));
        assert_eq!(obs.centroid(), na::Point2::new(640.0, 480.0));
    }
}
