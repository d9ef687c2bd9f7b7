//! Wire schema of the per-frame metadata message.
//!
//! ```json
//! {
//!   "frameNumber": 0,
//!   "inferredResult": [
//!     {
//!       "label": "person",
//!       "coordinate": {
//!         "topLeft": {"x": 10, "y": 20},
//!         "topRight": {"x": 40, "y": 20},
//!         "bottomLeft": {"x": 10, "y": 60},
//!         "bottomRight": {"x": 40, "y": 60}
//!       }
//!     }
//!   ]
//! }
//! ```

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::record::{AnnotationRecord, Corners};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl From<Point2<i32>> for Point {
    fn from(p: Point2<i32>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl From<&Corners> for Coordinate {
    fn from(c: &Corners) -> Self {
        Self {
            top_left: c.top_left.into(),
            top_right: c.top_right.into(),
            bottom_left: c.bottom_left.into(),
            bottom_right: c.bottom_right.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredObject {
    pub label: String,
    pub coordinate: Coordinate,
}

/// One frame's metadata message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMessage {
    pub frame_number: u64,
    pub inferred_result: Vec<InferredObject>,
}

impl FrameMessage {
    /// Build the message for one frame's records, in extraction order.
    ///
    /// The frame number is taken from the first record; records of one frame
    /// all carry the same number. Returns `None` for an empty slice.
    pub fn from_records(records: &[AnnotationRecord]) -> Option<Self> {
        let first = records.first()?;
        Some(Self {
            frame_number: first.frame_number,
            inferred_result: records
                .iter()
                .map(|r| InferredObject {
                    label: r.label.clone(),
                    coordinate: Coordinate::from(&r.corners),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Rect;
    use serde_json::json;

    #[test]
    fn test_empty_records_build_no_message() {
        assert!(FrameMessage::from_records(&[]).is_none());
    }

    #[test]
    fn test_schema_field_names() {
        let records = [AnnotationRecord::new(7, "person", &Rect::new(10.0, 20.0, 30.0, 40.0))];
        let msg = FrameMessage::from_records(&records).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&serde_json::to_vec(&msg).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "frameNumber": 7,
                "inferredResult": [{
                    "label": "person",
                    "coordinate": {
                        "topLeft": {"x": 10, "y": 20},
                        "topRight": {"x": 40, "y": 20},
                        "bottomLeft": {"x": 10, "y": 60},
                        "bottomRight": {"x": 40, "y": 60}
                    }
                }]
            })
        );
    }

    #[test]
    fn test_results_keep_record_order() {
        let records: Vec<_> = ["b", "a", ""]
            .iter()
            .enumerate()
            .map(|(i, label)| AnnotationRecord::new(3, *label, &Rect::new(i as f32, 0.0, 1.0, 1.0)))
            .collect();
        let msg = FrameMessage::from_records(&records).unwrap();
        let labels: Vec<_> = msg.inferred_result.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["b", "a", ""]);
        assert_eq!(msg.frame_number, 3);
    }
}
