use crate::detection::domain::detector_provider::{DetectorOutput, RawDetection};
use crate::shared::constants::DEFAULT_CATEGORY_SCORE;

/// A detected face: bounding box in frame pixels plus a confidence in [0,1].
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub score: f64,
}

impl Detection {
    /// Shape one raw provider detection into the stable value type.
    ///
    /// The bounding box is copied verbatim. The score comes from the first
    /// category; when the category list is empty or its first entry carries
    /// no score, [`DEFAULT_CATEGORY_SCORE`] is used instead.
    pub fn from_raw(raw: &RawDetection) -> Self {
        let score = raw
            .categories
            .first()
            .and_then(|c| c.score)
            .unwrap_or(DEFAULT_CATEGORY_SCORE);
        Self {
            x: raw.bounding_box.origin_x,
            y: raw.bounding_box.origin_y,
            width: raw.bounding_box.width,
            height: raw.bounding_box.height,
            score,
        }
    }
}

/// Shape a full provider response, preserving its detection order.
pub fn shape_output(output: &DetectorOutput) -> Vec<Detection> {
    output.detections.iter().map(Detection::from_raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::detector_provider::{BoundingBox, Category};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn raw(x: f64, y: f64, w: f64, h: f64, categories: Vec<Category>) -> RawDetection {
        RawDetection {
            bounding_box: BoundingBox {
                origin_x: x,
                origin_y: y,
                width: w,
                height: h,
            },
            categories,
        }
    }

    #[test]
    fn test_box_copied_verbatim_with_first_category_score() {
        let detection = Detection::from_raw(&raw(
            10.0,
            20.0,
            30.0,
            40.0,
            vec![Category { score: Some(0.87) }],
        ));
        assert_relative_eq!(detection.x, 10.0);
        assert_relative_eq!(detection.y, 20.0);
        assert_relative_eq!(detection.width, 30.0);
        assert_relative_eq!(detection.height, 40.0);
        assert_relative_eq!(detection.score, 0.87);
    }

    #[rstest]
    #[case::no_categories(vec![])]
    #[case::first_category_unscored(vec![Category { score: None }])]
    fn test_score_falls_back_to_default(#[case] categories: Vec<Category>) {
        let detection = Detection::from_raw(&raw(0.0, 0.0, 1.0, 1.0, categories));
        assert_relative_eq!(detection.score, 0.5);
    }

    #[test]
    fn test_only_first_category_is_consulted() {
        let detection = Detection::from_raw(&raw(
            0.0,
            0.0,
            1.0,
            1.0,
            vec![Category { score: Some(0.9) }, Category { score: Some(0.1) }],
        ));
        assert_relative_eq!(detection.score, 0.9);
    }

    #[test]
    fn test_unscored_first_category_ignores_later_scores() {
        // The fallback applies per the first entry, not the first scored entry.
        let detection = Detection::from_raw(&raw(
            0.0,
            0.0,
            1.0,
            1.0,
            vec![Category { score: None }, Category { score: Some(0.99) }],
        ));
        assert_relative_eq!(detection.score, 0.5);
    }

    #[test]
    fn test_shape_output_preserves_count_and_order() {
        let output = DetectorOutput {
            detections: vec![
                raw(1.0, 1.0, 2.0, 2.0, vec![Category { score: Some(0.9) }]),
                raw(5.0, 5.0, 2.0, 2.0, vec![Category { score: Some(0.6) }]),
                raw(9.0, 9.0, 2.0, 2.0, vec![]),
            ],
        };
        let shaped = shape_output(&output);
        assert_eq!(shaped.len(), 3);
        assert_relative_eq!(shaped[0].x, 1.0);
        assert_relative_eq!(shaped[1].x, 5.0);
        assert_relative_eq!(shaped[2].score, 0.5);
    }

    #[test]
    fn test_shape_output_empty_response() {
        assert!(shape_output(&DetectorOutput::default()).is_empty());
    }
}
