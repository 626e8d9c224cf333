use crate::classify::config::ClassifierConfig;
use crate::classify::label::ActivityLabel;
use crate::classify::sample::{DetectionSample, FaceBox, FaceLandmarks, StripSample};
use crate::classify::strip;

/// Map one detection sample to an activity label.
///
/// Pure and total: any well-typed input resolves to a label, with missing
/// or malformed pieces degrading toward the least informative branch.
/// `previous_strip` is the prior tick's top strip, carried forward by the
/// caller; without it the motion term of the writing heuristic is skipped.
pub fn classify(
    sample: &DetectionSample,
    previous_strip: Option<&StripSample>,
    config: &ClassifierConfig,
) -> ActivityLabel {
    if let Some(face) = &sample.face {
        if let Some(landmarks) = &sample.landmarks {
            return classify_face_pose(face, landmarks, config);
        }
        // No landmarks requested or extracted; presence alone is enough.
        return ActivityLabel::Reading;
    }

    classify_headless(sample.top_strip.as_ref(), previous_strip, config)
}

/// Face and landmarks available: decide from head geometry.
fn classify_face_pose(
    face: &FaceBox,
    landmarks: &FaceLandmarks,
    config: &ClassifierConfig,
) -> ActivityLabel {
    // How far the nose sits below the eye line; grows as the head tilts down.
    let eye_drop = landmarks.nose.y - landmarks.left_eye.y;

    let reading_pose = eye_drop > config.reading_eye_drop_min
        && eye_drop < config.reading_eye_drop_max
        && face.height > config.reading_face_height_min
        && face.top > config.reading_face_top_min;
    if reading_pose {
        return ActivityLabel::Reading;
    }

    let phone_pose =
        face.height > config.phone_face_height_min && eye_drop > config.phone_eye_drop_min;
    if phone_pose {
        return ActivityLabel::Phone;
    }

    let standing_pose =
        face.height < config.standing_face_height_max && face.top < config.standing_face_top_max;
    if standing_pose {
        return ActivityLabel::Standing;
    }

    ActivityLabel::Uncertain
}

/// No face in frame: maybe the head is bowed over a desk and only hair is
/// visible in the top strip.
fn classify_headless(
    top_strip: Option<&StripSample>,
    previous_strip: Option<&StripSample>,
    config: &ClassifierConfig,
) -> ActivityLabel {
    let Some(current) = top_strip else {
        return ActivityLabel::NoFace;
    };

    let dark = strip::dark_ratio(current, config.dark_brightness_max);
    if dark <= config.dark_ratio_min {
        return ActivityLabel::NoFace;
    }

    if config.require_motion {
        // Without a prior strip the motion term is unavailable; darkness
        // alone decides on the first tick.
        if let Some(previous) = previous_strip {
            let motion = strip::motion_ratio(current, previous, config.motion_delta_min);
            if motion <= config.motion_ratio_min {
                return ActivityLabel::NoFace;
            }
        }
    }

    ActivityLabel::Writing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::sample::Point;
    use image::Rgb;

    fn face(top: f32, height: f32) -> FaceBox {
        FaceBox {
            top,
            left: 100.0,
            width: height * 0.75,
            height,
        }
    }

    fn landmarks(eye_drop: f32) -> FaceLandmarks {
        FaceLandmarks {
            nose: Point {
                x: 320.0,
                y: 200.0 + eye_drop,
            },
            left_eye: Point { x: 300.0, y: 200.0 },
        }
    }

    fn sample_with_face(face: FaceBox, landmarks: FaceLandmarks) -> DetectionSample {
        DetectionSample {
            face: Some(face),
            landmarks: Some(landmarks),
            top_strip: None,
        }
    }

    fn strip_of(value: u8) -> StripSample {
        StripSample::from_pixel(8, 4, Rgb([value, value, value]))
    }

    #[test]
    fn moderate_tilt_over_a_large_low_face_reads() {
        let sample = sample_with_face(face(50.0, 150.0), landmarks(15.0));
        let label = classify(&sample, None, &ClassifierConfig::default());
        assert_eq!(label, ActivityLabel::Reading);
    }

    #[test]
    fn huge_face_with_steep_tilt_is_phone() {
        let sample = sample_with_face(face(50.0, 200.0), landmarks(40.0));
        let label = classify(&sample, None, &ClassifierConfig::default());
        assert_eq!(label, ActivityLabel::Phone);
    }

    #[test]
    fn small_high_face_is_standing() {
        let sample = sample_with_face(face(20.0, 80.0), landmarks(0.0));
        let label = classify(&sample, None, &ClassifierConfig::default());
        assert_eq!(label, ActivityLabel::Standing);
    }

    #[test]
    fn ambiguous_geometry_is_uncertain() {
        // Large face, level gaze: none of the pose gates match.
        let sample = sample_with_face(face(150.0, 150.0), landmarks(0.0));
        let label = classify(&sample, None, &ClassifierConfig::default());
        assert_eq!(label, ActivityLabel::Uncertain);
    }

    #[test]
    fn face_without_landmarks_counts_as_reading() {
        let sample = DetectionSample {
            face: Some(face(20.0, 80.0)),
            landmarks: None,
            top_strip: None,
        };
        let label = classify(&sample, None, &ClassifierConfig::default());
        assert_eq!(label, ActivityLabel::Reading);
    }

    #[test]
    fn dark_top_strip_without_face_is_writing() {
        let sample = DetectionSample {
            face: None,
            landmarks: None,
            top_strip: Some(strip_of(20)),
        };
        let label = classify(&sample, None, &ClassifierConfig::default());
        assert_eq!(label, ActivityLabel::Writing);
    }

    #[test]
    fn bright_top_strip_without_face_is_no_face() {
        let sample = DetectionSample {
            face: None,
            landmarks: None,
            top_strip: Some(strip_of(220)),
        };
        let label = classify(&sample, None, &ClassifierConfig::default());
        assert_eq!(label, ActivityLabel::NoFace);
    }

    #[test]
    fn missing_strip_is_no_face() {
        let label = classify(
            &DetectionSample::empty(),
            None,
            &ClassifierConfig::default(),
        );
        assert_eq!(label, ActivityLabel::NoFace);
    }

    #[test]
    fn zero_sized_strip_is_no_face() {
        let sample = DetectionSample {
            face: None,
            landmarks: None,
            top_strip: Some(StripSample::new(0, 0)),
        };
        let label = classify(&sample, None, &ClassifierConfig::default());
        assert_eq!(label, ActivityLabel::NoFace);
    }

    #[test]
    fn motion_requirement_rejects_static_darkness() {
        let config = ClassifierConfig {
            require_motion: true,
            ..ClassifierConfig::default()
        };
        let previous = strip_of(20);
        let sample = DetectionSample {
            face: None,
            landmarks: None,
            top_strip: Some(strip_of(20)),
        };

        // Identical dark strips: dark enough but nothing moved.
        let label = classify(&sample, Some(&previous), &config);
        assert_eq!(label, ActivityLabel::NoFace);

        // First tick has no prior strip; darkness alone decides.
        let label = classify(&sample, None, &config);
        assert_eq!(label, ActivityLabel::Writing);
    }

    #[test]
    fn motion_requirement_accepts_moving_darkness() {
        let config = ClassifierConfig {
            require_motion: true,
            ..ClassifierConfig::default()
        };
        let previous = strip_of(20);
        let mut current = strip_of(20);
        for x in 0..8 {
            current.put_pixel(x, 0, Rgb([140, 140, 140]));
        }

        let sample = DetectionSample {
            face: None,
            landmarks: None,
            top_strip: Some(current),
        };
        let label = classify(&sample, Some(&previous), &config);
        assert_eq!(label, ActivityLabel::Writing);
    }
}
