use image::RgbImage;

/// RGB pixels of the top strip of a frame, used by the hair/writing heuristic.
pub type StripSample = RgbImage;

/// Face bounding box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Landmark reference points extracted alongside a face detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLandmarks {
    pub nose: Point,
    pub left_eye: Point,
}

/// Everything the detector produced for one tick.
///
/// The previous tick's strip is not part of the sample; the watch loop
/// carries the last strip forward and hands it to the classifier.
#[derive(Debug, Clone, Default)]
pub struct DetectionSample {
    pub face: Option<FaceBox>,
    pub landmarks: Option<FaceLandmarks>,
    pub top_strip: Option<StripSample>,
}

impl DetectionSample {
    /// Sample with nothing in it; classifies as an absence.
    pub fn empty() -> Self {
        Self::default()
    }
}
