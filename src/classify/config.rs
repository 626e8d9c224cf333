use serde::{Deserialize, Serialize};

/// Tunable thresholds for pose classification.
///
/// The values are empirical; relative ordering of the checks in
/// [`crate::classify::classify`] matters more than the exact numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Reading pose: nose must sit this far below the left-eye reference point
    pub reading_eye_drop_min: f32,
    pub reading_eye_drop_max: f32,
    /// Reading pose: face moderately large and positioned low in frame
    pub reading_face_height_min: f32,
    pub reading_face_top_min: f32,

    /// Phone pose: face very large (close to camera) with head sharply down
    pub phone_face_height_min: f32,
    pub phone_eye_drop_min: f32,

    /// Standing pose: face small and high in frame
    pub standing_face_height_max: f32,
    pub standing_face_top_max: f32,

    /// Writing heuristic: per-pixel mean brightness below this counts as dark
    pub dark_brightness_max: u16,
    /// Writing heuristic: minimum fraction of dark pixels in the top strip
    pub dark_ratio_min: f64,
    /// Motion heuristic: summed per-channel delta above this counts as moved
    pub motion_delta_min: u16,
    /// Motion heuristic: minimum fraction of moved pixels
    pub motion_ratio_min: f64,
    /// Require motion in addition to darkness before calling it writing
    pub require_motion: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            reading_eye_drop_min: 5.0,
            reading_eye_drop_max: 30.0,
            reading_face_height_min: 120.0,
            reading_face_top_min: 40.0,
            phone_face_height_min: 180.0,
            phone_eye_drop_min: 25.0,
            standing_face_height_max: 100.0,
            standing_face_top_max: 100.0,
            dark_brightness_max: 60,
            dark_ratio_min: 0.15,
            motion_delta_min: 50,
            motion_ratio_min: 0.02,
            require_motion: false,
        }
    }
}
