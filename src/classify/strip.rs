use crate::classify::sample::StripSample;

/// Fraction of strip pixels whose mean channel brightness falls below
/// `brightness_max`. A missing or zero-sized strip yields 0.0, never NaN.
pub(crate) fn dark_ratio(strip: &StripSample, brightness_max: u16) -> f64 {
    let total = strip.width() as u64 * strip.height() as u64;
    if total == 0 {
        return 0.0;
    }

    let dark = strip
        .pixels()
        .filter(|px| {
            let [r, g, b] = px.0;
            (r as u16 + g as u16 + b as u16) / 3 < brightness_max
        })
        .count();

    dark as f64 / total as f64
}

/// Fraction of pixels whose summed per-channel absolute difference against
/// the previous strip exceeds `delta_min`. Dimension mismatch or empty
/// strips disable the motion term (0.0) rather than erroring.
pub(crate) fn motion_ratio(current: &StripSample, previous: &StripSample, delta_min: u16) -> f64 {
    let total = current.width() as u64 * current.height() as u64;
    if total == 0 || current.dimensions() != previous.dimensions() {
        return 0.0;
    }

    let moved = current
        .pixels()
        .zip(previous.pixels())
        .filter(|(cur, prev)| {
            let delta: i32 = cur
                .0
                .iter()
                .zip(prev.0.iter())
                .map(|(a, b)| (*a as i32 - *b as i32).abs())
                .sum();
            delta > delta_min as i32
        })
        .count();

    moved as f64 / total as f64
}
