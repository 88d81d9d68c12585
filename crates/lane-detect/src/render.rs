use crate::{BinaryMask, LaneError, ProbabilityGrid};
use lane_image::PixelGrid;

/// Probability above which a pixel counts as lane.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Overlay color of lane pixels: opaque green.
pub const LANE_RGBA: [u8; 4] = [0, 255, 0, 255];

/// Overlay color of everything else: fully transparent.
pub const CLEAR_RGBA: [u8; 4] = [0, 0, 0, 0];

/// `probability > threshold`, strictly. NaN is never lane.
pub fn threshold_mask(probabilities: &ProbabilityGrid, threshold: f32) -> BinaryMask {
    BinaryMask::from_parts(
        probabilities.width(),
        probabilities.height(),
        probabilities.data().iter().map(|&p| p > threshold).collect(),
    )
}

/// RGBA overlay of a mask at mask resolution.
pub fn overlay(mask: &BinaryMask) -> Result<PixelGrid, LaneError> {
    let data = mask
        .data()
        .iter()
        .flat_map(|&lane| if lane { LANE_RGBA } else { CLEAR_RGBA })
        .collect();
    Ok(PixelGrid::new(mask.width(), mask.height(), 4, data)?)
}

/// Thresholds a probability grid and paints the overlay.
///
/// Pure: identical input always yields bit-identical output.
pub fn render(
    probabilities: &ProbabilityGrid,
    threshold: f32,
) -> Result<(BinaryMask, PixelGrid), LaneError> {
    let mask = threshold_mask(probabilities, threshold);
    let overlay = overlay(&mask)?;
    Ok((mask, overlay))
}
