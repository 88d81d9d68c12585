//! Weighted lateral offset of the lane inside the scan band.
//!
//! The scan band is the strip `[H*3/4, H*4/5)` just ahead of the vehicle. Rows
//! nearer the bottom weigh more: row `y` contributes with weight
//! `y - start + 1`. The weighted mean column of all lane cells is compared
//! with the frame center using integer arithmetic throughout, so the offset is
//! always a whole number of model pixels.

use crate::{BinaryMask, Direction, OffsetResult};
use lane_image::PixelGrid;
use std::ops::Range;

/// Offsets strictly inside `(-DEADBAND, DEADBAND)` count as centered.
pub const DEADBAND: f32 = 10.0;

/// Green level above which a rendered overlay pixel counts as lane.
pub const OVERLAY_GREEN_THRESHOLD: u8 = 200;

/// Rows examined for a mask of the given height.
pub fn scan_band(height: usize) -> Range<usize> {
    height * 3 / 4..height * 4 / 5
}

pub fn classify(offset: f32, deadband: f32) -> Direction {
    if offset.abs() < deadband {
        Direction::Centered
    } else if offset > 0.0 {
        Direction::DriftRight
    } else {
        Direction::DriftLeft
    }
}

pub fn estimate(mask: &BinaryMask) -> OffsetResult {
    estimate_with_deadband(mask, DEADBAND)
}

/// Like [`estimate`] with a custom deadband.
///
/// A band without lane cells is reported as centered with offset 0.
pub fn estimate_with_deadband(mask: &BinaryMask, deadband: f32) -> OffsetResult {
    let band = scan_band(mask.height());
    let mut sum_x: u64 = 0;
    let mut count: u64 = 0;

    for y in band.clone() {
        let weight = (y - band.start + 1) as u64;
        for (x, &lane) in mask.row(y).iter().enumerate() {
            if lane {
                sum_x += x as u64 * weight;
                count += weight;
            }
        }
    }

    if count == 0 {
        return OffsetResult::CENTERED;
    }

    let avg_x = (sum_x / count) as i64;
    let offset = (avg_x - (mask.width() / 2) as i64) as f32;
    OffsetResult {
        offset,
        direction: classify(offset, deadband),
    }
}

/// Reads a mask back from a rendered overlay by its green channel.
///
/// This is the bitmap-based detection path (`green > 200`). On overlays
/// straight out of [`render`](crate::render()) it agrees with the probability mask; on
/// upscaled overlays the blended edge pixels fall out.
pub fn mask_from_overlay(overlay: &PixelGrid) -> BinaryMask {
    let channels = overlay.channels();
    BinaryMask::from_parts(
        overlay.width(),
        overlay.height(),
        overlay
            .data()
            .chunks_exact(channels)
            .map(|px| px[1] > OVERLAY_GREEN_THRESHOLD)
            .collect(),
    )
}
