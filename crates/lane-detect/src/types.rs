use crate::LaneError;
use std::fmt;

fn check_len(what: &str, width: usize, height: usize, len: usize) -> Result<(), LaneError> {
    let cells = width.checked_mul(height).ok_or_else(|| {
        LaneError::InvalidInput(format!("{what} of {width}x{height} overflows"))
    })?;
    if cells != len {
        return Err(LaneError::ShapeMismatch {
            expected: vec![height, width],
            got: vec![len],
        });
    }
    if width == 0 || height == 0 {
        return Err(LaneError::InvalidInput(format!(
            "{what} must be non-empty, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Per-pixel lane probability, row-major `[height, width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityGrid {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ProbabilityGrid {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self, LaneError> {
        check_len("probability grid", width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        f: impl Fn(usize, usize) -> f32,
    ) -> Result<Self, LaneError> {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// Lane / not-lane classification, row-major `[height, width]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl BinaryMask {
    pub fn new(width: usize, height: usize, data: Vec<bool>) -> Result<Self, LaneError> {
        check_len("mask", width, height, data.len())?;
        Ok(Self::from_parts(width, height, data))
    }

    // callers derive the dimensions from an already validated grid
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<bool>) -> Self {
        debug_assert_eq!(width * height, data.len());
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        f: impl Fn(usize, usize) -> bool,
    ) -> Result<Self, LaneError> {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[bool] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Number of lane cells.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&lane| lane).count()
    }
}

/// Which way the vehicle is drifting relative to the lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Centered,
    DriftRight,
    DriftLeft,
}

impl Direction {
    /// Stable machine name.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Centered => "CENTERED",
            Direction::DriftRight => "DRIFT_RIGHT",
            Direction::DriftLeft => "DRIFT_LEFT",
        }
    }

    /// Text shown to the driver.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Centered => "Keep center",
            Direction::DriftRight => "Drifting right",
            Direction::DriftLeft => "Drifting left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lateral offset of one frame, in model pixels.
///
/// Positive means the lane center lies right of the frame center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetResult {
    pub offset: f32,
    pub direction: Direction,
}

impl OffsetResult {
    pub const CENTERED: OffsetResult = OffsetResult {
        offset: 0.0,
        direction: Direction::Centered,
    };
}
