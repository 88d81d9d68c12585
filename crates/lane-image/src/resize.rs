use crate::{ImageError, PixelGrid};

/// Source neighbours and blend factor for one output coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    lo: usize,
    hi: usize,
    frac: f32,
}

// Half-pixel-center mapping, clamped to the source edge.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<Tap> {
    let scale = src_len as f32 / dst_len as f32;
    let last = (src_len - 1) as f32;
    (0..dst_len)
        .map(|i| {
            let pos = ((i as f32 + 0.5) * scale - 0.5).clamp(0.0, last);
            let lo = pos.floor() as usize;
            Tap {
                lo,
                hi: (lo + 1).min(src_len - 1),
                frac: pos - lo as f32,
            }
        })
        .collect()
}

/// Bilinear resize to exactly `width` x `height`.
///
/// Never crops: the whole source is stretched onto the target, so the
/// aspect ratio changes when the two sizes disagree. Channel count is kept.
/// Resizing to the source size returns an identical copy.
pub fn resize_bilinear(
    src: &PixelGrid,
    width: usize,
    height: usize,
) -> Result<PixelGrid, ImageError> {
    if src.is_empty() {
        return Err(ImageError::InvalidDimensions {
            width: src.width(),
            height: src.height(),
        });
    }
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    if src.width() == width && src.height() == height {
        return Ok(src.clone());
    }

    let channels = src.channels();
    let stride = src.width() * channels;
    let data = src.data();
    let xs = axis_taps(src.width(), width);
    let ys = axis_taps(src.height(), height);

    let mut out = vec![0u8; width * height * channels];
    for (oy, ty) in ys.iter().enumerate() {
        let top = ty.lo * stride;
        let bottom = ty.hi * stride;
        for (ox, tx) in xs.iter().enumerate() {
            let left = tx.lo * channels;
            let right = tx.hi * channels;
            let dst = (oy * width + ox) * channels;
            for ch in 0..channels {
                let tl = data[top + left + ch] as f32;
                let tr = data[top + right + ch] as f32;
                let bl = data[bottom + left + ch] as f32;
                let br = data[bottom + right + ch] as f32;
                let upper = tl + (tr - tl) * tx.frac;
                let lower = bl + (br - bl) * tx.frac;
                let value = upper + (lower - upper) * ty.frac;
                out[dst + ch] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    PixelGrid::new(width, height, channels, out)
}
