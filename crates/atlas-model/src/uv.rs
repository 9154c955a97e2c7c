//! Normalized frame coordinates.
//!
//! All values are fractions of the atlas image in `[0.0, 1.0]`:
//! `(0.0, 0.0)` is the top-left corner, `(1.0, 1.0)` the bottom-right.

use serde::{Deserialize, Serialize};

use crate::descriptor::{FrameEntry, ImageSize, PixelRect};
use crate::error::AtlasError;

/// A frame rectangle in UV space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFrame {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl NormalizedFrame {
    /// The whole image.
    pub const FULL: NormalizedFrame = NormalizedFrame {
        u_min: 0.0,
        u_max: 1.0,
        v_min: 0.0,
        v_max: 1.0,
    };

    /// Normalize a pixel rectangle against the atlas size.
    pub fn from_rect(rect: PixelRect, image_size: ImageSize) -> Result<Self, AtlasError> {
        if !image_size.is_valid() {
            return Err(AtlasError::geometry(format!(
                "cannot normalize against a {}x{} image",
                image_size.width, image_size.height
            )));
        }

        let w = image_size.width as f64;
        let h = image_size.height as f64;

        // Far edges come from the integer sum so a frame flush with the
        // image edge lands on exactly 1.0.
        Ok(Self {
            u_min: rect.x as f64 / w,
            u_max: rect.right() as f64 / w,
            v_min: rect.y as f64 / h,
            v_max: rect.bottom() as f64 / h,
        })
    }

    /// Top-left corner `(u, v)`.
    pub fn start_uv(&self) -> (f64, f64) {
        (self.u_min, self.v_min)
    }

    /// Extent `(du, dv)`.
    pub fn size_uv(&self) -> (f64, f64) {
        (self.u_max - self.u_min, self.v_max - self.v_min)
    }

    /// `[u_min, u_max, v_min, v_max]`, the layout of the frame material's
    /// `FrameUV` vector parameter.
    pub fn as_linear_color(&self) -> [f64; 4] {
        [self.u_min, self.u_max, self.v_min, self.v_max]
    }
}

impl Default for NormalizedFrame {
    fn default() -> Self {
        Self::FULL
    }
}

/// Normalize one frame of an atlas of `image_size`.
pub fn normalize(frame: &FrameEntry, image_size: ImageSize) -> Result<NormalizedFrame, AtlasError> {
    NormalizedFrame::from_rect(frame.pixel_rect, image_size)
}
