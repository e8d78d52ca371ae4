use crate::foundation::error::{DynfigureError, DynfigureResult};

pub use kurbo::{Affine, Point, Rect};

/// Pixel dimensions of a render target or exported frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Create validated canvas dimensions.
    ///
    /// The CPU rasterizer addresses surfaces with 16-bit extents, so both sides must lie in
    /// `1..=u16::MAX`.
    pub fn new(width: u32, height: u32) -> DynfigureResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> DynfigureResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DynfigureError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(DynfigureError::validation(format!(
                "canvas {}x{} exceeds the maximum of {}x{}",
                self.width,
                self.height,
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(())
    }

    pub fn to_u16(self) -> DynfigureResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| DynfigureError::validation("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| DynfigureError::validation("canvas height exceeds u16"))?;
        Ok((w, h))
    }

    /// Size of a tightly packed RGBA8 buffer for this canvas.
    pub fn byte_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
