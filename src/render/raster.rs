use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{DynfigureError, DynfigureResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_px, unpremultiply_rgba8_in_place};
use crate::paint::color::Color;
use crate::render::composite::{Region, over_region};

/// An RGBA8 pixel buffer.
///
/// Pixels are stored **premultiplied**, tightly packed and row-major. Accessors that hand out
/// [`Color`] values convert back to straight alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Raster {
    /// Buffer of `width x height` filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> DynfigureResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let mut px = fill.to_array();
        premultiply_rgba8_in_place(&mut px);
        let data = std::iter::repeat_n(px, width as usize * height as usize)
            .flatten()
            .collect();
        Ok(Self { canvas, data })
    }

    /// Wrap straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> DynfigureResult<Self> {
        premultiply_rgba8_in_place(&mut rgba);
        Self::from_premul(width, height, rgba)
    }

    /// Wrap premultiplied RGBA8 bytes.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> DynfigureResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if data.len() != canvas.byte_len() {
            return Err(DynfigureError::validation(format!(
                "raster byte length {} does not match {}x{}x4",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { canvas, data })
    }

    /// Decode an encoded image (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> DynfigureResult<Self> {
        let img = image::load_from_memory(bytes).context("decode image from memory")?;
        Self::from_dynamic(img)
    }

    /// Load an image file from disk.
    pub fn open(path: impl AsRef<Path>) -> DynfigureResult<Self> {
        let path = path.as_ref();
        let img =
            image::open(path).with_context(|| format!("failed to open image '{}'", path.display()))?;
        Self::from_dynamic(img)
    }

    fn from_dynamic(img: image::DynamicImage) -> DynfigureResult<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width, self.canvas.height)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.canvas.width && y < self.canvas.height)
            .then(|| (y as usize * self.canvas.width as usize + x as usize) * 4)
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel_premul(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Straight-alpha color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixel_premul(x, y).map(|px| Color::from(unpremultiply_px(px)))
    }

    /// Copy scaled by `factor` in both axes (Lanczos resampling).
    pub fn resized(&self, factor: f64) -> DynfigureResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(DynfigureError::validation(format!(
                "image scale factor must be positive, got {factor}"
            )));
        }
        let width = (factor * f64::from(self.width())) as u32;
        let height = (factor * f64::from(self.height())) as u32;
        if width == 0 || height == 0 {
            return Err(DynfigureError::validation(format!(
                "scaling {}x{} by {factor} leaves no pixels",
                self.width(),
                self.height()
            )));
        }

        Canvas::new(width, height)?;

        let buf = image::RgbaImage::from_raw(self.width(), self.height(), self.data.clone())
            .ok_or_else(|| DynfigureError::validation("raster buffer has unexpected length"))?;
        let resized =
            image::imageops::resize(&buf, width, height, image::imageops::FilterType::Lanczos3);
        Self::from_premul(width, height, resized.into_raw())
    }

    /// Composite `src` over this raster with its top-left at `(x, y)`.
    pub fn composite_over(&mut self, src: &Raster, x: i64, y: i64) -> DynfigureResult<()> {
        over_region(
            &mut self.data,
            &src.data,
            Region {
                dst_width: self.canvas.width,
                dst_height: self.canvas.height,
                src_width: src.canvas.width,
                src_height: src.canvas.height,
                x,
                y,
            },
        )
    }

    /// Straight-alpha copy for encoders that do not understand premultiplication.
    pub fn to_rgba_image(&self) -> DynfigureResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width(), self.height(), straight)
            .ok_or_else(|| DynfigureError::validation("raster buffer has unexpected length"))
    }

    /// Write the raster to `path`; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> DynfigureResult<()> {
        let path = path.as_ref();
        self.to_rgba_image()?
            .save(path)
            .with_context(|| format!("failed to write image '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
