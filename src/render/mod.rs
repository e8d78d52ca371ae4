//! CPU rasterization.
//!
//! A [`camera::Camera`] walks a scene tree, projects world coordinates into screen pixels and
//! draws onto a [`raster::Raster`].

/// Projection and the scene renderer.
pub mod camera;
/// Premultiplied source-over compositing.
pub mod composite;
pub(crate) mod cpu;
/// RGBA8 pixel buffers.
pub mod raster;
