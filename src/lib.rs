//! dynfigure describes 2D figures as a tree of primitives, projects them through a camera and
//! turns frame sequences into animations.
//!
//! - Build elements through a [`Session`], which tracks the active [`CoordinateSystem`] and
//!   style template
//! - Collect them in a [`Group`] and rasterize it with a [`Camera2D`]
//! - Drive element fields with a [`Tween`] and stream each frame into an [`Exporter`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod encode;
pub mod foundation;
pub mod geometry;
pub mod paint;
pub mod render;
pub mod scene;

pub use crate::animation::ease::{Ease, Tween, TweenIter};
pub use crate::encode::ffmpeg::{Mp4Exporter, Mp4Opts, is_ffmpeg_on_path};
pub use crate::encode::gif::{GifExporter, GifOpts};
pub use crate::encode::sink::{ExportConfig, Exporter, InMemoryExporter, export};
pub use crate::foundation::core::{Affine, Canvas, Point, Rect};
pub use crate::foundation::error::{DynfigureError, DynfigureResult};
pub use crate::geometry::bbox::BoundingBox;
pub use crate::geometry::coordinate::{Component, Coordinate, Position, Radius, px};
pub use crate::geometry::coordinate_system::CoordinateSystem;
pub use crate::paint::color::Color;
pub use crate::paint::style::{Brush, Pen, Style};
pub use crate::render::camera::{
    Camera, Camera2D, Matrix3, euclidean_to_projective, projective_to_euclidean,
};
pub use crate::render::raster::Raster;
pub use crate::scene::element::{Element, ElementId, ElementKind, ElementRef, ElementRenderer, Shape};
pub use crate::scene::group::{Group, Node};
pub use crate::scene::session::{CoordinateScope, Session, StyleScope, StyleTemplate};
