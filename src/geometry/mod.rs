//! World-space value types and the coordinate transforms applied to them.

/// Axis-aligned bounding boxes.
pub mod bbox;
/// Coordinates, pixel-literal components, positions and radii.
pub mod coordinate;
/// Scale-and-shift coordinate systems.
pub mod coordinate_system;
