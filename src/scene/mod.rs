//! Scene tree: drawable elements, groups, and the session that builds them.

/// Primitive elements and the renderer visitor.
pub mod element;
/// Ordered composite nodes.
pub mod group;
/// Coordinate-system and style scopes.
pub mod session;
