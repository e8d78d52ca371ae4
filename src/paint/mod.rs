/// RGBA colors, the name table and the `a!w!b` mixing syntax.
pub mod color;
/// Per-element stroke and fill style.
pub mod style;
