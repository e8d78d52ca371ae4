/// Easing curves and frame-indexed tweens.
pub mod ease;
