/// Canvas dimensions and re-exported `kurbo` primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
