//! Frame exporters.
//!
//! Exporters consume rendered frames in call order and turn them into one animation artifact.

/// `ffmpeg`-based MP4 output.
pub mod ffmpeg;
/// ImageMagick-based GIF output.
pub mod gif;
/// Exporter trait, shared configuration and the in-memory collector.
pub mod sink;
