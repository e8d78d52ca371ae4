use crate::foundation::error::{DynfigureError, DynfigureResult};
use crate::render::raster::Raster;

/// Frame geometry and rate shared by every exporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExportConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
        }
    }
}

impl ExportConfig {
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self { width, height, fps }
    }

    pub fn validate(&self) -> DynfigureResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DynfigureError::validation(
                "export width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(DynfigureError::validation("fps must be non-zero"));
        }
        Ok(())
    }

    /// Reject frames whose size differs from the configured one.
    pub fn check_frame(&self, frame: &Raster) -> DynfigureResult<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(DynfigureError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// Consumer of an ordered frame sequence.
///
/// Lifecycle: `begin` once, `add_frame` any number of times, `finish` once. Use [`export`] to
/// get `finish` called on every exit path of the frame-producing code.
pub trait Exporter {
    fn config(&self) -> ExportConfig;

    /// Acquire the output resources (encoder process, scratch directory, ...).
    fn begin(&mut self) -> DynfigureResult<()>;

    /// Append `frame` `repeat` times. A frame of the wrong size fails before anything is
    /// written.
    fn add_frame(&mut self, frame: &Raster, repeat: u32) -> DynfigureResult<()>;

    /// Finalize the artifact and release every resource.
    fn finish(&mut self) -> DynfigureResult<()>;
}

/// Run `body` between `begin` and `finish`.
///
/// `finish` runs even when `body` fails. If both fail, the error from `body` is returned and
/// the cleanup failure is logged.
#[tracing::instrument(skip(exporter, body), fields(cfg = ?exporter.config()))]
pub fn export<E, R>(
    exporter: &mut E,
    body: impl FnOnce(&mut E) -> DynfigureResult<R>,
) -> DynfigureResult<R>
where
    E: Exporter + ?Sized,
{
    exporter.begin()?;
    let out = body(exporter);
    let finished = exporter.finish();
    match (out, finished) {
        (Ok(v), Ok(())) => Ok(v),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup)) => {
            tracing::warn!(error = %cleanup, "exporter cleanup failed after an earlier error");
            Err(e)
        }
    }
}

/// Collects frames in memory; for tests and previews.
#[derive(Debug, Default)]
pub struct InMemoryExporter {
    cfg: ExportConfig,
    active: bool,
    frames: Vec<Raster>,
}

impl InMemoryExporter {
    pub fn new(cfg: ExportConfig) -> Self {
        Self {
            cfg,
            active: false,
            frames: Vec::new(),
        }
    }

    /// Captured frames in output order, one entry per repeat.
    pub fn frames(&self) -> &[Raster] {
        &self.frames
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Exporter for InMemoryExporter {
    fn config(&self) -> ExportConfig {
        self.cfg
    }

    fn begin(&mut self) -> DynfigureResult<()> {
        self.cfg.validate()?;
        self.frames.clear();
        self.active = true;
        Ok(())
    }

    fn add_frame(&mut self, frame: &Raster, repeat: u32) -> DynfigureResult<()> {
        if !self.active {
            return Err(DynfigureError::validation("exporter not started"));
        }
        self.cfg.check_frame(frame)?;
        for _ in 0..repeat {
            self.frames.push(frame.clone());
        }
        Ok(())
    }

    fn finish(&mut self) -> DynfigureResult<()> {
        self.active = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
