use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{ExportConfig, Exporter};
use crate::foundation::error::{DynfigureError, DynfigureResult};
use crate::render::raster::Raster;

/// Options for [`GifExporter`].
#[derive(Clone, Debug)]
pub struct GifOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Converter executable. Defaults to `$DYNFIGURE_CONVERT`, then `convert`.
    pub program: PathBuf,
    /// GIF loop count; `0` loops forever.
    pub loop_count: u32,
}

impl GifOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            program: convert_program(),
            loop_count: 0,
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_loop_count(mut self, loop_count: u32) -> Self {
        self.loop_count = loop_count;
        self
    }
}

/// Writes numbered PNG frames into a private scratch directory and hands the whole sequence
/// to ImageMagick `convert` on finish.
pub struct GifExporter {
    cfg: ExportConfig,
    opts: GifOpts,
    scratch_dir: Option<PathBuf>,
    frames: Vec<PathBuf>,
}

impl GifExporter {
    pub fn new(cfg: ExportConfig, opts: GifOpts) -> Self {
        Self {
            cfg,
            opts,
            scratch_dir: None,
            frames: Vec::new(),
        }
    }

    /// Scratch directory of the running export.
    pub fn scratch_dir(&self) -> Option<&Path> {
        self.scratch_dir.as_deref()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.opts.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        // `1xN` ticks: one tick of 1/N seconds per frame.
        cmd.args([
            "-delay".to_string(),
            format!("1x{}", self.cfg.fps),
            "-loop".to_string(),
            self.opts.loop_count.to_string(),
        ]);
        cmd.args(&self.frames);
        cmd.arg(&self.opts.out_path);
        cmd
    }

    fn convert(&self) -> DynfigureResult<()> {
        if self.frames.is_empty() {
            return Err(DynfigureError::validation("gif export has no frames"));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        let output = self.command().output().map_err(|e| {
            DynfigureError::encode(format!(
                "failed to spawn '{}' (is ImageMagick installed?): {e}",
                self.opts.program.display()
            ))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DynfigureError::encode(format!(
                "'{}' exited with status {}: {}",
                self.opts.program.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    fn remove_scratch(&mut self) {
        self.frames.clear();
        if let Some(dir) = self.scratch_dir.take()
            && let Err(e) = std::fs::remove_dir_all(&dir)
        {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to remove gif scratch directory");
        }
    }
}

impl Exporter for GifExporter {
    fn config(&self) -> ExportConfig {
        self.cfg
    }

    fn begin(&mut self) -> DynfigureResult<()> {
        self.cfg.validate()?;
        if self.scratch_dir.is_some() {
            return Err(DynfigureError::validation("gif exporter already started"));
        }
        let dir = scratch_dir_path();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create scratch directory '{}'", dir.display()))?;

        tracing::info!(path = %self.opts.out_path.display(), scratch = %dir.display(), "writing gif");
        self.scratch_dir = Some(dir);
        self.frames.clear();
        Ok(())
    }

    fn add_frame(&mut self, frame: &Raster, repeat: u32) -> DynfigureResult<()> {
        self.cfg.check_frame(frame)?;
        let Some(dir) = self.scratch_dir.clone() else {
            return Err(DynfigureError::validation("gif exporter not started"));
        };
        if repeat == 0 {
            return Ok(());
        }

        let mut png = Vec::new();
        frame
            .to_rgba_image()?
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("failed to encode frame as png")?;
        for _ in 0..repeat {
            let path = dir.join(format!("frame{:010}.png", self.frames.len()));
            std::fs::write(&path, &png)
                .with_context(|| format!("failed to write frame '{}'", path.display()))?;
            self.frames.push(path);
        }
        Ok(())
    }

    fn finish(&mut self) -> DynfigureResult<()> {
        if self.scratch_dir.is_none() {
            return Err(DynfigureError::validation("gif exporter not started"));
        }
        let converted = self.convert();
        self.remove_scratch();
        converted
    }
}

impl Drop for GifExporter {
    fn drop(&mut self) {
        self.remove_scratch();
    }
}

fn scratch_dir_path() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("dynfigure_gif_{}_{}", std::process::id(), nanos))
}

fn convert_program() -> PathBuf {
    std::env::var_os("DYNFIGURE_CONVERT")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("convert"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
