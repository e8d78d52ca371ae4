use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{ExportConfig, Exporter};
use crate::foundation::error::{DynfigureError, DynfigureResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::raster::Raster;

/// Options for [`Mp4Exporter`].
#[derive(Clone, Debug)]
pub struct Mp4Opts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
    /// Encoder executable. Defaults to `$DYNFIGURE_FFMPEG`, then `ffmpeg`.
    pub program: PathBuf,
}

impl Mp4Opts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
            program: ffmpeg_program(),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_background(mut self, bg_rgba: [u8; 4]) -> Self {
        self.bg_rgba = bg_rgba;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Streams raw RGBA frames into an `ffmpeg` child process producing an H.264 MP4.
pub struct Mp4Exporter {
    cfg: ExportConfig,
    opts: Mp4Opts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
}

impl Mp4Exporter {
    pub fn new(cfg: ExportConfig, opts: Mp4Opts) -> Self {
        Self {
            cfg,
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.opts.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", self.cfg.width, self.cfg.height),
            "-r",
            &self.cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);
        cmd
    }
}

impl Exporter for Mp4Exporter {
    fn config(&self) -> ExportConfig {
        self.cfg
    }

    fn begin(&mut self) -> DynfigureResult<()> {
        self.cfg.validate()?;
        if !self.cfg.width.is_multiple_of(2) || !self.cfg.height.is_multiple_of(2) {
            return Err(DynfigureError::validation(
                "mp4 width/height must be even (required for yuv420p output)",
            ));
        }
        if self.child.is_some() {
            return Err(DynfigureError::validation("mp4 exporter already started"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(DynfigureError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let mut child = self.command().spawn().map_err(|e| {
            DynfigureError::encode(format!(
                "failed to spawn '{}' (is it installed and on PATH?): {e}",
                self.opts.program.display()
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| DynfigureError::encode("failed to open encoder stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| DynfigureError::encode("failed to open encoder stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::info!(path = %self.opts.out_path.display(), "writing mp4");
        self.scratch = vec![0u8; self.cfg.width as usize * self.cfg.height as usize * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        Ok(())
    }

    fn add_frame(&mut self, frame: &Raster, repeat: u32) -> DynfigureResult<()> {
        self.cfg.check_frame(frame)?;
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(DynfigureError::validation("mp4 exporter not started"));
        };
        if repeat == 0 {
            return Ok(());
        }

        flatten_premul_over_bg_to_opaque_rgba8(&mut self.scratch, frame.data(), self.opts.bg_rgba)?;
        for _ in 0..repeat {
            stdin.write_all(&self.scratch).map_err(|e| {
                DynfigureError::encode(format!("failed to write frame to encoder stdin: {e}"))
            })?;
        }
        Ok(())
    }

    fn finish(&mut self) -> DynfigureResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| DynfigureError::validation("mp4 exporter not started"))?;

        let status = child.wait().map_err(|e| {
            DynfigureError::encode(format!("failed to wait for the encoder to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| DynfigureError::encode("encoder stderr drain thread panicked"))?
                .map_err(|e| DynfigureError::encode(format!("encoder stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(DynfigureError::encode(format!(
                "'{}' exited with status {}: {}",
                self.opts.program.display(),
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl Drop for Mp4Exporter {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take()
            && let Err(e) = child.wait()
        {
            tracing::warn!(error = %e, "failed to reap encoder process");
        }
    }
}

fn ffmpeg_program() -> PathBuf {
    std::env::var_os("DYNFIGURE_FFMPEG")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("ffmpeg"))
}

fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> DynfigureResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(DynfigureError::validation(
            "flatten_premul_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        for i in 0..3 {
            d[i] = (u16::from(s[i]) + mul_div255_u16(bg[i], inv)).min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> DynfigureResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
