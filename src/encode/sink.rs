use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BackdropResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BackdropResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BackdropResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BackdropResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BackdropResult<()> {
        check_order(self.frames.last().map(|(i, _)| *i), idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BackdropResult<()> {
        Ok(())
    }
}

/// Writes every frame to `dir/frame_NNNNNN.png` as straight-alpha RGBA.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    last: Option<FrameIndex>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, created on `begin` if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            last: None,
            written: Vec::new(),
        }
    }

    /// File name used for frame `idx`.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("frame_{:06}.png", idx.0)
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(Self::file_name(idx))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> BackdropResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.last = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BackdropResult<()> {
        let Some(cfg) = &self.cfg else {
            return Err(BackdropError::validation("push_frame called before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(BackdropError::validation(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        check_order(self.last, idx)?;

        let path = self.path_for(idx);
        let data = if frame.premultiplied {
            unpremultiply(&frame.data)
        } else {
            frame.data.clone()
        };
        write_png(&path, &data, frame.width, frame.height)?;
        self.last = Some(idx);
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> BackdropResult<()> {
        tracing::info!(frames = self.written.len(), dir = %self.dir.display(), "png sequence done");
        Ok(())
    }
}

fn check_order(last: Option<FrameIndex>, idx: FrameIndex) -> BackdropResult<()> {
    match last {
        Some(prev) if idx <= prev => Err(BackdropError::validation(format!(
            "frames must arrive in increasing order ({} after {})",
            idx.0, prev.0
        ))),
        _ => Ok(()),
    }
}

fn write_png(path: &Path, data: &[u8], width: u32, height: u32) -> BackdropResult<()> {
    image::save_buffer_with_format(
        path,
        data,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let a32 = u32::from(a);
        let un = |c: u8| ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8;
        out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
