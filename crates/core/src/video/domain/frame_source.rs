use crate::shared::frame::Frame;

/// A live or recorded source of colour frames.
///
/// The monitor loop owns its source exclusively and drives it one frame at a
/// time. Frames are RGB; adapters convert from their native layout.
pub trait FrameSource {
    /// Requests a capture resolution. Best-effort: sources may keep their
    /// native size.
    fn configure(&mut self, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>>;

    /// Returns the next frame, or `None` once the stream is exhausted.
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the underlying device or file. Safe to call more than once.
    fn release(&mut self);
}
