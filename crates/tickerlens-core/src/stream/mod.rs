//! Server-Sent Events decoding for the analysis stream
//!
//! The pipeline is split in two stages so each can be tested on its own:
//! - [`LineDecoder`] turns raw body chunks into complete text lines,
//!   carrying split UTF-8 sequences and unterminated lines across chunks
//! - [`FrameParser`] folds lines into [`Frame`]s using the `event:` /
//!   `data:` / blank-line framing
//!
//! [`SseDecoder`] chains both and is what the transport feeds.

mod frame;
mod line_decoder;

pub use frame::{DEFAULT_EVENT_NAME, Frame, FrameParser};
pub use line_decoder::LineDecoder;

/// Buffered SSE decoder that handles partial chunks
///
/// SSE format as produced by the analysis backend:
/// ```text
/// event: status_update\n
/// data: {"step": "ticker_extraction", ...}\n
/// \n
/// ```
///
/// Chunk boundaries may fall anywhere, including inside a multi-byte
/// character; the frames produced are the same as for the unsplit body.
#[derive(Debug, Default)]
pub struct SseDecoder {
    lines: LineDecoder,
    frames: FrameParser,
}

impl SseDecoder {
    /// Create a new SSE decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes into the decoder and extract complete frames
    ///
    /// Partial frames stay buffered until their terminating blank line
    /// arrives or [`finish`](Self::finish) is called.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        let lines = self.lines.feed(chunk);
        self.push_lines(lines)
    }

    /// Drain everything still buffered once the body has ended
    ///
    /// An unterminated last line is treated as complete, and a frame that
    /// is missing its trailing blank line is still emitted.
    pub fn finish(&mut self) -> Vec<Frame> {
        let lines = self.lines.flush();
        let mut frames = self.push_lines(lines);
        if let Some(frame) = self.frames.finish() {
            frames.push(frame);
        }
        frames
    }

    fn push_lines(&mut self, lines: Vec<String>) -> Vec<Frame> {
        lines
            .iter()
            .filter_map(|line| self.frames.push_line(line))
            .collect()
    }

    /// Discard all buffered state
    pub fn clear(&mut self) {
        self.lines = LineDecoder::new();
        self.frames = FrameParser::new();
    }

    /// Check if there's remaining data in the buffer
    pub fn has_remaining(&self) -> bool {
        self.lines.has_remaining() || self.frames.has_pending()
    }
}
