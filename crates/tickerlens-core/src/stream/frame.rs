//! Event-stream framing

/// Event name used until the stream names one explicitly
pub const DEFAULT_EVENT_NAME: &str = "message";

/// One complete blank-line-delimited block of the event stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Value of the most recent `event:` line
    pub event_name: String,
    /// All `data:` line bodies of the block, joined with `\n`
    pub payload_text: String,
}

impl Frame {
    pub fn new(event_name: impl Into<String>, payload_text: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            payload_text: payload_text.into(),
        }
    }
}

/// Folds complete lines into [`Frame`]s.
///
/// The event name is sticky: it carries over to following frames until
/// another `event:` line replaces it. Data lines are collected per frame.
#[derive(Debug)]
pub struct FrameParser {
    current_event_name: String,
    payload_lines: Vec<String>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self {
            current_event_name: DEFAULT_EVENT_NAME.to_string(),
            payload_lines: Vec::new(),
        }
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one line; returns a frame when the line terminates one.
    pub fn push_line(&mut self, line: &str) -> Option<Frame> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            return self.take_frame();
        }

        if let Some(value) = line.strip_prefix("event:") {
            self.current_event_name = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("data:") {
            let value = value.strip_prefix(' ').unwrap_or(value);
            self.payload_lines.push(value.to_string());
        } else {
            // id:, retry:, comments and anything unknown
            tracing::trace!(line, "Ignoring unrecognized event-stream line");
        }

        None
    }

    /// Emit a frame left open by a body without a trailing blank line
    pub fn finish(&mut self) -> Option<Frame> {
        let frame = self.take_frame();
        if let Some(frame) = &frame {
            tracing::debug!(
                event = %frame.event_name,
                "Stream ended without blank line, emitting pending frame"
            );
        }
        frame
    }

    /// Whether data lines are waiting for a terminating blank line
    pub fn has_pending(&self) -> bool {
        !self.payload_lines.is_empty()
    }

    /// Event name that the next frame will carry
    pub fn current_event_name(&self) -> &str {
        &self.current_event_name
    }

    fn take_frame(&mut self) -> Option<Frame> {
        if self.payload_lines.is_empty() {
            return None;
        }
        let payload_text = std::mem::take(&mut self.payload_lines).join("\n");
        Some(Frame {
            event_name: self.current_event_name.clone(),
            payload_text,
        })
    }
}
