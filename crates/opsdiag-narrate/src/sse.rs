//! Server-sent-events framing
//!
//! Minimal SSE decoding for the live narration backend: byte chunks are
//! buffered until a blank-line frame boundary, then `data:` lines are
//! pulled out of each complete frame.

/// Reassembles SSE frames from arbitrary byte chunks
#[derive(Debug, Default)]
pub(crate) struct SseBuffer {
    buffer: String,
}

impl SseBuffer {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub(crate) fn push_chunk(&mut self, chunk: &[u8]) {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));
    }

    /// Pop the next complete frame, if one has arrived
    pub(crate) fn next_event_block(&mut self) -> Option<String> {
        let boundary = self.buffer.find("\n\n")?;
        let remaining = self.buffer.split_off(boundary + 2);
        let block = std::mem::take(&mut self.buffer);
        self.buffer = remaining;
        Some(block)
    }
}

/// Extract the `data:` payloads from one frame
pub(crate) fn parse_data_lines(event_block: &str) -> Vec<&str> {
    event_block
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .collect()
}
