//! Incremental byte-to-line decoding

/// Accumulates body chunks and yields complete `\n`-terminated lines.
///
/// Two things are carried between calls: the trailing bytes of a UTF-8
/// sequence cut by a chunk boundary, and decoded text after the last line
/// break. Concatenating every emitted line (each followed by `\n`, except
/// one emitted by [`flush`](Self::flush)) reproduces the decoded body.
#[derive(Debug, Default)]
pub struct LineDecoder {
    /// Decoded text not yet terminated by a line break
    pending: String,
    /// Start of a multi-byte character whose remaining bytes have not arrived
    incomplete_utf8: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk and return every line it completes.
    ///
    /// Lines are returned without their `\n`; a `\r` before it is kept,
    /// the frame parser deals with it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.decode(chunk);
        // `pending` holds no '\n' between calls, only the new text can have one
        let Some(last_break) = text.rfind('\n').map(|i| i + self.pending.len()) else {
            self.pending.push_str(&text);
            return Vec::new();
        };
        self.pending.push_str(&text);

        let rest = self.pending.split_off(last_break + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        // `complete` ends with '\n', so the final split element is empty
        let mut lines: Vec<String> = complete.split('\n').map(str::to_string).collect();
        lines.pop();
        lines
    }

    /// Emit whatever is held back once the body has ended.
    ///
    /// A dangling partial character becomes U+FFFD. Nothing is returned
    /// when there is no held-back text.
    pub fn flush(&mut self) -> Vec<String> {
        if !self.incomplete_utf8.is_empty() {
            tracing::warn!(
                bytes = self.incomplete_utf8.len(),
                "Stream ended inside a UTF-8 sequence, substituting replacement character"
            );
            self.incomplete_utf8.clear();
            self.pending.push(char::REPLACEMENT_CHARACTER);
        }

        if self.pending.is_empty() {
            return Vec::new();
        }
        vec![std::mem::take(&mut self.pending)]
    }

    /// Check if there's buffered text or bytes
    pub fn has_remaining(&self) -> bool {
        !self.pending.is_empty() || !self.incomplete_utf8.is_empty()
    }

    /// Number of bytes of a split character waiting for the next chunk
    pub fn incomplete_utf8_len(&self) -> usize {
        self.incomplete_utf8.len()
    }

    /// Decode bytes as UTF-8, keeping a trailing incomplete sequence for later.
    ///
    /// Invalid sequences in the middle of the input are replaced with
    /// U+FFFD rather than aborting the stream.
    fn decode(&mut self, chunk: &[u8]) -> String {
        let bytes = if self.incomplete_utf8.is_empty() {
            chunk.to_vec()
        } else {
            let mut combined = std::mem::take(&mut self.incomplete_utf8);
            combined.extend_from_slice(chunk);
            combined
        };

        let mut decoded = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    decoded.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    decoded.push_str(&String::from_utf8_lossy(valid));

                    match e.error_len() {
                        Some(len) => {
                            tracing::warn!(
                                position = e.valid_up_to(),
                                "Invalid UTF-8 in stream, substituting replacement character"
                            );
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Sequence cut by the chunk boundary
                            self.incomplete_utf8 = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_back_partial_line() {
        let mut decoder = LineDecoder::new();
        assert!(decoder.feed(b"event: status").is_empty());
        assert_eq!(decoder.feed(b"_update\ndata: {}"), vec!["event: status_update"]);
        assert!(decoder.has_remaining());
        assert_eq!(decoder.flush(), vec!["data: {}"]);
        assert!(!decoder.has_remaining());
    }

    #[test]
    fn test_long_line_in_small_chunks() {
        let payload = format!("data: {}", "x".repeat(64 * 1024));
        let body = format!("{payload}\nevent: status_update\n");
        let mut decoder = LineDecoder::new();
        let mut lines = Vec::new();
        for chunk in body.as_bytes().chunks(5) {
            lines.extend(decoder.feed(chunk));
            assert!(!decoder.pending.contains('\n'));
        }
        assert_eq!(lines, vec![payload, "event: status_update".to_string()]);
        assert!(!decoder.has_remaining());
    }

    #[test]
    fn test_blank_lines_are_emitted() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.feed(b"data: a\n\ndata: b\n\n");
        assert_eq!(lines, vec!["data: a", "", "data: b", ""]);
    }

    #[test]
    fn test_flush_without_pending_text_is_empty() {
        let mut decoder = LineDecoder::new();
        decoder.feed(b"data: x\n");
        assert!(decoder.flush().is_empty());
    }

    #[test]
    fn test_split_multibyte_character() {
        // "€" is E2 82 AC
        let mut decoder = LineDecoder::new();
        assert!(decoder.feed(&[b'd', b':', 0xE2]).is_empty());
        assert_eq!(decoder.incomplete_utf8_len(), 1);
        assert!(decoder.feed(&[0x82]).is_empty());
        assert_eq!(decoder.incomplete_utf8_len(), 2);
        assert_eq!(decoder.feed(&[0xAC, b'\n']), vec!["d:€"]);
        assert_eq!(decoder.incomplete_utf8_len(), 0);
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.feed(&[b'a', 0xFF, b'b', b'\n']);
        assert_eq!(lines, vec!["a\u{FFFD}b"]);
    }

    #[test]
    fn test_truncated_character_at_end_of_stream() {
        let mut decoder = LineDecoder::new();
        decoder.feed(&[b'x', 0xF0, 0x9F]);
        assert_eq!(decoder.flush(), vec!["x\u{FFFD}"]);
    }

    #[test]
    fn test_carriage_return_is_preserved() {
        let mut decoder = LineDecoder::new();
        assert_eq!(decoder.feed(b"data: a\r\n\r\n"), vec!["data: a\r", "\r"]);
    }

    #[test]
    fn test_replay_reproduces_text() {
        let text = "event: status_update\ndata: {\"message\": \"Kurs steigt 📈\"}\n\ntrailing";
        let bytes = text.as_bytes();

        for split in 0..=bytes.len() {
            let mut decoder = LineDecoder::new();
            let mut lines = decoder.feed(&bytes[..split]);
            lines.extend(decoder.feed(&bytes[split..]));
            lines.extend(decoder.flush());
            assert_eq!(lines.join("\n"), text, "split at {}", split);
        }
    }
}
