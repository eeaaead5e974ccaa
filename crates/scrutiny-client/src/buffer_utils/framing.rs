use std::collections::VecDeque;
use std::string::FromUtf8Error;

/// Accumulates raw transport bytes and extracts complete SSE messages.
///
/// Messages are delimited by a blank line (`"\n\n"`). Framing happens on
/// bytes, not on decoded text: the delimiter is pure ASCII, so a multi-byte
/// UTF-8 character split across transport chunks always lands either whole
/// inside a complete message or in the retained tail. One buffer per read
/// loop; the unterminated tail is retained until more bytes arrive or the
/// stream ends.
pub struct MessageBuffer {
    buffer: VecDeque<u8>,
}

impl MessageBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a transport chunk.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Extract the next complete message, excluding its separator.
    ///
    /// Returns `None` while the buffer holds no full `"\n\n"`. A message
    /// that is not valid UTF-8 is returned as the error case with its bytes
    /// already consumed, so the caller can skip it and keep going.
    pub fn next_message(&mut self) -> Option<Result<String, FromUtf8Error>> {
        let sep = self.find_separator()?;

        let mut message: Vec<u8> = self.buffer.drain(..sep + 2).collect();
        message.truncate(sep);

        Some(String::from_utf8(message))
    }

    /// Drain whatever is left once the stream has ended.
    ///
    /// Lossy on purpose: a multi-byte character truncated by the transport
    /// decodes to U+FFFD rather than losing the rest of the tail. Returns
    /// `None` when the remainder is empty or whitespace-only.
    pub fn take_remainder(&mut self) -> Option<String> {
        let rest: Vec<u8> = self.buffer.drain(..).collect();
        let text = String::from_utf8_lossy(&rest);

        if text.trim().is_empty() {
            None
        } else {
            Some(text.into_owned())
        }
    }

    /// Index of the first byte of the first `"\n\n"` pair. A buffer ending
    /// in a lone `'\n'` keeps it: the second half of the separator may be
    /// in the next chunk.
    fn find_separator(&self) -> Option<usize> {
        let mut prev_newline = false;
        for (i, &b) in self.buffer.iter().enumerate() {
            if b == b'\n' && prev_newline {
                return Some(i - 1);
            }
            prev_newline = b == b'\n';
        }
        None
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::with_capacity(4096)
    }
}
