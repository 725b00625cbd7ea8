//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data. Text is written
//! as-is (UTF-8); the builder never re-encodes or rewrites its payload.

/// Raw ESC/POS command sequences emitted by [`EscPosBuilder`]
pub mod commands {
    /// ESC a 1 - center alignment
    pub const ALIGN_CENTER: &[u8] = &[0x1B, 0x61, 0x01];
    /// ESC a 0 - left alignment
    pub const ALIGN_LEFT: &[u8] = &[0x1B, 0x61, 0x00];
    /// ESC E 1 - emphasis on
    pub const BOLD_ON: &[u8] = &[0x1B, 0x45, 0x01];
    /// ESC E 0 - emphasis off
    pub const BOLD_OFF: &[u8] = &[0x1B, 0x45, 0x00];
    /// GS V 66 - full cut after feeding n lines (n follows)
    pub const CUT_FEED: &[u8] = &[0x1D, 0x56, 0x42];
}

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    pub fn new(width: usize) -> Self {
        Self {
            buf: Vec::with_capacity(1024),
            width,
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.raw(commands::ALIGN_CENTER)
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.raw(commands::ALIGN_LEFT)
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.raw(commands::BOLD_ON)
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.raw(commands::BOLD_OFF)
    }

    // === Separators ===

    /// Print a line of `ch` repeated `len` times
    pub fn rule(&mut self, ch: char, len: usize) -> &mut Self {
        let rule: String = std::iter::repeat_n(ch, len).collect();
        self.line(&rule)
    }

    /// Print a full-width line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.rule('-', self.width)
    }

    // === Paper Control ===

    /// Full cut with feed: feeds n lines then cuts.
    /// Uses GS V 66 n, which lets the printer manage cutter-to-head distance.
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.raw(commands::CUT_FEED);
        self.buf.push(lines);
        self
    }

    // === Raw Commands ===

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    // === Build ===

    /// Build the final byte buffer
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosBuilder::new(32);
        b.center().bold().line("Title").bold_off().left().line("Body");

        let data = b.build();
        assert_eq!(
            data,
            b"\x1b\x61\x01\x1b\x45\x01Title\n\x1b\x45\x00\x1b\x61\x00Body\n".to_vec()
        );
    }

    #[test]
    fn test_separators() {
        let mut b = EscPosBuilder::new(10);
        b.sep_single().rule('=', 4);

        let data = b.build();
        let s = String::from_utf8_lossy(&data);
        assert_eq!(s, "----------\n====\n");
    }

    #[test]
    fn test_cut_feed_is_byte_exact() {
        let mut b = EscPosBuilder::default();
        b.cut_feed(0);
        assert_eq!(b.build(), vec![0x1D, 0x56, 0x42, 0x00]);
    }

    #[test]
    fn test_text_passes_through_unchanged() {
        let mut b = EscPosBuilder::default();
        b.text("Café ☕ \x1b\x61\x01");
        assert_eq!(b.build(), "Café ☕ \x1b\x61\x01".as_bytes().to_vec());
    }
}
