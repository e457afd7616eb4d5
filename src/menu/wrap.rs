//! Width-bounded text output for menu rendering.

use std::fmt::{self, Write};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Where wrapped text may go on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Columns of leading space on every continuation line.
    pub indent: usize,
    /// Widest a line may get, in terminal columns.
    pub max_width: usize,
}

/// Output target for rendered menus.
///
/// Implementations track the current column so that wrapped text continues
/// from wherever the previous write left off.
pub trait WrapSink {
    /// Writes `text` as-is.
    fn write_str(&mut self, text: &str) -> fmt::Result;

    /// Writes `text` broken into lines no wider than `layout.max_width`.
    fn write_wrapped(&mut self, text: &str, layout: Layout) -> fmt::Result;

    /// Terminates the current line.
    fn end_line(&mut self) -> fmt::Result;
}

/// [`WrapSink`] over any [`fmt::Write`], breaking on spaces.
#[derive(Debug)]
pub struct TextWrapper<W> {
    out: W,
    column: usize,
}

impl<W: Write> TextWrapper<W> {
    pub fn new(out: W) -> Self {
        Self { out, column: 0 }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn break_line(&mut self, indent: usize) -> fmt::Result {
        self.out.write_char('\n')?;
        for _ in 0..indent {
            self.out.write_char(' ')?;
        }
        self.column = indent;
        Ok(())
    }

    // Hard-splits words that do not fit on a line of their own.
    fn write_word(&mut self, word: &str, indent: usize, max_width: usize) -> fmt::Result {
        for ch in word.chars() {
            let w = ch.width().unwrap_or(0);
            if self.column + w > max_width && self.column > indent {
                self.break_line(indent)?;
            }
            self.out.write_char(ch)?;
            self.column += w;
        }
        Ok(())
    }
}

impl TextWrapper<String> {
    /// Convenience for rendering into a fresh string.
    pub fn string() -> Self {
        Self::new(String::new())
    }
}

impl<W: Write> WrapSink for TextWrapper<W> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        match text.rfind('\n') {
            Some(pos) => self.column = text[pos + 1..].width(),
            None => self.column += text.width(),
        }
        self.out.write_str(text)
    }

    fn write_wrapped(&mut self, text: &str, layout: Layout) -> fmt::Result {
        let max_width = layout.max_width.max(1);
        let indent = layout.indent.min(max_width - 1);

        for (n, segment) in text.split('\n').enumerate() {
            if n > 0 {
                self.break_line(indent)?;
            }

            let mut first = true;
            for word in segment.split(' ').filter(|w| !w.is_empty()) {
                let w = word.width();
                if first {
                    if self.column + w > max_width && self.column > indent && w <= max_width - indent
                    {
                        self.break_line(indent)?;
                    }
                } else if self.column + 1 + w <= max_width {
                    self.out.write_char(' ')?;
                    self.column += 1;
                } else {
                    self.break_line(indent)?;
                }
                self.write_word(word, indent, max_width)?;
                first = false;
            }
        }
        Ok(())
    }

    fn end_line(&mut self) -> fmt::Result {
        self.column = 0;
        self.out.write_char('\n')
    }
}
