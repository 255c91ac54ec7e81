//! Terminal: flushes a rendered [`Frame`] to a real terminal.
//!
//! Frames are encoded into a byte buffer with crossterm commands and written in
//! one go. A frame identical to the previous one is not redrawn.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::view::{Frame, Glyph};

pub struct Terminal {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, frame: Frame) -> Result<()> {
        if self.last.as_ref() == Some(&frame) {
            return Ok(());
        }
        self.buf.clear();
        encode_frame_into(&frame, &mut self.buf)?;
        self.flush_buf()?;
        self.last = Some(frame);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_frame_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<(u8, bool)> = None;
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let glyph = frame.get(x, y).unwrap_or(Glyph::BLANK);
            let style = (glyph.color_id, glyph.dim);
            if current != Some(style) {
                out.queue(SetAttribute(Attribute::Reset))?;
                out.queue(SetForegroundColor(piece_color(glyph.color_id)))?;
                if glyph.dim {
                    out.queue(SetAttribute(Attribute::Dim))?;
                }
                current = Some(style);
            }
            out.queue(Print(glyph.ch))?;
        }
        if y + 1 < frame.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Terminal color for a shape color id (I, O, T, S, Z, J, L).
fn piece_color(color_id: u8) -> Color {
    match color_id {
        1 => Color::Cyan,
        2 => Color::Yellow,
        3 => Color::Magenta,
        4 => Color::Green,
        5 => Color::Red,
        6 => Color::Blue,
        7 => Color::DarkYellow,
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_contains_text() {
        let mut frame = Frame::new(8, 2);
        frame.put_str(0, 0, "Score", 0);
        frame.put_str(0, 1, "[]", 1);

        let mut out = Vec::new();
        encode_frame_into(&frame, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Score"));
        assert!(text.contains("[]"));
    }

    #[test]
    fn test_piece_colors_are_distinct() {
        let colors: Vec<Color> = (1..=7).map(piece_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(piece_color(0), Color::Reset);
    }
}
