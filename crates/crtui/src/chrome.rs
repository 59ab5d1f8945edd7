#![forbid(unsafe_code)]

//! Screen chrome: cursor presets, scroll-region presets, and the
//! function-key label row.
//!
//! The screen model reserves the top line for status text and the bottom
//! line for eight function-key labels; everything between is the scrolling
//! interior. [`Screen`] is a thin borrow over a surface that encodes those
//! landmark positions so callers stop repeating `lines - 2` arithmetic.

use std::io::Write;

use crtui_core::Result;
use crtui_core::surface::TerminalSurface;
use crtui_core::termdb::TermDatabase;

/// Landmark cursor and scroll helpers over a borrowed surface.
#[derive(Debug)]
pub struct Screen<'a, D, W> {
    surface: &'a mut TerminalSurface<D, W>,
}

impl<'a, D: TermDatabase, W: Write> Screen<'a, D, W> {
    pub fn new(surface: &'a mut TerminalSurface<D, W>) -> Self {
        Self { surface }
    }

    /// Move the cursor to the top-left corner.
    pub fn cursor_to_top(&mut self) -> Result<()> {
        self.surface.move_cursor(0, 0)
    }

    /// Move the cursor to the start of the last interior line, just above
    /// the label row.
    pub fn cursor_to_bottom(&mut self) -> Result<()> {
        let line = self.surface.lines().saturating_sub(2);
        self.surface.move_cursor(line, 0)
    }

    /// Move the cursor to the start of the very last line.
    pub fn cursor_to_very_bottom(&mut self) -> Result<()> {
        let line = self.surface.lines().saturating_sub(1);
        self.surface.move_cursor(line, 0)
    }

    /// Restrict scrolling so the label row is never pushed off screen.
    /// No-op when the terminal cannot change its scroll region.
    pub fn scroll_interior_only(&mut self) -> Result<()> {
        let last = self.surface.lines().saturating_sub(2);
        self.surface.change_scroll_region(0, last)
    }

    /// Restore the terminal's default full-screen scrolling.
    pub fn scroll_full(&mut self) -> Result<()> {
        let last = self.surface.lines().saturating_sub(1);
        self.surface.change_scroll_region(0, last)
    }

    /// Draw the eight function-key labels across the bottom line, each at
    /// one eighth of the width, cursor position preserved.
    ///
    /// One composed burst: save, eight positioned labels, restore.
    pub fn draw_function_labels(&mut self, labels: &[&str; 8]) -> Result<()> {
        let line = self.surface.lines().saturating_sub(1);
        let columns = u32::from(self.surface.columns());

        let mut burst = Vec::new();
        if let Some(seq) = self.surface.save_cursor_sequence() {
            burst.extend_from_slice(seq);
        }
        for (i, label) in labels.iter().enumerate() {
            let col = (columns * i as u32 / 8) as u16;
            burst.extend_from_slice(&self.surface.move_cursor_sequence(line, col)?);
            burst.extend_from_slice(label.as_bytes());
        }
        if let Some(seq) = self.surface.restore_cursor_sequence() {
            burst.extend_from_slice(seq);
        }
        self.surface.write_raw(&burst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crtui_core::testing::StaticDatabase;

    fn surface() -> TerminalSurface<StaticDatabase, Vec<u8>> {
        TerminalSurface::new(StaticDatabase::ansi(), Vec::new()).unwrap()
    }

    #[test]
    fn cursor_presets_hit_landmark_lines() {
        // 80x24: interior bottom is line 22, label row is line 23.
        let mut s = surface();
        {
            let mut screen = Screen::new(&mut s);
            screen.cursor_to_top().unwrap();
            screen.cursor_to_bottom().unwrap();
            screen.cursor_to_very_bottom().unwrap();
        }
        let out = s.into_sink();
        assert_eq!(out, b"\x1b[1;1H\x1b[23;1H\x1b[24;1H".to_vec());
    }

    #[test]
    fn scroll_presets_cover_interior_and_full_screen() {
        let mut s = surface();
        {
            let mut screen = Screen::new(&mut s);
            screen.scroll_interior_only().unwrap();
            screen.scroll_full().unwrap();
        }
        assert_eq!(s.into_sink(), b"\x1b[1;23r\x1b[1;24r".to_vec());
    }

    #[test]
    fn labels_land_at_eighths_of_the_width() {
        let mut s = surface();
        Screen::new(&mut s)
            .draw_function_labels(&["Fil", "Edi", "Cop", "Del", "Run", "Set", "Hlp", "Men"])
            .unwrap();
        let out = String::from_utf8(s.into_sink()).unwrap();

        assert!(out.starts_with("\x1b7"));
        assert!(out.ends_with("\x1b8"));
        // 80 columns: label n sits at column 10n (1-based in the sequence).
        assert!(out.contains("\x1b[24;1HFil"));
        assert!(out.contains("\x1b[24;11HEdi"));
        assert!(out.contains("\x1b[24;71HMen"));
    }

    #[test]
    fn labels_without_save_restore_still_draw() {
        let db = StaticDatabase::ansi().without("sc").without("rc");
        let mut s = TerminalSurface::new(db, Vec::new()).unwrap();
        Screen::new(&mut s)
            .draw_function_labels(&["a", "b", "c", "d", "e", "f", "g", "h"])
            .unwrap();
        let out = String::from_utf8(s.into_sink()).unwrap();
        assert!(out.starts_with("\x1b[24;1Ha"));
    }
}
