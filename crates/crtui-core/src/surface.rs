#![forbid(unsafe_code)]

//! Terminal surface: cached capabilities plus a shared output sink.
//!
//! A [`TerminalSurface`] acquires its capability templates once at
//! construction and writes every operation as a single byte burst (one
//! `write_all`, one `flush`). With a [`crate::sink::SharedSink`] as the sink,
//! a burst is exactly one lock acquisition, so a concurrent writer such as a
//! periodic status task interleaves only at burst boundaries.
//!
//! The surface provides no internal synchronization beyond that: callers
//! running multiple writers must serialize them through the shared sink, and
//! interleaved output is the expected failure mode if they do not.
//!
//! Cursor coordinates are written as given. The surface does not clamp them
//! to the cached dimensions; staying in range is the caller's contract.

use std::io::{self, Write};

use bitflags::bitflags;

use crate::capability::CapabilityTemplate;
use crate::error::{Error, Result};
use crate::termdb::{Dimensions, TermDatabase};

bitflags! {
    /// Optional capabilities a surface managed to acquire.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OptionalCaps: u8 {
        /// `sc` — save cursor position.
        const SAVE_CURSOR    = 0b001;
        /// `rc` — restore cursor position.
        const RESTORE_CURSOR = 0b010;
        /// `csr` — change scroll region.
        const SCROLL_REGION  = 0b100;
    }
}

/// Cached capability strings and terminal dimensions over an output sink.
#[derive(Debug)]
pub struct TerminalSurface<D, W> {
    db: D,
    sink: W,
    dims: Dimensions,
    clear: CapabilityTemplate,
    cursor_move: CapabilityTemplate,
    reverse: CapabilityTemplate,
    reset: CapabilityTemplate,
    save_cursor: Option<CapabilityTemplate>,
    restore_cursor: Option<CapabilityTemplate>,
    scroll_region: Option<CapabilityTemplate>,
}

impl<D: TermDatabase, W: Write> TerminalSurface<D, W> {
    /// Acquire capabilities and dimensions from `db`, writing through `sink`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCapability`] if any of `clear`, `cup`, `rev`, `sgr0`
    /// is unobtainable, or [`Error::Io`] if the database cannot be consulted
    /// at all. Absent optional capabilities (`sc`, `rc`, `csr`) are not an
    /// error; the corresponding operations become no-ops.
    pub fn new(db: D, sink: W) -> Result<Self> {
        let clear = Self::mandatory(&db, "clear")?;
        let cursor_move = Self::mandatory(&db, "cup")?;
        let reverse = Self::mandatory(&db, "rev")?;
        let reset = Self::mandatory(&db, "sgr0")?;
        let save_cursor = Self::optional(&db, "sc")?;
        let restore_cursor = Self::optional(&db, "rc")?;
        let scroll_region = Self::optional(&db, "csr")?;
        let dims = db.dimensions()?;

        let surface = Self {
            db,
            sink,
            dims,
            clear,
            cursor_move,
            reverse,
            reset,
            save_cursor,
            restore_cursor,
            scroll_region,
        };
        tracing::info!(
            columns = surface.dims.columns,
            lines = surface.dims.lines,
            optional = ?surface.supports(),
            "terminal surface ready"
        );
        Ok(surface)
    }

    fn mandatory(db: &D, name: &'static str) -> Result<CapabilityTemplate> {
        match db.capability(name)? {
            Some(bytes) if !bytes.is_empty() => Ok(CapabilityTemplate::new(bytes)),
            _ => Err(Error::MissingCapability(name)),
        }
    }

    fn optional(db: &D, name: &'static str) -> Result<Option<CapabilityTemplate>> {
        let template = db
            .capability(name)?
            .filter(|bytes| !bytes.is_empty())
            .map(CapabilityTemplate::new);
        if template.is_none() {
            tracing::debug!(capability = name, "optional capability absent");
        }
        Ok(template)
    }

    /// Cached column count.
    #[must_use]
    pub fn columns(&self) -> u16 {
        self.dims.columns
    }

    /// Cached line count.
    #[must_use]
    pub fn lines(&self) -> u16 {
        self.dims.lines
    }

    /// Cached dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Which optional capabilities this surface acquired.
    #[must_use]
    pub fn supports(&self) -> OptionalCaps {
        let mut caps = OptionalCaps::empty();
        if self.save_cursor.is_some() {
            caps |= OptionalCaps::SAVE_CURSOR;
        }
        if self.restore_cursor.is_some() {
            caps |= OptionalCaps::RESTORE_CURSOR;
        }
        if self.scroll_region.is_some() {
            caps |= OptionalCaps::SCROLL_REGION;
        }
        caps
    }

    /// Re-query the terminal dimensions.
    ///
    /// Returns `false` if the query fails or parses as non-numeric, in which
    /// case the previously cached dimensions are retained in full
    /// (both-or-neither, never a partial update).
    pub fn refresh_dimensions(&mut self) -> bool {
        match self.db.dimensions() {
            Ok(dims) => {
                self.dims = dims;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "dimension refresh failed, keeping cached values");
                false
            }
        }
    }

    /// Clear the screen.
    pub fn clear(&mut self) -> Result<()> {
        Self::burst(&mut self.sink, self.clear.as_bytes())
    }

    /// Enter reverse video. Subsequent text is written with inverted colors
    /// until [`Self::reset_attributes`].
    pub fn reverse_on(&mut self) -> Result<()> {
        Self::burst(&mut self.sink, self.reverse.as_bytes())
    }

    /// Reset all attributes to the terminal default.
    pub fn reset_attributes(&mut self) -> Result<()> {
        Self::burst(&mut self.sink, self.reset.as_bytes())
    }

    /// Save the cursor position. No-op when the terminal lacks `sc`.
    pub fn save_cursor(&mut self) -> Result<()> {
        match &self.save_cursor {
            Some(t) => Self::burst(&mut self.sink, t.as_bytes()),
            None => Ok(()),
        }
    }

    /// Restore the cursor position. No-op when the terminal lacks `rc`.
    pub fn restore_cursor(&mut self) -> Result<()> {
        match &self.restore_cursor {
            Some(t) => Self::burst(&mut self.sink, t.as_bytes()),
            None => Ok(()),
        }
    }

    /// Move the cursor to `(line, col)`, both zero-based.
    pub fn move_cursor(&mut self, line: u16, col: u16) -> Result<()> {
        let bytes = self.cursor_move.interpret(i64::from(line), i64::from(col))?;
        Self::burst(&mut self.sink, &bytes)
    }

    /// Restrict scrolling to `first_line..=last_line`. No-op when the
    /// terminal lacks `csr`.
    pub fn change_scroll_region(&mut self, first_line: u16, last_line: u16) -> Result<()> {
        match &self.scroll_region {
            Some(t) => {
                let bytes = t.interpret(i64::from(first_line), i64::from(last_line))?;
                Self::burst(&mut self.sink, &bytes)
            }
            None => Ok(()),
        }
    }

    /// Write a pre-composed byte buffer as one burst.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        Self::burst(&mut self.sink, bytes)
    }

    /// Write text at the current cursor position as one burst.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        Self::burst(&mut self.sink, text.as_bytes())
    }

    /// The reverse-video sequence, for inline composition.
    #[must_use]
    pub fn reverse_sequence(&self) -> &[u8] {
        self.reverse.as_bytes()
    }

    /// The reset-attributes sequence, for inline composition.
    #[must_use]
    pub fn reset_sequence(&self) -> &[u8] {
        self.reset.as_bytes()
    }

    /// The save-cursor sequence, if the terminal has one.
    #[must_use]
    pub fn save_cursor_sequence(&self) -> Option<&[u8]> {
        self.save_cursor.as_ref().map(CapabilityTemplate::as_bytes)
    }

    /// The restore-cursor sequence, if the terminal has one.
    #[must_use]
    pub fn restore_cursor_sequence(&self) -> Option<&[u8]> {
        self.restore_cursor
            .as_ref()
            .map(CapabilityTemplate::as_bytes)
    }

    /// The cursor-move sequence for `(line, col)`, for inline composition.
    pub fn move_cursor_sequence(&self, line: u16, col: u16) -> Result<Vec<u8>> {
        self.cursor_move.interpret(i64::from(line), i64::from(col))
    }

    /// Mutable access to the underlying sink.
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume the surface, returning the sink.
    #[must_use]
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn burst(sink: &mut W, bytes: &[u8]) -> Result<()> {
        sink.write_all(bytes)?;
        sink.flush()?;
        Ok(())
    }
}
