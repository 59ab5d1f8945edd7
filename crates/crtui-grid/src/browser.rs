#![forbid(unsafe_code)]

//! Paginated grid browser.
//!
//! Lays an item list out as a wrapped multi-column table inside the
//! terminal interior (everything between the top status line and the bottom
//! label line) and tracks a single selected index. Layout is recomputed
//! from scratch on every redraw; the only thing remembered between frames
//! is the selection and the last `items_per_line`, which row navigation
//! needs.
//!
//! Each redraw is composed into one byte buffer, bracketed by save/restore
//! cursor so the caller's cursor position outside the grid survives, and
//! written as a single burst.

use std::io::Write;

use crtui_core::Result;
use crtui_core::surface::TerminalSurface;
use crtui_core::termdb::TermDatabase;

use crate::codepoint;

/// Placeholder text for slots past the end of the item list.
const FILLER: &str = "-.-";

/// Frame-local layout parameters, derived from the dimensions, the item
/// list, and the selection. Never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    column_width: usize,
    items_per_line: usize,
    items_per_page: usize,
    page: usize,
}

/// Pick the column width and page shape for the current frame.
///
/// The widest item (plus one spacing cell) caps at a quarter of the
/// terminal width; narrower item sets search divisor candidates for the
/// smallest column count that still fits the widest item. Every divisor is
/// floored to one so tiny terminals and empty lists never divide by zero.
fn compute_layout(columns: usize, interior: usize, items: &[String], selected: usize) -> Layout {
    let longest = items
        .iter()
        .map(|item| codepoint::len(item))
        .max()
        .unwrap_or(0)
        + 1;

    let column_width = if longest > columns / 4 {
        (columns / 4).max(1)
    } else {
        let mut width = (columns / 4).max(1);
        for divisor in 5..16 {
            width = (columns / (divisor - 1)).max(1);
            if longest > columns / divisor {
                break;
            }
        }
        width
    };

    let items_per_line = (columns / column_width).max(1);
    let items_per_page = (items_per_line * interior).max(1);
    Layout {
        column_width,
        items_per_line,
        items_per_page,
        page: selected / items_per_page,
    }
}

/// A navigable grid over an externally owned item list.
///
/// The browser only reads the list; items may change between browser
/// sessions but not concurrently with a render.
#[derive(Debug)]
pub struct GridBrowser<'a> {
    items: &'a [String],
    selected: usize,
    items_per_line: usize,
}

impl<'a> GridBrowser<'a> {
    /// Create a browser over `items`, restrict scrolling to the interior
    /// (when the terminal can), and draw the first page.
    pub fn new<D: TermDatabase, W: Write>(
        items: &'a [String],
        surface: &mut TerminalSurface<D, W>,
    ) -> Result<Self> {
        let mut browser = Self {
            items,
            selected: 0,
            items_per_line: 1,
        };
        let last_interior = surface.lines().saturating_sub(2);
        surface.change_scroll_region(1, last_interior)?;
        browser.redraw(surface)?;
        Ok(browser)
    }

    /// The currently selected index.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Items per grid row in the most recently drawn frame.
    #[must_use]
    pub fn items_per_line(&self) -> usize {
        self.items_per_line
    }

    /// Move selection one item right, wrapping past the end to the start.
    pub fn pressed_right<D: TermDatabase, W: Write>(
        &mut self,
        surface: &mut TerminalSurface<D, W>,
    ) -> Result<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        self.selected += 1;
        if self.selected >= self.items.len() {
            self.selected = 0;
        }
        self.redraw(surface)
    }

    /// Move selection one item left, wrapping past the start to the end.
    pub fn pressed_left<D: TermDatabase, W: Write>(
        &mut self,
        surface: &mut TerminalSurface<D, W>,
    ) -> Result<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        self.selected = match self.selected.checked_sub(1) {
            Some(previous) => previous,
            None => self.items.len() - 1,
        };
        self.redraw(surface)
    }

    /// Move selection one row down. Moving past the last row is rejected
    /// and the selection stays put (no wrap, unlike left/right).
    pub fn pressed_down<D: TermDatabase, W: Write>(
        &mut self,
        surface: &mut TerminalSurface<D, W>,
    ) -> Result<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        let candidate = self.selected + self.items_per_line;
        if candidate < self.items.len() {
            self.selected = candidate;
        }
        self.redraw(surface)
    }

    /// Move selection one row up. Moving past the first row is rejected
    /// and the selection stays put (no wrap, unlike left/right).
    pub fn pressed_up<D: TermDatabase, W: Write>(
        &mut self,
        surface: &mut TerminalSurface<D, W>,
    ) -> Result<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        if let Some(candidate) = self.selected.checked_sub(self.items_per_line) {
            self.selected = candidate;
        }
        self.redraw(surface)
    }

    /// Set the selection directly.
    ///
    /// No bounds checking is performed; passing a valid index is the
    /// caller's contract.
    pub fn set_index<D: TermDatabase, W: Write>(
        &mut self,
        index: usize,
        surface: &mut TerminalSurface<D, W>,
    ) -> Result<()> {
        self.selected = index;
        self.redraw(surface)
    }

    /// Recompute the layout and draw the page containing the selection.
    pub fn redraw<D: TermDatabase, W: Write>(
        &mut self,
        surface: &mut TerminalSurface<D, W>,
    ) -> Result<()> {
        let columns = usize::from(surface.columns());
        let interior = usize::from(surface.lines().saturating_sub(2));
        let layout = compute_layout(columns, interior, self.items, self.selected);
        self.items_per_line = layout.items_per_line;
        tracing::trace!(
            page = layout.page,
            column_width = layout.column_width,
            items_per_line = layout.items_per_line,
            "grid redraw"
        );

        let mut frame = Vec::new();
        if let Some(seq) = surface.save_cursor_sequence() {
            frame.extend_from_slice(seq);
        }

        let first_slot = layout.page * layout.items_per_page;
        let rows = layout.items_per_page.div_ceil(layout.items_per_line);
        let mut slot = first_slot;
        for row in 0..rows {
            frame.extend_from_slice(&surface.move_cursor_sequence(1 + row as u16, 0)?);
            for _ in 0..layout.items_per_line {
                if slot >= first_slot + layout.items_per_page {
                    break;
                }
                self.render_cell(&mut frame, surface, slot, layout.column_width);
                slot += 1;
            }
        }

        if let Some(seq) = surface.restore_cursor_sequence() {
            frame.extend_from_slice(seq);
        }
        surface.write_raw(&frame)
    }

    fn render_cell<D, W>(
        &self,
        frame: &mut Vec<u8>,
        surface: &TerminalSurface<D, W>,
        slot: usize,
        width: usize,
    ) where
        D: TermDatabase,
        W: Write,
    {
        let text = match self.items.get(slot) {
            Some(item) => format!(" {item}"),
            None => format!(" {FILLER}"),
        };
        let text = codepoint::truncate_middle(&text, width);
        let padding = width.saturating_sub(codepoint::len(&text));

        let selected = slot == self.selected;
        if selected {
            frame.extend_from_slice(surface.reverse_sequence());
        }
        frame.extend_from_slice(text.as_bytes());
        frame.extend(std::iter::repeat_n(b' ', padding));
        if selected {
            frame.extend_from_slice(surface.reset_sequence());
        }
    }
}
