#![forbid(unsafe_code)]

//! Shell controller: one surface, one key resolver, one item grid.
//!
//! [`Shell::run`] is the top-level input loop. It clears the screen, draws
//! the item grid, then reads bytes one at a time: escape starts the key
//! resolver and arrow keys drive the grid directly, while everything the
//! shell does not consume itself (function keys, selection, plain bytes,
//! unrecognized sequences) is handed to the caller as a [`ShellEvent`].
//! The handler returns `false` to stop the loop; end of input stops it too.
//!
//! All state is owned here. There are no globals and no ambient terminal
//! handles, so several shells over different surfaces can coexist in one
//! process.

use std::io::Write;

use crtui_core::Result;
use crtui_core::input::{ByteSource, ESC, Key, KeyResolver, Resolution};
use crtui_core::surface::TerminalSurface;
use crtui_core::termdb::TermDatabase;
use crtui_grid::GridBrowser;

/// What the shell hands to the caller's event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// Enter was pressed on the item at this index.
    Selection(usize),
    /// A function key, 1 through 8.
    Function(u8),
    /// A plain byte outside any escape sequence.
    Byte(u8),
    /// An escape sequence no candidate matched.
    Unrecognized,
}

/// Owns the terminal surface, the key resolver, and the item list.
#[derive(Debug)]
pub struct Shell<D, W> {
    surface: TerminalSurface<D, W>,
    resolver: KeyResolver,
    items: Vec<String>,
}

impl<D: TermDatabase, W: Write> Shell<D, W> {
    /// Build a shell over `surface` with the stock key resolver.
    pub fn new(surface: TerminalSurface<D, W>, items: Vec<String>) -> Self {
        Self {
            surface,
            resolver: KeyResolver::default(),
            items,
        }
    }

    /// Replace the stock resolver, e.g. with extra candidate banks.
    #[must_use]
    pub fn with_resolver(mut self, resolver: KeyResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The browsed items.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Borrow the surface, e.g. for chrome drawing between runs.
    pub fn surface_mut(&mut self) -> &mut TerminalSurface<D, W> {
        &mut self.surface
    }

    /// Tear the shell down, returning the surface.
    #[must_use]
    pub fn into_surface(self) -> TerminalSurface<D, W> {
        self.surface
    }

    /// Clear, draw the grid, and pump `source` until end of input or the
    /// handler returns `false`.
    pub fn run<S, F>(&mut self, source: &mut S, mut handler: F) -> Result<()>
    where
        S: ByteSource + ?Sized,
        F: FnMut(ShellEvent) -> bool,
    {
        self.surface.clear()?;
        let mut browser = GridBrowser::new(&self.items, &mut self.surface)?;

        loop {
            let Some(byte) = source.read_byte()? else {
                tracing::debug!("input source exhausted, leaving shell loop");
                break;
            };

            if byte == ESC {
                match self.resolver.resolve(source)? {
                    Resolution::Key(Key::Right) => browser.pressed_right(&mut self.surface)?,
                    Resolution::Key(Key::Left) => browser.pressed_left(&mut self.surface)?,
                    Resolution::Key(Key::Up) => browser.pressed_up(&mut self.surface)?,
                    Resolution::Key(Key::Down) => browser.pressed_down(&mut self.surface)?,
                    Resolution::Key(Key::F(n)) => {
                        if !handler(ShellEvent::Function(n)) {
                            break;
                        }
                    }
                    Resolution::NoMatch => {
                        if !handler(ShellEvent::Unrecognized) {
                            break;
                        }
                    }
                }
            } else if byte == b'\r' || byte == b'\n' {
                if !self.items.is_empty()
                    && !handler(ShellEvent::Selection(browser.selected_index()))
                {
                    break;
                }
            } else if !handler(ShellEvent::Byte(byte)) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crtui_core::termdb::Dimensions;
    use crtui_core::testing::StaticDatabase;
    use std::io::Cursor;

    fn shell(names: &[&str]) -> Shell<StaticDatabase, Vec<u8>> {
        let db = StaticDatabase::ansi().with_dimensions(Dimensions::new(40, 6));
        let surface = TerminalSurface::new(db, Vec::new()).unwrap();
        let items = names.iter().map(|s| (*s).to_string()).collect();
        Shell::new(surface, items)
    }

    fn pump(shell: &mut Shell<StaticDatabase, Vec<u8>>, script: &[u8]) -> Vec<ShellEvent> {
        let mut events = Vec::new();
        let mut source = Cursor::new(script.to_vec());
        shell
            .run(&mut source, |event| {
                events.push(event);
                true
            })
            .unwrap();
        events
    }

    #[test]
    fn arrow_keys_move_the_selection_silently() {
        // Two rights then enter: selection lands on the third item.
        let mut sh = shell(&["alpha", "beta", "gamma"]);
        let events = pump(&mut sh, b"\x1b[C\x1b[C\r");
        assert_eq!(events, vec![ShellEvent::Selection(2)]);
    }

    #[test]
    fn left_wrap_reaches_the_last_item() {
        let mut sh = shell(&["alpha", "beta", "gamma"]);
        let events = pump(&mut sh, b"\x1b[D\n");
        assert_eq!(events, vec![ShellEvent::Selection(2)]);
    }

    #[test]
    fn function_keys_reach_the_handler() {
        let mut sh = shell(&["alpha"]);
        assert_eq!(
            pump(&mut sh, b"\x1bOP\x1b[15~"),
            vec![ShellEvent::Function(1), ShellEvent::Function(5)]
        );
    }

    #[test]
    fn plain_bytes_and_unknown_sequences_reach_the_handler() {
        let mut sh = shell(&["alpha"]);
        assert_eq!(
            pump(&mut sh, b"x\x1bZ"),
            vec![ShellEvent::Byte(b'x'), ShellEvent::Unrecognized]
        );
    }

    #[test]
    fn enter_on_an_empty_list_emits_nothing() {
        let mut sh = shell(&[]);
        assert_eq!(pump(&mut sh, b"\r\n"), vec![]);
    }

    #[test]
    fn handler_false_stops_the_loop() {
        let mut sh = shell(&["alpha"]);
        let mut seen = 0;
        let mut source = Cursor::new(b"abc".to_vec());
        sh.run(&mut source, |_| {
            seen += 1;
            false
        })
        .unwrap();
        assert_eq!(seen, 1);
    }

    #[test]
    fn end_of_input_ends_the_run() {
        let mut sh = shell(&["alpha"]);
        assert_eq!(pump(&mut sh, b""), vec![]);
        // The grid was still drawn once.
        let out = sh.into_surface().into_sink();
        assert!(!out.is_empty());
    }
}
