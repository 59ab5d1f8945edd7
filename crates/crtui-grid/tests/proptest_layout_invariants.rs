//! Property-based invariant tests for grid layout and navigation.
//!
//! 1. Layout and rendering never panic, whatever the terminal dimensions
//!    or item list (no division by zero on empty lists or tiny screens).
//! 2. Middle truncation never exceeds the requested width.
//! 3. The selection always stays inside the item list.
//! 4. A full cycle of left presses returns the selection to zero.

use crtui_core::surface::TerminalSurface;
use crtui_core::termdb::Dimensions;
use crtui_core::testing::StaticDatabase;
use crtui_grid::GridBrowser;
use crtui_grid::codepoint;
use proptest::prelude::*;

fn surface(columns: u16, lines: u16) -> TerminalSurface<StaticDatabase, Vec<u8>> {
    let db = StaticDatabase::ansi().with_dimensions(Dimensions::new(columns, lines));
    TerminalSurface::new(db, Vec::new()).unwrap()
}

proptest! {
    #[test]
    fn rendering_never_panics(
        columns in 1u16..200,
        lines in 1u16..60,
        names in proptest::collection::vec("[a-z0-9._-]{0,24}", 0..40),
    ) {
        let mut s = surface(columns, lines);
        let mut browser = GridBrowser::new(&names, &mut s).unwrap();
        browser.pressed_right(&mut s).unwrap();
        browser.pressed_down(&mut s).unwrap();
        browser.pressed_up(&mut s).unwrap();
        browser.pressed_left(&mut s).unwrap();
    }
}

proptest! {
    #[test]
    fn truncation_respects_width(s in ".{0,40}", width in 0usize..32) {
        let out = codepoint::truncate_middle(&s, width);
        if codepoint::len(&s) <= width {
            prop_assert_eq!(out.as_ref(), s.as_str());
        } else {
            prop_assert!(codepoint::len(&out) <= width);
        }
    }
}

proptest! {
    #[test]
    fn selection_stays_in_bounds(
        names in proptest::collection::vec("[a-z]{1,8}", 1..30),
        moves in proptest::collection::vec(0u8..4, 0..64),
    ) {
        let mut s = surface(64, 12);
        let mut browser = GridBrowser::new(&names, &mut s).unwrap();
        for m in moves {
            match m {
                0 => browser.pressed_left(&mut s).unwrap(),
                1 => browser.pressed_right(&mut s).unwrap(),
                2 => browser.pressed_up(&mut s).unwrap(),
                _ => browser.pressed_down(&mut s).unwrap(),
            }
            prop_assert!(browser.selected_index() < names.len());
        }
    }
}

proptest! {
    #[test]
    fn left_cycle_returns_to_origin(names in proptest::collection::vec("[a-z]{1,8}", 1..20)) {
        let mut s = surface(64, 12);
        let mut browser = GridBrowser::new(&names, &mut s).unwrap();
        for _ in 0..names.len() {
            browser.pressed_left(&mut s).unwrap();
        }
        prop_assert_eq!(browser.selected_index(), 0);
    }
}
