#![forbid(unsafe_code)]

//! crtui public facade crate.
//!
//! Re-exports the common types from the internal crates and adds the two
//! pieces that tie them together: screen [`chrome`] and the [`shell`]
//! controller. Most applications only need the [`prelude`].

pub mod chrome;
pub mod shell;

// --- Core re-exports -------------------------------------------------------

pub use crtui_core::capability::CapabilityTemplate;
pub use crtui_core::error::{Error, Result};
pub use crtui_core::input::{ByteSource, CandidateTable, Key, KeyResolver, Resolution};
pub use crtui_core::sink::SharedSink;
pub use crtui_core::surface::{OptionalCaps, TerminalSurface};
pub use crtui_core::termdb::{Dimensions, TermDatabase, TputDatabase};

#[cfg(not(target_arch = "wasm32"))]
pub use crtui_core::session::RawModeSession;

// --- Grid re-exports -------------------------------------------------------

pub use crtui_grid::GridBrowser;
pub use crtui_grid::codepoint;

// --- Facade types ----------------------------------------------------------

pub use chrome::Screen;
pub use shell::{Shell, ShellEvent};

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Dimensions, Error, GridBrowser, Key, KeyResolver, Resolution, Result, Screen, Shell,
        ShellEvent, SharedSink, TermDatabase, TerminalSurface, TputDatabase,
    };

    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::RawModeSession;
}
