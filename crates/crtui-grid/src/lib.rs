#![forbid(unsafe_code)]

//! Paginated grid browser over an item list.

pub mod browser;
pub mod codepoint;

pub use browser::GridBrowser;
