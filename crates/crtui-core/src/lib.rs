#![forbid(unsafe_code)]

//! Core: capability templates, terminal surface, key resolution, and
//! session lifecycle.

pub mod capability;
pub mod error;
pub mod input;
pub mod sink;
pub mod surface;
pub mod termdb;

#[cfg(not(target_arch = "wasm32"))]
pub mod session;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use error::{Error, Result};
