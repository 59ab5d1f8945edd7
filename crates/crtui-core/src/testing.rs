#![forbid(unsafe_code)]

//! Fake terminal databases for tests.
//!
//! Enabled for downstream crates via the `test-helpers` feature. Nothing in
//! here touches a real terminal, so tests can construct as many independent
//! surfaces as they like.

use std::cell::Cell;
use std::collections::HashMap;
use std::io;

use crate::termdb::{Dimensions, TermDatabase};

/// An in-memory terminal database with scriptable dimension behavior.
#[derive(Debug, Clone)]
pub struct StaticDatabase {
    caps: HashMap<&'static str, Vec<u8>>,
    dims: Dimensions,
    refreshed: Option<Dimensions>,
    fail_after: Option<usize>,
    calls: Cell<usize>,
}

impl StaticDatabase {
    /// A plain ANSI/VT100-flavored capability set, 80x24.
    #[must_use]
    pub fn ansi() -> Self {
        let mut caps: HashMap<&'static str, Vec<u8>> = HashMap::new();
        caps.insert("clear", b"\x1b[H\x1b[2J".to_vec());
        caps.insert("cup", b"\x1b[%i%p1%d;%p2%dH".to_vec());
        caps.insert("rev", b"\x1b[7m".to_vec());
        caps.insert("sgr0", b"\x1b[0m".to_vec());
        caps.insert("sc", b"\x1b7".to_vec());
        caps.insert("rc", b"\x1b8".to_vec());
        caps.insert("csr", b"\x1b[%i%p1%d;%p2%dr".to_vec());
        Self {
            caps,
            dims: Dimensions::new(80, 24),
            refreshed: None,
            fail_after: None,
            calls: Cell::new(0),
        }
    }

    /// Remove a capability, as if the terminal description lacked it.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.caps.remove(name);
        self
    }

    /// Replace or add a capability template.
    #[must_use]
    pub fn with_capability(mut self, name: &'static str, bytes: impl Into<Vec<u8>>) -> Self {
        self.caps.insert(name, bytes.into());
        self
    }

    /// Set the dimensions reported by the first query.
    #[must_use]
    pub fn with_dimensions(mut self, dims: Dimensions) -> Self {
        self.dims = dims;
        self
    }

    /// Set the dimensions reported by every query after the first, as if
    /// the terminal had been resized in between.
    #[must_use]
    pub fn refreshed_dimensions(mut self, dims: Dimensions) -> Self {
        self.refreshed = Some(dims);
        self
    }

    /// Make dimension queries fail once `calls` of them have succeeded.
    #[must_use]
    pub fn dimensions_fail_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }
}

impl TermDatabase for StaticDatabase {
    fn capability(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.caps.get(name).cloned())
    }

    fn dimensions(&self) -> io::Result<Dimensions> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if let Some(limit) = self.fail_after
            && call >= limit
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "scripted dimension failure",
            ));
        }
        if call > 0
            && let Some(dims) = self.refreshed
        {
            return Ok(dims);
        }
        Ok(self.dims)
    }
}
