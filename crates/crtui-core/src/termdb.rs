#![forbid(unsafe_code)]

//! Terminal database boundary.
//!
//! The core needs a handful of capability templates and the current terminal
//! dimensions, both obtained from the hosting environment's terminal
//! description. [`TermDatabase`] is the seam: production code uses
//! [`TputDatabase`], which shells out to `tput`, while tests construct fake
//! databases and never touch a real terminal.
//!
//! Acquisition is a blocking call and may be slow or fail transiently; the
//! core performs no retries (callers needing resilience retry at a higher
//! layer).

use std::io;
use std::process::Command;

/// Mandatory capability names. Surface construction fails without them.
pub const MANDATORY_CAPS: [&str; 4] = ["clear", "cup", "rev", "sgr0"];

/// Optional capability names: save cursor, restore cursor, scroll region.
pub const OPTIONAL_CAPS: [&str; 3] = ["sc", "rc", "csr"];

/// Cached terminal dimensions.
///
/// Refreshed on demand, never live-pushed; callers must tolerate staleness
/// between refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Character columns, >= 1.
    pub columns: u16,
    /// Character lines, >= 1.
    pub lines: u16,
}

impl Dimensions {
    /// Create dimensions.
    #[must_use]
    pub const fn new(columns: u16, lines: u16) -> Self {
        Self { columns, lines }
    }
}

/// Access to the hosting environment's terminal description.
pub trait TermDatabase {
    /// Fetch the template bytes for a capability name.
    ///
    /// `Ok(None)` means the terminal has no such capability; `Err` means the
    /// database itself could not be consulted.
    fn capability(&self, name: &str) -> io::Result<Option<Vec<u8>>>;

    /// Query the current terminal dimensions.
    fn dimensions(&self) -> io::Result<Dimensions>;
}

impl<T: TermDatabase + ?Sized> TermDatabase for &T {
    fn capability(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).capability(name)
    }

    fn dimensions(&self) -> io::Result<Dimensions> {
        (**self).dimensions()
    }
}

/// Terminal database backed by the `tput` utility.
///
/// One process spawn per query, at surface construction and on explicit
/// dimension refreshes only. Capability output is taken verbatim (control
/// sequences are binary); dimension output is trimmed and parsed as decimal.
#[derive(Debug, Clone)]
pub struct TputDatabase {
    program: String,
}

impl TputDatabase {
    /// Use the `tput` found on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("tput")
    }

    /// Use a specific program (tests point this at a nonexistent binary to
    /// exercise the unavailable-database path).
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn query(&self, arg: &str) -> io::Result<Option<Vec<u8>>> {
        let output = Command::new(&self.program).arg(arg).output()?;
        if !output.status.success() {
            tracing::debug!(capability = arg, status = ?output.status, "tput query failed");
            return Ok(None);
        }
        Ok(Some(output.stdout))
    }

    fn numeric(&self, arg: &str) -> io::Result<u16> {
        let bytes = self.query(arg)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("tput {arg} unavailable"))
        })?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "non-UTF-8 tput output"))?;
        let value: u16 = text.trim().parse().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non-numeric tput {arg} output"),
            )
        })?;
        if value == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("tput {arg} reported zero"),
            ));
        }
        Ok(value)
    }
}

impl Default for TputDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl TermDatabase for TputDatabase {
    fn capability(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        self.query(name)
    }

    fn dimensions(&self) -> io::Result<Dimensions> {
        let columns = self.numeric("cols")?;
        let lines = self.numeric("lines")?;
        Ok(Dimensions::new(columns, lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_an_io_error() {
        let db = TputDatabase::with_program("crtui-definitely-not-a-real-binary");
        assert!(db.capability("clear").is_err());
        assert!(db.dimensions().is_err());
    }

    #[test]
    fn dimensions_construct() {
        let d = Dimensions::new(80, 24);
        assert_eq!(d.columns, 80);
        assert_eq!(d.lines, 24);
    }
}
