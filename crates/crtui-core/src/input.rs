#![forbid(unsafe_code)]

//! Escape-sequence key resolution.
//!
//! Different terminal emulators emit different byte sequences for the same
//! physical key, so a single key identifier maps to several candidate
//! encodings. After the caller observes a leading escape byte, the resolver
//! reads one byte at a time and disambiguates online against the candidate
//! table. Each step has three possible outcomes:
//!
//! - the buffer equals a candidate exactly: that key, immediately;
//! - the buffer is a prefix of no candidate: [`Resolution::NoMatch`];
//! - otherwise the prefix is still ambiguous (e.g. `ESC [ 1` could continue
//!   into several function keys): read another byte.
//!
//! The direction of the prefix test matters: the accumulating buffer must be
//! a prefix of a candidate, never the reverse. The table is close to
//! prefix-free per key family, but the algorithm does not assume it.
//!
//! The single byte read is the only point where the core suspends. It blocks
//! until a byte arrives or the source reports end of input, which resolves
//! as `NoMatch`.

use std::io::{self, Read};

/// A logical key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Function key (F1-F8 in the default table).
    F(u8),
}

/// Outcome of resolving one escape sequence.
///
/// `NoMatch` is deliberately distinct from every key identifier; callers
/// ignore the input rather than treating it as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The sequence matched a candidate exactly.
    Key(Key),
    /// No candidate starts with the observed bytes, or input ended.
    NoMatch,
}

/// The escape byte that introduces every candidate sequence.
pub const ESC: u8 = 0x1B;

/// A source of raw, unbuffered, unechoed bytes.
///
/// Putting the terminal into that mode beforehand (and restoring it on
/// teardown) is the hosting process's responsibility, typically via
/// [`crate::session::RawModeSession`].
pub trait ByteSource {
    /// Read exactly one byte, blocking until it arrives.
    ///
    /// `Ok(None)` signals end of input (the underlying source was closed).
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<R: Read> ByteSource for R {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

/// Immutable mapping from key identifiers to candidate byte sequences.
///
/// Built once at startup. A key may carry several encodings, and an entry
/// with an empty sequence is legal but can never match (the buffer always
/// holds at least the escape byte).
#[derive(Debug, Clone)]
pub struct CandidateTable {
    entries: Vec<(Key, Vec<u8>)>,
}

impl CandidateTable {
    /// An empty table. Every resolution against it is a non-match.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a candidate encoding for a key.
    pub fn push(&mut self, key: Key, sequence: impl Into<Vec<u8>>) {
        self.entries.push((key, sequence.into()));
    }

    /// Number of candidate entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, sequence)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (Key, &[u8])> {
        self.entries.iter().map(|(key, seq)| (*key, seq.as_slice()))
    }
}

impl Default for CandidateTable {
    /// The stock table: vt100 keypad codes, rxvt/xterm CSI codes, and the
    /// Linux-console function-key bank observed on a Raspberry Pi with an
    /// IBM Model F keyboard.
    fn default() -> Self {
        let mut table = Self::empty();

        // vt100 (SS3 forms).
        table.push(Key::Up, &b"\x1bOA"[..]);
        table.push(Key::Down, &b"\x1bOB"[..]);
        table.push(Key::Right, &b"\x1bOC"[..]);
        table.push(Key::Left, &b"\x1bOD"[..]);
        table.push(Key::F(1), &b"\x1bOP"[..]);
        table.push(Key::F(2), &b"\x1bOQ"[..]);
        table.push(Key::F(3), &b"\x1bOR"[..]);
        table.push(Key::F(4), &b"\x1bOS"[..]);
        table.push(Key::F(5), &b"\x1bOt"[..]);
        table.push(Key::F(6), &b"\x1bOu"[..]);
        table.push(Key::F(7), &b"\x1bOv"[..]);
        table.push(Key::F(8), &b"\x1bOl"[..]);

        // rxvt / xterm (CSI forms).
        table.push(Key::Up, &b"\x1b[A"[..]);
        table.push(Key::Down, &b"\x1b[B"[..]);
        table.push(Key::Right, &b"\x1b[C"[..]);
        table.push(Key::Left, &b"\x1b[D"[..]);
        table.push(Key::F(1), &b"\x1b[11~"[..]);
        table.push(Key::F(2), &b"\x1b[12~"[..]);
        table.push(Key::F(3), &b"\x1b[13~"[..]);
        table.push(Key::F(4), &b"\x1b[14~"[..]);
        table.push(Key::F(5), &b"\x1b[15~"[..]);
        table.push(Key::F(6), &b"\x1b[17~"[..]);
        table.push(Key::F(7), &b"\x1b[18~"[..]);
        table.push(Key::F(8), &b"\x1b[19~"[..]);

        // Linux console function keys.
        table.push(Key::F(1), &b"\x1b[[A"[..]);
        table.push(Key::F(2), &b"\x1b[[B"[..]);
        table.push(Key::F(3), &b"\x1b[[C"[..]);
        table.push(Key::F(4), &b"\x1b[[D"[..]);
        table.push(Key::F(5), &b"\x1b[[E"[..]);

        table
    }
}

/// Resolves escape sequences against a fixed candidate table.
#[derive(Debug, Clone, Default)]
pub struct KeyResolver {
    table: CandidateTable,
}

impl KeyResolver {
    /// Create a resolver over a candidate table.
    #[must_use]
    pub fn new(table: CandidateTable) -> Self {
        Self { table }
    }

    /// The table this resolver matches against.
    #[must_use]
    pub fn table(&self) -> &CandidateTable {
        &self.table
    }

    /// Resolve one escape sequence.
    ///
    /// The caller has already consumed the leading [`ESC`] byte from
    /// `source`; the resolver seeds its buffer with it and reads exactly one
    /// byte per step until the outcome is decided.
    pub fn resolve<S: ByteSource + ?Sized>(&self, source: &mut S) -> io::Result<Resolution> {
        let mut buffer = vec![ESC];
        loop {
            let Some(byte) = source.read_byte()? else {
                tracing::debug!(len = buffer.len(), "input ended inside escape sequence");
                return Ok(Resolution::NoMatch);
            };
            buffer.push(byte);

            let mut prefix_matches = 0usize;
            for (key, candidate) in self.table.entries() {
                if candidate.len() >= buffer.len() && candidate.starts_with(&buffer) {
                    if candidate.len() == buffer.len() {
                        return Ok(Resolution::Key(key));
                    }
                    prefix_matches += 1;
                }
            }

            if prefix_matches == 0 {
                tracing::debug!(sequence = ?buffer, "unrecognized escape sequence");
                return Ok(Resolution::NoMatch);
            }
        }
    }
}
