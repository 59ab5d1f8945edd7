#![forbid(unsafe_code)]

//! Capability template interpreter.
//!
//! A capability template is a control sequence pattern fetched from the
//! terminal database, e.g. `\x1b[%i%p1%d;%p2%dH` for cursor movement. The
//! template interleaves literal bytes with directives:
//!
//! - `%i` — increment both parameters by one before any push (terminals that
//!   index rows and columns from 1). At most one occurrence, and it takes
//!   effect before every `%p` regardless of position.
//! - `%p1` / `%p2` — push the first or second parameter onto the operand
//!   stack.
//! - `%d` — pop the stack top and splice it in as decimal ASCII.
//!
//! Anything else, including `%` pairs outside this grammar, passes through
//! verbatim. This is the subset the hosting terminals actually use, not a
//! general terminfo parameterized-string engine.
//!
//! Interpretation is stateless: the operand stack is scoped to a single
//! [`CapabilityTemplate::interpret`] call, so concurrent calls never
//! interfere.

use crate::error::{Error, Result};

/// An immutable, opaque control sequence template.
///
/// The bytes are fixed at acquisition time; interpretation never mutates
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityTemplate {
    bytes: Vec<u8>,
}

impl CapabilityTemplate {
    /// Wrap raw template bytes obtained from the terminal database.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The raw template bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Fill `param1` and `param2` into the template.
    ///
    /// The output is an opaque byte sequence to be written verbatim.
    ///
    /// # Errors
    ///
    /// A `%d` with no unconsumed `%p` before it returns
    /// [`Error::StackUnderflow`]; a `%p` whose selector is neither `1` nor
    /// `2` returns [`Error::BadParameterSelector`]. In both cases nothing is
    /// emitted: a malformed template produces no partial output.
    pub fn interpret(&self, param1: i64, param2: i64) -> Result<Vec<u8>> {
        let bytes = &self.bytes;

        // `%i` is processed before any push so pushes read the incremented
        // values, wherever the flag sits in the template.
        let increment_at = find_directive(bytes, b'i');
        let (p1, p2) = match increment_at {
            Some(_) => (param1 + 1, param2 + 1),
            None => (param1, param2),
        };

        let mut out = Vec::with_capacity(bytes.len());
        let mut stack: Vec<i64> = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if increment_at == Some(i) {
                i += 2;
                continue;
            }
            if bytes[i] == b'%' && i + 1 < bytes.len() {
                match bytes[i + 1] {
                    b'p' => {
                        match bytes.get(i + 2) {
                            Some(b'1') => stack.push(p1),
                            Some(b'2') => stack.push(p2),
                            other => return Err(Error::BadParameterSelector(other.copied())),
                        }
                        i += 3;
                        continue;
                    }
                    b'd' => {
                        let value = stack.pop().ok_or(Error::StackUnderflow)?;
                        out.extend_from_slice(value.to_string().as_bytes());
                        i += 2;
                        continue;
                    }
                    _ => {}
                }
            }
            out.push(bytes[i]);
            i += 1;
        }
        Ok(out)
    }
}

/// Byte offset of the first `%<marker>` pair, if any.
fn find_directive(bytes: &[u8], marker: u8) -> Option<usize> {
    bytes
        .windows(2)
        .position(|pair| pair == [b'%', marker])
}
