#![forbid(unsafe_code)]

//! Shared output sink.
//!
//! All rendering appends to a single character output sink. When more than
//! one writer exists (a grid redraw plus a periodic status task, say), the
//! writers must serialize themselves; the core adds no hidden locking. A
//! [`SharedSink`] is the explicit guard for that contract: clone one handle
//! per writer, and each `write_all` holds the lock for exactly that call.
//!
//! Surface operations compose their output first and then issue a single
//! `write_all`, so with a `SharedSink` underneath, one operation is one
//! uninterrupted burst.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A cloneable, mutex-guarded writer handle.
#[derive(Debug)]
pub struct SharedSink<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> SharedSink<W> {
    /// Wrap a writer for sharing.
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Run `f` with the locked writer, holding the lock for the duration.
    ///
    /// For callers that need a multi-write burst to stay contiguous without
    /// pre-composing a buffer.
    pub fn with_locked<T>(&self, f: impl FnOnce(&mut W) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<W> Clone for SharedSink<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> Write for SharedSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_locked(|w| w.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.with_locked(|w| w.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_locked(|w| w.flush())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_writer() {
        let mut a = SharedSink::new(Vec::<u8>::new());
        let mut b = a.clone();
        a.write_all(b"left ").unwrap();
        b.write_all(b"right").unwrap();
        a.with_locked(|w| assert_eq!(w.as_slice(), b"left right"));
    }

    #[test]
    fn bursts_from_threads_do_not_interleave() {
        let sink = SharedSink::new(Vec::<u8>::new());
        let mut handles = Vec::new();
        for byte in [b'a', b'b', b'c', b'd'] {
            let mut sink = sink.clone();
            handles.push(std::thread::spawn(move || {
                sink.write_all(&[byte; 64]).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        sink.with_locked(|w| {
            assert_eq!(w.len(), 256);
            // Each 64-byte burst is contiguous.
            for chunk in w.chunks(64) {
                assert!(chunk.iter().all(|b| *b == chunk[0]));
            }
        });
    }

    #[test]
    fn with_locked_composes_multi_write_bursts() {
        let sink = SharedSink::new(Vec::<u8>::new());
        sink.with_locked(|w| {
            w.write_all(b"one ").unwrap();
            w.write_all(b"burst").unwrap();
        });
        sink.with_locked(|w| assert_eq!(w.as_slice(), b"one burst"));
    }
}
