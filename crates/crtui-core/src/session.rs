#![forbid(unsafe_code)]

//! Raw-mode session guard.
//!
//! The key resolver expects one raw, unbuffered, unechoed byte per read, and
//! putting the terminal into that mode is the hosting process's job. This
//! guard is the stock way to do it: raw mode is entered at construction and
//! restored on [`Drop`], so every exit path (return, `?`, panic unwinding)
//! leaves the terminal usable. A panic hook and a unix signal thread cover
//! the paths `Drop` cannot.
//!
//! Only one session should exist at a time; creating a second one is not
//! detected and leads to a restore happening too early.

use std::io::{self, Write};
use std::sync::OnceLock;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// RAII guard for terminal raw mode.
#[derive(Debug)]
pub struct RawModeSession {
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl RawModeSession {
    /// Enter raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled; the terminal is left
    /// untouched in that case.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        crossterm::terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");
        Ok(Self {
            #[cfg(unix)]
            signal_guard: Some(SignalGuard::new()?),
        })
    }
}

impl Drop for RawModeSession {
    fn drop(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = io::stdout().flush();
    tracing::info!("terminal raw mode disabled");
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
    });
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                tracing::warn!(signal, "termination signal received, restoring terminal");
                restore_terminal();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

// Entering raw mode would corrupt the test runner's terminal, so session
// behavior is only exercised interactively.
