#![forbid(unsafe_code)]

//! SIGWINCH listener.
//!
//! Resize notifications are delivered via SIGWINCH on Unix. A dedicated
//! signal thread keeps unsafe `sigaction` calls out of the tree (unsafe is
//! forbidden) while still flagging resizes promptly. The flag is sticky until
//! taken; the authoritative size is re-read from the tty when the next frame
//! is built, so coalescing a storm of signals into one flag is fine.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::signal::SIGWINCH;
use signal_hook::iterator::Signals;

/// Owns the SIGWINCH handler thread and the pending-resize flag.
#[derive(Debug)]
pub struct ResizeListener {
    flag: Arc<AtomicBool>,
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl ResizeListener {
    /// Install the listener.
    pub fn install() -> io::Result<Self> {
        let flag = Arc::new(AtomicBool::new(false));
        let mut signals = Signals::new([SIGWINCH]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn({
            let flag = Arc::clone(&flag);
            move || {
                for _ in signals.forever() {
                    flag.store(true, Ordering::Release);
                }
            }
        });

        Ok(Self {
            flag,
            handle,
            thread: Some(thread),
        })
    }

    /// Take the pending-resize flag, clearing it.
    #[must_use]
    pub fn take_resize(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
