use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

/// Cooperative cancellation signal shared between producers and their callers.
///
/// Clones share one flag. Producers check it between generations, never in
/// the middle of one. Besides the flag, the token holds the only sender of a
/// message-less channel; `cancel` drops it, which disconnects `signal()` and
/// wakes every thread waiting on it in a `select!`.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    trigger: Arc<Mutex<Option<Sender<()>>>>,
    signal: Receiver<()>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (trigger, signal) = crossbeam_channel::bounded(0);
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            trigger: Arc::new(Mutex::new(Some(trigger))),
            signal,
        }
    }

    /// Signals every holder of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        let mut trigger = match self.trigger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        trigger.take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Disconnects once the token is cancelled. Nothing is ever sent on it.
    pub fn signal(&self) -> &Receiver<()> {
        &self.signal
    }

    /// Waits up to `timeout` for cancellation. Returns `true` if the token
    /// was cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.signal.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => self.is_cancelled(),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
