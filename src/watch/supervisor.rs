//! The polling supervisor.
//!
//! Every watchdog owns one background loop: sleep for the current interval,
//! then poll. Nothing crosses the loop boundary: a watchdog's `poll` returns
//! a [`Tick`], never an error, and adapts its own interval (fast while a
//! trace is live, slow while idle).
//!
//! Lifecycle is explicit rather than fire-and-forget: [`spawn_watchdog`]
//! hands back a [`WatchdogHandle`] whose [`shutdown`](WatchdogHandle::shutdown)
//! cancels and joins, and [`WatchdogPool`] does the same for a whole set.
//! Cancellation is observed at the top of each cycle, so a stopping watchdog
//! may sleep out at most one more interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// What a poll decided about the loop's future.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Keep polling.
    Continue,
    /// The watchdog is done (condition fired, panel retired); exit the loop.
    Stop,
}

/// One background polling state machine.
pub trait Watchdog: Send {
    /// Loop label used in log events and the thread name.
    fn name(&self) -> &'static str;

    /// Current polling interval; re-read before every sleep so `poll` can
    /// retune it.
    fn interval(&self) -> Duration;

    /// One polling cycle. Must not panic; degrade to `Tick::Continue`.
    fn poll(&mut self) -> Tick;
}

/// Shared cancellation flag between a handle and its loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; observed at the top of the next cycle.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Owner of one spawned watchdog loop.
pub struct WatchdogHandle {
    token: CancelToken,
    thread: Option<JoinHandle<()>>,
}

impl WatchdogHandle {
    /// A clone of the loop's cancellation token.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Request cancellation without waiting.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once the loop has exited (self-stop or cancellation).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel and join the loop.
    pub fn shutdown(mut self) {
        self.token.cancel();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Launch a watchdog's polling loop on its own thread.
pub fn spawn_watchdog<W: Watchdog + 'static>(mut watchdog: W) -> WatchdogHandle {
    let token = CancelToken::new();
    let loop_token = token.clone();
    let name = watchdog.name();
    tracing::debug!(watchdog = name, "spawning polling loop");

    let thread = std::thread::spawn(move || {
        while !loop_token.is_cancelled() {
            std::thread::sleep(watchdog.interval());
            if loop_token.is_cancelled() {
                break;
            }
            if watchdog.poll() == Tick::Stop {
                tracing::debug!(watchdog = name, "self-stopped");
                break;
            }
        }
        tracing::debug!(watchdog = name, "polling loop exited");
    });

    WatchdogHandle { token, thread: Some(thread) }
}

/// Lifecycle owner for a set of watchdogs; joins them all on shutdown.
#[derive(Default)]
pub struct WatchdogPool {
    handles: Vec<WatchdogHandle>,
}

impl WatchdogPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a watchdog into the pool.
    pub fn spawn<W: Watchdog + 'static>(&mut self, watchdog: W) {
        self.handles.push(spawn_watchdog(watchdog));
    }

    /// Number of watchdogs ever spawned into the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Request cancellation of every loop without waiting.
    pub fn cancel_all(&self) {
        for handle in &self.handles {
            handle.cancel();
        }
    }

    /// Cancel every loop, then join them all.
    pub fn shutdown(self) {
        // Cancel first so the loops wind down in parallel instead of being
        // joined one sleep interval at a time.
        self.cancel_all();
        for handle in self.handles {
            handle.shutdown();
        }
    }
}
