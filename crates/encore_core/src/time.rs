//! Time sources and the pausable stopwatch.
//!
//! Every simulation clock in ENCORE is a [`Stopwatch`] reading from a shared
//! [`TimeSource`]. Production code uses [`MonotonicTime`]; tests and replays
//! drive a [`ManualTime`] forward explicitly so frame timing is exact.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic source of "now", measured from an arbitrary origin.
pub trait TimeSource: Send + Sync {
    /// Current time since the source's origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    /// Creates a time source whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Time source that only moves when told to.
///
/// Stored as nanoseconds in an atomic so it can sit behind the same
/// `Arc<dyn TimeSource>` as the real clock.
#[derive(Debug, Default)]
pub struct ManualTime {
    nanos: AtomicU64,
}

impl ManualTime {
    /// Creates a manual clock at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nanos: AtomicU64::new(0),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(by, Ordering::Relaxed);
    }

    /// Moves the clock forward by a number of milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Jumps the clock to an absolute time. Going backwards is allowed.
    pub fn set(&self, at: Duration) {
        let at = u64::try_from(at.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.store(at, Ordering::Relaxed);
    }
}

impl TimeSource for ManualTime {
    #[inline]
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

/// Pausable elapsed-time counter.
///
/// Mirrors a classic stopwatch: `start` resumes accumulation, `stop` freezes
/// it, `reset` stops and zeroes, `restart` zeroes and starts.
pub struct Stopwatch {
    source: Arc<dyn TimeSource>,
    /// Source time at the last `start`, `None` while stopped.
    started_at: Option<Duration>,
    /// Time banked by previous start/stop spans.
    accumulated: Duration,
}

impl Stopwatch {
    /// Creates a stopped stopwatch at zero.
    #[must_use]
    pub fn new(source: Arc<dyn TimeSource>) -> Self {
        Self {
            source,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    /// Whether the stopwatch is accumulating time.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Starts or resumes accumulation. No-op while running.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.source.now());
        }
    }

    /// Freezes accumulation. No-op while stopped.
    pub fn stop(&mut self) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += self.source.now().saturating_sub(started);
        }
    }

    /// Stops and zeroes the stopwatch.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    /// Zeroes the stopwatch and starts it again.
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Total accumulated time.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started) => self.accumulated + self.source.now().saturating_sub(started),
            None => self.accumulated,
        }
    }

    /// Accumulated time in whole milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Accumulated time in seconds, at millisecond resolution.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ms() as f32 / 1000.0
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("running", &self.is_running())
            .field("elapsed", &self.elapsed())
            .finish()
    }
}
