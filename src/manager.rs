// The central log manager: a process-wide singleton that owns the message
// queue, the global output gate, rendering flags and the optional background
// flush thread.
//
// Lifecycle:
//   no instance --new()--> active <--set_threading()--> active + flush thread
//   active --shutdown()--> torn down (registry cleared, next new() starts over)
//
// Locking: `queue` is held only to push or to swap the whole vector out.
// `output` is held for a full drain (swap + format + write) so batches from
// concurrent drains never interleave and leave the console in FIFO order.

use crate::config::{LoggerConfig, OutputTarget};
use crate::error::{LoggerError, Result};
use crate::formatter::{format_record, FormatOptions};
use crate::handle::LogHandle;
use crate::level::LogLevel;
use crate::record::LogRecord;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Name given to the background flush thread.
pub const FLUSH_THREAD_NAME: &str = "lite-logger-flush";

/// Default longest sleep of the flush thread between wake-ups.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(10);

// The published instance. The registry holds the owning reference; handles
// only ever see a `Weak`.
static REGISTRY: OnceLock<Mutex<Option<Arc<LoggerState>>>> = OnceLock::new();
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn registry() -> &'static Mutex<Option<Arc<LoggerState>>> {
    REGISTRY.get_or_init(|| Mutex::new(None))
}

/// Locks a mutex, recovering the data if a panicking thread poisoned it.
/// A logger must keep working after an unrelated panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Where drained text ends up.
#[derive(Debug)]
enum Sink {
    Console(OutputTarget),
    #[cfg(test)]
    Memory(Arc<Mutex<String>>),
}

impl Sink {
    // Write failures are dropped: logging is best-effort.
    fn write_text(&self, text: &str) {
        match self {
            Sink::Console(OutputTarget::Stdout) => {
                let mut out = io::stdout().lock();
                let _ = out.write_all(text.as_bytes());
                let _ = out.flush();
            }
            Sink::Console(OutputTarget::Stderr) => {
                let mut out = io::stderr().lock();
                let _ = out.write_all(text.as_bytes());
                let _ = out.flush();
            }
            #[cfg(test)]
            Sink::Memory(buffer) => lock(buffer.as_ref()).push_str(text),
        }
    }
}

/// Shared state behind every `LiteLogger` clone and every `LogHandle`.
pub(crate) struct LoggerState {
    id: u64,
    /// Accepted records, oldest first.
    queue: Mutex<Vec<LogRecord>>,
    /// Signalled on enqueue and on shutdown of the flush thread.
    wakeup: Condvar,
    output_level: AtomicU8, // `LogLevel` as u8
    color: AtomicBool,
    timestamps: AtomicBool,
    flush_interval_ms: AtomicU64,
    /// Tells the flush thread to exit after its current pass.
    shutdown_signal: AtomicBool,
    /// Set once by `shutdown`; never cleared.
    torn_down: AtomicBool,
    worker: Mutex<Option<JoinHandle<()>>>,
    /// Held for a whole drain.
    output: Mutex<Sink>,
}

impl LoggerState {
    fn new() -> Self {
        LoggerState {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            queue: Mutex::new(Vec::new()),
            wakeup: Condvar::new(),
            output_level: AtomicU8::new(LogLevel::Info.as_u8()),
            color: AtomicBool::new(false),
            timestamps: AtomicBool::new(false),
            flush_interval_ms: AtomicU64::new(DEFAULT_FLUSH_INTERVAL.as_millis() as u64),
            shutdown_signal: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
            worker: Mutex::new(None),
            output: Mutex::new(Sink::Console(OutputTarget::Stdout)),
        }
    }

    pub(crate) fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }

    fn output_level(&self) -> LogLevel {
        // Only ever stored from a valid `LogLevel`.
        LogLevel::try_from(self.output_level.load(Ordering::Relaxed)).unwrap_or(LogLevel::Off)
    }

    /// Appends a record if the instance is live and the record passes the
    /// global output gate. This gate is authoritative for what gets queued,
    /// independently of the handle's own gate.
    pub(crate) fn enqueue(&self, record: LogRecord) {
        if !record.level.passes(self.output_level()) {
            return;
        }
        let mut queue = lock(&self.queue);
        // Checked under the queue lock: `shutdown` flips the flag under the
        // same lock, so nothing lands in the queue after its final drain.
        if self.is_torn_down() {
            return;
        }
        queue.push(record);
        drop(queue);
        self.wakeup.notify_one();
    }

    /// Swaps the queue out and writes every record in FIFO order.
    /// Returns how many records were written.
    fn drain_and_write(&self) -> usize {
        // Output lock first, queue lock second (and only for the swap).
        let sink = lock(&self.output);
        let batch = std::mem::take(&mut *lock(&self.queue));
        if batch.is_empty() {
            return 0;
        }

        // Flags are read once, so a whole batch renders the same way.
        let options = FormatOptions {
            color: self.color.load(Ordering::Relaxed),
            timestamps: self.timestamps.load(Ordering::Relaxed),
        };
        // One write per batch keeps other console writers from splitting it.
        let mut text = String::new();
        for record in &batch {
            text.push_str(&format_record(record, &options));
            text.push('\n');
        }
        sink.write_text(&text);
        batch.len()
    }

    /// Blocks until a record arrives, the shutdown signal is raised, or the
    /// flush interval elapses.
    fn wait_for_records(&self) {
        let queue = lock(&self.queue);
        if !queue.is_empty() || self.shutdown_signal.load(Ordering::Acquire) {
            return;
        }
        let interval = Duration::from_millis(self.flush_interval_ms.load(Ordering::Relaxed));
        let _ = self
            .wakeup
            .wait_timeout(queue, interval)
            .unwrap_or_else(PoisonError::into_inner);
    }

    fn raise_shutdown_signal(&self) {
        // Raised under the queue lock so a waiter between its check and its
        // wait cannot miss the notification.
        {
            let _queue = lock(&self.queue);
            self.shutdown_signal.store(true, Ordering::Release);
        }
        self.wakeup.notify_all();
    }
}

/// Body of the background flush thread.
fn run_flush_loop(state: Arc<LoggerState>) {
    tracing::debug!(id = state.id, "log flush thread started");
    while !state.shutdown_signal.load(Ordering::Acquire) {
        // Returns early when records are already waiting.
        state.wait_for_records();
        state.drain_and_write();
    }
    tracing::debug!(id = state.id, "log flush thread exiting");
}

/// Handle to the process-wide logger.
///
/// Cloning is cheap and every clone refers to the same instance. Construction
/// is create-or-get: while an instance is published, [`LiteLogger::new`]
/// returns it unchanged.
///
/// ```rust,no_run
/// use lite_logger::{LiteLogger, LogLevel};
///
/// let logger = LiteLogger::new();
/// logger.set_output_level(LogLevel::Debug);
/// let log = logger.get_log(LogLevel::Verbose);
/// log.info("service started");
/// log.debug(format!("listening on {}", 8080));
/// logger.flush();
/// logger.shutdown();
/// ```
#[derive(Clone)]
pub struct LiteLogger {
    state: Arc<LoggerState>,
}

impl LiteLogger {
    /// Returns the published logger, creating it with default settings if needed.
    pub fn new() -> Self {
        Self::create_or_get().0
    }

    /// Like [`LiteLogger::new`], but a newly created instance also starts its
    /// background flush thread. An existing instance is returned untouched.
    pub fn with_threading() -> Result<Self> {
        let (logger, created) = Self::create_or_get();
        if created {
            logger.set_threading(true)?;
        }
        Ok(logger)
    }

    /// Create-or-get, applying `config` only when this call creates the instance.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let (logger, created) = Self::create_or_get();
        if created {
            logger.set_output_level(config.output_level);
            logger.set_color(config.color);
            logger.set_timestamps(config.timestamps);
            logger.set_output_target(config.target);
            logger.set_flush_interval(config.flush_interval());
            if config.threading {
                logger.set_threading(true)?;
            }
        }
        Ok(logger)
    }

    /// The published logger, if one exists. Never creates an instance.
    pub fn instance() -> Option<Self> {
        lock(registry())
            .as_ref()
            .map(|state| LiteLogger { state: Arc::clone(state) })
    }

    fn create_or_get() -> (Self, bool) {
        // The registry lock is held across check and insert, so two racing
        // constructors cannot both create an instance.
        let mut published = lock(registry());
        if let Some(state) = published.as_ref() {
            return (LiteLogger { state: Arc::clone(state) }, false);
        }
        let state = Arc::new(LoggerState::new());
        *published = Some(Arc::clone(&state));
        tracing::debug!(id = state.id, "lite-logger instance created");
        (LiteLogger { state }, true)
    }

    /// Identifier unique to this instance within the process.
    pub fn id(&self) -> u64 {
        self.state.id
    }

    /// `true` when both values refer to the same underlying instance.
    pub fn same_instance(&self, other: &LiteLogger) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// `false` once [`LiteLogger::shutdown`] has run on this instance.
    pub fn is_active(&self) -> bool {
        !self.state.is_torn_down()
    }

    /// Returns a handle that emits records no more verbose than `level`.
    ///
    /// The handle does not keep the logger alive; after shutdown it is a no-op.
    pub fn get_log(&self, level: LogLevel) -> LogHandle {
        LogHandle::new(Arc::downgrade(&self.state), level)
    }

    /// Queues `record` directly, subject to the global output gate.
    pub fn enqueue(&self, record: LogRecord) {
        self.state.enqueue(record);
    }

    /// Sets the global output gate. Records already queued are not re-filtered.
    pub fn set_output_level(&self, level: LogLevel) {
        self.state.output_level.store(level.as_u8(), Ordering::Relaxed);
    }

    pub fn output_level(&self) -> LogLevel {
        self.state.output_level()
    }

    /// Turns ANSI coloring of severity labels on or off. Applies from the next drain.
    pub fn set_color(&self, active: bool) {
        self.state.color.store(active, Ordering::Relaxed);
    }

    pub fn color(&self) -> bool {
        self.state.color.load(Ordering::Relaxed)
    }

    pub fn set_timestamps(&self, active: bool) {
        self.state.timestamps.store(active, Ordering::Relaxed);
    }

    pub fn timestamps(&self) -> bool {
        self.state.timestamps.load(Ordering::Relaxed)
    }

    /// Switches between stdout and stderr. Applies from the next drain.
    pub fn set_output_target(&self, target: OutputTarget) {
        *lock(&self.state.output) = Sink::Console(target);
    }

    /// Longest time the flush thread sleeps without being woken by an enqueue.
    pub fn set_flush_interval(&self, interval: Duration) {
        // A zero interval would turn the wait into a spin.
        let millis = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX).max(1);
        self.state.flush_interval_ms.store(millis, Ordering::Relaxed);
    }

    /// Starts or stops the background flush thread.
    ///
    /// Stopping blocks until the thread has exited, then drains whatever is
    /// still queued so nothing enqueued before the call is lost.
    ///
    /// # Errors
    /// [`LoggerError::ThreadSpawn`] if the thread cannot be started.
    pub fn set_threading(&self, active: bool) -> Result<()> {
        // Serializes start/stop; the flush thread itself never takes this lock.
        let mut worker = lock(&self.state.worker);
        if active {
            // A torn-down instance stays stopped.
            if self.state.is_torn_down() {
                return Ok(());
            }
            // Already running.
            if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
                return Ok(());
            }
            // Reap a thread that exited on its own (e.g. after a panic).
            if let Some(finished) = worker.take() {
                let _ = finished.join();
            }
            self.state.shutdown_signal.store(false, Ordering::Release);
            let state = Arc::clone(&self.state);
            let handle = thread::Builder::new()
                .name(FLUSH_THREAD_NAME.to_string())
                .spawn(move || run_flush_loop(state))
                .map_err(LoggerError::ThreadSpawn)?;
            *worker = Some(handle);
        } else if let Some(handle) = worker.take() {
            self.state.raise_shutdown_signal();
            if handle.join().is_err() {
                tracing::debug!(id = self.state.id, "log flush thread panicked");
            }
            // Whatever arrived after the thread's last pass.
            self.state.drain_and_write();
        }
        Ok(())
    }

    /// `true` while the background flush thread is running.
    pub fn is_threaded(&self) -> bool {
        lock(&self.state.worker)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Synchronously drains the queue to the console.
    ///
    /// # Returns
    /// The number of records written; `0` when the queue was already empty.
    pub fn flush(&self) -> usize {
        self.state.drain_and_write()
    }

    /// Number of records queued but not yet written.
    pub fn pending(&self) -> usize {
        lock(&self.state.queue).len()
    }

    /// Tears the instance down.
    ///
    /// Turns every outstanding handle into a no-op, stops the flush thread
    /// (flushing what it leaves behind), and unpublishes the instance so the
    /// next construction creates a fresh one. Records still queued on an
    /// unthreaded logger are discarded; call [`LiteLogger::flush`] first to
    /// keep them. Calling it again is harmless.
    pub fn shutdown(&self) {
        // Refuse new records first so the final drain sees everything. The
        // flag is flipped under the queue lock that `enqueue` checks it under.
        {
            let _queue = lock(&self.state.queue);
            self.state.torn_down.store(true, Ordering::Release);
        }
        if let Err(err) = self.set_threading(false) {
            tracing::debug!(id = self.state.id, %err, "stopping flush thread during shutdown failed");
        }

        // Only unpublish if a newer instance has not already replaced this one.
        let mut published = lock(registry());
        if published
            .as_ref()
            .is_some_and(|state| Arc::ptr_eq(state, &self.state))
        {
            *published = None;
            tracing::debug!(id = self.state.id, "lite-logger instance shut down");
        }
    }

    /// Redirects output into an in-memory buffer for assertions.
    #[cfg(test)]
    pub(crate) fn capture_output(&self) -> Arc<Mutex<String>> {
        let buffer = Arc::new(Mutex::new(String::new()));
        *lock(&self.state.output) = Sink::Memory(Arc::clone(&buffer));
        buffer
    }
}

impl Default for LiteLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LiteLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiteLogger")
            .field("id", &self.state.id)
            .field("output_level", &self.output_level())
            .field("color", &self.color())
            .field("active", &self.is_active())
            .finish()
    }
}
