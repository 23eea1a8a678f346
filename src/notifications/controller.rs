//! Single-slot notification controller
//!
//! Holds the one notification that may be on screen and the timer that will
//! take it down. Every `show` bumps a generation counter; the timer spawned
//! for a `show` carries that generation and does nothing if it no longer
//! matches when it fires.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

use crate::notifications::types::{
    Generation, NotificationConfig, NotificationError, NotificationKind, NotificationRecord,
    NotificationResult,
};

/// Cloneable handle to the process-wide notification slot.
///
/// All clones share the same state; calls from any of them are ordered by
/// arrival and the last one wins.
#[derive(Debug, Clone)]
pub struct NotificationController {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<ControllerState>,
    updates: watch::Sender<Option<NotificationRecord>>,
    default_duration: Duration,
    /// Runtime the controller was created on; timers run there no matter
    /// which thread calls `show`
    runtime: Option<Handle>,
}

#[derive(Debug, Default)]
struct ControllerState {
    current: Option<NotificationRecord>,
    generation: Generation,
    timer: Option<PendingTimer>,
}

#[derive(Debug)]
struct PendingTimer {
    generation: Generation,
    handle: JoinHandle<()>,
}

impl ControllerState {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!("Cancelling auto-dismiss timer for generation {}", timer.generation);
            timer.handle.abort();
        }
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish the slot while the state lock is still held so observers see
    /// updates in the same order they were applied
    fn publish(&self, state: &ControllerState) {
        self.updates.send_replace(state.current.clone());
    }

    fn expire(&self, generation: Generation) {
        let mut state = self.lock();
        let is_current = state
            .current
            .as_ref()
            .is_some_and(|record| record.generation == generation && record.visible);
        if !is_current {
            debug!("Ignoring stale auto-dismiss timer for generation {}", generation);
            return;
        }

        if state.timer.as_ref().is_some_and(|t| t.generation == generation) {
            state.timer = None;
        }
        if let Some(record) = state.current.as_mut() {
            record.visible = false;
        }
        self.publish(&state);
        debug!("Notification {} expired", generation);
    }
}

impl Default for NotificationController {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}

impl NotificationController {
    /// Create a controller with an empty slot.
    ///
    /// When called inside a tokio runtime, auto-dismiss timers are spawned on
    /// that runtime for the controller's whole life, so any thread can show
    /// timed toasts afterwards.
    pub fn new(config: &NotificationConfig) -> Self {
        let (updates, _) = watch::channel(None);
        let runtime = Handle::try_current().ok();
        if runtime.is_none() {
            debug!("Notification controller created outside a tokio runtime");
        }
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ControllerState::default()),
                updates,
                default_duration: config.default_duration(),
                runtime,
            }),
        }
    }

    /// Show a notification, replacing whatever is currently shown.
    ///
    /// A zero `duration` keeps the toast up until [`dismiss`](Self::dismiss).
    /// Empty messages are rejected and leave the current state untouched.
    pub fn show(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration: Duration,
    ) -> NotificationResult<Generation> {
        let message = message.into();
        if message.trim().is_empty() {
            warn!("Rejected notification with empty message");
            return Err(NotificationError::InvalidArgument(
                "notification message must not be empty",
            ));
        }

        let runtime = if duration.is_zero() {
            None
        } else {
            let runtime = self
                .shared
                .runtime
                .clone()
                .or_else(|| Handle::try_current().ok())
                .ok_or(NotificationError::SchedulerUnavailable)?;
            Some(runtime)
        };

        let mut state = self.shared.lock();
        state.cancel_timer();
        state.generation += 1;
        let generation = state.generation;

        state.current = Some(NotificationRecord {
            message,
            kind,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            visible: true,
            generation,
        });

        if let Some(runtime) = runtime {
            let shared: Weak<Shared> = Arc::downgrade(&self.shared);
            let handle = runtime.spawn(async move {
                sleep(duration).await;
                if let Some(shared) = shared.upgrade() {
                    shared.expire(generation);
                }
            });
            state.timer = Some(PendingTimer { generation, handle });
        }

        self.shared.publish(&state);
        debug!(
            "Showing {} notification {} for {:?}",
            kind.label(),
            generation,
            duration
        );
        Ok(generation)
    }

    /// Hide the current notification now, regardless of its remaining time.
    ///
    /// Does nothing when no notification is visible.
    pub fn dismiss(&self) {
        let mut state = self.shared.lock();
        let Some(record) = state.current.as_mut().filter(|record| record.visible) else {
            return;
        };
        record.visible = false;
        let generation = record.generation;
        state.cancel_timer();
        self.shared.publish(&state);
        debug!("Dismissed notification {}", generation);
    }

    /// Drop the record once its exit transition has finished.
    ///
    /// Only clears when `generation` is still current and already hidden, so
    /// a completion that races with a newer `show` is ignored.
    pub fn clear(&self, generation: Generation) -> bool {
        let mut state = self.shared.lock();
        let clearable = state
            .current
            .as_ref()
            .is_some_and(|record| record.generation == generation && !record.visible);
        if !clearable {
            debug!("Ignoring exit completion for stale generation {}", generation);
            return false;
        }
        state.current = None;
        self.shared.publish(&state);
        true
    }

    /// Show a success toast with the default duration
    pub fn show_notification(&self, message: impl Into<String>) -> NotificationResult<Generation> {
        self.show(message, NotificationKind::default(), self.shared.default_duration)
    }

    /// Show a toast with an explicit kind and duration in milliseconds
    pub fn show_notification_with(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration_ms: u64,
    ) -> NotificationResult<Generation> {
        self.show(message, kind, Duration::from_millis(duration_ms))
    }

    pub fn hide_notification(&self) {
        self.dismiss();
    }

    /// Current contents of the slot, if any
    pub fn current(&self) -> Option<NotificationRecord> {
        self.shared.lock().current.clone()
    }

    /// Number of accepted `show` calls so far
    pub fn generation(&self) -> Generation {
        self.shared.lock().generation
    }

    pub fn has_pending_timer(&self) -> bool {
        self.shared
            .lock()
            .timer
            .as_ref()
            .is_some_and(|timer| !timer.handle.is_finished())
    }

    pub fn default_duration(&self) -> Duration {
        self.shared.default_duration
    }

    /// Subscribe to slot updates
    pub fn subscribe(&self) -> watch::Receiver<Option<NotificationRecord>> {
        self.shared.updates.subscribe()
    }
}

/// Convenience functions for common toast types
impl NotificationController {
    pub fn success(&self, message: impl Into<String>) -> NotificationResult<Generation> {
        self.show(message, NotificationKind::Success, self.shared.default_duration)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationResult<Generation> {
        self.show(message, NotificationKind::Info, self.shared.default_duration)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationResult<Generation> {
        self.show(message, NotificationKind::Warning, self.shared.default_duration)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationResult<Generation> {
        self.show(message, NotificationKind::Error, self.shared.default_duration)
    }

    /// Show a toast that stays until dismissed
    pub fn persistent(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationResult<Generation> {
        self.show(message, kind, Duration::ZERO)
    }
}
