//! Enter/exit state machine for the toast overlay
//!
//! The presenter mirrors controller snapshots; it never decides on its own
//! that a toast should come or go. Its only job is to turn those snapshots
//! into a progress value over time and to report back when an exit has
//! finished so the controller can drop the record.

use std::fmt;

use tokio::time::Instant;
use tracing::debug;

use crate::notifications::types::{Generation, NotificationRecord};
use crate::ui::animation::{AnimationTiming, Easing, Tween};

/// Discrete presentation states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    Hidden,
    Entering,
    Visible,
    Exiting,
}

/// Share of the entrance replayed when new content replaces a toast that is
/// already fully shown
pub const REPLACE_ENTRANCE_SHARE: f32 = 0.25;

type ExitCallback = Box<dyn FnMut(Generation) + Send>;

pub struct NotificationPresenter {
    state: PresenterState,
    progress: f32,
    tween: Option<Tween>,
    content: Option<NotificationRecord>,
    entered_at: Option<Instant>,
    timing: AnimationTiming,
    on_exit_complete: ExitCallback,
}

impl fmt::Debug for NotificationPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationPresenter")
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("content", &self.content)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

impl NotificationPresenter {
    /// Create a hidden presenter. `on_exit_complete` is called with the
    /// generation of each toast whose exit transition finishes.
    pub fn new<F>(timing: AnimationTiming, on_exit_complete: F) -> Self
    where
        F: FnMut(Generation) + Send + 'static,
    {
        Self {
            state: PresenterState::Hidden,
            progress: 0.0,
            tween: None,
            content: None,
            entered_at: None,
            timing,
            on_exit_complete: Box::new(on_exit_complete),
        }
    }

    /// Feed the latest controller snapshot.
    ///
    /// Zero-length transitions settle before this returns.
    pub fn observe(&mut self, snapshot: Option<&NotificationRecord>, now: Instant) {
        match snapshot {
            Some(record) if record.visible => {
                if self.content_generation() != Some(record.generation) {
                    self.begin_enter(record.clone(), now);
                }
            }
            Some(record) => {
                if self.content_generation() == Some(record.generation) {
                    if matches!(self.state, PresenterState::Entering | PresenterState::Visible) {
                        self.begin_exit(now);
                    }
                } else if self.state == PresenterState::Hidden {
                    // Shown and hidden again between two frames: nothing to animate
                    debug!("Notification {} hidden before it was presented", record.generation);
                    (self.on_exit_complete)(record.generation);
                } else {
                    // Whatever is on screen is older than the hidden record;
                    // take it down showing the latest text, not the stale one
                    self.content = Some(record.clone());
                    self.begin_exit(now);
                }
            }
            None => {
                if self.state != PresenterState::Hidden {
                    debug!("Notification slot cleared while presenting, resetting");
                    self.reset();
                }
            }
        }
        self.tick(now);
    }

    /// Advance the running transition.
    ///
    /// Returns the new state when a transition completed on this tick.
    pub fn tick(&mut self, now: Instant) -> Option<PresenterState> {
        let tween = self.tween?;
        self.progress = tween.value_at(now);
        if !tween.is_finished(now) {
            return None;
        }

        self.tween = None;
        match self.state {
            PresenterState::Entering => {
                self.progress = 1.0;
                self.state = PresenterState::Visible;
            }
            PresenterState::Exiting => {
                self.progress = 0.0;
                self.state = PresenterState::Hidden;
                self.entered_at = None;
                if let Some(record) = self.content.take() {
                    debug!("Exit of notification {} complete", record.generation);
                    (self.on_exit_complete)(record.generation);
                }
            }
            PresenterState::Hidden | PresenterState::Visible => return None,
        }
        Some(self.state)
    }

    fn begin_enter(&mut self, record: NotificationRecord, now: Instant) {
        // Resume from wherever the previous toast was, taking only the
        // remaining share of the entrance time. A toast replacing one that is
        // still on screen replays at least the tail of the entrance.
        let mut from = self.progress;
        if self.content.is_some() {
            from = from.min(1.0 - REPLACE_ENTRANCE_SHARE);
        }
        self.progress = from;
        let duration = self.timing.enter.mul_f32((1.0 - from).clamp(0.0, 1.0));
        debug!(
            "Presenting notification {} from progress {:.2}",
            record.generation, from
        );
        self.tween = Some(Tween::new(from, 1.0, now, duration, Easing::EaseOutCubic));
        self.state = PresenterState::Entering;
        self.content = Some(record);
        self.entered_at = Some(now);
    }

    fn begin_exit(&mut self, now: Instant) {
        let from = self.progress;
        let duration = self.timing.exit.mul_f32(from.clamp(0.0, 1.0));
        self.tween = Some(Tween::new(from, 0.0, now, duration, Easing::EaseInCubic));
        self.state = PresenterState::Exiting;
    }

    fn reset(&mut self) {
        self.state = PresenterState::Hidden;
        self.progress = 0.0;
        self.tween = None;
        self.content = None;
        self.entered_at = None;
    }

    fn content_generation(&self) -> Option<Generation> {
        self.content.as_ref().map(|record| record.generation)
    }

    pub fn state(&self) -> PresenterState {
        self.state
    }

    /// 0.0 is fully off-screen and transparent, 1.0 fully shown
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Record currently being presented
    pub fn content(&self) -> Option<&NotificationRecord> {
        self.content.as_ref()
    }

    /// When the current toast started entering
    pub fn entered_at(&self) -> Option<Instant> {
        self.entered_at
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::types::NotificationKind;
    use std::sync::{Arc, Mutex};
    use tokio::time::Duration;

    fn record(message: &str, generation: Generation, visible: bool) -> NotificationRecord {
        NotificationRecord {
            message: message.to_string(),
            kind: NotificationKind::Info,
            duration_ms: 3000,
            visible,
            generation,
        }
    }

    fn presenter(timing: AnimationTiming) -> (NotificationPresenter, Arc<Mutex<Vec<Generation>>>) {
        let completed = Arc::new(Mutex::new(Vec::new()));
        let sink = completed.clone();
        let presenter = NotificationPresenter::new(timing, move |generation| {
            sink.lock().unwrap().push(generation);
        });
        (presenter, completed)
    }

    fn timing() -> AnimationTiming {
        AnimationTiming::new(Duration::from_millis(200), Duration::from_millis(100), 30)
    }

    #[test]
    fn test_full_lifecycle() {
        let (mut presenter, completed) = presenter(timing());
        let start = Instant::now();
        assert_eq!(presenter.state(), PresenterState::Hidden);

        presenter.observe(Some(&record("hi", 1, true)), start);
        assert_eq!(presenter.state(), PresenterState::Entering);
        assert_eq!(presenter.progress(), 0.0);

        assert_eq!(presenter.tick(start + Duration::from_millis(100)), None);
        assert!(presenter.progress() > 0.0 && presenter.progress() < 1.0);

        assert_eq!(
            presenter.tick(start + Duration::from_millis(200)),
            Some(PresenterState::Visible)
        );
        assert_eq!(presenter.progress(), 1.0);

        let hide_at = start + Duration::from_millis(1000);
        presenter.observe(Some(&record("hi", 1, false)), hide_at);
        assert_eq!(presenter.state(), PresenterState::Exiting);
        assert!(completed.lock().unwrap().is_empty());

        assert_eq!(
            presenter.tick(hide_at + Duration::from_millis(100)),
            Some(PresenterState::Hidden)
        );
        assert!(presenter.content().is_none());
        assert_eq!(*completed.lock().unwrap(), vec![1]);

        // Further ticks don't report completion again
        assert_eq!(presenter.tick(hide_at + Duration::from_millis(500)), None);
        assert_eq!(*completed.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_preempt_while_entering_restarts_with_new_content() {
        let (mut presenter, _) = presenter(timing());
        let start = Instant::now();

        presenter.observe(Some(&record("a", 1, true)), start);
        presenter.tick(start + Duration::from_millis(10));
        presenter.observe(Some(&record("b", 2, true)), start + Duration::from_millis(10));

        assert_eq!(presenter.state(), PresenterState::Entering);
        assert_eq!(presenter.content().unwrap().message, "b");

        presenter.tick(start + Duration::from_millis(300));
        assert_eq!(presenter.state(), PresenterState::Visible);
        assert_eq!(presenter.content().unwrap().message, "b");
    }

    #[test]
    fn test_preempt_while_exiting_resumes_from_current_progress() {
        let (mut presenter, completed) = presenter(timing());
        let start = Instant::now();

        presenter.observe(Some(&record("a", 1, true)), start);
        presenter.tick(start + Duration::from_millis(200));
        presenter.observe(Some(&record("a", 1, false)), start + Duration::from_millis(300));
        presenter.tick(start + Duration::from_millis(390));

        let mid_exit = presenter.progress();
        assert!(mid_exit > 0.0 && mid_exit < 1.0 - REPLACE_ENTRANCE_SHARE);

        presenter.observe(Some(&record("b", 2, true)), start + Duration::from_millis(390));
        assert_eq!(presenter.state(), PresenterState::Entering);
        assert_eq!(presenter.progress(), mid_exit);

        // Only the remaining share of the entrance time is needed
        let remaining = timing().enter.mul_f32((1.0 - mid_exit).clamp(0.0, 1.0));
        presenter.tick(start + Duration::from_millis(390) + remaining);
        assert_eq!(presenter.state(), PresenterState::Visible);
        assert!(completed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_preempt_while_visible_skips_exit() {
        let (mut presenter, completed) = presenter(timing());
        let start = Instant::now();

        presenter.observe(Some(&record("a", 1, true)), start);
        presenter.tick(start + Duration::from_millis(200));
        assert_eq!(presenter.state(), PresenterState::Visible);

        let replaced_at = start + Duration::from_millis(500);
        presenter.observe(Some(&record("b", 2, true)), replaced_at);
        assert_eq!(presenter.content().unwrap().message, "b");
        assert_eq!(presenter.state(), PresenterState::Entering);
        assert_eq!(presenter.progress(), 1.0 - REPLACE_ENTRANCE_SHARE);

        // Only the replayed tail of the entrance, never an exit
        let tail = timing().enter.mul_f32(REPLACE_ENTRANCE_SHARE);
        presenter.tick(replaced_at + tail / 2);
        assert_eq!(presenter.state(), PresenterState::Entering);
        assert_eq!(
            presenter.tick(replaced_at + tail),
            Some(PresenterState::Visible)
        );
        assert_eq!(presenter.progress(), 1.0);
        assert!(completed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_replacing_visible_toast_is_instant_with_reduced_motion() {
        let (mut presenter, _) = presenter(AnimationTiming::instant(30));
        let now = Instant::now();

        presenter.observe(Some(&record("a", 1, true)), now);
        presenter.observe(Some(&record("b", 2, true)), now);
        assert_eq!(presenter.state(), PresenterState::Visible);
        assert_eq!(presenter.progress(), 1.0);
        assert_eq!(presenter.content().unwrap().message, "b");
    }

    #[test]
    fn test_reduced_motion_is_instant() {
        let (mut presenter, completed) = presenter(AnimationTiming::instant(30));
        let now = Instant::now();

        presenter.observe(Some(&record("a", 1, true)), now);
        assert_eq!(presenter.state(), PresenterState::Visible);
        assert_eq!(presenter.progress(), 1.0);

        presenter.observe(Some(&record("a", 1, false)), now);
        assert_eq!(presenter.state(), PresenterState::Hidden);
        assert_eq!(*completed.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_unseen_hidden_record_completes_immediately() {
        let (mut presenter, completed) = presenter(timing());
        presenter.observe(Some(&record("gone", 4, false)), Instant::now());

        assert_eq!(presenter.state(), PresenterState::Hidden);
        assert_eq!(*completed.lock().unwrap(), vec![4]);
    }

    #[test]
    fn test_newer_hidden_record_replaces_stale_content_on_exit() {
        let (mut presenter, completed) = presenter(timing());
        let start = Instant::now();

        presenter.observe(Some(&record("a", 1, true)), start);
        presenter.tick(start + Duration::from_millis(200));
        presenter.observe(Some(&record("b", 2, false)), start + Duration::from_millis(250));

        assert_eq!(presenter.state(), PresenterState::Exiting);
        assert_eq!(presenter.content().unwrap().message, "b");

        presenter.tick(start + Duration::from_millis(400));
        assert_eq!(*completed.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_cleared_slot_resets() {
        let (mut presenter, completed) = presenter(timing());
        let start = Instant::now();

        presenter.observe(Some(&record("a", 1, true)), start);
        presenter.observe(None, start + Duration::from_millis(50));

        assert_eq!(presenter.state(), PresenterState::Hidden);
        assert_eq!(presenter.progress(), 0.0);
        assert!(completed.lock().unwrap().is_empty());
    }
}
