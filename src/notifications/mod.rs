//! Toast notification system for the storefront
//!
//! A single process-wide notification slot with animated presentation:
//!
//! - `NotificationController` owns the slot and its auto-dismiss timer;
//!   every `show` supersedes the previous toast, there is no queue
//! - `NotificationPresenter` turns slot updates into enter/exit transitions
//!   and reports back when an exit has finished
//! - generation tags keep superseded timers from touching newer toasts

pub mod controller;
pub mod presenter;
pub mod types;

pub use controller::NotificationController;
pub use presenter::{NotificationPresenter, PresenterState};
pub use types::{
    Generation, NotificationConfig, NotificationError, NotificationKind, NotificationRecord,
    NotificationResult, DEFAULT_DURATION_MS,
};
