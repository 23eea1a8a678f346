use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Duration;

use crate::ui::animation::AnimationTiming;

/// Tag identifying one `show` call. Strictly increasing per controller.
pub type Generation = u64;

/// Default time a toast stays up before it dismisses itself
pub const DEFAULT_DURATION_MS: u64 = 3000;

/// Notification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("No async runtime available to schedule auto-dismiss")]
    SchedulerUnavailable,
}

pub type NotificationResult<T> = Result<T, NotificationError>;

/// Kind of notification. Only changes the icon and colour of the toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    /// Get toast icon for this kind
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
            NotificationKind::Info => "ℹ",
            NotificationKind::Warning => "⚠",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

/// The single notification slot as published by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub message: String,
    pub kind: NotificationKind,
    /// 0 means the toast stays until it is dismissed
    pub duration_ms: u64,
    pub visible: bool,
    pub generation: Generation,
}

impl NotificationRecord {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn is_persistent(&self) -> bool {
        self.duration_ms == 0
    }
}

/// Configuration for the toast notification system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Auto-dismiss delay used when a call site doesn't pass one
    pub default_duration_ms: u64,

    /// Length of the slide-in transition
    pub enter_ms: u64,

    /// Length of the slide-out transition
    pub exit_ms: u64,

    /// Show and hide instantly instead of animating
    pub reduce_motion: bool,

    /// Frame rate of the render loop while animating
    pub max_fps: u32,

    /// Maximum width of the top banner in columns
    pub banner_width: u16,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_DURATION_MS,
            enter_ms: 250,
            exit_ms: 200,
            reduce_motion: false,
            max_fps: 30,
            banner_width: 60,
        }
    }
}

impl NotificationConfig {
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Transition timing, collapsed to zero-length when motion is reduced
    pub fn timing(&self) -> AnimationTiming {
        if self.reduce_motion {
            AnimationTiming::instant(self.max_fps)
        } else {
            AnimationTiming::new(
                Duration::from_millis(self.enter_ms),
                Duration::from_millis(self.exit_ms),
                self.max_fps,
            )
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.enter_ms > 5_000 || self.exit_ms > 5_000 {
            return Err("Transition durations cannot exceed 5000ms".to_string());
        }
        if self.max_fps == 0 || self.max_fps > 60 {
            return Err(format!("max_fps must be between 1 and 60, got {}", self.max_fps));
        }
        if self.banner_width < 10 {
            return Err("banner_width must be at least 10 columns".to_string());
        }
        Ok(())
    }
}
