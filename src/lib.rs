pub mod app;
pub mod cli;
pub mod config;
pub mod events;
pub mod notifications;
pub mod theme;
pub mod ui;

pub use app::App;
pub use notifications::{NotificationController, NotificationKind, NotificationPresenter};
