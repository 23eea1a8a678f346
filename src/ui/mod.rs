pub mod animation;
pub mod storefront;
pub mod toast;

use ratatui::Frame;
use tokio::time::Instant;

use crate::theme::Theme;

use self::{storefront::StorefrontScreen, toast::ToastLayer};

pub use animation::AnimationTiming;

/// Draw one frame: the storefront screen, then the toast on top of it
pub fn render(
    frame: &mut Frame,
    screen: &mut StorefrontScreen,
    toasts: &ToastLayer,
    theme: &Theme,
    now: Instant,
) {
    let area = frame.size();
    screen.render(frame, area, theme);

    // Drawn last so it sits above everything else
    frame.render_widget(toasts.overlay(theme, now), area);
}
