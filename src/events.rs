use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

use crate::notifications::NotificationKind;
use crate::ui::toast::ToastLayer;

/// Result of handling a terminal event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    /// Show a toast of this kind with the default duration
    Notify(NotificationKind),
    /// Show a toast that stays until dismissed
    NotifyPersistent,
    /// Several call sites firing toasts at once
    Burst,
    /// Restock the selected inventory item
    Restock,
    /// Run the simulated inventory sync in the background
    StartSync,
    Dismiss,
    SelectNext,
    SelectPrevious,
    /// Pointer input for the screen beneath the toast
    Click { column: u16, row: u16 },
}

pub struct EventHandler;

impl EventHandler {
    /// Translate a terminal event. Mouse presses on the visible toast dismiss
    /// it; presses anywhere else go to the screen.
    pub fn handle_event(event: &Event, toasts: &ToastLayer, area: Rect) -> EventResult {
        match event {
            Event::Key(key) => Self::handle_key_event(*key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if toasts.hit_test(area, mouse.column, mouse.row) {
                        EventResult::Dismiss
                    } else {
                        EventResult::Click {
                            column: mouse.column,
                            row: mouse.row,
                        }
                    }
                }
                _ => EventResult::Continue,
            },
            _ => EventResult::Continue,
        }
    }

    pub fn handle_key_event(key: KeyEvent) -> EventResult {
        if key.kind == KeyEventKind::Release {
            return EventResult::Continue;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => EventResult::Quit,
            KeyCode::Char('q') => EventResult::Quit,
            KeyCode::Char('s') => EventResult::Notify(NotificationKind::Success),
            KeyCode::Char('e') => EventResult::Notify(NotificationKind::Error),
            KeyCode::Char('i') => EventResult::Notify(NotificationKind::Info),
            KeyCode::Char('w') => EventResult::Notify(NotificationKind::Warning),
            KeyCode::Char('p') => EventResult::NotifyPersistent,
            KeyCode::Char('b') => EventResult::Burst,
            KeyCode::Char('y') => EventResult::StartSync,
            KeyCode::Enter => EventResult::Restock,
            KeyCode::Char('d') | KeyCode::Esc => EventResult::Dismiss,
            KeyCode::Down | KeyCode::Char('j') => EventResult::SelectNext,
            KeyCode::Up | KeyCode::Char('k') => EventResult::SelectPrevious,
            _ => EventResult::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationController;
    use crate::ui::animation::AnimationTiming;
    use crossterm::event::MouseEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('e'))),
            EventResult::Notify(NotificationKind::Error)
        );
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Esc)), EventResult::Dismiss);
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Char('q'))), EventResult::Quit);
        assert_eq!(
            EventHandler::handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            EventResult::Quit
        );
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::F(5))), EventResult::Continue);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clicks_route_by_banner_position() {
        let controller = NotificationController::default();
        let mut toasts = ToastLayer::new(&controller, AnimationTiming::instant(30), 40);
        let area = Rect::new(0, 0, 60, 20);

        assert_eq!(
            EventHandler::handle_event(&click(30, 1), &toasts, area),
            EventResult::Click { column: 30, row: 1 }
        );

        controller.info("Synced 12 parts").unwrap();
        toasts.update(tokio::time::Instant::now());

        assert_eq!(EventHandler::handle_event(&click(30, 1), &toasts, area), EventResult::Dismiss);
        assert_eq!(
            EventHandler::handle_event(&click(30, 10), &toasts, area),
            EventResult::Click { column: 30, row: 10 }
        );
    }
}
