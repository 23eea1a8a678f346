//! Top-banner toast overlay
//!
//! Couples a subscription to the notification controller with the presenter
//! state machine and renders the single toast above everything else. The
//! banner slides down from the top edge and fades in from the background
//! colour as the presenter's progress goes from 0 to 1.

use crate::notifications::{
    NotificationController, NotificationPresenter, NotificationRecord, PresenterState,
};
use crate::theme::Theme;
use crate::ui::animation::{blend_color, AnimationTiming};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use tokio::sync::watch;
use tokio::time::Instant;

/// Rows taken by the banner: two borders, one line of text, one progress row
pub const BANNER_HEIGHT: u16 = 4;

/// Toast layer owned by the render loop
#[derive(Debug)]
pub struct ToastLayer {
    updates: watch::Receiver<Option<NotificationRecord>>,
    presenter: NotificationPresenter,
    banner_width: u16,
}

impl ToastLayer {
    /// Attach a new layer to `controller`. Exit completions are reported back
    /// to the controller so it can release the slot.
    pub fn new(controller: &NotificationController, timing: AnimationTiming, banner_width: u16) -> Self {
        let updates = controller.subscribe();
        let handle = controller.clone();
        let mut presenter = NotificationPresenter::new(timing, move |generation| {
            handle.clear(generation);
        });

        // Pick up anything shown before the layer existed
        let snapshot = updates.borrow().clone();
        presenter.observe(snapshot.as_ref(), Instant::now());

        Self {
            updates,
            presenter,
            banner_width,
        }
    }

    /// Sync with the controller and advance the animation. Call once per frame.
    pub fn update(&mut self, now: Instant) {
        if self.updates.has_changed().unwrap_or(false) {
            let snapshot = self.updates.borrow_and_update().clone();
            self.presenter.observe(snapshot.as_ref(), now);
        }
        self.presenter.tick(now);
    }

    pub fn presenter(&self) -> &NotificationPresenter {
        &self.presenter
    }

    pub fn state(&self) -> PresenterState {
        self.presenter.state()
    }

    /// Whether the render loop should keep drawing at the animation frame rate
    pub fn is_animating(&self) -> bool {
        self.presenter.is_animating()
    }

    /// Full banner rectangle when fully shown, anchored at the top centre of `area`
    fn banner_rect(&self, area: Rect) -> Rect {
        let width = area.width.min(self.banner_width);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height: BANNER_HEIGHT.min(area.height),
        }
    }

    /// Rows that slide in from above the top edge at the current progress
    fn visible_rows(&self, full_height: u16) -> u16 {
        let progress = self.presenter.progress().clamp(0.0, 1.0);
        (f32::from(full_height) * progress).round() as u16
    }

    /// Part of `area` currently covered by the banner, if any
    pub fn occupied_area(&self, area: Rect) -> Option<Rect> {
        if self.presenter.state() == PresenterState::Hidden || self.presenter.content().is_none() {
            return None;
        }
        let banner = self.banner_rect(area);
        let rows = self.visible_rows(banner.height);
        if rows == 0 || banner.width == 0 {
            return None;
        }
        Some(Rect { height: rows, ..banner })
    }

    /// Whether a pointer event at (`column`, `row`) lands on the banner.
    /// Anything outside the visible banner belongs to the screen beneath.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> bool {
        self.occupied_area(area).is_some_and(|rect| {
            column >= rect.x
                && column < rect.x + rect.width
                && row >= rect.y
                && row < rect.y + rect.height
        })
    }

    /// Widget drawing the current toast
    pub fn overlay<'a>(&'a self, theme: &'a Theme, now: Instant) -> ToastOverlay<'a> {
        ToastOverlay {
            layer: self,
            theme,
            now,
        }
    }
}

/// Renders the layer's toast, if any, on top of whatever is in the buffer
pub struct ToastOverlay<'a> {
    layer: &'a ToastLayer,
    theme: &'a Theme,
    now: Instant,
}

impl Widget for ToastOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(record) = self.layer.presenter.content() else {
            return;
        };
        let Some(visible) = self.layer.occupied_area(area) else {
            return;
        };

        // Draw the whole banner off-screen, then copy the rows that have slid in
        let banner = self.layer.banner_rect(area);
        let full = Rect::new(0, 0, banner.width, banner.height);
        let mut scratch = Buffer::empty(full);
        let remaining = self.remaining_fraction(record);
        render_banner(&mut scratch, full, record, self.theme, self.layer.presenter.progress(), remaining);

        let hidden_rows = banner.height - visible.height;
        for row in 0..visible.height {
            for column in 0..visible.width {
                let cell = scratch.get(column, hidden_rows + row).clone();
                *buf.get_mut(visible.x + column, visible.y + row) = cell;
            }
        }
    }
}

impl ToastOverlay<'_> {
    /// Share of the display time left, for the progress row
    fn remaining_fraction(&self, record: &NotificationRecord) -> Option<f64> {
        if record.is_persistent() {
            return None;
        }
        let entered_at = self.layer.presenter.entered_at()?;
        let elapsed = self.now.saturating_duration_since(entered_at);
        let total = record.duration();
        Some(1.0 - (elapsed.as_secs_f64() / total.as_secs_f64()).min(1.0))
    }
}

/// Render one banner into `area` with colours faded by `opacity`
fn render_banner(
    buf: &mut Buffer,
    area: Rect,
    record: &NotificationRecord,
    theme: &Theme,
    opacity: f32,
    remaining: Option<f64>,
) {
    Clear.render(area, buf);

    let palette = &theme.palette;
    let background = palette.background;
    let accent = blend_color(background, palette.kind_color(record.kind), opacity);
    let text = blend_color(background, palette.text, opacity);
    let surface = blend_color(background, palette.surface, opacity);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(surface));
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let (content_area, progress_area) = (chunks[0], chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(content_area);

    Paragraph::new(record.kind.icon())
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .render(columns[0], buf);

    Paragraph::new(Line::from(Span::styled(
        record.message.as_str(),
        Style::default().fg(text),
    )))
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Left)
    .render(columns[1], buf);

    if let Some(remaining) = remaining {
        let filled = (f64::from(progress_area.width) * remaining) as usize;
        Paragraph::new("▔".repeat(filled))
            .style(Style::default().fg(accent))
            .render(progress_area, buf);
    }
}
