use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use tokio::time::{sleep, Duration, Instant};

use crate::config::AppConfig;
use crate::events::{EventHandler, EventResult};
use crate::notifications::{Generation, NotificationController, NotificationKind, NotificationResult};
use crate::theme::Theme;
use crate::ui::{self, storefront::StorefrontScreen, toast::ToastLayer};

/// Redraw interval while no transition is running
const IDLE_TICK: Duration = Duration::from_millis(100);

/// Units added by one restock action
const RESTOCK_AMOUNT: u32 = 10;

pub struct App {
    should_quit: bool,
    theme: Theme,
    controller: NotificationController,
    toasts: ToastLayer,
    screen: StorefrontScreen,
    sync_runs: u32,
}

impl App {
    /// Build the application. The notification controller is created here,
    /// once, and handed to every call site that needs it.
    pub fn new(config: &AppConfig) -> Self {
        let controller = NotificationController::new(&config.notifications);
        let toasts = ToastLayer::new(
            &controller,
            config.notifications.timing(),
            config.notifications.banner_width,
        );

        Self {
            should_quit: false,
            theme: config.theme(),
            controller,
            toasts,
            screen: StorefrontScreen::default(),
            sync_runs: 0,
        }
    }

    pub fn controller(&self) -> &NotificationController {
        &self.controller
    }

    pub fn toasts(&self) -> &ToastLayer {
        &self.toasts
    }

    pub fn screen(&self) -> &StorefrontScreen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance the toast layer to `now`; called once per frame
    pub fn tick(&mut self, now: Instant) {
        self.toasts.update(now);
    }

    pub async fn run(&mut self) -> Result<()> {
        // Check if we're running in a proper terminal
        if !io::stdout().is_tty() {
            return Err(anyhow::anyhow!(
                "storefront-notify requires a terminal (TTY) to run"
            ));
        }

        // Setup terminal
        enable_raw_mode()
            .map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}", e))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| anyhow::anyhow!("Failed to setup terminal: {}", e))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)
            .map_err(|e| anyhow::anyhow!("Failed to create terminal: {}", e))?;

        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let frame_interval = self.toasts.presenter().timing().frame_interval;

        while !self.should_quit {
            let now = Instant::now();
            self.tick(now);

            terminal.draw(|frame| {
                ui::render(frame, &mut self.screen, &self.toasts, &self.theme, now);
            })?;

            let timeout = if self.toasts.is_animating() {
                frame_interval
            } else {
                IDLE_TICK
            };

            if event::poll(timeout)? {
                let event = event::read()?;
                let area = terminal.size()?;
                let result = EventHandler::handle_event(&event, &self.toasts, area);
                self.handle_event_result(result, area);
            }
        }

        Ok(())
    }

    /// Apply the outcome of one terminal event
    pub fn handle_event_result(&mut self, result: EventResult, area: Rect) {
        match result {
            EventResult::Continue => {}
            EventResult::Quit => self.should_quit = true,
            EventResult::Notify(kind) => {
                let message = match kind {
                    NotificationKind::Success => "Order #1042 marked as shipped",
                    NotificationKind::Error => "Could not reach the payment service",
                    NotificationKind::Info => "3 new orders since your last visit",
                    NotificationKind::Warning => "Oil filter is running low",
                };
                let duration = self.controller.default_duration();
                self.report(self.controller.show(message, kind, duration));
            }
            EventResult::NotifyPersistent => {
                self.report(
                    self.controller
                        .persistent("Store is in read-only mode until sync completes", NotificationKind::Info),
                );
            }
            EventResult::Burst => self.burst(),
            EventResult::Restock => self.restock(),
            EventResult::StartSync => self.start_sync(),
            EventResult::Dismiss => self.controller.hide_notification(),
            EventResult::SelectNext => self.screen.select_next(),
            EventResult::SelectPrevious => self.screen.select_previous(),
            EventResult::Click { column, row } => {
                self.screen.click(area, column, row);
            }
        }
    }

    fn report(&self, result: NotificationResult<Generation>) {
        if let Err(e) = result {
            tracing::warn!("Notification not shown: {}", e);
        }
    }

    fn restock(&mut self) {
        let result = match self.screen.restock_selected(RESTOCK_AMOUNT) {
            Some(item) => self
                .controller
                .success(format!("Restocked {} ({} in stock)", item.name, item.stock)),
            None => self.controller.warning("Select an item to restock"),
        };
        self.report(result);
    }

    /// Three call sites reporting in quick succession; only the last toast
    /// should ever settle on screen
    fn burst(&self) {
        let sites = [
            (self.controller.clone(), "Cart saved", NotificationKind::Success),
            (self.controller.clone(), "Price list updated", NotificationKind::Info),
            (self.controller.clone(), "Retailer feed delayed", NotificationKind::Warning),
        ];
        let duration = self.controller.default_duration();

        tokio::spawn(async move {
            for (controller, message, kind) in sites {
                if let Err(e) = controller.show(message, kind, duration) {
                    tracing::warn!("Burst notification not shown: {}", e);
                }
                sleep(Duration::from_millis(10)).await;
            }
        });
    }

    /// Simulated background inventory sync; every other run fails
    fn start_sync(&mut self) {
        self.sync_runs += 1;
        let fails = self.sync_runs % 2 == 0;
        let controller = self.controller.clone();

        self.report(controller.persistent("Syncing inventory…", NotificationKind::Info));

        tokio::spawn(async move {
            sleep(Duration::from_millis(1500)).await;
            let result = if fails {
                controller.show_notification_with(
                    "Inventory sync failed: retailer API timed out",
                    NotificationKind::Error,
                    5000,
                )
            } else {
                controller.show_notification("Inventory synced, 5 parts up to date")
            };
            if let Err(e) = result {
                tracing::warn!("Sync result not shown: {}", e);
            }
        });
    }
}
