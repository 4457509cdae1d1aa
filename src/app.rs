use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;
use tokio::sync::watch;

use crate::config::AppConfig;
use crate::theme::Theme;
use crate::typing::TypingAnimator;

/// Caret blink half-period in milliseconds
const CARET_BLINK_MS: u128 = 500;

/// Status messages clear after this many seconds
const STATUS_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// Host view for the hero banner.
///
/// Mounting starts the role animator; `unmount` (or dropping the app) stops it.
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub popup: Popup,

    // Latest text pushed by the animator
    pub role_text: String,
    role_rx: watch::Receiver<String>,
    animator: TypingAnimator,

    caret_epoch: Instant,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let theme = Theme::from_config(&config.theme);
        let (animator, role_rx) =
            TypingAnimator::start_watch(config.phrases.clone(), config.timings())?;
        let role_text = role_rx.borrow().clone();

        Ok(Self {
            config,
            theme,
            popup: Popup::None,
            role_text,
            role_rx,
            animator,
            caret_epoch: Instant::now(),
            status_message: None,
            status_message_time: None,
        })
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup == Popup::Help {
            if matches!(key.code, KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Esc) {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('h') | KeyCode::Char('?') => self.popup = Popup::Help,
            KeyCode::Char('r') => self.restart()?,
            _ => {}
        }
        Ok(())
    }

    /// Stop the running animator and start a fresh one from the first phrase
    fn restart(&mut self) -> Result<()> {
        self.animator.stop();

        let (animator, role_rx) =
            TypingAnimator::start_watch(self.config.phrases.clone(), self.config.timings())?;
        self.animator = animator;
        self.role_rx = role_rx;
        self.role_text = self.role_rx.borrow_and_update().clone();
        self.caret_epoch = Instant::now();

        self.set_status("Animation restarted");
        Ok(())
    }

    pub fn tick(&mut self) {
        // Pick up the latest typed text; a closed channel still holds the final value
        if self.role_rx.has_changed().unwrap_or(true) {
            self.role_text = self.role_rx.borrow_and_update().clone();
        }

        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_TIMEOUT_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn caret_visible(&self) -> bool {
        (self.caret_epoch.elapsed().as_millis() / CARET_BLINK_MS) % 2 == 0
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Tear down the view; no role updates arrive after this
    pub fn unmount(&mut self) {
        self.animator.stop();
    }
}
