//! Submit/retry state machine: `idle → loading → results | error`.
//!
//! - One request in flight: a new submission cancels the previous one and a
//!   superseded request never publishes its outcome (latest wins).
//! - An error returns to idle after the configured display window; the timer
//!   dies with its generation, so it can never clear a newer state.
//! - State changes are published on a `watch` channel; rendering them is
//!   [`crate::render::view`]'s job.

use crate::core::config::Settings;
use crate::core::error::{AppError, AppResult};
use crate::core::validation::validate_instagram_url;
use crate::download::media::MediaResult;
use crate::download::source::{MediaExtractor, RelayExtractor};
use crate::render::{self, Results};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use url::Url;

/// What the session is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading { url: Url },
    Results(Results),
    Error { category: &'static str, message: String },
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SessionState::Error { .. })
    }
}

/// Which submission currently owns the screen.
struct Control {
    generation: u64,
    cancel: CancellationToken,
}

struct Inner {
    extractor: Arc<dyn MediaExtractor>,
    error_display: Duration,
    state: watch::Sender<SessionState>,
    control: Mutex<Control>,
}

impl Inner {
    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Publish `state` if `generation` is still current.
    fn publish(&self, generation: u64, state: SessionState) -> bool {
        let control = self.control();
        if control.generation != generation {
            return false;
        }
        self.state.send_replace(state);
        true
    }
}

/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    pub fn new(extractor: Arc<dyn MediaExtractor>, error_display: Duration) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            inner: Arc::new(Inner {
                extractor,
                error_display,
                state,
                control: Mutex::new(Control {
                    generation: 0,
                    cancel: CancellationToken::new(),
                }),
            }),
        }
    }

    /// Session backed by the configured relay extractor.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let extractor = RelayExtractor::from_settings(settings)?;
        Ok(Self::new(Arc::new(extractor), settings.error_display()))
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Submit raw user input.
    ///
    /// Returns the final state this submission published, or `None` when a
    /// later submission (or a retry) superseded it.
    pub async fn submit(&self, input: &str) -> Option<SessionState> {
        let (generation, cancel) = self.begin();

        let url = match validate_instagram_url(input) {
            Ok(url) => url,
            Err(err) => return self.fail(generation, cancel, err.into()),
        };

        if !self.inner.publish(generation, SessionState::Loading { url: url.clone() }) {
            return None;
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("Request for {} superseded", url);
                return None;
            }
            outcome = self.fetch(&url) => outcome,
        };

        match outcome {
            Ok(results) => {
                let state = SessionState::Results(results);
                self.inner.publish(generation, state.clone()).then_some(state)
            }
            Err(err) => self.fail(generation, cancel, err),
        }
    }

    /// Drop whatever is on screen (and in flight) and go back to idle.
    pub fn retry(&self) {
        let (generation, _) = self.begin();
        self.inner.publish(generation, SessionState::Idle);
    }

    /// Start a new generation, cancelling the previous one.
    fn begin(&self) -> (u64, CancellationToken) {
        let mut control = self.inner.control();
        control.cancel.cancel();
        control.generation += 1;
        control.cancel = CancellationToken::new();
        (control.generation, control.cancel.clone())
    }

    async fn fetch(&self, url: &Url) -> AppResult<Results> {
        let payload = self.inner.extractor.extract(url).await?;
        let media = MediaResult::from_value(payload)?;
        log::info!(
            "{}: resolved {} into {} item(s)",
            self.inner.extractor.name(),
            url,
            media.len()
        );
        Ok(render::results(&media))
    }

    fn fail(&self, generation: u64, cancel: CancellationToken, err: AppError) -> Option<SessionState> {
        log::error!("Download error ({}): {}", err.category(), err);
        let state = SessionState::Error {
            category: err.category(),
            message: err.user_message(),
        };
        if !self.inner.publish(generation, state.clone()) {
            return None;
        }
        self.schedule_error_expiry(generation, cancel);
        Some(state)
    }

    fn schedule_error_expiry(&self, generation: u64, cancel: CancellationToken) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(inner.error_display) => {
                    if inner.publish(generation, SessionState::Idle) {
                        log::debug!("Error display window elapsed, back to idle");
                    }
                }
            }
        });
    }
}
