//! Controller wiring the model to its views.

use std::{ops::ControlFlow, path::Path};

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::{
    game::{load_configuration, AttemptError, DrawNumber, DrawNumberImpl},
    view::{DrawNumberView, ObserverHandle, ViewEvent},
};

/// Message shown when a guess arrives after the game has ended.
pub const GAME_OVER_MESSAGE: &str = "The game is over, reset to play again.";

/// Mediator between a [`DrawNumber`] model and any number of views.
///
/// Views never touch the model directly. They push [`ViewEvent`]s through
/// their [`ObserverHandle`] and the controller fans the outcome back out to
/// every registered view.
pub struct DrawNumberApp {
    model: Box<dyn DrawNumber>,
    views: Vec<Box<dyn DrawNumberView>>,
    pending_errors: Vec<String>,
    events_tx: Option<mpsc::UnboundedSender<ViewEvent>>,
    events_rx: mpsc::UnboundedReceiver<ViewEvent>,
    shutdown_tx: watch::Sender<bool>,
    started: bool,
}

impl DrawNumberApp {
    /// Build a controller around an already constructed model.
    pub fn new(model: Box<dyn DrawNumber>, views: Vec<Box<dyn DrawNumberView>>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            model,
            views,
            pending_errors: Vec::new(),
            events_tx: Some(events_tx),
            events_rx,
            shutdown_tx,
            started: false,
        }
    }

    /// Load the game configuration at `path`, build the model and the controller.
    ///
    /// Loading problems do not fail construction. They are shown on every
    /// view once [`start`](Self::start) has run.
    pub fn from_config_file(
        path: impl AsRef<Path>,
        views: Vec<Box<dyn DrawNumberView>>,
    ) -> Result<Self> {
        let loaded = load_configuration(path);
        let model = DrawNumberImpl::new(loaded.configuration)
            .context("loader produced an unplayable configuration")?;
        info!(
            min = loaded.configuration.min(),
            max = loaded.configuration.max(),
            attempts = loaded.configuration.attempts(),
            "Game configured"
        );
        let mut app = Self::new(Box::new(model), views);
        app.pending_errors = loaded
            .notices
            .iter()
            .map(|notice| notice.to_string())
            .collect();
        Ok(app)
    }

    /// Handle through which views send events to this controller.
    ///
    /// Returns `None` once [`start`](Self::start) has run: from then on the
    /// event channel lives only as long as the handles already given out.
    pub fn observer(&self) -> Option<ObserverHandle> {
        self.events_tx
            .as_ref()
            .map(|events| ObserverHandle::new(events.clone(), self.shutdown_tx.subscribe()))
    }

    /// Read-only access to the model.
    pub fn model(&self) -> &dyn DrawNumber {
        self.model.as_ref()
    }

    /// Register the controller on every view, start them, then report any
    /// configuration problems. Subsequent calls do nothing.
    ///
    /// If a view fails to start, the views started before it are stopped
    /// and shutdown is signalled before the error is returned.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        let Some(events) = self.events_tx.take() else {
            return Ok(());
        };
        for idx in 0..self.views.len() {
            let view = &mut self.views[idx];
            view.set_observer(ObserverHandle::new(
                events.clone(),
                self.shutdown_tx.subscribe(),
            ));
            if let Err(err) = view.start() {
                warn!(view = idx, ?err, "View failed to start; stopping started views");
                self.shutdown_tx.send_replace(true);
                for started in &mut self.views[..idx] {
                    started.stop();
                }
                return Err(err);
            }
        }
        self.started = true;
        for message in std::mem::take(&mut self.pending_errors) {
            self.display_error(&message);
        }
        debug!(views = self.views.len(), "Views started");
        Ok(())
    }

    /// Submit a guess to the model and publish the outcome.
    pub fn new_attempt(&mut self, n: i32) {
        match self.model.attempt(n) {
            Ok(result) => {
                debug!(guess = n, ?result, "Publishing result");
                for view in &mut self.views {
                    view.result(result);
                }
            }
            Err(AttemptError::OutOfRange { .. }) => {
                debug!(guess = n, "Guess out of range");
                for view in &mut self.views {
                    view.number_incorrect();
                }
            }
            Err(AttemptError::GameOver(outcome)) => {
                debug!(guess = n, ?outcome, "Guess after game end");
                self.display_error(GAME_OVER_MESSAGE);
            }
        }
    }

    /// Start a new game with the same configuration.
    pub fn reset_game(&mut self) {
        self.model.reset();
    }

    /// Signal shutdown and let every view release its resources.
    pub fn quit(&mut self) {
        info!("Shutting down");
        self.shutdown_tx.send_replace(true);
        for view in &mut self.views {
            view.stop();
        }
    }

    /// `true` once [`quit`](Self::quit) has run.
    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Dispatch one view event. Returns [`ControlFlow::Break`] after a quit.
    pub fn handle(&mut self, event: ViewEvent) -> ControlFlow<()> {
        match event {
            ViewEvent::NewAttempt(n) => self.new_attempt(n),
            ViewEvent::ResetGame => self.reset_game(),
            ViewEvent::Quit => {
                self.quit();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Start the views and process their events one at a time until a quit.
    ///
    /// The loop also ends, with a shutdown, once every observer handle has
    /// been dropped.
    pub async fn run(mut self) -> Result<()> {
        self.start()?;
        while let Some(event) = self.events_rx.recv().await {
            if self.handle(event).is_break() {
                return Ok(());
            }
        }
        warn!("Every observer handle dropped without a quit request");
        self.quit();
        Ok(())
    }

    fn display_error(&mut self, message: &str) {
        for view in &mut self.views {
            view.display_error(message);
        }
    }
}
