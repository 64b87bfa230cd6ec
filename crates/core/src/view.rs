//! Contracts between the controller and its views.

use tokio::sync::{mpsc, watch};
use tracing::trace;

use crate::game::DrawResult;

/// Events a view raises on behalf of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// The user submitted a guess.
    NewAttempt(i32),
    /// The user asked for a fresh game.
    ResetGame,
    /// The user asked to leave.
    Quit,
}

/// Receiver of user intents raised by a view.
pub trait DrawNumberObserver {
    /// A new guess was submitted.
    fn new_attempt(&self, n: i32);
    /// A new game was requested.
    fn reset_game(&self);
    /// The application should shut down.
    fn quit(&self);
}

/// Presentation side of the game.
///
/// Every method is invoked from the controller, one call at a time.
pub trait DrawNumberView: Send {
    /// Register where user intents are sent. Called once, before [`start`](Self::start).
    fn set_observer(&mut self, observer: ObserverHandle);

    /// Acquire presentation resources and begin accepting input.
    fn start(&mut self) -> anyhow::Result<()>;

    /// Show the outcome of an accepted attempt.
    fn result(&mut self, result: DrawResult);

    /// Tell the user the last guess was outside the allowed range.
    fn number_incorrect(&mut self);

    /// Show a recoverable error.
    fn display_error(&mut self, message: &str);

    /// Release presentation resources. Called once on shutdown.
    fn stop(&mut self) {}
}

/// Cloneable handle through which views reach the controller.
///
/// Events are queued and processed sequentially by the controller's run loop.
#[derive(Debug, Clone)]
pub struct ObserverHandle {
    events: mpsc::UnboundedSender<ViewEvent>,
    shutdown: watch::Receiver<bool>,
}

impl ObserverHandle {
    /// Wrap an event sender and a shutdown flag.
    ///
    /// [`DrawNumberApp`](crate::DrawNumberApp) builds these for its views;
    /// frontends only need this to drive a view without a controller.
    pub fn new(
        events: mpsc::UnboundedSender<ViewEvent>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self { events, shutdown }
    }

    /// `true` once the controller has begun shutting down.
    ///
    /// Threads owned by a view poll this to end themselves.
    pub fn is_shutdown(&self) -> bool {
        *self.shutdown.borrow()
    }

    fn send(&self, event: ViewEvent) {
        if self.events.send(event).is_err() {
            trace!(?event, "Controller gone; dropping view event");
        }
    }
}

impl DrawNumberObserver for ObserverHandle {
    fn new_attempt(&self, n: i32) {
        self.send(ViewEvent::NewAttempt(n));
    }

    fn reset_game(&self) {
        self.send(ViewEvent::ResetGame);
    }

    fn quit(&self) {
        self.send(ViewEvent::Quit);
    }
}
