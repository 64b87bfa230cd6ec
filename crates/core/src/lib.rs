#![warn(clippy::all, missing_docs)]

//! Core logic for the guess-the-number game.
//!
//! This crate hosts the game configuration and its loader, the model,
//! the view/observer contracts and the controller that wires them
//! together. Frontends only need to implement [`DrawNumberView`].

pub mod app;
pub mod config;
pub mod game;
pub mod view;

pub use app::DrawNumberApp;
pub use config::AppConfig;
pub use game::{
    AttemptError, Configuration, ConfigurationBuilder, DrawNumber, DrawNumberImpl, DrawResult,
    InconsistentConfiguration,
};
pub use view::{DrawNumberObserver, DrawNumberView, ObserverHandle, ViewEvent};
