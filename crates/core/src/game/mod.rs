//! Game rules: configuration, loading, outcome classification and state.

pub mod configuration;
pub mod loader;
pub mod model;
pub mod result;

pub use configuration::{Configuration, ConfigurationBuilder};
pub use loader::{load_configuration, ConfigError, ConfigNotice, LoadedConfiguration};
pub use model::{AttemptError, DrawNumber, DrawNumberImpl, InconsistentConfiguration};
pub use result::DrawResult;
