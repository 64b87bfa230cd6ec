//! Reader for the three-line game configuration file.
//!
//! The file holds one `<label>: <integer>` entry per line, in the fixed
//! order minimum, maximum, attempts:
//!
//! ```text
//! minimum: 1
//! maximum: 100
//! attempts: 10
//! ```
//!
//! Each line is split on the characters of its own label (plus `:` and
//! space) and the first remaining token is taken as the value, so any
//! prefix made of those characters is tolerated.

use std::{
    fmt, fs,
    num::ParseIntError,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use super::configuration::{Configuration, ConfigurationBuilder};

const MIN_LABEL: &str = "minimum: ";
const MAX_LABEL: &str = "maximum: ";
const ATTEMPTS_LABEL: &str = "attempts: ";

/// Failure while reading or tokenizing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file ended before the expected line.
    #[error("missing `{label}` line")]
    MissingLine {
        /// Label of the absent entry.
        label: &'static str,
    },
    /// The line held nothing but delimiter characters.
    #[error("no value on `{label}` line")]
    MissingValue {
        /// Label of the empty entry.
        label: &'static str,
    },
    /// The value token is not an integer.
    #[error("invalid `{label}` value {value:?}: {source}")]
    InvalidValue {
        /// Label of the malformed entry.
        label: &'static str,
        /// Token that failed to parse.
        value: String,
        /// Integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Problem reported to the views while loading the configuration.
#[derive(Debug)]
pub enum ConfigNotice {
    /// The file could not be read or parsed; defaults were used.
    ReadFailed(ConfigError),
    /// The file parsed but described an unplayable game; defaults were used.
    Inconsistent(Configuration),
}

impl fmt::Display for ConfigNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigNotice::ReadFailed(err) => {
                write!(f, "Error reading config file, using default values. {err}")
            }
            ConfigNotice::Inconsistent(_) => f.write_str(
                "The configurations read from the file are invalid, using default values.",
            ),
        }
    }
}

/// Configuration together with the notices raised while producing it.
#[derive(Debug)]
pub struct LoadedConfiguration {
    /// Configuration the game should run with. Always consistent.
    pub configuration: Configuration,
    /// Problems encountered, in the order they occurred.
    pub notices: Vec<ConfigNotice>,
}

/// Parse the three configuration lines into a builder.
///
/// Lines after the third are ignored.
pub fn parse_configuration(input: &str) -> Result<ConfigurationBuilder, ConfigError> {
    let mut lines = input.lines();
    let mut builder = ConfigurationBuilder::default();
    builder
        .set_min(read_value(lines.next(), MIN_LABEL)?)
        .set_max(read_value(lines.next(), MAX_LABEL)?)
        .set_attempts(read_value(lines.next(), ATTEMPTS_LABEL)?);
    Ok(builder)
}

/// Load the configuration at `path`, substituting defaults on any failure.
///
/// Never fails: unreadable or malformed files and inconsistent values are
/// reported through [`LoadedConfiguration::notices`].
pub fn load_configuration(path: impl AsRef<Path>) -> LoadedConfiguration {
    let path = path.as_ref();
    let mut notices = Vec::new();

    let builder = match read_builder(path) {
        Ok(builder) => builder,
        Err(err) => {
            warn!(path = %path.display(), %err, "Falling back to default configuration");
            notices.push(ConfigNotice::ReadFailed(err));
            ConfigurationBuilder::default()
        }
    };

    let configuration = builder.build();
    if configuration.is_consistent() {
        debug!(?configuration, "Configuration loaded");
        return LoadedConfiguration {
            configuration,
            notices,
        };
    }

    warn!(?configuration, "Inconsistent configuration; using defaults");
    notices.push(ConfigNotice::Inconsistent(configuration));
    LoadedConfiguration {
        configuration: ConfigurationBuilder::default().build(),
        notices,
    }
}

fn read_builder(path: &Path) -> Result<ConfigurationBuilder, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_configuration(&content)
}

fn read_value(line: Option<&str>, label: &'static str) -> Result<i32, ConfigError> {
    let line = line.ok_or(ConfigError::MissingLine { label })?;
    let token = line
        .split(|ch| label.contains(ch))
        .find(|token| !token.is_empty())
        .ok_or(ConfigError::MissingValue { label })?;
    token
        .parse::<i32>()
        .map_err(|source| ConfigError::InvalidValue {
            label,
            value: token.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let dir = tempdir()?;
        let path = dir.path().join("config.yml");
        fs::write(&path, content)?;
        Ok((dir, path))
    }

    #[test]
    fn parses_well_formed_file() -> Result<()> {
        let built = parse_configuration("minimum: 1\nmaximum: 100\nattempts: 3\n")?.build();
        assert_eq!((built.min(), built.max(), built.attempts()), (1, 100, 3));
        Ok(())
    }

    #[test]
    fn tolerates_prefixes_made_of_label_characters() -> Result<()> {
        let built =
            parse_configuration("  mini: -4\nmax :: 12\n  attempts:5  \nignored trailing line")?
                .build();
        assert_eq!((built.min(), built.max(), built.attempts()), (-4, 12, 5));
        Ok(())
    }

    #[test]
    fn reports_each_parse_failure() {
        assert!(matches!(
            parse_configuration("minimum: 1\nmaximum: 100\n"),
            Err(ConfigError::MissingLine { label: ATTEMPTS_LABEL })
        ));
        assert!(matches!(
            parse_configuration("minimum: \nmaximum: 100\nattempts: 3"),
            Err(ConfigError::MissingValue { label: MIN_LABEL })
        ));
        match parse_configuration("minimum: 1\nmaximum: lots\nattempts: 3") {
            Err(ConfigError::InvalidValue { label, value, .. }) => {
                assert_eq!(label, MAX_LABEL);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn loads_consistent_file_without_notices() -> Result<()> {
        let (_dir, path) = write_config("minimum: 1\nmaximum: 100\nattempts: 3\n")?;
        let loaded = load_configuration(&path);
        assert!(loaded.notices.is_empty());
        assert_eq!(loaded.configuration.attempts(), 3);
        Ok(())
    }

    #[test]
    fn missing_file_yields_defaults_and_one_notice() -> Result<()> {
        let dir = tempdir()?;
        let loaded = load_configuration(dir.path().join("absent.yml"));
        assert_eq!(loaded.configuration, Configuration::default());
        assert_eq!(loaded.notices.len(), 1);
        assert!(matches!(
            loaded.notices[0],
            ConfigNotice::ReadFailed(ConfigError::Io { .. })
        ));
        assert!(loaded.notices[0]
            .to_string()
            .starts_with("Error reading config file, using default values."));
        Ok(())
    }

    #[test]
    fn malformed_file_yields_defaults_and_one_notice() -> Result<()> {
        let (_dir, path) = write_config("minimum: one\nmaximum: 100\nattempts: 3\n")?;
        let loaded = load_configuration(&path);
        assert_eq!(loaded.configuration, Configuration::default());
        assert_eq!(loaded.notices.len(), 1);
        assert!(matches!(loaded.notices[0], ConfigNotice::ReadFailed(_)));
        Ok(())
    }

    #[test]
    fn inconsistent_file_yields_defaults_and_distinct_notice() -> Result<()> {
        let (_dir, path) = write_config("minimum: 10\nmaximum: 5\nattempts: 3\n")?;
        let loaded = load_configuration(&path);
        assert_eq!(loaded.configuration, Configuration::default());
        assert_eq!(loaded.notices.len(), 1);
        assert!(matches!(loaded.notices[0], ConfigNotice::Inconsistent(_)));
        assert_eq!(
            loaded.notices[0].to_string(),
            "The configurations read from the file are invalid, using default values."
        );
        Ok(())
    }
}
