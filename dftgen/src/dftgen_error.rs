// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Problems with the configuration record. These are always detected before
/// any collaborator runs and before any output file is opened.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required path-like field is empty.
    EmptyField { section: &'static str, key: &'static str },
    /// The capture cycle is outside of `[2, 10]` for a variant that uses it.
    CaptureCycleOutOfRange { fault_model: String, capture_cycle: i64 },
    /// The experimental variant was selected without a static expression.
    MissingExperimentalStatic,
    /// The configuration text could not be parsed.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyField { section, key } => {
                write!(f, "required field '{}' in [{}] is empty", key, section)
            }
            ConfigError::CaptureCycleOutOfRange {
                fault_model,
                capture_cycle,
            } => write!(
                f,
                "capture_cycle {} is outside of [2, 10] (required by fault model '{}')",
                capture_cycle, fault_model
            ),
            ConfigError::MissingExperimentalStatic => write!(
                f,
                "fault model 'experimental' requires experimental_static in [experimental_options]"
            ),
            ConfigError::Parse(msg) => write!(f, "could not parse configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub enum DftgenError {
    Config(ConfigError),
    /// An external collaborator (site generator, delay path extractor) failed
    /// or produced nothing usable.
    Collaborator {
        collaborator: &'static str,
        message: String,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DftgenError {
    pub fn collaborator(collaborator: &'static str, message: impl Into<String>) -> Self {
        DftgenError::Collaborator {
            collaborator,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DftgenError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for DftgenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DftgenError::Config(e) => write!(f, "configuration error: {}", e),
            DftgenError::Collaborator {
                collaborator,
                message,
            } => write!(f, "{} failed: {}", collaborator, message),
            DftgenError::Io { path, source } => {
                write!(f, "i/o error on '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DftgenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DftgenError::Config(e) => Some(e),
            DftgenError::Collaborator { .. } => None,
            DftgenError::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for DftgenError {
    fn from(e: ConfigError) -> Self {
        DftgenError::Config(e)
    }
}
