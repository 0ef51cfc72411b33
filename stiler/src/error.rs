use thiserror::Error;

use crate::core::DesktopId;

#[derive(Debug, Error)]
pub enum StilerError {
    #[error("Invalid configuration: {}", .0.join("; "))]
    Config(Vec<String>),
    #[error("No windows to arrange on desktop {desktop}")]
    EmptyWindowSet { desktop: DesktopId },
    #[error("Unknown layout strategy '{0}'")]
    UnknownStrategy(String),
    #[error("{program} failed: {message}")]
    ExternalQuery { program: String, message: String },
}

impl StilerError {
    pub fn external(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalQuery {
            program: program.into(),
            message: message.into(),
        }
    }
}
