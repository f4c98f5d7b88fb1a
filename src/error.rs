use std::path::Path;
use thiserror::Error;

/// Everything that can end a pipeline run. All variants are fatal; there is
/// no retry tier.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot access '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("{message}")]
    Schema { message: String },

    #[error("unrecognized answer '{input}': expected yes or no")]
    UserInput { input: String },
}

impl PipelineError {
    pub fn load(path: &Path, source: std::io::Error) -> Self {
        Self::Load {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn user_input(input: impl Into<String>) -> Self {
        Self::UserInput {
            input: input.into(),
        }
    }
}
