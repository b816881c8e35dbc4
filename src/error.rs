use std::path::PathBuf;

use thiserror::Error;

use crate::block::SpanKind;

/// Errors raised while converting Markdown or assembling pages.
///
/// Every variant aborts the conversion of the enclosing document; there is
/// no partial output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unmatched delimiter '{delimiter}' in text: {text}")]
    UnmatchedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    #[error("{kind:?} span '{text}' has no url")]
    MissingUrl { kind: SpanKind, text: String },

    #[error("heading has no text: {0}")]
    InvalidHeading(String),

    #[error("quote line is missing the '>' prefix: {0}")]
    InvalidQuote(String),

    #[error("invalid node: {0}")]
    InvalidNode(String),

    #[error("no H1 heading found in markdown")]
    MissingTitle,

    #[error("template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
