//! Error types for symcirc-parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },

    #[error("component {component}: {message}")]
    Arguments { component: String, message: String },

    #[error("component {component}: invalid value '{text}': {source}")]
    Value {
        component: String,
        text: String,
        #[source]
        source: symcirc_expr::Error,
    },

    #[error(transparent)]
    Core(#[from] symcirc_core::Error),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
