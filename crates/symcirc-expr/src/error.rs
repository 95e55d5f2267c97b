//! Error types for symcirc-expr.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("expression is not linear in the unknowns: {0}")]
    Nonlinear(String),

    #[error("unbound symbol: {0}")]
    Unbound(String),

    #[error("cannot evaluate function: {0}")]
    UnknownFunction(String),
}

pub type Result<T> = std::result::Result<T, Error>;
