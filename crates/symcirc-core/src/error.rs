//! Error types for symcirc-core.

use thiserror::Error;

use crate::component::ComponentKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("component {name}: {kind} takes {expected} nodes, got {found}")]
    Arity {
        name: String,
        kind: ComponentKind,
        expected: usize,
        found: usize,
    },

    #[error("unknown component type for {0}")]
    UnknownKind(String),

    #[error("component {name}: {message}")]
    InvalidValue { name: String, message: String },

    #[error("component {0} has too few nodes")]
    TooFewNodes(String),

    #[error("component {component} does not have node {node}")]
    NodeNotOnComponent { component: String, node: String },

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("invalid layout directive '{directive}': {message}")]
    InvalidDirective { directive: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
