//! Error types for symcirc-schematic.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] symcirc_parser::Error),

    #[error(transparent)]
    Circuit(#[from] symcirc_core::Error),

    #[error("unknown component {0}")]
    UnknownComponent(String),

    #[error("cannot find start node for graph '{graph}', probably a component has an incorrect direction")]
    NoStartNode { graph: String },

    #[error("the schematic graph '{graph}' is dodgy at node {node}, probably a component is connected to the wrong node")]
    DodgyGraph { graph: String, node: String },

    #[error("no schematic drawing hints provided")]
    NoHints,

    #[error("cannot create file of type '{0}'")]
    UnsupportedFormat(String),

    #[error("unknown {what} '{value}'")]
    UnknownOption { what: &'static str, value: String },

    #[error("could not generate {} with {command}: {message}", .output.display())]
    Render {
        command: String,
        output: PathBuf,
        message: String,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
