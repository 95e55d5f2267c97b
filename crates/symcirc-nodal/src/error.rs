//! Error types for symcirc-nodal.

use thiserror::Error;

use crate::kind::AnalysisKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Circuit(#[from] symcirc_core::Error),

    #[error(transparent)]
    Expression(#[from] symcirc_expr::Error),

    #[error("cannot put time domain equations into matrix form")]
    TimeDomain,

    #[error("component {component} is not supported in {kind} analysis")]
    Unsupported {
        component: String,
        kind: AnalysisKind,
    },

    #[error("component {component}: {waveform} source has no {kind} representation")]
    UnsupportedWaveform {
        component: String,
        waveform: String,
        kind: AnalysisKind,
    },

    #[error("unknown analysis kind: {0}")]
    UnknownKind(String),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("singular matrix")]
    SingularMatrix,
}

pub type Result<T> = std::result::Result<T, Error>;
