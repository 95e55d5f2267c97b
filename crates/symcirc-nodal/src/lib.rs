//! Symbolic nodal analysis for symcirc.
//!
//! [`NodalAnalysis`] writes one equation per non-reference node of a
//! [`symcirc_core::CircuitGraph`]: a pinning constraint where a voltage source
//! is attached, a KCL current sum otherwise. In the algebraic domains the set
//! can be turned into [`MatrixEquations`] and solved numerically.

mod analysis;
pub mod error;
mod kind;
mod matrix;
mod models;

pub use analysis::{Equation, NodalAnalysis, NodalOptions};
pub use error::{Error, Result};
pub use kind::AnalysisKind;
pub use matrix::{MatrixEquations, solve_dense};
pub use models::{BranchModel, IdealModels, NodeVoltages, source_value};
