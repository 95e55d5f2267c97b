//! Core data structures for symcirc.
//!
//! This crate provides the component records produced by the netlist parser,
//! their layout directives, and the [`CircuitGraph`] that the nodal analysis
//! walks.

pub mod circuit;
pub mod component;
pub mod error;
pub mod graph;
pub mod hints;
pub mod node;
pub mod sets;

pub use circuit::Circuit;
pub use component::{Component, ComponentKind, ComponentValue, Waveform};
pub use error::{Error, Result};
pub use graph::CircuitGraph;
pub use hints::{Axis, Direction, Label, LabelKind, LabelSuppression, LayoutHints};
pub use node::Node;
pub use sets::DisjointSets;
