//! Netlist parser for symcirc.
//!
//! Each line describes one component:
//!
//! ```text
//! Name N1 N2 [N3 N4] [values] [; directive, key=value, ...]
//! ```
//!
//! The component type comes from the name prefix (`R`, `C`, `L`, `V`, `I`,
//! `E`, `G`, `F`, `H`, `TF`, `K`, `W`, `O`, `P`). Values are bare (`4.7k`) or
//! braced (`{V0 / s}`). Text after the first `;` outside braces holds layout
//! directives.
//!
//! ```
//! use symcirc_parser::parse_line;
//! use symcirc_core::ComponentKind;
//!
//! let c = parse_line("R1 1 2 1k; right").unwrap().unwrap();
//! assert_eq!(c.kind(), ComponentKind::Resistor);
//! ```

pub mod error;
mod lexer;
mod parser;

pub use error::{Error, Result};
pub use lexer::{Lexer, SplitLine, Token, split_directives};
pub use parser::{is_blank_or_comment, parse_line, parse_netlist};

use symcirc_core::Circuit;

/// Parse a netlist into a [`Circuit`], later duplicates replacing earlier ones.
pub fn parse_circuit(text: &str) -> Result<Circuit> {
    Ok(parse_netlist(text)?.into_iter().collect())
}
