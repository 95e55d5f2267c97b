//! Symbolic expressions for symcirc.
//!
//! A deliberately small computer-algebra layer: expressions are trees of
//! constants, symbols, arithmetic and function applications. Construction
//! through [`Expr::add`], [`Expr::mul`] and friends folds constants and drops
//! neutral elements, which keeps generated circuit equations readable.
//!
//! ```
//! use symcirc_expr::{parse_expression, Expr};
//!
//! let e = parse_expression("V1 / s").unwrap();
//! assert_eq!(e, Expr::symbol("V1") / Expr::s());
//! assert_eq!(e.to_latex(), "\\frac{V_{1}}{s}");
//! ```

mod ast;
mod display;
pub mod error;
mod eval;
mod linear;
mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use display::latex_name;
pub use error::{Error, Result};
pub use eval::Scalar;
pub use linear::LinearForm;
pub use parser::parse_expression;
