//! Decomposition of an expression into a linear combination of unknowns.

use super::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{Error, Result};

/// `sum(coefficients[k] * unknowns[k]) + constant`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearForm {
    pub coefficients: Vec<Expr>,
    pub constant: Expr,
}

impl LinearForm {
    fn constant(n: usize, value: Expr) -> Self {
        Self {
            coefficients: vec![Expr::zero(); n],
            constant: value,
        }
    }

    fn unit(n: usize, k: usize) -> Self {
        let mut coefficients = vec![Expr::zero(); n];
        coefficients[k] = Expr::one();
        Self {
            coefficients,
            constant: Expr::zero(),
        }
    }

    fn is_constant(&self) -> bool {
        self.coefficients.iter().all(Expr::is_zero)
    }

    fn zip_with(self, other: LinearForm, f: impl Fn(Expr, Expr) -> Expr) -> Self {
        Self {
            coefficients: self
                .coefficients
                .into_iter()
                .zip(other.coefficients)
                .map(|(a, b)| f(a, b))
                .collect(),
            constant: f(self.constant, other.constant),
        }
    }

    fn map(self, f: impl Fn(Expr) -> Expr) -> Self {
        Self {
            coefficients: self.coefficients.into_iter().map(&f).collect(),
            constant: f(self.constant),
        }
    }
}

impl Expr {
    /// Split this expression into coefficients of `unknowns` plus a remainder.
    ///
    /// Unknowns are matched structurally, so an undefined function such as
    /// `V1(s)` can serve as an unknown.
    pub fn linear_coefficients(&self, unknowns: &[Expr]) -> Result<LinearForm> {
        let n = unknowns.len();
        if let Some(k) = unknowns.iter().position(|u| u == self) {
            return Ok(LinearForm::unit(n, k));
        }
        if !unknowns.iter().any(|u| self.contains(u)) {
            return Ok(LinearForm::constant(n, self.clone()));
        }

        match self {
            Expr::BinaryOp { op, left, right } => {
                let l = left.linear_coefficients(unknowns)?;
                let r = right.linear_coefficients(unknowns)?;
                match op {
                    BinaryOp::Add => Ok(l.zip_with(r, Expr::add)),
                    BinaryOp::Sub => Ok(l.zip_with(r, Expr::sub)),
                    BinaryOp::Mul if l.is_constant() => {
                        let scale = l.constant;
                        Ok(r.map(|c| scale.clone().mul(c)))
                    }
                    BinaryOp::Mul if r.is_constant() => {
                        let scale = r.constant;
                        Ok(l.map(|c| c.mul(scale.clone())))
                    }
                    BinaryOp::Div if r.is_constant() => {
                        let denom = r.constant;
                        Ok(l.map(|c| c.div(denom.clone())))
                    }
                    _ => Err(Error::Nonlinear(self.to_string())),
                }
            }
            Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand,
            } => Ok(operand.linear_coefficients(unknowns)?.map(Expr::neg)),
            _ => Err(Error::Nonlinear(self.to_string())),
        }
    }
}
