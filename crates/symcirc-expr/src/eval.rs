//! Numeric evaluation of expressions over real and complex values.

use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;

use super::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{Error, Result};

/// Numeric field an expression can be evaluated in.
pub trait Scalar:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self> + Neg<Output = Self>
{
    fn from_real(v: f64) -> Self;

    /// Value of the builtin symbol `j`, if the field has one.
    fn imaginary_unit() -> Option<Self>;

    fn pow(self, exponent: Self) -> Self;

    fn apply(name: &str, x: Self) -> Option<Self>;
}

impl Scalar for f64 {
    fn from_real(v: f64) -> Self {
        v
    }

    fn imaginary_unit() -> Option<Self> {
        None
    }

    fn pow(self, exponent: Self) -> Self {
        self.powf(exponent)
    }

    fn apply(name: &str, x: Self) -> Option<Self> {
        Some(match name {
            "exp" => x.exp(),
            "sin" => x.sin(),
            "cos" => x.cos(),
            "tan" => x.tan(),
            "sqrt" => x.sqrt(),
            "log" | "ln" => x.ln(),
            "abs" => x.abs(),
            "Heaviside" | "u" => {
                if x >= 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            _ => return None,
        })
    }
}

impl Scalar for Complex64 {
    fn from_real(v: f64) -> Self {
        Complex64::new(v, 0.0)
    }

    fn imaginary_unit() -> Option<Self> {
        Some(Complex64::i())
    }

    fn pow(self, exponent: Self) -> Self {
        self.powc(exponent)
    }

    fn apply(name: &str, x: Self) -> Option<Self> {
        Some(match name {
            "exp" => x.exp(),
            "sin" => x.sin(),
            "cos" => x.cos(),
            "tan" => x.tan(),
            "sqrt" => x.sqrt(),
            "log" | "ln" => x.ln(),
            "abs" => Complex64::new(x.norm(), 0.0),
            _ => return None,
        })
    }
}

impl Expr {
    /// Evaluate with real symbol bindings. `pi` and `e` are builtin unless bound.
    pub fn eval(&self, bindings: &HashMap<String, f64>) -> Result<f64> {
        self.eval_in(bindings)
    }

    /// Evaluate with complex symbol bindings; `j` is the imaginary unit unless bound.
    pub fn eval_complex(&self, bindings: &HashMap<String, Complex64>) -> Result<Complex64> {
        self.eval_in(bindings)
    }

    /// Evaluate in any [`Scalar`] field.
    pub fn eval_in<T: Scalar>(&self, bindings: &HashMap<String, T>) -> Result<T> {
        match self {
            Expr::Constant(v) => Ok(T::from_real(*v)),
            Expr::Symbol(name) => {
                if let Some(v) = bindings.get(name) {
                    return Ok(*v);
                }
                match name.as_str() {
                    "pi" => Ok(T::from_real(PI)),
                    "e" => Ok(T::from_real(E)),
                    "j" => T::imaginary_unit().ok_or_else(|| Error::Unbound(name.clone())),
                    _ => Err(Error::Unbound(name.clone())),
                }
            }
            Expr::BinaryOp { op, left, right } => {
                let l = left.eval_in(bindings)?;
                let r = right.eval_in(bindings)?;
                Ok(match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.pow(r),
                })
            }
            Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand,
            } => Ok(-operand.eval_in(bindings)?),
            Expr::Function { name, args } => {
                if args.len() != 1 {
                    return Err(Error::UnknownFunction(self.to_string()));
                }
                let x = args[0].eval_in(bindings)?;
                T::apply(name, x).ok_or_else(|| Error::UnknownFunction(self.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expression;

    fn bind(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_eval_real() {
        let e = parse_expression("R1 * C1 + 2^3").unwrap();
        let v = e.eval(&bind(&[("R1", 1e3), ("C1", 1e-6)])).unwrap();
        assert!((v - 8.001).abs() < 1e-12);
    }

    #[test]
    fn test_eval_unbound_symbol() {
        let e = parse_expression("R1 + R2").unwrap();
        let err = e.eval(&bind(&[("R1", 1.0)])).unwrap_err();
        assert!(err.to_string().contains("R2"));
    }

    #[test]
    fn test_eval_unknown_function() {
        let e = Expr::function("v1", vec![Expr::t()]);
        assert!(matches!(
            e.eval(&bind(&[("t", 0.0)])),
            Err(Error::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_eval_complex_j() {
        let e = parse_expression("1 / (j * omega * C)").unwrap();
        let mut b = HashMap::new();
        b.insert("omega".to_string(), Complex64::new(1.0, 0.0));
        b.insert("C".to_string(), Complex64::new(1.0, 0.0));
        let v = e.eval_complex(&b).unwrap();
        assert!((v - Complex64::new(0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_real_eval_rejects_j() {
        let e = parse_expression("j").unwrap();
        assert!(e.eval(&HashMap::new()).is_err());
    }
}
