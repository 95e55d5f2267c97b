//! Matrix form `A·y = b` of a set of nodal equations.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use nalgebra::{ComplexField, DMatrix, DVector};
use num_complex::Complex64;
use symcirc_expr::{Expr, Scalar};

use crate::analysis::Equation;
use crate::error::{Error, Result};
use crate::kind::AnalysisKind;

/// Symbolic linear system. Rows follow the equation order, columns the unknowns.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixEquations {
    pub a: DMatrix<Expr>,
    pub y: DVector<Expr>,
    pub b: DVector<Expr>,
}

impl MatrixEquations {
    /// Linearize `equations` over `unknowns`.
    pub fn from_equations(
        kind: AnalysisKind,
        equations: &BTreeMap<String, Equation>,
        unknowns: Vec<Expr>,
    ) -> Result<Self> {
        if !kind.is_algebraic() {
            return Err(Error::TimeDomain);
        }

        let rows = equations.len();
        let cols = unknowns.len();
        let mut a = DMatrix::from_element(rows, cols, Expr::zero());
        let mut b = DVector::from_element(rows, Expr::zero());

        for (i, equation) in equations.values().enumerate() {
            let form = equation.residual().linear_coefficients(&unknowns)?;
            for (j, coefficient) in form.coefficients.into_iter().enumerate() {
                a[(i, j)] = coefficient;
            }
            b[i] = form.constant.neg();
        }

        Ok(Self {
            a,
            y: DVector::from_vec(unknowns),
            b,
        })
    }

    /// Substitute numeric values for every symbol in `A` and `b`.
    pub fn evaluate_in<T>(&self, bindings: &HashMap<String, T>) -> Result<(DMatrix<T>, DVector<T>)>
    where
        T: Scalar + nalgebra::Scalar,
    {
        let (rows, cols) = self.a.shape();
        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                values.push(self.a[(i, j)].eval_in(bindings)?);
            }
        }
        let a = DMatrix::from_row_slice(rows, cols, &values);

        let b = self
            .b
            .iter()
            .map(|e| e.eval_in(bindings))
            .collect::<std::result::Result<Vec<T>, _>>()?;

        Ok((a, DVector::from_vec(b)))
    }

    pub fn evaluate(&self, bindings: &HashMap<String, f64>) -> Result<(DMatrix<f64>, DVector<f64>)> {
        self.evaluate_in(bindings)
    }

    /// Numeric node voltages for real-valued bindings.
    pub fn solve(&self, bindings: &HashMap<String, f64>) -> Result<DVector<f64>> {
        let (a, b) = self.evaluate_in(bindings)?;
        solve_dense(&a, &b)
    }

    /// Numeric node voltages for complex bindings, e.g. `s = jω` or phasors.
    pub fn solve_complex(&self, bindings: &HashMap<String, Complex64>) -> Result<DVector<Complex64>> {
        let (a, b) = self.evaluate_in(bindings)?;
        solve_dense(&a, &b)
    }
}

impl fmt::Display for MatrixEquations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.a.shape();
        for i in 0..rows {
            let row: Vec<String> = (0..cols).map(|j| self.a[(i, j)].to_string()).collect();
            let y = self.y.get(i).map(|y| y.to_string()).unwrap_or_default();
            writeln!(f, "[{}] [{}] = [{}]", row.join(", "), y, self.b[i])?;
        }
        Ok(())
    }
}

/// Solve `a·x = b` with an LU decomposition.
pub fn solve_dense<T: ComplexField>(a: &DMatrix<T>, b: &DVector<T>) -> Result<DVector<T>> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: b.len(),
        });
    }

    a.clone().lu().solve(b).ok_or(Error::SingularMatrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn test_solve_simple() {
        // 2x + y = 5
        // x + 3y = 6
        let a = dmatrix![2.0, 1.0; 1.0, 3.0];
        let b = dvector![5.0, 6.0];

        let x = solve_dense(&a, &b).unwrap();

        assert!((x[0] - 1.8).abs() < 1e-10);
        assert!((x[1] - 1.4).abs() < 1e-10);
    }

    #[test]
    fn test_singular_matrix() {
        let a = dmatrix![1.0, 2.0; 2.0, 4.0];
        let b = dvector![1.0, 2.0];
        assert!(matches!(solve_dense(&a, &b), Err(Error::SingularMatrix)));
    }

    #[test]
    fn test_time_domain_rejected() {
        let equations = BTreeMap::new();
        assert!(matches!(
            MatrixEquations::from_equations(AnalysisKind::Time, &equations, vec![]),
            Err(Error::TimeDomain)
        ));
    }

    #[test]
    fn test_linearize_pinned_and_kcl() {
        let v1 = Expr::symbol("V1");
        let v2 = Expr::symbol("V2");
        let mut equations = BTreeMap::new();
        equations.insert(
            "1".to_string(),
            Equation {
                lhs: v1.clone(),
                rhs: Expr::symbol("Vs"),
            },
        );
        equations.insert(
            "2".to_string(),
            Equation {
                lhs: (v2.clone() - v1.clone()) / Expr::symbol("R1") + v2.clone() / Expr::symbol("R2"),
                rhs: Expr::zero(),
            },
        );

        let m = MatrixEquations::from_equations(AnalysisKind::Dc, &equations, vec![v1, v2]).unwrap();
        assert!(m.a[(0, 0)].is_one());
        assert!(m.a[(0, 1)].is_zero());
        assert_eq!(m.b[0], Expr::symbol("Vs"));
        assert!(m.b[1].is_zero());

        let bindings: HashMap<String, f64> = [("Vs", 10.0), ("R1", 1.0), ("R2", 4.0)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        let x = m.solve(&bindings).unwrap();
        assert!((x[0] - 10.0).abs() < 1e-12);
        assert!((x[1] - 8.0).abs() < 1e-12);
    }
}
