//! Expression AST types and simplifying constructors.

use std::ops;

/// Expression AST node.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Expr {
    /// Numeric constant.
    Constant(f64),
    /// Free symbol, e.g. `R1`, `s`, `t`.
    Symbol(String),
    /// Binary operation.
    BinaryOp {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation.
    UnaryOp { op: UnaryOp, operand: Box<Expr> },
    /// Function application, also used for undefined functions such as `v1(t)`.
    Function { name: String, args: Vec<Expr> },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnaryOp {
    Neg,
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Expr::Constant(value)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    pub fn zero() -> Self {
        Expr::Constant(0.0)
    }

    pub fn one() -> Self {
        Expr::Constant(1.0)
    }

    /// The Laplace variable `s`.
    pub fn s() -> Self {
        Expr::symbol("s")
    }

    /// The time variable `t`.
    pub fn t() -> Self {
        Expr::symbol("t")
    }

    /// `j * omega`, the phasor-domain differentiation operator.
    pub fn j_omega() -> Self {
        Expr::symbol("j").mul(Expr::symbol("omega"))
    }

    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expr::Constant(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_constant() == Some(0.0)
    }

    pub fn is_one(&self) -> bool {
        self.as_constant() == Some(1.0)
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(self, rhs: Expr) -> Self {
        match (&self, &rhs) {
            (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(a + b),
            _ if self.is_zero() => rhs,
            _ if rhs.is_zero() => self,
            (
                _,
                Expr::UnaryOp {
                    op: UnaryOp::Neg,
                    operand,
                },
            ) => Expr::binary(BinaryOp::Sub, self, (**operand).clone()),
            _ => Expr::binary(BinaryOp::Add, self, rhs),
        }
    }

    pub fn sub(self, rhs: Expr) -> Self {
        match (&self, &rhs) {
            (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(a - b),
            _ if rhs.is_zero() => self,
            _ if self.is_zero() => rhs.neg(),
            _ => Expr::binary(BinaryOp::Sub, self, rhs),
        }
    }

    pub fn mul(self, rhs: Expr) -> Self {
        match (&self, &rhs) {
            (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(a * b),
            _ if self.is_zero() || rhs.is_zero() => Expr::zero(),
            _ if self.is_one() => rhs,
            _ if rhs.is_one() => self,
            (Expr::Constant(a), _) if *a == -1.0 => rhs.neg(),
            (_, Expr::Constant(b)) if *b == -1.0 => self.neg(),
            _ => Expr::binary(BinaryOp::Mul, self, rhs),
        }
    }

    pub fn div(self, rhs: Expr) -> Self {
        match (&self, &rhs) {
            (Expr::Constant(a), Expr::Constant(b)) if *b != 0.0 => Expr::Constant(a / b),
            _ if rhs.is_one() => self,
            _ if self.is_zero() && rhs.as_constant() != Some(0.0) => Expr::zero(),
            _ => Expr::binary(BinaryOp::Div, self, rhs),
        }
    }

    pub fn pow(self, exponent: Expr) -> Self {
        match (&self, &exponent) {
            (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(a.powf(*b)),
            _ if exponent.is_one() => self,
            _ if exponent.is_zero() => Expr::one(),
            _ => Expr::binary(BinaryOp::Pow, self, exponent),
        }
    }

    pub fn neg(self) -> Self {
        match self {
            Expr::Constant(v) => Expr::Constant(-v),
            Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand,
            } => *operand,
            other => Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand: Box::new(other),
            },
        }
    }

    /// Sum an iterator of expressions, starting from zero.
    pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Self {
        terms.into_iter().fold(Expr::zero(), Expr::add)
    }

    /// True if `target` occurs anywhere in this expression tree.
    pub fn contains(&self, target: &Expr) -> bool {
        if self == target {
            return true;
        }
        match self {
            Expr::Constant(_) | Expr::Symbol(_) => false,
            Expr::BinaryOp { left, right, .. } => left.contains(target) || right.contains(target),
            Expr::UnaryOp { operand, .. } => operand.contains(target),
            Expr::Function { args, .. } => args.iter().any(|a| a.contains(target)),
        }
    }

    /// Replace every occurrence of symbol `name` with `value`.
    pub fn subs(&self, name: &str, value: &Expr) -> Expr {
        match self {
            Expr::Symbol(s) if s == name => value.clone(),
            Expr::Constant(_) | Expr::Symbol(_) => self.clone(),
            Expr::BinaryOp { op, left, right } => {
                let l = left.subs(name, value);
                let r = right.subs(name, value);
                match op {
                    BinaryOp::Add => l.add(r),
                    BinaryOp::Sub => l.sub(r),
                    BinaryOp::Mul => l.mul(r),
                    BinaryOp::Div => l.div(r),
                    BinaryOp::Pow => l.pow(r),
                }
            }
            Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand,
            } => operand.subs(name, value).neg(),
            Expr::Function { name: f, args } => Expr::Function {
                name: f.clone(),
                args: args.iter().map(|a| a.subs(name, value)).collect(),
            },
        }
    }

    /// Names of all free symbols, sorted and deduplicated.
    pub fn free_symbols(&self) -> Vec<String> {
        fn walk(e: &Expr, out: &mut Vec<String>) {
            match e {
                Expr::Constant(_) => {}
                Expr::Symbol(s) => out.push(s.clone()),
                Expr::BinaryOp { left, right, .. } => {
                    walk(left, out);
                    walk(right, out);
                }
                Expr::UnaryOp { operand, .. } => walk(operand, out),
                Expr::Function { args, .. } => args.iter().for_each(|a| walk(a, out)),
            }
        }
        let mut out = Vec::new();
        walk(self, &mut out);
        out.sort();
        out.dedup();
        out
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Constant(value)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::symbol(name)
    }
}

impl ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::add(self, rhs)
    }
}

impl ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::sub(self, rhs)
    }
}

impl ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::mul(self, rhs)
    }
}

impl ops::Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::div(self, rhs)
    }
}

impl ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::neg(self)
    }
}
