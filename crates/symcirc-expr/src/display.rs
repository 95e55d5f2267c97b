//! Plain-text and LaTeX rendering of expressions.

use std::fmt;

use super::ast::{BinaryOp, Expr, UnaryOp};

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POW: u8 = 4;
const PREC_ATOM: u8 = 5;

fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Constant(v) if *v < 0.0 => PREC_NEG,
        Expr::Constant(_) | Expr::Symbol(_) | Expr::Function { .. } => PREC_ATOM,
        Expr::BinaryOp { op, .. } => match op {
            BinaryOp::Add | BinaryOp::Sub => PREC_ADD,
            BinaryOp::Mul | BinaryOp::Div => PREC_MUL,
            BinaryOp::Pow => PREC_POW,
        },
        Expr::UnaryOp { .. } => PREC_NEG,
    }
}

/// Format a number without a trailing `.0` for integral values.
pub(crate) fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

struct Wrapped<'a>(&'a Expr, bool);

impl fmt::Display for Wrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.1 {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(v) => write!(f, "{}", format_number(*v)),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand,
            } => write!(f, "-{}", Wrapped(operand, precedence(operand) < PREC_POW)),
            Expr::BinaryOp { op, left, right } => {
                let p = precedence(self);
                let (sym, right_strict) = match op {
                    BinaryOp::Add => (" + ", false),
                    BinaryOp::Sub => (" - ", true),
                    BinaryOp::Mul => ("*", false),
                    BinaryOp::Div => ("/", true),
                    BinaryOp::Pow => ("^", false),
                };
                let lp = precedence(left);
                let rp = precedence(right);
                let left_paren = if *op == BinaryOp::Pow { lp <= p } else { lp < p };
                let right_paren = if right_strict || *op == BinaryOp::Pow {
                    rp <= p && !(*op == BinaryOp::Pow && rp == PREC_ATOM)
                } else {
                    rp < p
                };
                write!(
                    f,
                    "{}{}{}",
                    Wrapped(left, left_paren),
                    sym,
                    Wrapped(right, right_paren)
                )
            }
        }
    }
}

const GREEK: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "kappa", "lambda",
    "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "phi", "chi", "psi", "omega",
];

/// LaTeX form of a bare name: `R1` -> `R_{1}`, `V_in` -> `V_{\mathrm{in}}`.
pub fn latex_name(name: &str) -> String {
    let (base, sub) = match name.split_once('_') {
        Some((b, s)) if !b.is_empty() => (b, s),
        _ => {
            let split = name
                .char_indices()
                .find(|(i, c)| *i > 0 && c.is_ascii_digit())
                .map(|(i, _)| i)
                .unwrap_or(name.len());
            (&name[..split], &name[split..])
        }
    };
    let base = if GREEK.contains(&base) {
        format!("\\{}", base)
    } else if base.chars().count() > 1 {
        format!("\\mathrm{{{}}}", base)
    } else {
        base.to_string()
    };
    if sub.is_empty() {
        base
    } else if sub.chars().count() > 1 && !sub.chars().all(|c| c.is_ascii_digit()) {
        format!("{}_{{\\mathrm{{{}}}}}", base, sub)
    } else {
        format!("{}_{{{}}}", base, sub)
    }
}

impl Expr {
    /// Render the expression as LaTeX math (without surrounding `$`).
    pub fn to_latex(&self) -> String {
        match self {
            Expr::Constant(v) => format_number(*v),
            Expr::Symbol(name) if name == "j" => "j".to_string(),
            Expr::Symbol(name) => latex_name(name),
            Expr::Function { name, args } => {
                let args_tex: Vec<String> = args.iter().map(Expr::to_latex).collect();
                match name.as_str() {
                    "Heaviside" => format!("u({})", args_tex.join(", ")),
                    "DiracDelta" => format!("\\delta({})", args_tex.join(", ")),
                    "exp" => format!("e^{{{}}}", args_tex.join(", ")),
                    "sqrt" => format!("\\sqrt{{{}}}", args_tex.join(", ")),
                    "Derivative" if args.len() == 2 => format!(
                        "\\frac{{\\mathrm{{d}}}}{{\\mathrm{{d}}{}}} {}",
                        args_tex[1], args_tex[0]
                    ),
                    "Integral" if args.len() == 2 => format!(
                        "\\int {} \\, \\mathrm{{d}}{}",
                        args_tex[0], args_tex[1]
                    ),
                    "sin" | "cos" | "tan" | "log" => {
                        format!("\\{}({})", name, args_tex.join(", "))
                    }
                    _ => format!("{}({})", latex_name(name), args_tex.join(", ")),
                }
            }
            Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand,
            } => {
                if precedence(operand) < PREC_POW {
                    format!("-\\left({}\\right)", operand.to_latex())
                } else {
                    format!("-{}", operand.to_latex())
                }
            }
            Expr::BinaryOp { op, left, right } => {
                let p = precedence(self);
                let wrap = |e: &Expr, strict: bool| {
                    let ep = precedence(e);
                    if ep < p || (strict && ep == p) {
                        format!("\\left({}\\right)", e.to_latex())
                    } else {
                        e.to_latex()
                    }
                };
                match op {
                    BinaryOp::Add => format!("{} + {}", wrap(left, false), wrap(right, false)),
                    BinaryOp::Sub => format!("{} - {}", wrap(left, false), wrap(right, true)),
                    BinaryOp::Mul => format!("{} {}", wrap(left, false), wrap(right, false)),
                    BinaryOp::Div => format!("\\frac{{{}}}{{{}}}", left.to_latex(), right.to_latex()),
                    BinaryOp::Pow => format!("{{{}}}^{{{}}}", wrap(left, true), right.to_latex()),
                }
            }
        }
    }
}
