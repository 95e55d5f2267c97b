//! Analysis domains.

use std::fmt;
use std::str::FromStr;

use symcirc_expr::Expr;

use crate::error::Error;

/// Domain the equations are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnalysisKind {
    /// Time domain, unknowns `v1(t)`.
    Time,
    /// Laplace domain, unknowns `V1(s)`.
    #[default]
    Laplace,
    /// Sinusoidal steady state, unknowns `V1(jω)`.
    Phasor,
    /// DC operating point, unknowns `V1(dc)`.
    Dc,
}

impl AnalysisKind {
    /// Unknown voltage of `node`, e.g. `V1(s)`.
    pub fn node_voltage(self, prefix: &str, node: &str) -> Expr {
        match self {
            AnalysisKind::Time => Expr::function(format!("v{}{}", prefix, node), vec![Expr::t()]),
            AnalysisKind::Laplace => {
                Expr::function(format!("V{}{}", prefix, node), vec![Expr::s()])
            }
            AnalysisKind::Phasor => {
                Expr::function(format!("V{}{}", prefix, node), vec![Expr::j_omega()])
            }
            // A bare `V1` would be the default value of a source named V1.
            AnalysisKind::Dc => {
                Expr::function(format!("V{}{}", prefix, node), vec![Expr::symbol("dc")])
            }
        }
    }

    /// Whether the equations are algebraic, hence expressible as `A·y = b`.
    pub fn is_algebraic(self) -> bool {
        self != AnalysisKind::Time
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisKind::Time => "time",
            AnalysisKind::Laplace => "laplace",
            AnalysisKind::Phasor => "phasor",
            AnalysisKind::Dc => "dc",
        };
        f.write_str(name)
    }
}

impl FromStr for AnalysisKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "time" | "t" => Ok(AnalysisKind::Time),
            "laplace" | "s" => Ok(AnalysisKind::Laplace),
            "phasor" | "ac" => Ok(AnalysisKind::Phasor),
            "dc" => Ok(AnalysisKind::Dc),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_voltage_names() {
        assert_eq!(AnalysisKind::Time.node_voltage("", "1").to_string(), "v1(t)");
        assert_eq!(AnalysisKind::Laplace.node_voltage("n", "2").to_string(), "Vn2(s)");
        assert_eq!(AnalysisKind::Dc.node_voltage("", "3").to_string(), "V3(dc)");
        assert_ne!(AnalysisKind::Dc.node_voltage("", "3"), Expr::symbol("V3"));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Laplace".parse::<AnalysisKind>().unwrap(), AnalysisKind::Laplace);
        assert_eq!("dc".parse::<AnalysisKind>().unwrap(), AnalysisKind::Dc);
        assert!("z".parse::<AnalysisKind>().is_err());
    }
}
