//! Drawing directives attached to a netlist line after `;`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Drawing direction of a component, from its first to its second node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One of the two independent placement axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// +1 when the second node lies further along the axis (right or up).
    pub fn sign(self) -> f64 {
        match self {
            Direction::Right | Direction::Up => 1.0,
            Direction::Left | Direction::Down => -1.0,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// What a label annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Component,
    Voltage,
    Current,
}

const COMPONENT_LABEL_KEYS: &[&str] = &["l", "l^", "l_"];
const VOLTAGE_LABEL_KEYS: &[&str] = &["v", "vr", "v_", "v^", "v_>", "v_<", "v^>", "v^<"];
const CURRENT_LABEL_KEYS: &[&str] = &[
    "i", "ir", "i_", "i^", "i_>", "i_<", "i^>", "i^<", "i>_", "i<_", "i>^", "i<^",
];

/// An explicit label; `key` keeps the circuitikz placement suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub kind: LabelKind,
    pub key: String,
    pub text: String,
}

/// Which automatic labels to leave off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelSuppression {
    pub ids: bool,
    pub values: bool,
}

impl LabelSuppression {
    pub fn all(&self) -> bool {
        self.ids && self.values
    }
}

/// Parsed drawing directives for one component.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutHints {
    pub direction: Option<Direction>,
    /// Minimum span in grid units.
    pub size: f64,
    pub labels: Vec<Label>,
    pub suppress: LabelSuppression,
    /// Unrecognised `key[=value]` pairs, forwarded to the renderer verbatim.
    pub passthrough: Vec<(String, Option<String>)>,
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self {
            direction: None,
            size: 1.0,
            labels: Vec::new(),
            suppress: LabelSuppression::default(),
            passthrough: Vec::new(),
        }
    }
}

impl LayoutHints {
    pub fn is_empty(&self) -> bool {
        *self == LayoutHints::default()
    }

    fn parse_size(part: &str, text: &str) -> Result<f64> {
        let size: f64 = text.trim().parse().map_err(|_| Error::InvalidDirective {
            directive: part.to_string(),
            message: format!("'{}' is not a number", text.trim()),
        })?;
        if !size.is_finite() {
            return Err(Error::InvalidDirective {
                directive: part.to_string(),
                message: "size must be finite".to_string(),
            });
        }
        Ok(size)
    }
}

impl FromStr for LayoutHints {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut hints = LayoutHints::default();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (key, arg) = match part.split_once('=') {
                Some((k, v)) => (k.trim(), Some(v.trim())),
                None => (part, None),
            };

            if let Some(dir) = Direction::from_keyword(key) {
                hints.direction = Some(dir);
                if let Some(arg) = arg {
                    hints.size = Self::parse_size(part, arg)?;
                }
                continue;
            }

            match (key, arg) {
                ("size", Some(arg)) => hints.size = Self::parse_size(part, arg)?,
                ("size", None) => {
                    return Err(Error::InvalidDirective {
                        directive: part.to_string(),
                        message: "size needs a value".to_string(),
                    });
                }
                ("nolabels", None) => {
                    hints.suppress.ids = true;
                    hints.suppress.values = true;
                }
                ("noid", None) => hints.suppress.ids = true,
                ("novalue", None) => hints.suppress.values = true,
                (key, Some(text)) if COMPONENT_LABEL_KEYS.contains(&key) => {
                    hints.labels.push(Label {
                        kind: LabelKind::Component,
                        key: key.to_string(),
                        text: text.to_string(),
                    })
                }
                (key, Some(text)) if VOLTAGE_LABEL_KEYS.contains(&key) => {
                    hints.labels.push(Label {
                        kind: LabelKind::Voltage,
                        key: key.to_string(),
                        text: text.to_string(),
                    })
                }
                (key, Some(text)) if CURRENT_LABEL_KEYS.contains(&key) => {
                    hints.labels.push(Label {
                        kind: LabelKind::Current,
                        key: key.to_string(),
                        text: text.to_string(),
                    })
                }
                (key, arg) => hints
                    .passthrough
                    .push((key.to_string(), arg.map(str::to_string))),
            }
        }

        Ok(hints)
    }
}

impl fmt::Display for LayoutHints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(dir) = self.direction {
            parts.push(dir.to_string());
        }
        if self.size != 1.0 {
            parts.push(format!("size={}", self.size));
        }
        for label in &self.labels {
            parts.push(format!("{}={}", label.key, label.text));
        }
        if self.suppress.all() {
            parts.push("nolabels".to_string());
        } else if self.suppress.ids {
            parts.push("noid".to_string());
        } else if self.suppress.values {
            parts.push("novalue".to_string());
        }
        for (key, arg) in &self.passthrough {
            match arg {
                Some(arg) => parts.push(format!("{}={}", key, arg)),
                None => parts.push(key.clone()),
            }
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_and_size() {
        let hints: LayoutHints = "down, size=2".parse().unwrap();
        assert_eq!(hints.direction, Some(Direction::Down));
        assert_eq!(hints.size, 2.0);
    }

    #[test]
    fn test_size_modifying_direction() {
        let hints: LayoutHints = "right=2.5".parse().unwrap();
        assert_eq!(hints.direction, Some(Direction::Right));
        assert_eq!(hints.size, 2.5);
    }

    #[test]
    fn test_labels_and_passthrough() {
        let hints: LayoutHints = "up, l=$R$, v^=V_1, i_>=I, color=blue, dashed".parse().unwrap();
        assert_eq!(hints.labels.len(), 3);
        assert_eq!(hints.labels[0].kind, LabelKind::Component);
        assert_eq!(hints.labels[1].kind, LabelKind::Voltage);
        assert_eq!(hints.labels[2].kind, LabelKind::Current);
        assert_eq!(
            hints.passthrough,
            vec![
                ("color".to_string(), Some("blue".to_string())),
                ("dashed".to_string(), None)
            ]
        );
    }

    #[test]
    fn test_suppression_flags() {
        let hints: LayoutHints = "nolabels".parse().unwrap();
        assert!(hints.suppress.all());
        let hints: LayoutHints = "noid".parse().unwrap();
        assert!(hints.suppress.ids && !hints.suppress.values);
    }

    #[test]
    fn test_bad_size_is_an_error() {
        let err = "size=big".parse::<LayoutHints>().unwrap_err();
        assert!(err.to_string().contains("size=big"));
        assert!("right=x".parse::<LayoutHints>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let text = "left, size=3, l=R, color=red";
        let hints: LayoutHints = text.parse().unwrap();
        assert_eq!(hints.to_string(), text);
    }
}
