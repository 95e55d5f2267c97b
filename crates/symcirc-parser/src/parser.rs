//! Netlist line parser.

use symcirc_core::{Component, ComponentKind, ComponentValue, LayoutHints, Waveform};
use symcirc_expr::{Expr, parse_expression};

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token, split_directives};

/// True for lines that carry no component.
pub fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#') || line.starts_with('*')
}

/// Parse one netlist line: `Name N1 N2 [N3 N4] [values] [; directives]`.
///
/// Returns `None` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Component>> {
    if is_blank_or_comment(line) {
        return Ok(None);
    }

    let split = split_directives(line);
    let mut tokens = Lexer::new(split.fields).tokenize()?.into_iter();

    let name = match tokens.next() {
        Some(Token::Word(name)) => name,
        Some(Token::Braced(_)) | None => {
            return Err(Error::Syntax {
                column: 1,
                message: "line must start with a component name".to_string(),
            });
        }
    };
    let kind = ComponentKind::from_name(&name)
        .ok_or_else(|| symcirc_core::Error::UnknownKind(name.clone()))?;

    let rest: Vec<Token> = tokens.collect();
    let arity = kind.arity();
    let node_tokens = rest.iter().take(arity).take_while(|t| matches!(t, Token::Word(_)));
    let nodes: Vec<String> = node_tokens.map(|t| t.text().to_string()).collect();
    if nodes.len() < arity {
        return Err(symcirc_core::Error::Arity {
            name,
            kind,
            expected: arity,
            found: nodes.len(),
        }
        .into());
    }

    let args = &rest[arity..];
    let value = parse_value(&name, kind, args)?;

    let hints = match split.directives {
        Some(text) => Some(text.parse::<LayoutHints>()?),
        None => None,
    };

    Ok(Some(Component::new(name, nodes, value, hints)?))
}

/// Parse every line of a netlist, tagging errors with their 1-based line number.
pub fn parse_netlist(text: &str) -> Result<Vec<Component>> {
    let mut components = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(component)) => components.push(component),
            Ok(None) => {}
            Err(e) => {
                return Err(Error::Line {
                    line: i + 1,
                    source: Box::new(e),
                });
            }
        }
    }
    Ok(components)
}

fn expr(component: &str, token: &Token) -> Result<Expr> {
    parse_expression(token.text()).map_err(|source| Error::Value {
        component: component.to_string(),
        text: token.text().to_string(),
        source,
    })
}

fn word(component: &str, token: &Token, what: &str) -> Result<String> {
    match token {
        Token::Word(w) => Ok(w.clone()),
        Token::Braced(_) => Err(Error::Arguments {
            component: component.to_string(),
            message: format!("{} must be a name", what),
        }),
    }
}

fn too_many(component: &str, max: usize) -> Error {
    Error::Arguments {
        component: component.to_string(),
        message: format!("expected at most {} value arguments", max),
    }
}

fn parse_value(name: &str, kind: ComponentKind, args: &[Token]) -> Result<ComponentValue> {
    use ComponentKind as K;

    let default = || Expr::symbol(name);
    let value = match kind {
        K::Resistor => match args {
            [] => ComponentValue::default_for(kind, name),
            [v] => ComponentValue::Passive {
                value: expr(name, v)?,
                initial: None,
            },
            _ => return Err(too_many(name, 1)),
        },
        K::Capacitor | K::Inductor => match args {
            [] => ComponentValue::default_for(kind, name),
            [v] => ComponentValue::Passive {
                value: expr(name, v)?,
                initial: None,
            },
            [v, init] => ComponentValue::Passive {
                value: expr(name, v)?,
                initial: Some(expr(name, init)?),
            },
            _ => return Err(too_many(name, 2)),
        },
        K::VoltageSource | K::CurrentSource => {
            let keyword = match args.first() {
                Some(Token::Word(w)) => Waveform::from_keyword(w),
                _ => None,
            };
            match (keyword, args) {
                (_, []) => ComponentValue::default_for(kind, name),
                (Some(waveform), [_]) => ComponentValue::Source {
                    waveform,
                    value: default(),
                },
                (None, [v]) => ComponentValue::Source {
                    waveform: Waveform::Generic,
                    value: expr(name, v)?,
                },
                (Some(waveform), [_, v]) => ComponentValue::Source {
                    waveform,
                    value: expr(name, v)?,
                },
                (None, [first, _]) => {
                    return Err(Error::Arguments {
                        component: name.to_string(),
                        message: format!("unknown source type '{}'", first.text()),
                    });
                }
                _ => return Err(too_many(name, 2)),
            }
        }
        K::Vcvs | K::Vccs => match args {
            [] => ComponentValue::default_for(kind, name),
            [g] => ComponentValue::VoltageControlled {
                gain: expr(name, g)?,
            },
            _ => return Err(too_many(name, 1)),
        },
        K::Cccs | K::Ccvs => match args {
            [] => {
                return Err(Error::Arguments {
                    component: name.to_string(),
                    message: "missing controlling voltage source".to_string(),
                });
            }
            [control] => ComponentValue::CurrentControlled {
                control: word(name, control, "controlling source")?,
                gain: default(),
            },
            [control, g] => ComponentValue::CurrentControlled {
                control: word(name, control, "controlling source")?,
                gain: expr(name, g)?,
            },
            _ => return Err(too_many(name, 2)),
        },
        K::Transformer => match args {
            [] => ComponentValue::default_for(kind, name),
            [ratio] => ComponentValue::Transformer {
                ratio: expr(name, ratio)?,
            },
            _ => return Err(too_many(name, 1)),
        },
        K::MutualInductance => match args {
            [first, second] | [first, second, _] => ComponentValue::Coupling {
                first: word(name, first, "coupled inductor")?,
                second: word(name, second, "coupled inductor")?,
                coefficient: match args.get(2) {
                    Some(k) => expr(name, k)?,
                    None => default(),
                },
            },
            [] | [_] => {
                return Err(Error::Arguments {
                    component: name.to_string(),
                    message: "needs two inductor names".to_string(),
                });
            }
            _ => return Err(too_many(name, 3)),
        },
        K::Wire | K::OpenCircuit | K::Port => match args {
            [] => ComponentValue::None,
            _ => return Err(too_many(name, 0)),
        },
        _ => ComponentValue::default_for(kind, name),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use symcirc_core::Direction;

    fn parse(line: &str) -> Component {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert!(parse_line("").unwrap().is_none());
        assert!(parse_line("   ").unwrap().is_none());
        assert!(parse_line("# title").unwrap().is_none());
        assert!(parse_line("* comment").unwrap().is_none());
    }

    #[test]
    fn test_resistor_defaults() {
        let r = parse("R1 1 2");
        assert_eq!(r.kind(), ComponentKind::Resistor);
        assert_eq!(r.nodes(), &["1".to_string(), "2".to_string()]);
        assert_eq!(r.value().expr(), Some(&Expr::symbol("R1")));
        assert!(r.hints().is_none());
    }

    #[test]
    fn test_resistor_with_value_and_hints() {
        let r = parse("R1 1 2 4.7k; right=2, l=R_{load}");
        assert_eq!(r.value().expr().and_then(Expr::as_constant), Some(4700.0));
        assert_eq!(r.direction(), Direction::Right);
        assert_eq!(r.size(), 2.0);
        assert_eq!(r.hints().unwrap().labels.len(), 1);
    }

    #[test]
    fn test_braced_value() {
        let v = parse("V1 1 0 {V0 / s}");
        assert_eq!(
            v.value(),
            &ComponentValue::Source {
                waveform: Waveform::Generic,
                value: Expr::symbol("V0") / Expr::s(),
            }
        );
    }

    #[test]
    fn test_source_waveforms() {
        let v = parse("V1 1 0 step 10");
        assert_eq!(
            v.value(),
            &ComponentValue::Source {
                waveform: Waveform::Step,
                value: Expr::constant(10.0),
            }
        );
        let i = parse("I1 1 0 dc");
        assert_eq!(
            i.value(),
            &ComponentValue::Source {
                waveform: Waveform::Dc,
                value: Expr::symbol("I1"),
            }
        );
        assert!(parse_line("V1 1 0 ramp 3").is_err());
    }

    #[test]
    fn test_capacitor_initial_condition() {
        let c = parse("C1 1 0 1u 2");
        assert!(c.has_initial_condition());
    }

    #[test]
    fn test_controlled_sources() {
        let e = parse("E1 2 0 1 0 10");
        assert_eq!(e.nodes().len(), 4);
        let f = parse("F1 2 0 V1 5");
        assert_eq!(
            f.value(),
            &ComponentValue::CurrentControlled {
                control: "V1".to_string(),
                gain: Expr::constant(5.0),
            }
        );
        assert!(parse_line("H1 2 0").is_err());
    }

    #[test]
    fn test_mutual_inductance() {
        let k = parse("K1 L1 L2 0.9");
        assert!(k.nodes().is_empty());
        assert!(matches!(k.value(), ComponentValue::Coupling { first, .. } if first == "L1"));
    }

    #[test]
    fn test_transformer_prefix() {
        let tf = parse("TF1 1 0 2 0 n");
        assert_eq!(tf.kind(), ComponentKind::Transformer);
    }

    #[test]
    fn test_arity_error_names_component() {
        let err = parse_line("E1 2 0 1").unwrap_err();
        assert!(matches!(
            err,
            Error::Core(symcirc_core::Error::Arity { expected: 4, found: 3, .. })
        ));
        assert!(err.to_string().contains("E1"));
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            parse_line("Q1 1 2 3"),
            Err(Error::Core(symcirc_core::Error::UnknownKind(_)))
        ));
    }

    #[test]
    fn test_bad_size_directive() {
        assert!(parse_line("R1 1 2; size=wide").is_err());
    }

    #[test]
    fn test_display_reparses() {
        let line = "C1 1 0 {1e-06} {2}; down";
        let c = parse(line);
        assert_eq!(parse(&c.to_string()), c);
    }

    #[test]
    fn test_netlist_line_numbers() {
        let err = parse_netlist("R1 1 0\n\nX1 1 0\n").unwrap_err();
        assert!(matches!(err, Error::Line { line: 3, .. }));
        let ok = parse_netlist("V1 1 0; down\nR1 1 2; right\n# note\nL1 2 0; down").unwrap();
        assert_eq!(ok.len(), 3);
    }
}
