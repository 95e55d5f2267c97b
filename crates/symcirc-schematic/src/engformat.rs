//! Engineering notation for component values.

use symcirc_core::ComponentKind;

const PREFIXES: [&str; 10] = ["f", "p", "n", "$\\mu$", "m", "", "k", "M", "G", "T"];

/// Index of the empty prefix in [`PREFIXES`].
const UNITY: i32 = 5;

/// Significant figures kept before trailing zeros are trimmed.
const SIG_FIGS: f64 = 3.0;

/// LaTeX unit for the value of a component kind, if it has one.
pub fn unit(kind: ComponentKind) -> Option<&'static str> {
    match kind {
        ComponentKind::Resistor => Some("$\\Omega$"),
        ComponentKind::Capacitor => Some("F"),
        ComponentKind::Inductor => Some("H"),
        ComponentKind::VoltageSource => Some("V"),
        ComponentKind::CurrentSource => Some("A"),
        _ => None,
    }
}

/// `value` with an SI prefix, e.g. `4.7\,\mbox{k$\Omega$}`.
pub fn format(value: f64, unit: &str) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}\\,\\mbox{{{}}}", value, unit);
    }

    let m = value.abs().log10();
    let (n, k) = if !(-1.0..3.0).contains(&m) {
        let n = (m / 3.0).round();
        (n as i32, m.round() - 3.0 * n)
    } else {
        (0, m - 1.0)
    };

    let index = n + UNITY;
    let Some(prefix) = usize::try_from(index).ok().and_then(|i| PREFIXES.get(i)) else {
        return format!("{:.6e}\\,{}", value, unit);
    };

    let decimals = (SIG_FIGS - k).trunc().max(0.0) as usize;
    let scaled = value * 10f64.powi(-3 * n);
    let mut digits = format!("{:.*}", decimals, scaled);
    if digits.contains('.') {
        digits = digits.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{}\\,\\mbox{{{}{}}}", digits, prefix, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(format(4700.0, "$\\Omega$"), "4.7\\,\\mbox{k$\\Omega$}");
        assert_eq!(format(1e-6, "F"), "1\\,\\mbox{$\\mu$F}");
        assert_eq!(format(10.0, "V"), "10\\,\\mbox{V}");
        assert_eq!(format(0.5, "A"), "0.5\\,\\mbox{A}");
        assert_eq!(format(2.2e-3, "H"), "2.2\\,\\mbox{mH}");
    }

    #[test]
    fn test_out_of_range_is_scientific() {
        assert_eq!(format(1e-20, "F"), "1.000000e-20\\,F");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format(0.0, "V"), "0\\,\\mbox{V}");
    }
}
