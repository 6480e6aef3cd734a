//! Display and Debug implementations for Value

use std::fmt;

use super::*;

/// Render a number: integral values without a fractional part, everything
/// else in Rust's shortest round-trip form.
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        // covers -0.0
        "0".to_string()
    } else if n.is_finite() && n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    /// The `to_display_string` rendering used by `show`, `Text`
    /// conversion and interpolation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::Range(start, end) => {
                write!(f, "{}..{}", format_number(*start), format_number(*end))
            }
            Value::Function(func) => write!(f, "<Spec {}>", func.display_name()),
            Value::Blueprint(bp) => write!(f, "<Blueprint {}>", bp.name),
            Value::Instance(inst) => write!(f, "<Instance of {}>", inst.blueprint_name()),
            Value::Toolkit(tk) => write!(f, "<Toolkit {}>", tk.name),
            Value::Bridge(br) => write!(f, "<Bridge {}>", br.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

impl Value {
    /// Render for output.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Render as a `pack` item: text is quoted, everything else displays.
    pub fn to_pack_item(&self) -> String {
        match self {
            Value::String(s) => format!("\"{}\"", s),
            other => other.to_string(),
        }
    }
}
