//! `show`, `ask`, `convert` and `kind`

use crate::ast::{Convert, Node};
use crate::environment::Environment;
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::Evaluate;

/// Print the display form of each item, space separated, then a newline.
pub fn eval_show(
    items: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(item.eval(interp, env)?.to_display_string());
    }
    interp.io.write_line(&rendered.join(" "))?;
    Ok(Value::Nil)
}

/// Print the prompt, read one line and type it.
///
/// Statements that produce text are printed as the prompt; anything else
/// only runs. End of input yields `Nil`.
pub fn eval_ask(
    statements: &[Node],
    interp: &mut Interpreter,
    env: &Environment,
) -> Result<Value, EvalError> {
    for stmt in statements {
        if let Value::String(prompt) = stmt.eval(interp, env)? {
            interp.io.write(&prompt)?;
        }
    }

    match interp.io.read_line()? {
        Some(line) => Ok(parse_input(&line)),
        None => Ok(Value::Nil),
    }
}

/// Type a line of user input.
///
/// `On`/`Off` become booleans, `Nil` becomes `Nil`, a token that is a
/// number in its entirety becomes a number, anything else stays text
/// with surrounding spaces and tabs removed.
pub fn parse_input(line: &str) -> Value {
    let trimmed = line.trim_matches(|c| c == ' ' || c == '\t');
    match trimmed {
        "On" => Value::Bool(true),
        "Off" => Value::Bool(false),
        "Nil" => Value::Nil,
        _ => match trimmed.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::string(trimmed),
        },
    }
}

impl Evaluate for Convert {
    fn eval(&self, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
        let source = self.source.eval(interp, env)?;
        match self.target.as_str() {
            "Text" => Ok(Value::String(source.to_display_string())),
            "Num" => Ok(Value::Number(match &source {
                Value::Number(n) => *n,
                Value::String(s) => parse_numeric_prefix(s),
                _ => 0.0,
            })),
            other => Err(EvalError::UnknownTypeName {
                name: other.to_string(),
            }),
        }
    }
}

/// Parse the longest numeric prefix of `s`, or 0 if there is none.
///
/// Leading whitespace is skipped; an optional sign, digits, a fractional
/// part and an exponent are accepted.
pub fn parse_numeric_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    let mut has_digits = int_end > end;

    if bytes.get(int_end) == Some(&b'.') {
        let frac_end = digits_from(int_end + 1);
        if frac_end > int_end + 1 || has_digits {
            has_digits |= frac_end > int_end + 1;
            mantissa_end = frac_end;
        }
    }
    if !has_digits {
        return 0.0;
    }

    end = mantissa_end;
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Evaluate `kind expr` to the runtime type name as text.
pub fn eval_kind(expr: &Node, interp: &mut Interpreter, env: &Environment) -> Result<Value, EvalError> {
    let value = expr.eval(interp, env)?;
    Ok(Value::string(value.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("On"), Value::Bool(true));
        assert_eq!(parse_input("\tOff "), Value::Bool(false));
        assert_eq!(parse_input("Nil"), Value::Nil);
        assert_eq!(parse_input(" 42 "), Value::Number(42.0));
        assert_eq!(parse_input("-1.5e2"), Value::Number(-150.0));
        assert_eq!(parse_input("  hello world "), Value::string("hello world"));
        assert_eq!(parse_input("12abc"), Value::string("12abc"));
        assert_eq!(parse_input(""), Value::string(""));
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(parse_numeric_prefix("42"), 42.0);
        assert_eq!(parse_numeric_prefix("  3.25kg"), 3.25);
        assert_eq!(parse_numeric_prefix("-7"), -7.0);
        assert_eq!(parse_numeric_prefix(".5"), 0.5);
        assert_eq!(parse_numeric_prefix("5."), 5.0);
        assert_eq!(parse_numeric_prefix("1e3x"), 1000.0);
        assert_eq!(parse_numeric_prefix("2e"), 2.0);
        assert_eq!(parse_numeric_prefix("abc"), 0.0);
        assert_eq!(parse_numeric_prefix("-"), 0.0);
        assert_eq!(parse_numeric_prefix("."), 0.0);
    }
}
