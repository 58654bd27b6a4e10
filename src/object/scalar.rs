//! Scalar value kinds: literal grammar, rendering, and operations.
//!
//! The five scalar kinds are the leaves of the type system — they stand alone
//! as registry instances and double as the element kinds of every collection.
//! A scalar's literal grammar and its rendering are inverses: for every value
//! `v`, `parse(kind, render(v))` reproduces `v` (floats up to the configured
//! comparison tolerance).

use std::cmp::Ordering;

use crate::error::{Exception, Result};

use super::{render_boolean, unknown_selector, RenderOptions, NULL_REPLY};

/// The closed set of scalar type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `true` / `false`.
    Boolean,
    /// One logical character, quoted with `'`.
    Character,
    /// Signed 64-bit decimal integer.
    Integer,
    /// IEEE-754 double, rendered at the configured precision.
    Float,
    /// UTF-8 string, quoted with `"`.
    String,
}

impl ScalarKind {
    /// Resolve a scalar type name, or `None` if `name` is not one.
    pub fn parse_name(name: &str) -> Option<ScalarKind> {
        match name {
            "Boolean" => Some(ScalarKind::Boolean),
            "Character" => Some(ScalarKind::Character),
            "Integer" => Some(ScalarKind::Integer),
            "Float" => Some(ScalarKind::Float),
            "String" => Some(ScalarKind::String),
            _ => None,
        }
    }

    /// The type name as it appears in actor position.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Character => "Character",
            ScalarKind::Integer => "Integer",
            ScalarKind::Float => "Float",
            ScalarKind::String => "String",
        }
    }

    /// Value used by the bare `create:` selector.
    pub fn default_value(self) -> ScalarValue {
        match self {
            ScalarKind::Boolean => ScalarValue::Boolean(false),
            ScalarKind::Character => ScalarValue::Character(' '),
            ScalarKind::Integer => ScalarValue::Integer(0),
            ScalarKind::Float => ScalarValue::Float(0.0),
            ScalarKind::String => ScalarValue::String(String::new()),
        }
    }
}

/// A typed scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Boolean value.
    Boolean(bool),
    /// Character value.
    Character(char),
    /// Integer value.
    Integer(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
}

// Float literals never parse to NaN, and no operation produces one, so the
// partial equality derived above is total in practice.
impl Eq for ScalarValue {}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &ScalarValue) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarValue {
    fn cmp(&self, other: &ScalarValue) -> Ordering {
        use ScalarValue::*;
        match (self, other) {
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Character(a), Character(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            // Kinds never mix inside one collection; rank keeps Ord total.
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

impl ScalarValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Boolean(_) => ScalarKind::Boolean,
            ScalarValue::Character(_) => ScalarKind::Character,
            ScalarValue::Integer(_) => ScalarKind::Integer,
            ScalarValue::Float(_) => ScalarKind::Float,
            ScalarValue::String(_) => ScalarKind::String,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self.kind() {
            ScalarKind::Boolean => 0,
            ScalarKind::Character => 1,
            ScalarKind::Integer => 2,
            ScalarKind::Float => 3,
            ScalarKind::String => 4,
        }
    }

    /// Parse a literal of the given kind.
    pub fn parse(kind: ScalarKind, literal: &str) -> Result<ScalarValue> {
        match kind {
            ScalarKind::Boolean => match literal {
                "true" => Ok(ScalarValue::Boolean(true)),
                "false" => Ok(ScalarValue::Boolean(false)),
                _ => Err(Exception::InvalidArgument),
            },
            ScalarKind::Character => {
                let content =
                    unescape_quoted(literal, '\'').ok_or(Exception::InvalidArgument)?;
                let mut chars = content.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(ScalarValue::Character(c)),
                    _ => Err(Exception::InvalidArgument),
                }
            }
            ScalarKind::Integer => literal
                .parse::<i64>()
                .map(ScalarValue::Integer)
                .map_err(|_| Exception::InvalidArgument),
            ScalarKind::Float => {
                if !is_float_literal(literal) {
                    return Err(Exception::InvalidArgument);
                }
                literal
                    .parse::<f64>()
                    .map(ScalarValue::Float)
                    .map_err(|_| Exception::InvalidArgument)
            }
            ScalarKind::String => unescape_quoted(literal, '"')
                .map(ScalarValue::String)
                .ok_or(Exception::InvalidArgument),
        }
    }

    /// Render the value in its literal grammar.
    pub fn render(&self, options: &RenderOptions) -> String {
        match self {
            ScalarValue::Boolean(value) => render_boolean(*value).to_string(),
            ScalarValue::Character(value) => {
                let mut out = String::from('\'');
                escape_into(&mut out, &value.to_string(), '\'');
                out.push('\'');
                out
            }
            ScalarValue::Integer(value) => value.to_string(),
            ScalarValue::Float(value) => {
                format!("{:.*}", options.float_precision, value)
            }
            ScalarValue::String(value) => {
                let mut out = String::from('"');
                escape_into(&mut out, value, '"');
                out.push('"');
                out
            }
        }
    }

    /// Equality under the current options; floats compare within tolerance.
    pub fn equals(&self, other: &ScalarValue, options: &RenderOptions) -> bool {
        match (self, other) {
            (ScalarValue::Float(a), ScalarValue::Float(b)) => {
                (a - b).abs() <= options.float_comparison_tolerance
            }
            (a, b) => a == b,
        }
    }

    /// Handle one message addressed to a scalar instance.
    pub fn receive(
        &mut self,
        selector: &str,
        arguments: &[String],
        options: &RenderOptions,
    ) -> Result<String> {
        match selector {
            "getValue" => return Ok(self.render(options)),
            "setValue:" => {
                *self = ScalarValue::parse(self.kind(), &arguments[0])?;
                return Ok(NULL_REPLY.to_string());
            }
            "isEqualTo?:" => {
                let other = ScalarValue::parse(self.kind(), &arguments[0])?;
                return Ok(render_boolean(self.equals(&other, options)).to_string());
            }
            _ => {}
        }

        match self {
            ScalarValue::Boolean(value) => match selector {
                "isTrue?" => Ok(render_boolean(*value).to_string()),
                "isFalse?" => Ok(render_boolean(!*value).to_string()),
                _ => Err(unknown_selector(BOOLEAN_OPS, selector)),
            },
            ScalarValue::Character(value) => match selector {
                "isAlphabetic?" => Ok(render_boolean(value.is_alphabetic()).to_string()),
                "isNumeric?" => Ok(render_boolean(value.is_numeric()).to_string()),
                "isSpace?" => Ok(render_boolean(value.is_whitespace()).to_string()),
                _ => Err(unknown_selector(CHARACTER_OPS, selector)),
            },
            ScalarValue::Integer(value) => match comparison_op::<i64>(selector) {
                Some(op) => {
                    let other = match ScalarValue::parse(ScalarKind::Integer, &arguments[0])? {
                        ScalarValue::Integer(other) => other,
                        _ => unreachable!(),
                    };
                    Ok(render_boolean(op(value, &other)).to_string())
                }
                None => Err(unknown_selector(NUMERIC_OPS, selector)),
            },
            ScalarValue::Float(value) => match comparison_op::<f64>(selector) {
                Some(op) => {
                    let other = match ScalarValue::parse(ScalarKind::Float, &arguments[0])? {
                        ScalarValue::Float(other) => other,
                        _ => unreachable!(),
                    };
                    Ok(render_boolean(op(value, &other)).to_string())
                }
                None => Err(unknown_selector(NUMERIC_OPS, selector)),
            },
            ScalarValue::String(value) => match selector {
                "isEmpty?" => Ok(render_boolean(value.is_empty()).to_string()),
                "length" => Ok((value.chars().count() as i64).to_string()),
                "startsWith?:" | "endsWith?:" | "contains?:" => {
                    let needle = match ScalarValue::parse(ScalarKind::String, &arguments[0])? {
                        ScalarValue::String(needle) => needle,
                        _ => unreachable!(),
                    };
                    let holds = match selector {
                        "startsWith?:" => value.starts_with(&needle),
                        "endsWith?:" => value.ends_with(&needle),
                        _ => value.contains(&needle),
                    };
                    Ok(render_boolean(holds).to_string())
                }
                _ => Err(unknown_selector(STRING_OPS, selector)),
            },
        }
    }
}

/// Strict-order comparison selectors shared by Integer and Float.
fn comparison_op<T: PartialOrd>(selector: &str) -> Option<fn(&T, &T) -> bool> {
    match selector {
        "isLessThan?:" => Some(|a, b| a < b),
        "isLessThanOrEqualTo?:" => Some(|a, b| a <= b),
        "isGreaterThan?:" => Some(|a, b| a > b),
        "isGreaterThanOrEqualTo?:" => Some(|a, b| a >= b),
        _ => None,
    }
}

const BOOLEAN_OPS: &[(&str, usize)] = &[
    ("getValue", 0),
    ("setValue", 1),
    ("isEqualTo?", 1),
    ("isTrue?", 0),
    ("isFalse?", 0),
];

const CHARACTER_OPS: &[(&str, usize)] = &[
    ("getValue", 0),
    ("setValue", 1),
    ("isEqualTo?", 1),
    ("isAlphabetic?", 0),
    ("isNumeric?", 0),
    ("isSpace?", 0),
];

const NUMERIC_OPS: &[(&str, usize)] = &[
    ("getValue", 0),
    ("setValue", 1),
    ("isEqualTo?", 1),
    ("isLessThan?", 1),
    ("isLessThanOrEqualTo?", 1),
    ("isGreaterThan?", 1),
    ("isGreaterThanOrEqualTo?", 1),
];

const STRING_OPS: &[(&str, usize)] = &[
    ("getValue", 0),
    ("setValue", 1),
    ("isEqualTo?", 1),
    ("isEmpty?", 0),
    ("length", 0),
    ("startsWith?", 1),
    ("endsWith?", 1),
    ("contains?", 1),
];

/// Strip `delimiter` from both ends and process the two permitted escapes
/// (`\<delimiter>` and `\\`). Any other escape, or an unescaped delimiter in
/// the interior, rejects the literal.
fn unescape_quoted(literal: &str, delimiter: char) -> Option<String> {
    let inner = literal
        .strip_prefix(delimiter)?
        .strip_suffix(delimiter)?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) if escaped == delimiter || escaped == '\\' => out.push(escaped),
                _ => return None,
            },
            c if c == delimiter => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

fn escape_into(out: &mut String, text: &str, delimiter: char) {
    for c in text.chars() {
        if c == delimiter || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Plain decimal shape: optional sign, digits, optional fraction. No
/// exponent, no `inf`/`nan` — the renderer never emits them, so accepting
/// them would break the round-trip invariant.
fn is_float_literal(text: &str) -> bool {
    let rest = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac_part {
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn scalar_literals_round_trip() {
        let cases = [
            (ScalarKind::Boolean, "true"),
            (ScalarKind::Boolean, "false"),
            (ScalarKind::Character, "'x'"),
            (ScalarKind::Character, r"'\''"),
            (ScalarKind::Character, r"'\\'"),
            (ScalarKind::Integer, "-42"),
            (ScalarKind::String, r#""hello""#),
            (ScalarKind::String, r#""say \"hi\" \\ done""#),
        ];
        for (kind, literal) in cases {
            let value = ScalarValue::parse(kind, literal).expect(literal);
            assert_eq!(value.render(&options()), literal, "round-trip {literal}");
        }
    }

    #[test]
    fn float_renders_at_precision() {
        let value = ScalarValue::parse(ScalarKind::Float, "1.5").unwrap();
        assert_eq!(value.render(&options()), "1.500000");
        let narrow = RenderOptions {
            float_precision: 2,
            ..RenderOptions::default()
        };
        assert_eq!(value.render(&narrow), "1.50");
    }

    #[test]
    fn float_round_trip_within_tolerance() {
        let value = ScalarValue::Float(0.1234567);
        let reparsed = ScalarValue::parse(ScalarKind::Float, &value.render(&options())).unwrap();
        assert!(reparsed.equals(&value, &options()));
    }

    #[test]
    fn float_rejects_exotic_literals() {
        for literal in ["nan", "inf", "1e3", "1.", ".5", "", "--1"] {
            assert_eq!(
                ScalarValue::parse(ScalarKind::Float, literal),
                Err(Exception::InvalidArgument),
                "literal {literal:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_scalar_literals() {
        assert!(ScalarValue::parse(ScalarKind::Boolean, "yes").is_err());
        assert!(ScalarValue::parse(ScalarKind::Character, "''").is_err());
        assert!(ScalarValue::parse(ScalarKind::Character, "'ab'").is_err());
        assert!(ScalarValue::parse(ScalarKind::Character, "x").is_err());
        assert!(ScalarValue::parse(ScalarKind::Integer, "4.2").is_err());
        assert!(ScalarValue::parse(ScalarKind::String, r#""bad \n escape""#).is_err());
        assert!(ScalarValue::parse(ScalarKind::String, "unquoted").is_err());
    }

    #[test]
    fn float_equality_uses_tolerance() {
        let a = ScalarValue::Float(1.0);
        let b = ScalarValue::Float(1.0000005);
        assert!(a.equals(&b, &options()));
        let c = ScalarValue::Float(1.1);
        assert!(!a.equals(&c, &options()));
    }

    #[test]
    fn scalar_receive_dispatches_operations() {
        let options = options();
        let mut value = ScalarValue::Integer(41);
        assert_eq!(value.receive("getValue", &[], &options).unwrap(), "41");
        assert_eq!(
            value
                .receive("setValue:", &["42".to_string()], &options)
                .unwrap(),
            NULL_REPLY
        );
        assert_eq!(value.receive("getValue", &[], &options).unwrap(), "42");
        assert_eq!(
            value
                .receive("isLessThan?:", &["50".to_string()], &options)
                .unwrap(),
            "true"
        );
    }

    #[test]
    fn known_selector_with_wrong_arity_is_flagged() {
        let options = options();
        let mut value = ScalarValue::Boolean(true);
        assert_eq!(
            value.receive("getValue:", &["x".to_string()], &options),
            Err(Exception::WrongNumberOfArguments)
        );
        assert_eq!(
            value.receive("setValue", &[], &options),
            Err(Exception::WrongNumberOfArguments)
        );
        assert_eq!(
            value.receive("frobnicate", &[], &options),
            Err(Exception::InvalidMessage)
        );
    }
}
