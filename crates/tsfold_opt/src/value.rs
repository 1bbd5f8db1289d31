//! Primitive values and the ECMAScript conversions the evaluator relies on.

use std::borrow::Cow;
use std::cmp::Ordering;

use tsfold_ast::Literal;

const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_31: f64 = 2_147_483_648.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(Box<str>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(value) => *value,
            Value::Number(value) => !(*value == 0.0 || value.is_nan()),
            Value::String(value) => !value.is_empty(),
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Boolean(true) => 1.0,
            Value::Boolean(false) => 0.0,
            Value::Number(value) => *value,
            Value::String(value) => string_to_number(value),
        }
    }

    pub fn to_int32(&self) -> i32 {
        to_int32(self.to_number())
    }

    pub fn to_js_string(&self) -> Cow<'_, str> {
        match self {
            Value::Boolean(true) => Cow::Borrowed("true"),
            Value::Boolean(false) => Cow::Borrowed("false"),
            Value::Number(value) => Cow::Owned(number_to_string(*value)),
            Value::String(value) => Cow::Borrowed(value),
        }
    }

    /// `===`
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(lhs), Value::Boolean(rhs)) => lhs == rhs,
            (Value::Number(lhs), Value::Number(rhs)) => lhs == rhs,
            (Value::String(lhs), Value::String(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    /// `==`
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(_), Value::Boolean(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_)) => self.strict_equals(other),
            (Value::Boolean(_), _) => Value::Number(self.to_number()).loose_equals(other),
            (_, Value::Boolean(_)) => self.loose_equals(&Value::Number(other.to_number())),
            // One number and one string.
            _ => self.to_number() == other.to_number(),
        }
    }

    /// Relational comparison, `None` when either side converts to NaN.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(lhs), Value::String(rhs)) => {
                Some(lhs.encode_utf16().cmp(rhs.encode_utf16()))
            }
            _ => self.to_number().partial_cmp(&other.to_number()),
        }
    }

    /// The literal spelling of this value, if it has one.
    pub fn to_literal(&self) -> Option<Literal> {
        match self {
            Value::Boolean(value) => Some(Literal::Boolean(*value)),
            Value::Number(value) if value.is_finite() => {
                Some(Literal::Numeric(number_to_string(*value).into()))
            }
            Value::Number(_) => None,
            Value::String(value) => Some(Literal::String(value.clone())),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(value) => write!(f, "{value:?}"),
            value => f.write_str(&value.to_js_string()),
        }
    }
}

pub fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }

    let modulo = value.trunc().rem_euclid(TWO_POW_32);

    if modulo >= TWO_POW_31 {
        (modulo - TWO_POW_32) as i32
    } else {
        modulo as i32
    }
}

fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }

    let digits = digits
        .chars()
        .map(|ch| ch.to_digit(radix))
        .collect::<Option<Vec<_>>>()?;

    // Exact integer first so the result is rounded once.
    let exact = digits.iter().try_fold(0u128, |acc, digit| {
        acc.checked_mul(u128::from(radix))?
            .checked_add(u128::from(*digit))
    });

    match exact {
        Some(value) => Some(value as f64),
        None => Some(digits.iter().fold(0.0, |acc, digit| {
            acc * f64::from(radix) + f64::from(*digit)
        })),
    }
}

fn radix_prefix(text: &str) -> Option<(u32, &str)> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    Some((radix, &text[2..]))
}

/// Digits, dots and exponent parts only, starting with a digit or a dot.
///
/// Keeps `str::parse` from accepting spellings such as `inf` or `NaN`.
fn is_decimal_literal(text: &str) -> bool {
    text.starts_with(|ch: char| ch.is_ascii_digit() || ch == '.')
        && text
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'))
}

/// Parses the text of a numeric literal node.
///
/// A leading `-` is accepted since materialized literals of negative values are spelled that
/// way. Legacy octal literals (`017`) and bigint literals (`1n`) are not numbers here.
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    if let Some(rest) = text.strip_prefix('-') {
        return parse_numeric_literal(rest).map(|value| -value);
    }

    let text: Cow<'_, str> = if text.contains('_') {
        Cow::Owned(text.replace('_', ""))
    } else {
        Cow::Borrowed(text)
    };

    if let Some((radix, digits)) = radix_prefix(&text) {
        return parse_radix_digits(digits, radix);
    }

    let mut chars = text.chars();
    if chars.next() == Some('0') && chars.next().is_some_and(|ch| ch.is_ascii_digit()) {
        return None;
    }

    if !is_decimal_literal(&text) {
        return None;
    }

    text.parse().ok()
}

/// ECMAScript `WhiteSpace` and `LineTerminator` code points.
fn is_str_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t'
            | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// `ToNumber` applied to a string.
pub fn string_to_number(text: &str) -> f64 {
    let text = text.trim_matches(is_str_whitespace);

    if text.is_empty() {
        return 0.0;
    }

    if let Some((radix, digits)) = radix_prefix(text) {
        return parse_radix_digits(digits, radix).unwrap_or(f64::NAN);
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    if !is_decimal_literal(unsigned) {
        return f64::NAN;
    }

    unsigned
        .parse::<f64>()
        .map_or(f64::NAN, |value| sign * value)
}

/// `Number.prototype.toString()` for radix 10.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value < 0.0 {
        return format!("-{}", number_to_string(-value));
    }

    // Shortest round-tripping digits, e.g. `1.2345e-7`.
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let digits: String = mantissa.chars().filter(|ch| *ch != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (integer, fraction) = digits.split_at(n as usize);
        format!("{integer}.{fraction}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(-n as usize))
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let exponent = (n - 1).abs();

        if k == 1 {
            format!("{digits}e{sign}{exponent}")
        } else {
            let (first, rest) = digits.split_at(1);
            format!("{first}.{rest}e{sign}{exponent}")
        }
    }
}
