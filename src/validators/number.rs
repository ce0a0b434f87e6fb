// Wed Oct 14 2026 - Alex

use crate::registry::{catalog, ErrorCatalog, SubError, Validator, ValidatorOptions};
use crate::tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME: &str = "number";

pub const NOT_A_NUMBER: &str = "number";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const STEP: &str = "step";
pub const NO_SCIENTIFIC: &str = "noScientific";

static SCIENTIFIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)[eE][+-]?\d+$").expect("scientific notation regex is valid")
});

pub fn default_catalog() -> ErrorCatalog {
    catalog([
        (NOT_A_NUMBER, "The value is not a number."),
        (MIN, "The value is smaller than the allowed minimum."),
        (MAX, "The value is bigger than the allowed maximum."),
        (STEP, "The value is not a multiple of the allowed step."),
        (NO_SCIENTIFIC, "The value must not use scientific notation."),
    ])
}

pub struct NumberValidator;

impl Validator for NumberValidator {
    fn apply(&self, value: &str, options: &ValidatorOptions, _node: NodeRef<'_>) -> Vec<SubError> {
        check(value, options)
    }
}

/// Options: `min`, `max`, `inclusiveMin`, `inclusiveMax` (both default to
/// true), `step`, `noScientific`.
pub fn check(value: &str, options: &ValidatorOptions) -> Vec<SubError> {
    let number = match parse_number(value) {
        Some(number) => number,
        None => return vec![SubError::new(NOT_A_NUMBER)],
    };

    let mut errors = Vec::new();

    if let Some(min) = options.number("min") {
        let inclusive = options.flag_or("inclusiveMin", true);
        if number < min || (!inclusive && number == min) {
            errors.push(SubError::new(MIN));
        }
    }

    if let Some(max) = options.number("max") {
        let inclusive = options.flag_or("inclusiveMax", true);
        if number > max || (!inclusive && number == max) {
            errors.push(SubError::new(MAX));
        }
    }

    if let Some(step) = options.number("step") {
        if step != 0.0 && !is_multiple_of(number, step.abs()) {
            errors.push(SubError::new(STEP));
        }
    }

    if options.flag("noScientific") && SCIENTIFIC.is_match(value.trim()) {
        errors.push(SubError::new(NO_SCIENTIFIC));
    }

    errors
}

/// Parses a value the way a form number field reads it: surrounding
/// whitespace ignored, empty means zero, `0x`/`0o`/`0b` integer prefixes and
/// `Infinity` accepted. `inf`/`nan` spellings are not numbers.
pub fn parse_number(value: &str) -> Option<f64> {
    let text = value.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let lower = text.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }

    text.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// `number` is a whole multiple of `step`, compared on the shortest decimal
/// representation of both so `0.3 / 0.1` style rounding never shows up.
pub fn is_multiple_of(number: f64, step: f64) -> bool {
    if !number.is_finite() || !step.is_finite() || step <= 0.0 {
        return false;
    }

    match (Decimal::from_f64(number), Decimal::from_f64(step)) {
        (Some(value), Some(divisor)) => match value.aligned_remainder(&divisor) {
            Some(remainder) => remainder == 0,
            None => approx_multiple(number, step),
        },
        _ => approx_multiple(number, step),
    }
}

fn approx_multiple(number: f64, step: f64) -> bool {
    let quotient = number / step;
    (quotient - quotient.round()).abs() <= 1e-9 * quotient.abs().max(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    fn from_f64(value: f64) -> Option<Self> {
        // Display for f64 is the shortest round-trip form and never uses an exponent
        let text = format!("{}", value);
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let mantissa = format!("{}{}", int_part, frac_part).parse::<i128>().ok()?;
        Some(Self {
            mantissa,
            scale: frac_part.len() as u32,
        })
    }

    fn rescale(&self, scale: u32) -> Option<i128> {
        10i128
            .checked_pow(scale - self.scale)
            .and_then(|factor| self.mantissa.checked_mul(factor))
    }

    fn aligned_remainder(&self, divisor: &Decimal) -> Option<i128> {
        let scale = self.scale.max(divisor.scale);
        let value = self.rescale(scale)?;
        let divisor = divisor.rescale(scale)?;
        if divisor == 0 {
            return None;
        }
        Some(value % divisor)
    }
}
