// Wed Oct 14 2026 - Alex

use crate::registry::{ErrorCatalog, SubError, Validator, ValidatorOptions};
use crate::tree::NodeRef;
use crate::validators::number;
use itertools::Itertools;

pub const NAME: &str = "range";

pub const RANGE: &str = "range";
pub const NO_SPACES: &str = "noSpaces";

pub fn default_catalog() -> ErrorCatalog {
    let mut catalog = number::default_catalog();
    catalog.insert(
        RANGE.to_string(),
        "The value is not a valid range.".to_string(),
    );
    catalog.insert(
        NO_SPACES.to_string(),
        "The range must not contain spaces.".to_string(),
    );
    catalog
}

pub struct RangeValidator;

impl Validator for RangeValidator {
    fn apply(&self, value: &str, options: &ValidatorOptions, _node: NodeRef<'_>) -> Vec<SubError> {
        check(value, options)
    }
}

/// Validates `"<lower><separator><upper>"`. Both bounds go through the number
/// checks with the same options; an error type is reported once even when
/// both bounds trigger it.
///
/// Options: `separator` (default `-`), `openEnded`, `noSpaces`, plus every
/// option understood by the number validator.
pub fn check(value: &str, options: &ValidatorOptions) -> Vec<SubError> {
    let mut errors = Vec::new();

    if options.flag("noSpaces") && value.chars().any(char::is_whitespace) {
        errors.push(SubError::new(NO_SPACES));
    }

    let separator = options
        .string("separator")
        .filter(|s| !s.is_empty())
        .unwrap_or("-");
    let open_ended = options.flag("openEnded");
    let text = value.trim();

    let (lower, upper) = match split_bounds(text, separator, open_ended) {
        Some((lower, upper)) if !(lower.trim().is_empty() && upper.trim().is_empty()) => (lower, upper),
        _ => {
            errors.push(SubError::new(RANGE));
            return errors;
        }
    };

    let mut parsed = [None, None];
    for (slot, bound) in parsed.iter_mut().zip([lower, upper]) {
        let bound = bound.trim();
        if bound.is_empty() {
            if !open_ended {
                errors.push(SubError::new(RANGE));
            }
            continue;
        }

        let bound_errors = number::check(bound, options);
        if !bound_errors.iter().any(|e| e.kind() == number::NOT_A_NUMBER) {
            *slot = number::parse_number(bound);
        }
        errors.extend(bound_errors);
    }

    if let [Some(low), Some(high)] = parsed {
        if high < low {
            errors.push(SubError::new(RANGE));
        }
    }

    errors.into_iter().unique_by(|e| e.kind.clone()).collect()
}

/// Splits on the first separator that is not a leading sign or part of an
/// exponent. With `open_ended`, a leading separator means "no lower bound".
fn split_bounds<'a>(text: &'a str, separator: &str, open_ended: bool) -> Option<(&'a str, &'a str)> {
    let split_at = text.match_indices(separator).map(|(i, _)| i).find(|&i| {
        i > 0 && !text[..i].trim_end().ends_with(|c: char| c == 'e' || c == 'E')
    });

    match split_at {
        Some(i) => Some((&text[..i], &text[i + separator.len()..])),
        None if open_ended && text.starts_with(separator) => Some(("", &text[separator.len()..])),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(errors: Vec<SubError>) -> Vec<String> {
        errors.into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_ordered_range_passes() {
        assert!(check("3-7", &ValidatorOptions::new()).is_empty());
        assert!(check("7-7", &ValidatorOptions::new()).is_empty());
        assert!(check("-3--1", &ValidatorOptions::new()).is_empty());
        assert!(check(" 1.5 - 2e1 ", &ValidatorOptions::new()).is_empty());
    }

    #[test]
    fn test_reversed_range_fails() {
        assert_eq!(kinds(check("9-7", &ValidatorOptions::new())), vec!["range"]);
    }

    #[test]
    fn test_malformed_range() {
        assert_eq!(kinds(check("12", &ValidatorOptions::new())), vec!["range"]);
        assert_eq!(kinds(check("3-", &ValidatorOptions::new())), vec!["range"]);
        assert_eq!(kinds(check("a-b", &ValidatorOptions::new())), vec!["number"]);
    }

    #[test]
    fn test_open_ended() {
        let options = ValidatorOptions::new().with("openEnded", true);
        assert!(check("3-", &options).is_empty());
        assert!(check("-7", &options).is_empty());
        assert!(check("3-7", &options).is_empty());
    }

    #[test]
    fn test_open_ended_needs_one_bound() {
        let options = ValidatorOptions::new().with("openEnded", true);
        assert_eq!(kinds(check("-", &options)), vec!["range"]);
        assert_eq!(kinds(check(" - ", &options)), vec!["range"]);
        assert_eq!(kinds(check("-", &ValidatorOptions::new())), vec!["range"]);
    }

    #[test]
    fn test_bound_errors_are_deduplicated() {
        let options = ValidatorOptions::new().with("min", 0).with("max", 10).with("step", 1);
        assert_eq!(kinds(check("11-12", &options)), vec!["max"]);
        assert_eq!(kinds(check("0.5-20.5", &options)), vec!["step", "max"]);
        assert_eq!(kinds(check("x-y", &options)), vec!["number"]);
    }

    #[test]
    fn test_no_spaces_and_separator() {
        let options = ValidatorOptions::new().with("noSpaces", true);
        assert_eq!(kinds(check("1 - 2", &options)), vec!["noSpaces"]);
        assert!(check("1-2", &options).is_empty());

        let options = ValidatorOptions::new().with("separator", "..");
        assert!(check("-5..5", &options).is_empty());
        assert_eq!(kinds(check("5..-5", &options)), vec!["range"]);
    }

    #[test]
    fn test_catalog_covers_composed_types() {
        let catalog = default_catalog();
        for kind in ["range", "noSpaces", "number", "min", "max", "step", "noScientific"] {
            assert!(catalog.contains_key(kind), "missing {}", kind);
        }
    }
}
