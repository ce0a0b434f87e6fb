// Wed Oct 14 2026 - Alex

use crate::registry::{catalog, ErrorCatalog, SubError, Validator, ValidatorOptions};
use crate::tree::NodeRef;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

pub const NAME: &str = "pattern";

pub const PATTERN: &str = "pattern";

const MAX_COMPILED: usize = 128;

pub fn default_catalog() -> ErrorCatalog {
    catalog([(PATTERN, "The value does not match the expected format.")])
}

/// Regular expression check. Options: `pattern`, `flags` (any of `imsx`;
/// `g` and `u` are accepted and ignored), `fullMatch`.
///
/// A missing or unparsable pattern is a configuration problem, not a user
/// input problem, so it is logged and the value passes.
pub struct PatternValidator {
    compiled: RwLock<HashMap<String, Regex>>,
}

impl PatternValidator {
    pub fn new() -> Self {
        Self {
            compiled: RwLock::new(HashMap::new()),
        }
    }

    pub fn check(&self, value: &str, options: &ValidatorOptions) -> Vec<SubError> {
        let source = match options.string("pattern") {
            Some(source) => source,
            None => {
                log::warn!("pattern validator used without a 'pattern' option");
                return Vec::new();
            }
        };
        let flags = options.string("flags").unwrap_or("");
        let full_match = options.flag("fullMatch");

        match self.compile(source, flags, full_match) {
            Some(regex) if !regex.is_match(value) => vec![SubError::new(PATTERN)],
            _ => Vec::new(),
        }
    }

    fn compile(&self, source: &str, flags: &str, full_match: bool) -> Option<Regex> {
        let key = format!("{}\u{0}{}\u{0}{}", flags, full_match, source);
        if let Some(regex) = self.compiled.read().get(&key) {
            return Some(regex.clone());
        }

        let anchored;
        let pattern = if full_match {
            // under `x` a trailing `#` comment would swallow the closing anchor
            let close = if flags.contains('x') { "\n" } else { "" };
            anchored = format!(r"\A(?:{}{})\z", source, close);
            anchored.as_str()
        } else {
            source
        };

        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'g' | 'u' => continue,
                other => {
                    log::warn!("Ignoring unsupported regex flag '{}' for /{}/", other, source);
                    continue;
                }
            };
        }

        let regex = match builder.build() {
            Ok(regex) => regex,
            Err(e) => {
                log::warn!("Invalid pattern /{}/: {}", source, e);
                return None;
            }
        };

        let mut compiled = self.compiled.write();
        if compiled.len() >= MAX_COMPILED {
            compiled.clear();
        }
        compiled.insert(key, regex.clone());
        Some(regex)
    }
}

impl Default for PatternValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PatternValidator {
    fn apply(&self, value: &str, options: &ValidatorOptions, _node: NodeRef<'_>) -> Vec<SubError> {
        self.check(value, options)
    }
}
