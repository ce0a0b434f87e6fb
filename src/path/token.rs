// Wed Oct 14 2026 - Alex

use crate::path::PathError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static STEP_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{|\}\}").expect("step delimiter regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationOp {
    Closest,
    Siblings,
    Parent,
}

impl RelationOp {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "closest" => Some(RelationOp::Closest),
            "siblings" => Some(RelationOp::Siblings),
            "parent" => Some(RelationOp::Parent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationOp::Closest => "closest",
            RelationOp::Siblings => "siblings",
            RelationOp::Parent => "parent",
        }
    }
}

impl fmt::Display for RelationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain selector fragment, queried below every node of the working set.
    Descendant(String),
    /// `{{operator@argument}}` step.
    Relational {
        op: RelationOp,
        argument: Option<String>,
    },
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Descendant(selector) => f.write_str(selector),
            Segment::Relational { op, argument: Some(arg) } => write!(f, "{{{{{}@{}}}}}", op, arg),
            Segment::Relational { op, argument: None } => write!(f, "{{{{{}}}}}", op),
        }
    }
}

/// A parsed relational path. Tokens alternate between selector fragments (even
/// positions) and relational steps (odd positions); empty fragments are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPath {
    source: String,
    segments: Vec<Segment>,
}

impl TokenPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();

        for (index, token) in STEP_DELIMITER.split(path).enumerate() {
            let token = token.trim();

            if index % 2 == 0 {
                if !token.is_empty() {
                    segments.push(Segment::Descendant(token.to_string()));
                }
                continue;
            }

            if token.is_empty() {
                return Err(PathError::EmptyStep(path.to_string()));
            }

            let (operator, argument) = token.split_once('@').unwrap_or((token, ""));
            let operator = operator.trim();
            let op = RelationOp::from_name(operator).ok_or_else(|| PathError::UnknownOperator {
                operator: operator.to_string(),
                path: path.to_string(),
            })?;

            let argument = argument.trim();
            segments.push(Segment::Relational {
                op,
                argument: (!argument.is_empty()).then(|| argument.to_string()),
            });
        }

        Ok(Self {
            source: path.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_relational_steps(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Relational { .. }))
    }
}
