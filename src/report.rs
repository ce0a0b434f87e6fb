// Thu Oct 15 2026 - Alex

use crate::engine::{CombinationMode, ErrorRecord, RuleId, ValidationOutcome};
use crate::tree::NodeRef;
use colored::*;
use serde::Serialize;

/// Result of one rule on one node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeReport {
    pub rule: RuleId,
    pub element: String,
    pub combination: CombinationMode,
    pub passed: bool,
    pub records: Vec<ErrorRecord>,
    pub diagnostics: Vec<String>,
}

impl NodeReport {
    /// Failed under its combination mode with at least one `error` record.
    pub fn is_blocking(&self) -> bool {
        !self.passed && self.records.iter().any(ErrorRecord::is_error)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSummary {
    pub nodes_checked: usize,
    pub nodes_failed: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub other_count: usize,
    pub diagnostic_count: usize,
}

impl ReportSummary {
    fn add(&mut self, entry: &NodeReport) {
        self.nodes_checked += 1;
        if !entry.passed {
            self.nodes_failed += 1;
        }
        for record in &entry.records {
            match record.severity.as_str() {
                "error" => self.error_count += 1,
                "warning" => self.warning_count += 1,
                _ => self.other_count += 1,
            }
        }
        self.diagnostic_count += entry.diagnostics.len();
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub entries: Vec<NodeReport>,
    pub summary: ReportSummary,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        rule: RuleId,
        node: NodeRef<'_>,
        combination: CombinationMode,
        outcome: ValidationOutcome,
    ) {
        let entry = NodeReport {
            rule,
            element: node.describe(),
            combination,
            passed: outcome.passes(combination),
            diagnostics: outcome.diagnostics.iter().map(ToString::to_string).collect(),
            records: outcome.records,
        };
        self.summary.add(&entry);
        self.entries.push(entry);
    }

    pub fn failures(&self) -> impl Iterator<Item = &NodeReport> {
        self.entries.iter().filter(|e| !e.passed)
    }

    pub fn is_valid(&self) -> bool {
        !self.entries.iter().any(NodeReport::is_blocking)
    }

    pub fn format_report(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "=== Validation Report ===".bold()));
        output.push_str(&format!(
            "Checked {} node(s), {} failed\n",
            self.summary.nodes_checked, self.summary.nodes_failed
        ));
        output.push_str(&format!("  Errors: {}\n", self.summary.error_count));
        output.push_str(&format!("  Warnings: {}\n", self.summary.warning_count));
        if self.summary.other_count > 0 {
            output.push_str(&format!("  Other: {}\n", self.summary.other_count));
        }
        if self.summary.diagnostic_count > 0 {
            output.push_str(&format!("  Config problems: {}\n", self.summary.diagnostic_count));
        }

        for entry in &self.entries {
            if entry.records.is_empty() && entry.diagnostics.is_empty() {
                continue;
            }

            let status = if entry.passed { "PASS".green() } else { "FAIL".red() };
            output.push_str(&format!(
                "\n{} {} ({}, {:?})\n",
                status.bold(),
                entry.element,
                entry.rule,
                entry.combination
            ));

            for record in &entry.records {
                let tag = match record.severity.as_str() {
                    "error" => record.severity.red(),
                    "warning" => record.severity.yellow(),
                    _ => record.severity.blue(),
                };
                output.push_str(&format!(
                    "    - [{}] {} ({})\n",
                    tag, record.message, record.error_type
                ));
            }
            for diagnostic in &entry.diagnostics {
                output.push_str(&format!("    ! {}\n", diagnostic.dimmed()));
            }
        }

        output
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl serde::Serialize for ValidationReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ValidationReport", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("summary", &self.summary)?;
        state.serialize_field("entries", &self.entries)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, ValidationRule, ValidatorBinding};
    use crate::tree::{Document, ElementSpec};

    fn report_for(value: &str, severity: &str) -> ValidationReport {
        let doc = Document::from_elements(vec![ElementSpec::new("input").with_id("n").with_value(value)]);
        let node = doc.node(doc.find("#n").unwrap().unwrap());
        let rule = ValidationRule::for_selector("#n")
            .with_binding(ValidatorBinding::new(severity, "number").with_option("max", 10))
            .with_binding(ValidatorBinding::error("missing"));

        let outcome = Engine::new().run(node, Some(&rule)).unwrap();
        let mut report = ValidationReport::new();
        report.add(RuleId(0), node, rule.combination, outcome);
        report
    }

    #[test]
    fn test_summary_counts() {
        let report = report_for("12", "error");
        assert_eq!(report.summary.nodes_checked, 1);
        assert_eq!(report.summary.nodes_failed, 1);
        assert_eq!(report.summary.error_count, 1);
        assert_eq!(report.summary.diagnostic_count, 1);
        assert!(!report.is_valid());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_warnings_do_not_block() {
        let report = report_for("12", "warning");
        assert_eq!(report.summary.warning_count, 1);
        assert!(report.is_valid());
        assert!(report_for("3", "error").is_valid());
    }

    #[test]
    fn test_text_and_json_output() {
        colored::control::set_override(false);
        let report = report_for("12", "error");

        let text = report.format_report();
        assert!(text.contains("FAIL input#n (rule 0, And)"));
        assert!(text.contains("- [error] The value is bigger than the allowed maximum. (max)"));
        assert!(text.contains("! binding 1: 'missing' is not a registered validator"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["summary"]["error_count"], 1);
        assert_eq!(json["entries"][0]["records"][0]["errorType"], "max");
    }
}
