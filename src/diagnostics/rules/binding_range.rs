//! Range and argument rule

use std::collections::HashSet;

use crate::diagnostics::rule::{BindingRule, RuleResult};
use crate::input::InputBindings;

/// Reports every error that would make loading the bindings fail
///
/// Loading stops at the first problem; this rule lists all of them.
#[derive(Debug, Default)]
pub struct BindingRangeRule;

impl BindingRangeRule {
    pub fn new() -> Self {
        Self
    }
}

impl BindingRule for BindingRangeRule {
    fn name(&self) -> &'static str {
        "Binding ranges"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Names, indices and rates must be within supported limits")
    }

    fn check(&self, bindings: &InputBindings) -> RuleResult {
        let mut findings = Vec::new();
        let mut configurations = HashSet::new();

        for config in &bindings.configurations {
            if config.name().trim().is_empty() {
                findings.push("configuration with an empty name".to_string());
            } else if !configurations.insert(config.name()) {
                findings.push(format!("{}: declared more than once", config.name()));
            }

            let mut axes = HashSet::new();
            for axis in config.axes() {
                if axis.name().trim().is_empty() {
                    findings.push(format!("{}: axis with an empty name", config.name()));
                } else if !axes.insert(axis.name()) {
                    findings.push(format!(
                        "{}/{}: declared more than once",
                        config.name(),
                        axis.name()
                    ));
                }

                if let Err(err) = axis.binding().validate() {
                    findings.push(format!("{}/{}: {err}", config.name(), axis.name()));
                }
            }
        }

        if findings.is_empty() {
            RuleResult::pass("All bindings within range")
        } else {
            RuleResult::fail(format!("{} invalid bindings", findings.len()))
                .with_findings(findings)
        }
    }
}
