//! Duplicate key rule

use std::collections::HashMap;

use crate::diagnostics::rule::{BindingRule, RuleResult};
use crate::input::{AxisBinding, InputBindings, KeyCode};

/// Flags a key bound to more than one button in the same configuration
#[derive(Debug, Default)]
pub struct DuplicateKeyRule;

impl DuplicateKeyRule {
    pub fn new() -> Self {
        Self
    }
}

impl BindingRule for DuplicateKeyRule {
    fn name(&self) -> &'static str {
        "Duplicate keys"
    }

    fn description(&self) -> Option<&'static str> {
        Some("One key should trigger at most one button per configuration")
    }

    fn check(&self, bindings: &InputBindings) -> RuleResult {
        let mut findings = Vec::new();

        for config in &bindings.configurations {
            let mut owners: HashMap<KeyCode, &str> = HashMap::new();
            for axis in config.axes() {
                if !matches!(axis.binding(), AxisBinding::Button(_)) {
                    continue;
                }
                for key in axis.binding().bound_keys() {
                    match owners.get(&key) {
                        Some(&owner) if owner != axis.name() => findings.push(format!(
                            "{}: {key} drives both '{owner}' and '{}'",
                            config.name(),
                            axis.name()
                        )),
                        Some(_) => {}
                        None => {
                            owners.insert(key, axis.name());
                        }
                    }
                }
            }
        }

        if findings.is_empty() {
            RuleResult::pass("No key drives two buttons")
        } else {
            RuleResult::warn(format!("{} shared keys", findings.len())).with_findings(findings)
        }
    }
}
