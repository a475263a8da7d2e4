//! Gravity rule

use crate::diagnostics::rule::{BindingRule, RuleResult};
use crate::input::{AxisBinding, InputBindings};

/// Flags digital axes with zero gravity, which never return to neutral
#[derive(Debug, Default)]
pub struct GravityRule;

impl GravityRule {
    pub fn new() -> Self {
        Self
    }
}

impl BindingRule for GravityRule {
    fn name(&self) -> &'static str {
        "Gravity"
    }

    fn check(&self, bindings: &InputBindings) -> RuleResult {
        let findings: Vec<String> = bindings
            .configurations
            .iter()
            .flat_map(|config| {
                config.axes().iter().filter_map(move |axis| match axis.binding() {
                    AxisBinding::DigitalAxis(b) if b.gravity == 0.0 => Some(format!(
                        "{}/{}: value holds after release",
                        config.name(),
                        axis.name()
                    )),
                    _ => None,
                })
            })
            .collect();

        if findings.is_empty() {
            RuleResult::pass("Digital axes return to neutral")
        } else {
            RuleResult::warn(format!("{} digital axes with zero gravity", findings.len()))
                .with_findings(findings)
        }
    }
}
