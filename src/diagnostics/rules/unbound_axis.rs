//! Never-bound action rule

use crate::diagnostics::rule::{BindingRule, RuleResult};
use crate::input::{AxisBinding, InputBindings};

/// Flags axes that no physical input can drive
///
/// Empty axes and key-driven axes with every key slot unset fall in this
/// category. Remote axes are driven by code and never flagged.
#[derive(Debug, Default)]
pub struct UnboundAxisRule;

impl UnboundAxisRule {
    pub fn new() -> Self {
        Self
    }
}

impl BindingRule for UnboundAxisRule {
    fn name(&self) -> &'static str {
        "Unbound axes"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Every axis should be reachable from some input")
    }

    fn check(&self, bindings: &InputBindings) -> RuleResult {
        let mut findings = Vec::new();
        let mut total = 0;

        for config in &bindings.configurations {
            for axis in config.axes() {
                total += 1;
                let unbound = match axis.binding() {
                    AxisBinding::Empty => true,
                    binding @ (AxisBinding::Button(_) | AxisBinding::DigitalAxis(_)) => {
                        binding.bound_keys().is_empty()
                    }
                    _ => false,
                };
                if unbound {
                    findings.push(format!(
                        "{}/{}: {} has nothing bound",
                        config.name(),
                        axis.name(),
                        axis.axis_type()
                    ));
                }
            }
        }

        if findings.is_empty() {
            RuleResult::pass(format!("{total} axes bound"))
        } else {
            RuleResult::warn(format!("{} of {total} axes unbound", findings.len()))
                .with_findings(findings)
        }
    }
}
