//! Default configuration rule

use crate::diagnostics::rule::{BindingRule, RuleResult};
use crate::input::InputBindings;

/// Checks that the default configuration names a configuration that exists
#[derive(Debug, Default)]
pub struct DefaultConfigurationRule;

impl DefaultConfigurationRule {
    pub fn new() -> Self {
        Self
    }
}

impl BindingRule for DefaultConfigurationRule {
    fn name(&self) -> &'static str {
        "Default configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("The default configuration must be one of the declared configurations")
    }

    fn check(&self, bindings: &InputBindings) -> RuleResult {
        let Some(first) = bindings.configurations.first() else {
            return RuleResult::warn("No configurations declared");
        };

        match bindings.default_configuration.as_deref() {
            None => RuleResult::warn(format!(
                "No default configuration, '{}' will be used",
                first.name()
            )),
            Some(name) if bindings.configuration(name).is_some() => {
                RuleResult::pass(format!("Default is '{name}'"))
            }
            Some(name) => {
                let known: Vec<_> = bindings.configurations.iter().map(|c| c.name()).collect();
                RuleResult::fail(format!("Default configuration '{name}' does not exist"))
                    .with_finding(format!("Known configurations: {}", known.join(", ")))
            }
        }
    }
}
