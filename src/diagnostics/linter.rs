//! Runs lint rules over a set of bindings

use std::time::Instant;

use tracing::debug;

use super::rule::{BindingRule, RuleResult, RuleStatus};
use crate::input::InputBindings;

/// One rule's result, tagged with the rule that produced it
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub description: Option<&'static str>,
    pub result: RuleResult,
}

/// Every rule outcome of one lint run, in rule order
#[derive(Debug, Default)]
pub struct LintReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl LintReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of rules that ended with `status`
    pub fn count(&self, status: RuleStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.status == status)
            .count()
    }

    /// Worst status over all rules; `Pass` for an empty report
    pub fn worst(&self) -> RuleStatus {
        self.outcomes
            .iter()
            .map(|outcome| outcome.result.status)
            .max()
            .unwrap_or(RuleStatus::Pass)
    }

    /// True unless some rule failed
    pub fn is_clean(&self) -> bool {
        self.worst() < RuleStatus::Fail
    }

    /// Process exit code: 0 clean, 1 failed, 2 warnings only
    pub fn exit_code(&self) -> i32 {
        match self.worst() {
            RuleStatus::Pass => 0,
            RuleStatus::Fail => 1,
            RuleStatus::Warn => 2,
        }
    }

    pub fn result(&self, rule: &str) -> Option<&RuleResult> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.rule == rule)
            .map(|outcome| &outcome.result)
    }
}

/// An ordered set of rules
#[derive(Default)]
pub struct BindingLinter {
    rules: Vec<Box<dyn BindingRule>>,
}

impl BindingLinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule<R: BindingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Runs every rule against `bindings`
    pub fn run(&self, bindings: &InputBindings) -> LintReport {
        let outcomes = self
            .rules
            .iter()
            .map(|rule| {
                let started = Instant::now();
                let mut result = rule.check(bindings);
                result.duration = started.elapsed();
                debug!(
                    rule = rule.name(),
                    status = ?result.status,
                    findings = result.findings.len(),
                    "Lint rule finished"
                );
                RuleOutcome {
                    rule: rule.name(),
                    description: rule.description(),
                    result,
                }
            })
            .collect();
        LintReport { outcomes }
    }
}
