//! Lint rule trait and its result type

use std::time::Duration;

use colored::{ColoredString, Colorize};

use crate::input::InputBindings;

/// How bad a rule's findings are
///
/// Ordered so the worst status of a report is its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleStatus {
    Pass,
    /// Bindings load but are probably not what the author meant
    Warn,
    /// Bindings would be rejected on load
    Fail,
}

impl RuleStatus {
    pub fn label(self) -> &'static str {
        match self {
            RuleStatus::Pass => "PASS",
            RuleStatus::Warn => "WARN",
            RuleStatus::Fail => "FAIL",
        }
    }

    pub fn colored(self) -> ColoredString {
        match self {
            RuleStatus::Pass => self.label().green(),
            RuleStatus::Warn => self.label().yellow(),
            RuleStatus::Fail => self.label().red(),
        }
    }
}

/// Outcome of one rule over one set of bindings
#[derive(Debug, Clone)]
pub struct RuleResult {
    pub status: RuleStatus,
    /// One-line summary shown in the report table
    pub message: String,
    /// Offending configurations or axes, one per entry
    pub findings: Vec<String>,
    pub duration: Duration,
}

impl RuleResult {
    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(RuleStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(RuleStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(RuleStatus::Fail, message)
    }

    fn new(status: RuleStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            findings: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn with_findings(mut self, findings: Vec<String>) -> Self {
        self.findings = findings;
        self
    }

    pub fn with_finding(mut self, finding: impl Into<String>) -> Self {
        self.findings.push(finding.into());
        self
    }

    /// True if any finding contains `text`
    pub fn mentions(&self, text: &str) -> bool {
        self.findings.iter().any(|finding| finding.contains(text))
    }
}

/// A check run over a set of bindings
pub trait BindingRule {
    /// Short name shown in the report
    fn name(&self) -> &'static str;

    fn check(&self, bindings: &InputBindings) -> RuleResult;

    /// What the rule looks for, printed above its findings
    fn description(&self) -> Option<&'static str> {
        None
    }
}
