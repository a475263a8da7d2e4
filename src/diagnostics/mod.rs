//! Lint for input bindings
//!
//! Catches binding mistakes before they surface at runtime, useful for:
//! - CI checks over shipped bindings files
//! - Finding never-bound actions and bad defaults
//! - Listing every range violation at once instead of the first load error
//!
//! # Example
//!
//! ```no_run
//! use oil_input::diagnostics::{BindingLinter, rules::*};
//! use oil_input::input::{InputLoader, TomlBindingsFile};
//!
//! let bindings = TomlBindingsFile::new("config/bindings.toml").load().unwrap();
//! let report = BindingLinter::new()
//!     .add_rule(DefaultConfigurationRule::new())
//!     .add_rule(BindingRangeRule::new())
//!     .run(&bindings);
//!
//! if report.is_clean() {
//!     println!("Bindings look good!");
//! }
//! ```

pub mod linter;
pub mod reporter;
pub mod rule;
pub mod rules;

pub use linter::{BindingLinter, LintReport, RuleOutcome};
pub use reporter::{format_report, print_report};
pub use rule::{BindingRule, RuleResult, RuleStatus};

use crate::input::InputBindings;

/// Linter with every built-in rule
pub fn default_linter() -> BindingLinter {
    BindingLinter::new()
        .add_rule(rules::DefaultConfigurationRule::new())
        .add_rule(rules::BindingRangeRule::new())
        .add_rule(rules::UnboundAxisRule::new())
        .add_rule(rules::DuplicateKeyRule::new())
        .add_rule(rules::GravityRule::new())
}

/// Runs every built-in rule over `bindings`
pub fn lint_bindings(bindings: &InputBindings) -> LintReport {
    default_linter().run(bindings)
}
