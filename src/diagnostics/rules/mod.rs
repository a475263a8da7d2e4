//! Built-in lint rules

mod binding_range;
mod default_configuration;
mod duplicate_key;
mod gravity;
mod unbound_axis;

pub use binding_range::BindingRangeRule;
pub use default_configuration::DefaultConfigurationRule;
pub use duplicate_key::DuplicateKeyRule;
pub use gravity::GravityRule;
pub use unbound_axis::UnboundAxisRule;
