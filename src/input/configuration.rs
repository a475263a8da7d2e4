//! Named sets of axes

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::axis::AxisConfiguration;
use super::device::DeviceSampler;
use super::error::{InputError, Result, check_name};

/// A named, ordered collection of axes (e.g. "Keyboard" or "Gamepad")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfiguration {
    name: String,
    #[serde(default)]
    axes: Vec<AxisConfiguration>,
}

impl InputConfiguration {
    /// Creates an empty configuration
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_name("Input configuration", &name)?;
        Ok(Self {
            name,
            axes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Axes in declaration order
    pub fn axes(&self) -> &[AxisConfiguration] {
        &self.axes
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn contains(&self, axis: &str) -> bool {
        self.axis(axis).is_some()
    }

    pub fn axis(&self, name: &str) -> Option<&AxisConfiguration> {
        self.axes.iter().find(|a| a.name() == name)
    }

    pub fn axis_mut(&mut self, name: &str) -> Option<&mut AxisConfiguration> {
        self.axes.iter_mut().find(|a| a.name() == name)
    }

    /// Looks up an axis, failing with `AxisNotFound`
    pub fn require_axis(&self, name: &str) -> Result<&AxisConfiguration> {
        self.axis(name).ok_or_else(|| self.not_found(name))
    }

    /// Mutable variant of [`require_axis`](Self::require_axis)
    pub fn require_axis_mut(&mut self, name: &str) -> Result<&mut AxisConfiguration> {
        let configuration = self.name.clone();
        self.axis_mut(name).ok_or_else(|| InputError::AxisNotFound {
            configuration,
            axis: name.to_string(),
        })
    }

    /// Appends an axis, rejecting duplicate names
    pub fn add_axis(&mut self, mut axis: AxisConfiguration) -> Result<&mut AxisConfiguration> {
        if self.contains(axis.name()) {
            return Err(InputError::DuplicateAxis {
                configuration: self.name.clone(),
                axis: axis.name().to_string(),
            });
        }
        axis.initialize()?;
        self.axes.push(axis);
        let index = self.axes.len() - 1;
        Ok(&mut self.axes[index])
    }

    /// Removes an axis, preserving the order of the rest
    pub fn remove_axis(&mut self, name: &str) -> Result<AxisConfiguration> {
        let index = self
            .axes
            .iter()
            .position(|a| a.name() == name)
            .ok_or_else(|| self.not_found(name))?;
        Ok(self.axes.remove(index))
    }

    /// Validates names and bindings and resets every axis
    ///
    /// Used for configurations that did not come through [`add_axis`](Self::add_axis),
    /// such as deserialized ones.
    pub fn initialize(&mut self) -> Result<()> {
        check_name("Input configuration", &self.name)?;
        let mut seen = HashSet::new();
        for axis in &mut self.axes {
            check_name("Axis", axis.name())?;
            if !seen.insert(axis.name().to_string()) {
                return Err(InputError::DuplicateAxis {
                    configuration: self.name.clone(),
                    axis: axis.name().to_string(),
                });
            }
            axis.initialize()?;
        }
        Ok(())
    }

    /// Updates every axis in declaration order
    pub fn update(&mut self, devices: &dyn DeviceSampler, delta_time: f32) {
        for axis in &mut self.axes {
            axis.update(devices, delta_time);
        }
    }

    /// Resets every axis to neutral
    pub fn reset(&mut self) {
        for axis in &mut self.axes {
            axis.reset();
        }
    }

    /// True if any axis currently reports input
    pub fn any_input(&self) -> bool {
        self.axes.iter().any(AxisConfiguration::any_input)
    }

    fn not_found(&self, axis: &str) -> InputError {
        InputError::AxisNotFound {
            configuration: self.name.clone(),
            axis: axis.to_string(),
        }
    }
}
