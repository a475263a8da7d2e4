//! Frame clocks
//!
//! Digital axis decay and scan timeouts both read time through a [`Clock`].
//! The host advances the clock once per frame with the real frame delta; the
//! clock decides whether the game's time scale applies.

/// Source of frame timing
pub trait Clock {
    /// Advances the clock by one frame of `real_delta` seconds
    fn advance(&mut self, real_delta: f32);

    /// Seconds elapsed during the last frame
    fn delta_time(&self) -> f32;

    /// Seconds elapsed since the clock started
    fn time(&self) -> f64;

    /// Sets the time scale multiplier (ignored by clocks that do not scale)
    fn set_time_scale(&mut self, _scale: f32) {}
}

/// Clock that follows the game's time scale (0.0 = paused, 2.0 = double speed)
#[derive(Debug, Clone)]
pub struct ScaledClock {
    time_scale: f32,
    delta: f32,
    time: f64,
}

impl ScaledClock {
    /// Creates a clock running at normal speed
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the time scale
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale.max(0.0);
        self
    }

    /// Returns the current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

impl Default for ScaledClock {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            delta: 0.0,
            time: 0.0,
        }
    }
}

impl Clock for ScaledClock {
    fn advance(&mut self, real_delta: f32) {
        self.delta = real_delta.max(0.0) * self.time_scale;
        self.time += self.delta as f64;
    }

    fn delta_time(&self) -> f32 {
        self.delta
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

/// Clock that always runs at real-time speed
#[derive(Debug, Clone, Default)]
pub struct UnscaledClock {
    delta: f32,
    time: f64,
}

impl UnscaledClock {
    /// Creates a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for UnscaledClock {
    fn advance(&mut self, real_delta: f32) {
        self.delta = real_delta.max(0.0);
        self.time += self.delta as f64;
    }

    fn delta_time(&self) -> f32 {
        self.delta
    }

    fn time(&self) -> f64 {
        self.time
    }
}

/// Picks the clock implementation for the `ignore_timescale` setting
pub fn clock_for(ignore_timescale: bool, time_scale: f32) -> Box<dyn Clock> {
    if ignore_timescale {
        Box::new(UnscaledClock::new())
    } else {
        Box::new(ScaledClock::new().with_time_scale(time_scale))
    }
}
