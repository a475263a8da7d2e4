//! Button edge state

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Computes this frame's state from the previous state and the sampled level
    ///
    /// Each physical transition yields exactly one frame of `JustPressed` or
    /// `JustReleased`.
    pub fn next(self, down: bool) -> Self {
        match (self.is_down(), down) {
            (false, true) => Self::JustPressed,
            (true, true) => Self::Pressed,
            (true, false) => Self::JustReleased,
            (false, false) => Self::Released,
        }
    }

    /// Builds a state from an externally supplied level and edge flag
    pub fn from_level(down: bool, just_changed: bool) -> Self {
        match (down, just_changed) {
            (true, true) => Self::JustPressed,
            (true, false) => Self::Pressed,
            (false, true) => Self::JustReleased,
            (false, false) => Self::Released,
        }
    }

    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    /// Returns true if button was just released this frame
    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_hold_release_sequence() {
        let levels = [true, true, false, false, true];
        let mut state = ButtonState::Released;
        let mut seen = Vec::new();
        for down in levels {
            state = state.next(down);
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                ButtonState::JustPressed,
                ButtonState::Pressed,
                ButtonState::JustReleased,
                ButtonState::Released,
                ButtonState::JustPressed,
            ]
        );
    }

    #[test]
    fn test_advance_clears_edges() {
        assert_eq!(ButtonState::JustPressed.advance(), ButtonState::Pressed);
        assert_eq!(ButtonState::JustReleased.advance(), ButtonState::Released);
        assert_eq!(ButtonState::Pressed.advance(), ButtonState::Pressed);
    }

    #[test]
    fn test_from_level() {
        assert!(ButtonState::from_level(true, true).is_just_pressed());
        assert!(ButtonState::from_level(false, true).is_just_released());
        assert!(ButtonState::from_level(true, false).is_down());
        assert!(!ButtonState::from_level(false, false).is_down());
    }
}
