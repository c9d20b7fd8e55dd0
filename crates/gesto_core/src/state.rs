//! The observable output of every hysteresis primitive.

use std::ops::{BitAnd, BitOr};

/// Activation flag plus a `[0, 1]` interpolation used for smooth blending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationState {
    /// Debounced boolean activation
    pub active: bool,

    /// Continuous activation strength
    pub interpolated: f64,
}

impl ActivationState {
    /// Fully active.
    pub const ACTIVE: ActivationState = ActivationState {
        active: true,
        interpolated: 1.0,
    };

    /// Fully inactive.
    pub const INACTIVE: ActivationState = ActivationState {
        active: false,
        interpolated: 0.0,
    };

    /// Create a state from an explicit flag and interpolation.
    pub fn new(active: bool, interpolated: f64) -> Self {
        Self {
            active,
            interpolated,
        }
    }

    /// `ACTIVE` or `INACTIVE` depending on `active`.
    pub fn from_active(active: bool) -> Self {
        if active {
            Self::ACTIVE
        } else {
            Self::INACTIVE
        }
    }
}

/// AND composition: both must be active, strengths multiply.
impl BitAnd for ActivationState {
    type Output = ActivationState;

    fn bitand(self, rhs: ActivationState) -> ActivationState {
        ActivationState::new(
            self.active && rhs.active,
            self.interpolated * rhs.interpolated,
        )
    }
}

/// OR composition: either may be active, the stronger interpolation wins.
impl BitOr for ActivationState {
    type Output = ActivationState;

    fn bitor(self, rhs: ActivationState) -> ActivationState {
        ActivationState::new(
            self.active || rhs.active,
            self.interpolated.max(rhs.interpolated),
        )
    }
}

impl From<ActivationState> for bool {
    fn from(state: ActivationState) -> bool {
        state.active
    }
}

impl From<ActivationState> for f64 {
    fn from(state: ActivationState) -> f64 {
        state.interpolated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_composition() {
        let a = ActivationState::new(true, 0.5);
        let b = ActivationState::new(true, 0.5);
        assert_eq!(a & b, ActivationState::new(true, 0.25));

        let c = ActivationState::new(false, 0.8);
        assert_eq!(a & c, ActivationState::new(false, 0.4));

        // ACTIVE is the identity
        assert_eq!(a & ActivationState::ACTIVE, a);
    }

    #[test]
    fn test_or_composition() {
        let a = ActivationState::new(false, 0.3);
        let b = ActivationState::new(true, 0.7);
        assert_eq!(a | b, ActivationState::new(true, 0.7));

        // INACTIVE is the identity
        assert_eq!(a | ActivationState::INACTIVE, a);
    }

    #[test]
    fn test_conversions() {
        let state = ActivationState::new(true, 0.75);
        assert!(bool::from(state));
        assert_eq!(f64::from(state), 0.75);
        assert_eq!(ActivationState::from_active(false), ActivationState::INACTIVE);
    }
}
