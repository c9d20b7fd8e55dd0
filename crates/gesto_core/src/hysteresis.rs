//! Single debounced threshold.
//!
//! A [`Hysteresis`] holds two nested ranges: a narrow *activation* range and
//! a wider *persistence* range. A sample inside the activation range turns
//! the hysteresis on, a sample outside the persistence range turns it off,
//! and a sample in between (the dead zone) keeps the previous boolean while
//! the interpolation tracks how far the signal has travelled toward the
//! activation bound.

use std::ops::{AddAssign, BitAndAssign, BitOrAssign, DivAssign, MulAssign, Neg, SubAssign};

use gesto_math::Range;

use crate::state::ActivationState;

/// A two-threshold activation with a boolean state and a blend value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hysteresis {
    activation: Range,
    persistence: Range,
    increasing: bool,
    state: ActivationState,
}

impl Default for Hysteresis {
    fn default() -> Self {
        Self::never_active()
    }
}

impl Hysteresis {
    /// A hysteresis with empty ranges. It has no condition and never activates
    /// from a sample.
    pub fn never_active() -> Self {
        Self {
            activation: Range::EMPTY,
            persistence: Range::EMPTY,
            increasing: true,
            state: ActivationState::INACTIVE,
        }
    }

    /// Create a hysteresis from a persistence and an activation threshold.
    ///
    /// The orientation is inferred: `persistence <= activation` activates on
    /// a rising signal, otherwise on a falling one.
    pub fn new(persistence: f64, activation: f64) -> Self {
        Self::with_state(persistence, activation, false)
    }

    /// Same as [`Hysteresis::new`] with an initial activation state.
    pub fn with_state(persistence: f64, activation: f64, active: bool) -> Self {
        let mut hysteresis = if persistence <= activation {
            Self::increasing(persistence, activation)
        } else {
            Self::decreasing(persistence, activation)
        };
        hysteresis.state = ActivationState::from_active(active);
        hysteresis
    }

    /// Activates once the signal rises above `activation`, persists until it
    /// falls below `persistence`.
    pub fn increasing(persistence: f64, activation: f64) -> Self {
        Self::from_ranges(Range::above(persistence), Range::above(activation), true)
    }

    /// Activates once the signal falls below `activation`, persists until it
    /// rises above `persistence`.
    pub fn decreasing(persistence: f64, activation: f64) -> Self {
        Self::from_ranges(Range::below(persistence), Range::below(activation), false)
    }

    /// Create a hysteresis from arbitrary ranges. Starts inactive.
    pub fn from_ranges(persistence: Range, activation: Range, increasing: bool) -> Self {
        Self {
            activation,
            persistence,
            increasing,
            state: ActivationState::INACTIVE,
        }
    }

    /// Returns a copy with the orientation flag forced.
    ///
    /// Ranges are kept as they are; thresholds laid out for the other
    /// orientation leave the result without a condition.
    pub fn with_orientation(mut self, increasing: bool) -> Self {
        self.increasing = increasing;
        self
    }

    /// Feed one sample and return the resulting state.
    pub fn update(&mut self, point: f64) -> ActivationState {
        let was_active = self.state.active;

        self.state = if self.activation.contains(point) {
            ActivationState::ACTIVE
        } else if !self.persistence.contains(point) {
            ActivationState::INACTIVE
        } else {
            ActivationState::new(was_active, self.dead_zone(point))
        };

        if self.state.active != was_active {
            log::trace!(
                "hysteresis {} at {}",
                if self.state.active { "activated" } else { "enervated" },
                point
            );
        }

        self.state
    }

    /// Interpolation for a sample inside persistence but outside activation.
    ///
    /// Both edges are checked; with half-line ranges only the oriented one
    /// can match.
    fn dead_zone(&self, point: f64) -> f64 {
        let (p, a) = (&self.persistence, &self.activation);
        let mut interpolated = 0.0;
        if p.min < point && point <= a.min {
            interpolated = (point - p.min) / (a.min - p.min);
        }
        if a.max <= point && point < p.max {
            interpolated = (point - p.max) / (a.max - p.max);
        }
        interpolated
    }

    /// 1 when the thresholds are ordered consistently with the orientation,
    /// 0 otherwise. Composites ignore edges without a condition.
    pub fn conditions(&self) -> usize {
        let ordered = if self.increasing {
            self.persistence.min < self.activation.min
        } else {
            self.activation.max < self.persistence.max
        };
        usize::from(ordered)
    }

    /// Force the active state without touching thresholds.
    pub fn activate(&mut self) {
        self.state = ActivationState::ACTIVE;
    }

    /// Force the inactive state without touching thresholds.
    pub fn enervate(&mut self) {
        self.state = ActivationState::INACTIVE;
    }

    /// Alias for [`Hysteresis::enervate`].
    pub fn reset(&mut self) {
        self.enervate();
    }

    /// Would `point` switch an inactive hysteresis on?
    pub fn will_activate(&self, point: f64) -> bool {
        !self.state.active && self.activation.contains(point)
    }

    /// Would `point` switch an active hysteresis off?
    pub fn will_enervate(&self, point: f64) -> bool {
        self.state.active && !self.persistence.contains(point)
    }

    /// Overwrite the oriented bound of both ranges, keeping state.
    pub fn set_thresholds(&mut self, persistence: f64, activation: f64) {
        if self.increasing {
            self.persistence.min = persistence;
            self.activation.min = activation;
        } else {
            self.persistence.max = persistence;
            self.activation.max = activation;
        }
    }

    pub fn activation(&self) -> Range {
        self.activation
    }

    pub fn persistence(&self) -> Range {
        self.persistence
    }

    pub fn is_increasing(&self) -> bool {
        self.increasing
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    #[inline]
    pub fn interpolated(&self) -> f64 {
        self.state.interpolated
    }

    #[inline]
    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: ActivationState) {
        self.state = state;
    }

    /// Shared rule for `&=` and `|=`: an edge without a condition is absent,
    /// so the other side is taken as-is.
    fn merge(
        &mut self,
        rhs: Hysteresis,
        ranges: fn(&Range, &Range) -> Range,
        state: fn(ActivationState, ActivationState) -> ActivationState,
    ) {
        if rhs.conditions() == 0 {
            return;
        }
        if self.conditions() == 0 {
            *self = rhs;
            return;
        }
        self.activation = ranges(&self.activation, &rhs.activation);
        self.persistence = ranges(&self.persistence, &rhs.persistence);
        self.state = state(self.state, rhs.state);
    }
}

/// AND: narrows the active window to where both thresholds agree.
impl BitAndAssign for Hysteresis {
    fn bitand_assign(&mut self, rhs: Hysteresis) {
        self.merge(rhs, Range::intersection, |a, b| a & b);
    }
}

/// OR: widens the active window to where either threshold fires.
impl BitOrAssign for Hysteresis {
    fn bitor_assign(&mut self, rhs: Hysteresis) {
        self.merge(rhs, Range::surrounding, |a, b| a | b);
    }
}

impl AddAssign<f64> for Hysteresis {
    fn add_assign(&mut self, displacement: f64) {
        self.activation += displacement;
        self.persistence += displacement;
    }
}

impl SubAssign<f64> for Hysteresis {
    fn sub_assign(&mut self, displacement: f64) {
        self.activation -= displacement;
        self.persistence -= displacement;
    }
}

impl MulAssign<f64> for Hysteresis {
    fn mul_assign(&mut self, scale: f64) {
        self.activation *= scale;
        self.persistence *= scale;
    }
}

impl DivAssign<f64> for Hysteresis {
    fn div_assign(&mut self, scale: f64) {
        self.activation /= scale;
        self.persistence /= scale;
    }
}

/// Mirror about zero, flipping orientation.
impl Neg for Hysteresis {
    type Output = Hysteresis;

    fn neg(self) -> Hysteresis {
        Hysteresis {
            activation: -self.activation,
            persistence: -self.persistence,
            increasing: !self.increasing,
            state: self.state,
        }
    }
}
