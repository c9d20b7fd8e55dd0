//! Two-sided hysteresis over an interval.
//!
//! The lower edge is always a rising [`Hysteresis`], the upper edge always a
//! falling one. Edges without a condition drop out of the composition, so a
//! range with a single conditioned edge behaves exactly like that edge.

use std::ops::{AddAssign, BitAndAssign, BitOrAssign, DivAssign, MulAssign, SubAssign};

use crate::hysteresis::Hysteresis;
use crate::state::ActivationState;

/// A bounded interval whose two edges are independently debounced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisRange {
    min: Hysteresis,
    max: Hysteresis,
    state: ActivationState,
}

/// Unconstrained: both edges lack a condition and the range reports
/// `ActivationState::ACTIVE` until an edge is installed.
impl Default for HysteresisRange {
    fn default() -> Self {
        Self {
            min: Hysteresis::never_active(),
            max: Hysteresis::never_active().with_orientation(false),
            state: ActivationState::ACTIVE,
        }
    }
}

impl HysteresisRange {
    /// Create a range from a lower and an upper edge.
    ///
    /// Orientation is forced (`min` rising, `max` falling); an edge laid out
    /// for the other orientation ends up without a condition.
    pub fn new(min: Hysteresis, max: Hysteresis) -> Self {
        let mut range = Self {
            min: min.with_orientation(true),
            max: max.with_orientation(false),
            state: ActivationState::ACTIVE,
        };
        range.refresh();
        range
    }

    /// A range symmetric about zero: `edge` plus its mirror image.
    pub fn symmetric(edge: Hysteresis) -> Self {
        let mirror = -edge;
        if edge.is_increasing() {
            Self::new(edge, mirror)
        } else {
            Self::new(mirror, edge)
        }
    }

    /// Feed one sample to both edges and recompute the composite state.
    pub fn update(&mut self, point: f64) -> ActivationState {
        self.min.update(point);
        self.max.update(point);
        self.refresh();
        self.state
    }

    /// Recompute the composite state from the edges.
    ///
    /// With no conditioned edge the previous state is kept.
    pub fn refresh(&mut self) {
        match (self.min.conditions() > 0, self.max.conditions() > 0) {
            (true, true) => self.state = self.min.state() & self.max.state(),
            (true, false) => self.state = self.min.state(),
            (false, true) => self.state = self.max.state(),
            (false, false) => {}
        }
    }

    /// Number of conditioned edges (0..=2).
    pub fn conditions(&self) -> usize {
        self.min.conditions() + self.max.conditions()
    }

    /// Install a rising lower edge, keeping that edge's current state.
    pub fn set_min(&mut self, persistence: f64, activation: f64) {
        let state = self.min.state();
        self.min = Hysteresis::increasing(persistence, activation);
        self.min.set_state(state);
        self.refresh();
    }

    /// Install a falling upper edge, keeping that edge's current state.
    pub fn set_max(&mut self, persistence: f64, activation: f64) {
        let state = self.max.state();
        self.max = Hysteresis::decreasing(persistence, activation);
        self.max.set_state(state);
        self.refresh();
    }

    /// The lower (rising) edge.
    pub fn min(&self) -> &Hysteresis {
        &self.min
    }

    /// The upper (falling) edge.
    pub fn max(&self) -> &Hysteresis {
        &self.max
    }

    pub fn activate(&mut self) {
        self.min.activate();
        self.max.activate();
        self.state = ActivationState::ACTIVE;
    }

    pub fn enervate(&mut self) {
        self.min.enervate();
        self.max.enervate();
        self.state = ActivationState::INACTIVE;
    }

    pub fn reset(&mut self) {
        self.enervate();
    }

    // TODO: forecast with the max edge as well once gesture callers stop
    // relying on lower-edge-only forecasts.

    /// Forecast whether `point` would activate the lower edge.
    pub fn will_activate(&self, point: f64) -> bool {
        self.min.will_activate(point)
    }

    /// Forecast whether `point` would enervate the lower edge.
    pub fn will_enervate(&self, point: f64) -> bool {
        self.min.will_enervate(point)
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
}

/// Route a single edge by its orientation and AND it in.
impl BitAndAssign<Hysteresis> for HysteresisRange {
    fn bitand_assign(&mut self, rhs: Hysteresis) {
        if rhs.is_increasing() {
            self.min &= rhs;
        } else {
            self.max &= rhs;
        }
        self.refresh();
    }
}

impl BitAndAssign for HysteresisRange {
    fn bitand_assign(&mut self, rhs: HysteresisRange) {
        self.min &= rhs.min;
        self.max &= rhs.max;
        self.refresh();
    }
}

/// Route a single edge by its orientation and OR it in.
impl BitOrAssign<Hysteresis> for HysteresisRange {
    fn bitor_assign(&mut self, rhs: Hysteresis) {
        if rhs.is_increasing() {
            self.min |= rhs;
        } else {
            self.max |= rhs;
        }
        self.refresh();
    }
}

impl BitOrAssign for HysteresisRange {
    fn bitor_assign(&mut self, rhs: HysteresisRange) {
        self.min |= rhs.min;
        self.max |= rhs.max;
        self.refresh();
    }
}

impl AddAssign<f64> for HysteresisRange {
    fn add_assign(&mut self, displacement: f64) {
        self.min += displacement;
        self.max += displacement;
    }
}

impl SubAssign<f64> for HysteresisRange {
    fn sub_assign(&mut self, displacement: f64) {
        self.min -= displacement;
        self.max -= displacement;
    }
}

impl MulAssign<f64> for HysteresisRange {
    fn mul_assign(&mut self, scale: f64) {
        self.min *= scale;
        self.max *= scale;
    }
}

impl DivAssign<f64> for HysteresisRange {
    fn div_assign(&mut self, scale: f64) {
        self.min /= scale;
        self.max /= scale;
    }
}
