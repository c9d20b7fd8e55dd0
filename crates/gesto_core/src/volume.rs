//! Hysteretic boxes in N-dimensional signal space.
//!
//! A [`HysteresisVolume`] holds one [`HysteresisRange`] per axis. The volume
//! is active when every conditioned axis is active, and its interpolation is
//! the product over all axes.

use std::ops::{BitAndAssign, BitOrAssign, Mul};

use gesto_math::{DVec2, DVec3};
use thiserror::Error;

use crate::hysteresis_range::HysteresisRange;
use crate::state::ActivationState;

/// Axis count does not match the volume dimension.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} axes, found {found}")]
pub struct DimensionError {
    pub expected: usize,
    pub found: usize,
}

/// N debounced intervals combined with AND semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisVolume<const N: usize> {
    space: [HysteresisRange; N],
    state: ActivationState,
}

impl<const N: usize> Default for HysteresisVolume<N> {
    fn default() -> Self {
        Self {
            space: [HysteresisRange::default(); N],
            state: ActivationState::ACTIVE,
        }
    }
}

impl<const N: usize> HysteresisVolume<N> {
    /// Create a volume from one range per axis.
    pub fn new(space: [HysteresisRange; N]) -> Self {
        let mut volume = Self {
            space,
            state: ActivationState::ACTIVE,
        };
        volume.refresh();
        volume
    }

    /// Feed `point[i]` to axis `i` and recompute the composite state.
    pub fn update(&mut self, point: [f64; N]) -> ActivationState {
        for (axis, value) in self.space.iter_mut().zip(point) {
            axis.update(value);
        }
        self.refresh();
        self.state
    }

    /// Recompute the composite state from the axes.
    ///
    /// Only conditioned axes vote on activation, but every axis weighs in on
    /// the interpolation with its last value. Without any condition the
    /// previous state is kept.
    pub fn refresh(&mut self) {
        if self.conditions() == 0 {
            return;
        }
        let active = self
            .space
            .iter()
            .filter(|axis| axis.conditions() > 0)
            .all(HysteresisRange::is_active);
        let interpolated: f64 = self.space.iter().map(HysteresisRange::interpolated).product();
        self.state = ActivationState::new(active, interpolated);
    }

    /// Sum of conditions across all axes.
    pub fn conditions(&self) -> usize {
        self.space.iter().map(HysteresisRange::conditions).sum()
    }

    pub fn activate(&mut self) {
        self.space.iter_mut().for_each(HysteresisRange::activate);
        self.state = ActivationState::ACTIVE;
    }

    pub fn enervate(&mut self) {
        self.space.iter_mut().for_each(HysteresisRange::enervate);
        self.state = ActivationState::INACTIVE;
    }

    pub fn reset(&mut self) {
        self.enervate();
    }

    /// Concatenate the axes of two volumes into a `K = N + M` volume.
    ///
    /// The joined state is the AND of both states, so its interpolation is
    /// the product of both interpolations rather than the right-hand
    /// interpolation gated by the left-hand flag. Later updates recompute it
    /// from the axes.
    pub fn cartesian<const M: usize, const K: usize>(
        &self,
        rhs: &HysteresisVolume<M>,
    ) -> HysteresisVolume<K> {
        const { assert!(N + M == K, "cartesian product dimension must be N + M") };

        log::debug!("Joining {}-axis and {}-axis hysteresis volumes", N, M);

        let space = std::array::from_fn(|i| {
            if i < N {
                self.space[i]
            } else {
                rhs.space[i - N]
            }
        });
        HysteresisVolume {
            space,
            state: self.state & rhs.state,
        }
    }

    pub fn axes(&self) -> &[HysteresisRange; N] {
        &self.space
    }

    pub fn axis(&self, index: usize) -> Option<&HysteresisRange> {
        self.space.get(index)
    }

    /// Mutable access to one axis. Call [`HysteresisVolume::refresh`] after
    /// changing thresholds to fold the change into the composite state.
    pub fn axis_mut(&mut self, index: usize) -> Option<&mut HysteresisRange> {
        self.space.get_mut(index)
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

impl HysteresisVolume<2> {
    /// Sample with a 2D position.
    pub fn update_vec(&mut self, point: DVec2) -> ActivationState {
        self.update(point.to_array())
    }
}

impl HysteresisVolume<3> {
    /// Sample with a 3D position, e.g. a palm position.
    pub fn update_vec(&mut self, point: DVec3) -> ActivationState {
        self.update(point.to_array())
    }
}

impl From<HysteresisRange> for HysteresisVolume<1> {
    fn from(range: HysteresisRange) -> Self {
        Self::new([range])
    }
}

impl<const N: usize> TryFrom<&[HysteresisRange]> for HysteresisVolume<N> {
    type Error = DimensionError;

    fn try_from(axes: &[HysteresisRange]) -> Result<Self, Self::Error> {
        let space: [HysteresisRange; N] = axes.try_into().map_err(|_| DimensionError {
            expected: N,
            found: axes.len(),
        })?;
        Ok(Self::new(space))
    }
}

impl<const N: usize> BitAndAssign for HysteresisVolume<N> {
    fn bitand_assign(&mut self, rhs: HysteresisVolume<N>) {
        for (axis, other) in self.space.iter_mut().zip(rhs.space) {
            *axis &= other;
        }
        self.refresh();
    }
}

impl<const N: usize> BitOrAssign for HysteresisVolume<N> {
    fn bitor_assign(&mut self, rhs: HysteresisVolume<N>) {
        for (axis, other) in self.space.iter_mut().zip(rhs.space) {
            *axis |= other;
        }
        self.refresh();
    }
}

/// `Mul` spelled out for small dimensions; use
/// [`HysteresisVolume::cartesian`] for anything larger.
macro_rules! impl_cartesian_mul {
    ($(($n:literal, $m:literal) => $k:literal),* $(,)?) => {
        $(
            impl Mul<HysteresisVolume<$m>> for HysteresisVolume<$n> {
                type Output = HysteresisVolume<$k>;

                fn mul(self, rhs: HysteresisVolume<$m>) -> HysteresisVolume<$k> {
                    self.cartesian(&rhs)
                }
            }
        )*
    };
}

impl_cartesian_mul!(
    (1, 1) => 2,
    (1, 2) => 3,
    (2, 1) => 3,
    (1, 3) => 4,
    (3, 1) => 4,
    (2, 2) => 4,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hysteresis::Hysteresis;

    fn unit() -> HysteresisRange {
        HysteresisRange::new(Hysteresis::new(0.0, 1.0), Hysteresis::new(3.0, 2.0))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_one_dimensional_lift() {
        let mut range = unit();
        let mut volume = HysteresisVolume::from(unit());
        assert_eq!(volume.conditions(), range.conditions());
        assert_eq!(volume.state(), range.state());

        for point in [1.5, 0.5, 2.5, 3.5, 2.5, -1.0, 0.75, 1.25, 2.75] {
            assert_eq!(volume.update([point]), range.update(point));
        }
    }

    #[test]
    fn test_product_of_unit_ranges() {
        let unit1 = HysteresisVolume::from(unit());
        let mut plane = unit1 * unit1;
        assert_eq!(plane.conditions(), 4);
        assert_eq!(plane.axes().len(), 2);

        assert_eq!(plane.update([1.5, 1.5]), ActivationState::ACTIVE);

        let state = plane.update([0.5, 2.5]);
        assert!(state.active);
        assert_close(state.interpolated, 0.25);

        assert!(!plane.update([1.5, 3.5]).active);
    }

    #[test]
    fn test_product_state_is_and_of_operands() {
        let mut active = HysteresisVolume::from(unit());
        active.update([1.5]);
        let inactive = HysteresisVolume::from(unit());

        let joined: HysteresisVolume<2> = active.cartesian(&inactive);
        assert!(!joined.is_active());
        assert_eq!(joined.state(), active.state() & inactive.state());

        let both: HysteresisVolume<2> = active * active;
        assert_eq!(both.state(), ActivationState::ACTIVE);
    }

    #[test]
    fn test_product_state_before_first_update() {
        let mut lhs = HysteresisVolume::from(unit());
        lhs.activate();
        lhs.update([0.5]);
        assert_eq!(lhs.state(), ActivationState::new(true, 0.5));

        let joined = lhs * lhs;
        assert!(joined.is_active());
        assert_close(joined.interpolated(), 0.25);
    }

    #[test]
    fn test_nan_sample_enervates_volume() {
        let mut plane = HysteresisVolume::new([unit(), unit()]);
        assert!(plane.update([1.5, 1.5]).active);

        assert_eq!(plane.update([1.5, f64::NAN]), ActivationState::INACTIVE);
        assert!(plane.axis(0).is_some_and(HysteresisRange::is_active));
        assert!(plane.axis(1).is_some_and(|axis| !axis.is_active()));
    }

    #[test]
    fn test_cartesian_keeps_axis_order() {
        let mut shifted = unit();
        shifted += 10.0;
        let first = HysteresisVolume::from(unit());
        let rest = HysteresisVolume::new([HysteresisRange::default(), shifted]);

        let space: HysteresisVolume<3> = first * rest;
        assert_eq!(space.axis(0), Some(&unit()));
        assert_eq!(space.axis(1), Some(&HysteresisRange::default()));
        assert_eq!(space.axis(2).map(HysteresisRange::conditions), Some(2));
        assert_eq!(space.axis(3), None);
        assert_eq!(space.conditions(), 4);
    }

    #[test]
    fn test_unconditioned_axis_is_multiplicative_identity() {
        let mut volume = HysteresisVolume::new([unit(), HysteresisRange::default()]);
        assert_eq!(volume.conditions(), 2);

        let state = volume.update([0.5, 99.0]);
        assert!(!state.active);
        assert_close(state.interpolated, 0.5);

        assert_eq!(volume.update([1.5, -99.0]), ActivationState::ACTIVE);
    }

    #[test]
    fn test_revoked_axis_weighs_interpolation_only() {
        let mut revoked = unit();
        revoked.update(0.5);
        revoked.set_max(2.0, 3.0);
        revoked.set_min(1.0, 0.0);
        assert_eq!(revoked.conditions(), 0);
        assert_eq!(revoked.state(), ActivationState::new(false, 0.5));

        let mut volume = HysteresisVolume::new([unit(), revoked]);
        let state = volume.update([1.5, 0.0]);
        assert!(state.active);
        assert_close(state.interpolated, 0.5);
    }

    #[test]
    fn test_unconditioned_volume_is_frozen() {
        let mut volume = HysteresisVolume::<3>::default();
        assert_eq!(volume.conditions(), 0);
        assert_eq!(volume.update([1.0, 2.0, 3.0]), ActivationState::ACTIVE);

        volume.enervate();
        assert_eq!(volume.update([1.0, 2.0, 3.0]), ActivationState::INACTIVE);
    }

    #[test]
    fn test_activate_cascades() {
        let mut volume = HysteresisVolume::new([unit(), unit()]);
        volume.activate();
        assert!(volume.is_active());
        assert!(volume.axes().iter().all(HysteresisRange::is_active));

        volume.enervate();
        assert_eq!(volume.state(), ActivationState::INACTIVE);
        assert!(volume.axes().iter().all(|axis| !axis.is_active()));
    }

    #[test]
    fn test_try_from_slice() {
        let axes = [unit(), unit(), unit()];

        let volume = HysteresisVolume::<3>::try_from(&axes[..]);
        assert!(volume.is_ok());

        let err = HysteresisVolume::<2>::try_from(&axes[..]).unwrap_err();
        assert_eq!(err, DimensionError { expected: 2, found: 3 });
        assert_eq!(err.to_string(), "expected 2 axes, found 3");
    }

    #[test]
    fn test_and_assign_axis_wise() {
        let mut volume = HysteresisVolume::<2>::default();
        volume &= HysteresisVolume::new([unit(), HysteresisRange::default()]);
        assert_eq!(volume.conditions(), 2);
        assert_eq!(volume.axis(0), Some(&unit()));

        let mut narrow = HysteresisRange::default();
        narrow.set_min(1.0, 1.5);
        volume &= HysteresisVolume::new([narrow, narrow]);
        assert_eq!(volume.conditions(), 3);
        assert_eq!(
            volume.axis(0).map(|axis| axis.min().activation().min),
            Some(1.5)
        );
    }

    #[test]
    fn test_or_assign_axis_wise() {
        let mut volume = HysteresisVolume::new([unit(), unit()]);
        let mut wide = HysteresisRange::default();
        wide.set_min(-1.0, 0.5);
        volume |= HysteresisVolume::new([wide, HysteresisRange::default()]);

        assert_eq!(
            volume.axis(0).map(|axis| axis.min().activation().min),
            Some(0.5)
        );
        assert_eq!(volume.axis(1), Some(&unit()));
    }

    #[test]
    fn test_axis_mut_then_refresh() {
        let mut volume = HysteresisVolume::new([unit(), unit()]);
        volume.update([1.5, 1.5]);

        if let Some(axis) = volume.axis_mut(1) {
            axis.set_min(1.75, 1.8);
        }
        volume.refresh();
        assert!(volume.is_active());
        assert!(!volume.update([1.5, 1.5]).active);
    }

    #[test]
    fn test_update_vec() {
        let mut plane = HysteresisVolume::new([unit(), unit()]);
        assert!(plane.update_vec(DVec2::new(1.5, 1.5)).active);

        let mut space = HysteresisVolume::new([unit(), unit(), unit()]);
        assert!(space.update_vec(DVec3::splat(1.5)).active);
        assert!(!space.update_vec(DVec3::new(1.5, 1.5, 4.0)).active);
    }
}
