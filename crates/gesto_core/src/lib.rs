//! Gesto Core - Hysteresis activation engine for gesture recognition.
//!
//! This crate turns noisy continuous sensor signals into stable activation
//! states:
//!
//! - **`Hysteresis`**: one debounced threshold with an activation and a
//!   persistence range
//! - **`HysteresisRange`**: an interval with independently debounced edges
//! - **`HysteresisVolume<N>`**: a box in N-dimensional signal space
//! - **Configuration**: JSON threshold files built into volumes
//!
//! Every primitive returns an [`ActivationState`] from `update`: a debounced
//! boolean plus a `[0, 1]` interpolation for smooth blending.
//!
//! # Example
//!
//! ```
//! use gesto_core::{Hysteresis, HysteresisRange};
//!
//! // Active inside (1, 2), persists while inside (0, 3)
//! let mut grab = HysteresisRange::new(Hysteresis::new(0.0, 1.0), Hysteresis::new(3.0, 2.0));
//!
//! assert!(grab.update(1.5).active);
//! let state = grab.update(0.5);
//! assert!(state.active);
//! assert_eq!(state.interpolated, 0.5);
//! ```

pub mod config;
pub mod hysteresis;
pub mod hysteresis_range;
pub mod state;
pub mod volume;

// Re-export commonly used types
pub use config::{
    AxisConfig, ConfigError, ConfigResult, EdgeConfig, ThresholdPair, VolumeConfig,
};
pub use hysteresis::Hysteresis;
pub use hysteresis_range::HysteresisRange;
pub use state::ActivationState;
pub use volume::{DimensionError, HysteresisVolume};
