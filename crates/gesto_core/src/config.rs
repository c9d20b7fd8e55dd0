//! Threshold configuration.
//!
//! Gesture thresholds are tuned outside the code and shipped as JSON:
//!
//! ```json
//! { "axes": [
//!     { "min": { "persistence": 0.0, "activation": 1.0 },
//!       "max": { "persistence": 3.0, "activation": 2.0 } },
//!     { "max": { "persistence": 10.0, "activation": 8.0 } }
//! ] }
//! ```
//!
//! A missing edge leaves that side of the axis unconstrained.

use std::fmt;
use std::path::Path;

use gesto_math::Range;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hysteresis::Hysteresis;
use crate::hysteresis_range::HysteresisRange;
use crate::volume::{DimensionError, HysteresisVolume};

/// Errors that can occur while loading or building a threshold configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dimension error: {0}")]
    Dimension(#[from] DimensionError),

    #[error("Non-finite threshold on axis {axis} ({edge} edge)")]
    NonFinite { axis: usize, edge: Edge },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which side of an axis an edge bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Min,
    Max,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Min => write!(f, "min"),
            Edge::Max => write!(f, "max"),
        }
    }
}

/// A persistence/activation threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub persistence: f64,
    pub activation: f64,
}

impl ThresholdPair {
    pub fn new(persistence: f64, activation: f64) -> Self {
        Self {
            persistence,
            activation,
        }
    }
}

/// Thresholds of one edge.
///
/// `persistence` and `activation` sit on the edge's own side. An edge made
/// two-sided by an AND merge also carries the far side in `opposite`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub persistence: f64,
    pub activation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opposite: Option<ThresholdPair>,
}

impl EdgeConfig {
    /// A one-sided edge.
    pub fn new(persistence: f64, activation: f64) -> Self {
        Self {
            persistence,
            activation,
            opposite: None,
        }
    }

    /// Bound the far side of the edge as well.
    pub fn with_opposite(mut self, persistence: f64, activation: f64) -> Self {
        self.opposite = Some(ThresholdPair::new(persistence, activation));
        self
    }

    fn check(&self, axis: usize, edge: Edge) -> ConfigResult<()> {
        let far_finite = self
            .opposite
            .map_or(true, |far| far.persistence.is_finite() && far.activation.is_finite());
        if self.persistence.is_finite() && self.activation.is_finite() && far_finite {
            Ok(())
        } else {
            Err(ConfigError::NonFinite { axis, edge })
        }
    }

    /// The hysteresis for this edge with the given orientation. Without an
    /// opposite side the ranges are half-lines.
    fn to_hysteresis(self, increasing: bool) -> Hysteresis {
        let (p, a) = (self.persistence, self.activation);
        let (persistence, activation) = match (increasing, self.opposite) {
            (true, None) => (Range::above(p), Range::above(a)),
            (true, Some(far)) => (Range::new(p, far.persistence), Range::new(a, far.activation)),
            (false, None) => (Range::below(p), Range::below(a)),
            (false, Some(far)) => (Range::new(far.persistence, p), Range::new(far.activation, a)),
        };
        Hysteresis::from_ranges(persistence, activation, increasing)
    }

    /// Capture a conditioned edge, including a finite far side.
    fn capture(edge: &Hysteresis) -> Option<EdgeConfig> {
        if edge.conditions() == 0 {
            return None;
        }

        let (p, a) = (edge.persistence(), edge.activation());
        let (near, far) = if edge.is_increasing() {
            ((p.min, a.min), (p.max, a.max))
        } else {
            ((p.max, a.max), (p.min, a.min))
        };

        let mut config = EdgeConfig::new(near.0, near.1);
        match (far.0.is_finite(), far.1.is_finite()) {
            (true, true) => config = config.with_opposite(far.0, far.1),
            (false, false) => {}
            _ => log::warn!(
                "Edge far side (persistence {}, activation {}) is half-open and cannot be captured",
                far.0,
                far.1
            ),
        }
        Some(config)
    }
}

/// Lower and upper edge of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min: Option<EdgeConfig>,
    pub max: Option<EdgeConfig>,
}

impl AxisConfig {
    /// Build the range for axis number `axis`.
    ///
    /// Thresholds ordered against the edge orientation are kept but leave
    /// the edge without a condition.
    pub fn build(&self, axis: usize) -> ConfigResult<HysteresisRange> {
        let mut min = Hysteresis::never_active();
        if let Some(edge) = self.min {
            edge.check(axis, Edge::Min)?;
            min = edge.to_hysteresis(true);
            if min.conditions() == 0 {
                log::warn!(
                    "Axis {} min edge has persistence {} not below activation {}, ignoring it",
                    axis,
                    edge.persistence,
                    edge.activation
                );
            }
        }

        let mut max = Hysteresis::never_active();
        if let Some(edge) = self.max {
            edge.check(axis, Edge::Max)?;
            max = edge.to_hysteresis(false);
            if max.conditions() == 0 {
                log::warn!(
                    "Axis {} max edge has persistence {} not above activation {}, ignoring it",
                    axis,
                    edge.persistence,
                    edge.activation
                );
            }
        }

        Ok(HysteresisRange::new(min, max))
    }

    /// Capture the conditioned edges of a range.
    pub fn from_range(range: &HysteresisRange) -> Self {
        Self {
            min: EdgeConfig::capture(range.min()),
            max: EdgeConfig::capture(range.max()),
        }
    }
}

impl From<EdgeConfig> for Hysteresis {
    fn from(edge: EdgeConfig) -> Self {
        edge.to_hysteresis(edge.persistence <= edge.activation)
    }
}

/// One axis entry per dimension of the target volume.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeConfig {
    pub axes: Vec<AxisConfig>,
}

impl VolumeConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded {} threshold axes from {}",
            config.axes.len(),
            path.display()
        );
        Ok(config)
    }

    /// Capture the conditioned edges of every axis of a volume.
    pub fn from_volume<const N: usize>(volume: &HysteresisVolume<N>) -> Self {
        Self {
            axes: volume.axes().iter().map(AxisConfig::from_range).collect(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build an `N`-dimensional volume. The axis count must equal `N`.
    pub fn build<const N: usize>(&self) -> ConfigResult<HysteresisVolume<N>> {
        if self.axes.len() != N {
            return Err(DimensionError {
                expected: N,
                found: self.axes.len(),
            }
            .into());
        }

        let axes = self
            .axes
            .iter()
            .enumerate()
            .map(|(index, axis)| axis.build(index))
            .collect::<ConfigResult<Vec<_>>>()?;
        let volume = HysteresisVolume::try_from(axes.as_slice())?;

        log::debug!(
            "Built {}-axis hysteresis volume with {} conditions",
            N,
            volume.conditions()
        );
        Ok(volume)
    }
}
