// Re-export glam for convenience
pub use glam::*;

// Gesto math types
mod range;
pub use range::Range;
