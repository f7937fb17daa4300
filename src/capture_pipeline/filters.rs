//! Pixel-value filters
//!
//! Uniform filters transform a whole matrix at once. Per-pixel and per-value filters
//! describe element-wise transforms and are lifted to uniform filters through
//! [`PerPixelAdapter`] and [`PerValueAdapter`].

mod traits;
mod adapters;
mod chain;
pub mod uniform;
pub mod per_value;

#[cfg(test)]
mod tests;

pub use traits::{PerPixelFilter, PerValueFilter, UniformFilter};
pub use adapters::{PerPixelAdapter, PerValueAdapter};
pub use chain::FilterChain;
pub use uniform::{Add, Gaussian, ScalarMultiply, SubstituteInRange, SubstituteOutOfRange};
pub use per_value::{Log, Sqrt};
