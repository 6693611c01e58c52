//! Tracked setpoint entities

pub mod feature;
pub mod threshold_set;

pub use feature::{Feature, FeatureInput};
pub use threshold_set::{ThresholdSet, ThresholdSetInput};
