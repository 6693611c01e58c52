//! Input rules for tracked entities

pub mod validation;

pub use validation::{validate_feature_input, validate_threshold_set_input};
