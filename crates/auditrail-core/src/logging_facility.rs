//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use auditrail_core::logging_facility::{init, Profile};
//!
//! init(Profile::from_app_env(Some("development")));
//! ```
//!
//! Command handlers own the start/end events of an operation. The change
//! capture wrapper only reports what it had to skip, at `debug` or `warn`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
