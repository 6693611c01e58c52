//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Pick a profile from the `APP_ENV` setting
    ///
    /// `development` selects [`Profile::Development`]; anything else,
    /// including an unset variable, selects [`Profile::Production`].
    pub fn from_app_env(app_env: Option<&str>) -> Self {
        match app_env.map(|s| s.trim().to_ascii_lowercase()) {
            Some(env) if env == "development" => Profile::Development,
            _ => Profile::Production,
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup. Later calls are no-ops.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Bare registry; use `init_test_capture()` to record events
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("auditrail=debug")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("auditrail=info")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_app_env() {
        assert_eq!(
            Profile::from_app_env(Some("development")),
            Profile::Development
        );
        assert_eq!(
            Profile::from_app_env(Some(" Development ")),
            Profile::Development
        );
        assert_eq!(
            Profile::from_app_env(Some("production")),
            Profile::Production
        );
        assert_eq!(Profile::from_app_env(None), Profile::Production);
    }
}
