//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and default settings.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Keebuilder";

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "keebuilder";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "KEEBUILDER_CONFIG_DIR";

/// Default host for the web server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for the web server.
pub const DEFAULT_PORT: u16 = 3002;
