//! Utility modules.

/// Log sanitization utilities to prevent certificate and credential exposure.
pub mod log_sanitizer;
