//! Embedded default assets.
//!
//! Registered verbatim in the configuration table during registration;
//! operators can replace them later through the platform itself.

/// System prompt the scan engine runs with.
pub const SCAN_SYSTEM_PROMPT: &str = include_str!("../assets/prompt.md");

/// HTML template scan reports are rendered into.
pub const REPORT_HTML_TEMPLATE: &str = include_str!("../assets/report_template.html");
