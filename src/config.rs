// =============================================================================
// Upstream endpoints
// =============================================================================

/// Base URL of the Chrome-for-Testing version index (Chrome >= 115)
pub const MODERN_BASE_URL: &str = "https://googlechromelabs.github.io/chrome-for-testing";

/// Base URL of the legacy chromedriver storage bucket (Chrome < 115)
pub const LEGACY_BASE_URL: &str = "https://chromedriver.storage.googleapis.com";

// =============================================================================
// Runtime defaults
// =============================================================================

/// User agent sent on catalog and artifact requests
pub const USER_AGENT: &str = concat!("chromedriver-fetch/", env!("CARGO_PKG_VERSION"));

/// Default output directory for downloaded drivers
pub const DEFAULT_OUTPUT_DIR: &str = "./drivers";

/// Upstream source endpoints.
///
/// Defaults to the well-known public endpoints; tests inject a local mock
/// server instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub modern_url: String,
    pub legacy_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            modern_url: MODERN_BASE_URL.to_string(),
            legacy_url: LEGACY_BASE_URL.to_string(),
        }
    }
}
