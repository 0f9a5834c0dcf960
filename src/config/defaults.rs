use super::Config;

/// Where the catalog API listens when run locally.
pub const API_BASE_URL: &str = "http://localhost:5000";

pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Config written on first run.
pub fn defaults() -> Config {
    Config::default()
}
