use serde::Serialize;

/// Runtime configuration, environment-driven with sane defaults.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Which repository backend to construct: "sqlite" or "fixture".
    pub repo_backend: String,
    pub sqlite_path: String,
    /// Artificial latency the fixture store applies per call.
    pub fixture_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            repo_backend: std::env::var("REPO_BACKEND").unwrap_or_else(|_| "fixture".to_string()),
            sqlite_path: std::env::var("SQLITE_PATH")
                .unwrap_or_else(|_| "./triangles.sqlite".to_string()),
            fixture_delay_ms: std::env::var("FIXTURE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_backend: "fixture".to_string(),
            sqlite_path: "./triangles.sqlite".to_string(),
            fixture_delay_ms: 10,
        }
    }
}
