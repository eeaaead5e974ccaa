use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request timeout for the plain REST endpoints.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for the non-streaming analyze call; the vision pipeline can run
/// for minutes.
pub const DEFAULT_ANALYZE_TIMEOUT: Duration = Duration::from_secs(300);

/// Connection settings for the analysis service.
///
/// The streaming endpoint carries no overall timeout: the reader drains the
/// response for as long as the server keeps it open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the API, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,

    /// Timeout applied to `check_types`, `models` and other short calls.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Timeout applied to the non-streaming analyze call.
    #[serde(default = "default_analyze_timeout", with = "duration_secs")]
    pub analyze_timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_analyze_timeout() -> Duration {
    DEFAULT_ANALYZE_TIMEOUT
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            analyze_timeout: DEFAULT_ANALYZE_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn analyze_timeout(mut self, timeout: Duration) -> Self {
        self.analyze_timeout = timeout;
        self
    }

    /// Base URL without a trailing slash, so endpoint paths can be appended
    /// with `format!`.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
