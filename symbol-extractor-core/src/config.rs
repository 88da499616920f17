use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "http://127.0.0.1";
pub const DEFAULT_PORT: u16 = 8001;

/// Where the extraction service lives and how responses are treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `http://127.0.0.1`.
    pub host: String,
    pub port: u16,
    /// Reject non-2xx responses before decoding. Off by default: the body is
    /// decoded whatever the status.
    pub check_status: bool,
    /// Overall request timeout. `None` leaves the HTTP client's defaults.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            check_status: false,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        ClientConfig {
            host: host.into(),
            port,
            ..ClientConfig::default()
        }
    }

    /// `{host}:{port}/`, joined literally; `host` must already carry the scheme.
    pub fn endpoint(&self) -> String {
        format!("{}:{}/", self.host, self.port)
    }

    pub fn trace_loaded(&self) {
        info!(
            endpoint = %self.endpoint(),
            check_status = self.check_status,
            "Loaded ClientConfig"
        );
        debug!(?self, "ClientConfig loaded (full debug)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_local_service() {
        assert_eq!(ClientConfig::default().endpoint(), "http://127.0.0.1:8001/");
    }

    #[test]
    fn endpoint_joins_host_and_port_literally() {
        let config = ClientConfig::new("https://extract.example.org", 9000);
        assert_eq!(config.endpoint(), "https://extract.example.org:9000/");
        assert!(!config.check_status);
    }
}
