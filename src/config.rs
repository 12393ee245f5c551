use serde::{Deserialize, Serialize};

/// Tunables for the outbound sending path.
///
/// Timeouts are configuration, never hardcoded: one unresponsive endpoint
/// must not stall a worker for longer than the operator allows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendingConfig {
    /// Total request timeout per notification, in seconds.
    pub timeout_secs: u64,
    /// TCP connect timeout, in seconds.
    pub connect_timeout_secs: u64,
    /// User agent sent with every protocol POST.
    pub user_agent: String,
    /// Permit endpoints on private/reserved ranges. Off in production;
    /// exists for test rigs that point at a local mock receiver.
    pub allow_private_endpoints: bool,
}

impl Default for SendingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            user_agent: concat!("outmention/", env!("CARGO_PKG_VERSION")).to_string(),
            allow_private_endpoints: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SendingConfig::default();
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.connect_timeout_secs, 5);
        assert!(cfg.user_agent.starts_with("outmention/"));
        assert!(!cfg.allow_private_endpoints);
    }

    #[test]
    fn config_roundtrips_through_serde() {
        let cfg = SendingConfig {
            timeout_secs: 3,
            ..SendingConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SendingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timeout_secs, 3);
    }
}
