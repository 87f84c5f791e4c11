use std::env;
use std::time::Duration;

use uuid::Uuid;

use crate::blockchain::DEFAULT_MINING_REWARD;

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Recipient of mining rewards.
    pub node_id: String,
    pub mining_reward: u64,
    /// Cutoff for a single proof search; `None` searches until found.
    pub pow_max_attempts: Option<u64>,
    /// Registered at startup.
    pub peers: Vec<String>,
    pub peer_timeout: Duration,
    /// Period of background conflict resolution; `None` disables it.
    pub resolve_interval: Option<Duration>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(8080),
            node_id: lookup("NODE_ID")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
            mining_reward: parsed("MINING_REWARD").unwrap_or(DEFAULT_MINING_REWARD),
            pow_max_attempts: parsed("POW_MAX_ATTEMPTS").filter(|n| *n > 0),
            peers: lookup("PEERS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            peer_timeout: Duration::from_secs(parsed("PEER_TIMEOUT_SECS").unwrap_or(5)),
            resolve_interval: parsed("RESOLVE_INTERVAL_SECS")
                .filter(|n| *n > 0)
                .map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::NodeConfig;

    fn config(pairs: &[(&str, &str)]) -> NodeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NodeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.node_id.len(), 32);
        assert_eq!(cfg.mining_reward, 1);
        assert_eq!(cfg.pow_max_attempts, None);
        assert!(cfg.peers.is_empty());
        assert_eq!(cfg.peer_timeout, Duration::from_secs(5));
        assert_eq!(cfg.resolve_interval, None);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "5001"),
            ("NODE_ID", "miner-1"),
            ("MINING_REWARD", "5"),
            ("POW_MAX_ATTEMPTS", "500000"),
            ("PEERS", "http://a:5000, b:5001,,"),
            ("PEER_TIMEOUT_SECS", "2"),
            ("RESOLVE_INTERVAL_SECS", "30"),
        ]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5001);
        assert_eq!(cfg.node_id, "miner-1");
        assert_eq!(cfg.mining_reward, 5);
        assert_eq!(cfg.pow_max_attempts, Some(500_000));
        assert_eq!(cfg.peers, vec!["http://a:5000", "b:5001"]);
        assert_eq!(cfg.peer_timeout, Duration::from_secs(2));
        assert_eq!(cfg.resolve_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn garbage_and_zero_fall_back() {
        let cfg = config(&[
            ("PORT", "http"),
            ("POW_MAX_ATTEMPTS", "0"),
            ("RESOLVE_INTERVAL_SECS", "soon"),
            ("NODE_ID", "  "),
        ]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.pow_max_attempts, None);
        assert_eq!(cfg.resolve_interval, None);
        assert_eq!(cfg.node_id.len(), 32);
    }
}
