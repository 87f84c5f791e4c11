use std::collections::BTreeSet;

use reqwest::Url;

use crate::error::NodeError;

/// Registered peer addresses in canonical `host:port` form.
#[derive(Debug, Default, Clone)]
pub struct NodeSet {
    nodes: BTreeSet<String>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `address` and add it. Returns the stored form.
    ///
    /// Accepts full `http` URLs (`http://192.168.0.5:5000/`) as well as bare
    /// `host:port` strings; path, query and credentials are dropped. A
    /// missing port is stored as `80`.
    pub fn register(&mut self, address: &str) -> Result<String, NodeError> {
        let node = normalize_address(address)?;
        self.nodes.insert(node.clone());
        Ok(node)
    }

    /// Register a batch. Nothing is added unless every address is valid.
    pub fn register_all<S: AsRef<str>>(
        &mut self,
        addresses: &[S],
    ) -> Result<Vec<String>, NodeError> {
        let normalized = addresses
            .iter()
            .map(|a| normalize_address(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.nodes.extend(normalized.iter().cloned());
        Ok(normalized)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Owned copy for work that must not hold the node-set lock.
    pub fn to_vec(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }
}

fn normalize_address(address: &str) -> Result<String, NodeError> {
    let trimmed = address.trim();
    let invalid = || NodeError::InvalidAddress(address.to_string());

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|_| invalid())?;
    // peers are always queried over plain http
    if url.scheme() != "http" {
        return Err(invalid());
    }
    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let port = url.port_or_known_default().ok_or_else(invalid)?;

    Ok(format!("{host}:{port}"))
}
