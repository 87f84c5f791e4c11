use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::PeerError;

/// Path every node serves its full chain on.
pub const CHAIN_PATH: &str = "/api/v1/chain/";

/// A peer's answer to the chain query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Where the resolver gets peer chains from.
pub trait ChainSource {
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Result<ChainSnapshot, PeerError>>;
}

/// Fetches chains from peers over plain HTTP.
#[derive(Clone)]
pub struct HttpPeerClient {
    client: Client,
}

impl HttpPeerClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl ChainSource for HttpPeerClient {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let url = format!("http://{peer}{CHAIN_PATH}");
        let http_err = |source: reqwest::Error| PeerError::Http {
            peer: peer.to_string(),
            source,
        };

        let resp = self.client.get(&url).send().await.map_err(http_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PeerError::Status {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }
        resp.json::<ChainSnapshot>().await.map_err(http_err)
    }
}
