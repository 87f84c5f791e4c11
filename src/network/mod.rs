pub mod client;
pub mod consensus;
pub mod nodes;

pub use client::{ChainSnapshot, ChainSource, HttpPeerClient};
pub use consensus::ConsensusResolver;
pub use nodes::NodeSet;
