//! Providers Module - External Data Sources
//!
//! The chain data source trait and its JSON-RPC implementation.

pub mod rpc;
pub mod source;

pub use rpc::*;
pub use source::*;
