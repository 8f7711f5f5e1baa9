//! Harness for exercising EIP-7702 account delegation against EVM chains.
//!
//! The heavy lifting (transaction signing, typed-transaction encoding,
//! authorization lists, RPC transport, receipt polling) is all Alloy's.
//! This crate only wires it together: clients, signers, authorization
//! signing, batched value transfers through the canonical multicall
//! contract, and the balance reads the test suites assert on.

pub mod balance;
pub mod chain;
pub mod client;
pub mod config;
pub mod delegation;
pub mod fee;
pub mod multicall;
pub mod signer;
pub mod trace;
pub mod tx;

#[cfg(test)]
mod tests;

pub use alloy_eips;
pub use alloy_network;
pub use alloy_primitives;
pub use alloy_provider;
pub use alloy_rpc_client;
pub use alloy_rpc_types;
pub use alloy_signer;
pub use alloy_signer_local;
pub use alloy_sol_types;
pub use alloy_transport;

pub use chain::ChainId;
pub use client::RpcClient;
pub use config::HarnessConfig;
pub use fee::BaseFee;
pub use signer::SecureSigner;
pub use tx::TxParams;
