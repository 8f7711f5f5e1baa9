use crate::chain::ChainId;
use crate::client::{self, RpcClient};
use crate::multicall;
use crate::signer::SecureSigner;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

// Pre-funded accounts every local dev node ships with. Public knowledge,
// never to be used outside a local chain.
pub const DEV_KEY_ALICE: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_KEY_BOB: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub const LOCAL_RPC: &str = "http://127.0.0.1:8545";

/// Everything a test run needs, passed in explicitly so suites can be
/// pointed at different chains or fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
   pub rpc_url: String,
   pub chain: ChainId,
   pub multicall: Address,
   pub alice_key: String,
   pub bob_key: String,
}

impl HarnessConfig {
   pub fn new(
      rpc_url: impl Into<String>,
      chain: ChainId,
      multicall: Address,
      alice_key: impl Into<String>,
      bob_key: impl Into<String>,
   ) -> Self {
      Self {
         rpc_url: rpc_url.into(),
         chain,
         multicall,
         alice_key: alice_key.into(),
         bob_key: bob_key.into(),
      }
   }

   /// Local dev node with its stock accounts
   pub fn anvil() -> Self {
      let chain = ChainId::anvil();
      Self::for_chain(chain, LOCAL_RPC)
   }

   /// Mainnet chain definition served by a local fork on the dev endpoint
   pub fn mainnet_fork() -> Self {
      let chain = ChainId::eth();
      Self::for_chain(chain, LOCAL_RPC)
   }

   pub fn for_chain(chain: ChainId, rpc_url: &str) -> Self {
      // the accessor covers every supported chain
      let multicall = multicall::multicall3(chain.id()).unwrap();
      Self::new(rpc_url, chain, multicall, DEV_KEY_ALICE, DEV_KEY_BOB)
   }

   pub fn alice(&self) -> Result<SecureSigner, anyhow::Error> {
      SecureSigner::from_key_str(&self.alice_key)
   }

   pub fn bob(&self) -> Result<SecureSigner, anyhow::Error> {
      SecureSigner::from_key_str(&self.bob_key)
   }

   /// Connect to the configured endpoint with the default client settings
   pub async fn connect(&self) -> Result<RpcClient, anyhow::Error> {
      client::default_client(&self.rpc_url).await
   }
}

impl Default for HarnessConfig {
   fn default() -> Self {
      Self::anvil()
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use alloy_primitives::address;

   #[test]
   fn dev_accounts() {
      let config = HarnessConfig::anvil();

      let alice = config.alice().unwrap();
      let bob = config.bob().unwrap();

      assert_eq!(
         alice.address(),
         address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
      );
      assert_eq!(
         bob.address(),
         address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")
      );
   }

   #[test]
   fn chain_wiring() {
      let anvil = HarnessConfig::anvil();
      assert!(anvil.chain.is_dev());
      assert_eq!(anvil.rpc_url, LOCAL_RPC);
      assert_eq!(anvil.multicall, multicall::multicall3(31_337).unwrap());

      let fork = HarnessConfig::mainnet_fork();
      assert!(fork.chain.is_ethereum());
      assert_eq!(fork.rpc_url, LOCAL_RPC);

      assert!(HarnessConfig::default().chain.is_dev());
   }

   #[test]
   fn serde_round_trip() {
      let config = HarnessConfig::anvil();
      let json = serde_json::to_string(&config).unwrap();
      let parsed: HarnessConfig = serde_json::from_str(&json).unwrap();

      assert_eq!(parsed.chain, config.chain);
      assert_eq!(parsed.multicall, config.multicall);
      assert_eq!(parsed.alice_key, config.alice_key);
   }
}
