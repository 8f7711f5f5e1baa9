use anyhow::bail;
use serde::{Deserialize, Serialize};

pub const ETH: u64 = 1;
pub const SEPOLIA: u64 = 11_155_111;
pub const ANVIL: u64 = 31_337;

pub const SUPPORTED_CHAINS: [u64; 3] = [ETH, SEPOLIA, ANVIL];

const ERR_MSG: &str = "Supported chains are: Ethereum(1), Sepolia(11155111), Anvil(31337)";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChainId {
   Ethereum(u64),
   Sepolia(u64),
   Anvil(u64),
}

impl Default for ChainId {
   fn default() -> Self {
      ChainId::Ethereum(1)
   }
}

impl Into<ChainId> for u64 {
   fn into(self) -> ChainId {
      ChainId::new(self).unwrap()
   }
}

impl ChainId {
   pub fn new(id: u64) -> Result<Self, anyhow::Error> {
      let chain = match id {
         ETH => ChainId::Ethereum(id),
         SEPOLIA => ChainId::Sepolia(id),
         ANVIL => ChainId::Anvil(id),
         _ => bail!(format!("Unsupported chain id: {}\n{}", id, ERR_MSG)),
      };
      Ok(chain)
   }

   pub fn eth() -> Self {
      ChainId::Ethereum(ETH)
   }

   pub fn sepolia() -> Self {
      ChainId::Sepolia(SEPOLIA)
   }

   pub fn anvil() -> Self {
      ChainId::Anvil(ANVIL)
   }

   pub fn is_ethereum(&self) -> bool {
      matches!(self, ChainId::Ethereum(_))
   }

   pub fn is_sepolia(&self) -> bool {
      matches!(self, ChainId::Sepolia(_))
   }

   pub fn is_anvil(&self) -> bool {
      matches!(self, ChainId::Anvil(_))
   }

   /// Local development chain, pre-funded accounts and instant mining
   pub fn is_dev(&self) -> bool {
      matches!(self, ChainId::Anvil(_))
   }

   /// Return all supported chains
   pub fn supported_chains() -> Vec<ChainId> {
      SUPPORTED_CHAINS
         .iter()
         .map(|id| ChainId::new(*id).unwrap())
         .collect()
   }

   pub fn is_supported(chain_id: u64) -> bool {
      SUPPORTED_CHAINS.contains(&chain_id)
   }

   pub fn id(&self) -> u64 {
      match self {
         ChainId::Ethereum(id) => *id,
         ChainId::Sepolia(id) => *id,
         ChainId::Anvil(id) => *id,
      }
   }

   pub fn id_as_hex(&self) -> String {
      format!("0x{:x}", self.id())
   }

   pub fn name(&self) -> &str {
      match self {
         ChainId::Ethereum(_) => "Ethereum",
         ChainId::Sepolia(_) => "Sepolia",
         ChainId::Anvil(_) => "Anvil",
      }
   }

   pub fn coin_symbol(&self) -> &str {
      "ETH"
   }

   /// Block time in milliseconds
   pub fn block_time(&self) -> u64 {
      match self {
         ChainId::Ethereum(_) => 12_000,
         ChainId::Sepolia(_) => 12_000,
         // Anvil mines on submission, this is only a polling hint
         ChainId::Anvil(_) => 1_000,
      }
   }

   /// Endpoint used when no RPC url is configured
   pub fn default_rpc(&self) -> &str {
      match self {
         ChainId::Ethereum(_) => "https://eth.merkle.io",
         ChainId::Sepolia(_) => "https://ethereum-sepolia-rpc.publicnode.com",
         ChainId::Anvil(_) => "http://127.0.0.1:8545",
      }
   }

   /// Gas needed for a plain transfer
   pub fn transfer_gas(&self) -> u64 {
      21_000
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   #[should_panic]
   fn chain_new_err() {
      let _chain = ChainId::new(1000).unwrap();
   }

   #[test]
   fn chain_accessors() {
      let chain = ChainId::anvil();
      assert_eq!(chain.id(), ANVIL);
      assert_eq!(chain.name(), "Anvil");
      assert!(chain.is_dev());
      assert_eq!(chain.default_rpc(), "http://127.0.0.1:8545");

      let chain = ChainId::eth();
      assert!(!chain.is_dev());
      assert_eq!(chain.id_as_hex(), "0x1");
      assert_eq!(chain.block_time(), 12_000);
      assert_eq!(chain.transfer_gas(), 21_000);
      assert_eq!(chain.coin_symbol(), "ETH");

      assert!(ChainId::sepolia().is_sepolia());
      assert_eq!(ChainId::supported_chains().len(), SUPPORTED_CHAINS.len());
      assert!(ChainId::is_supported(SEPOLIA));
      assert!(!ChainId::is_supported(56));

      let from_id: ChainId = ANVIL.into();
      assert!(from_id.is_anvil());
   }
}
