use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, StorageKey, U256};
use alloy_provider::Provider;
use alloy_rpc_types::{BlockId, EIP1186AccountProofResponse};

/// Native balance of `owner`
///
/// If `block` is None, the latest block is used. Assertions made after a
/// receipt should pin this to the receipt's block so pending transactions
/// cannot race the read.
pub async fn eth_balance<P>(
   client: P,
   owner: Address,
   block: Option<BlockId>,
) -> Result<U256, anyhow::Error>
where
   P: Provider<Ethereum> + Clone + 'static,
{
   let block = block.unwrap_or(BlockId::latest());
   let balance = client.get_balance(owner).block_id(block).await?;
   Ok(balance)
}

/// Code installed at `address`, empty for a plain EOA
///
/// If `block` is None, the latest block is used
pub async fn get_code<P>(
   client: P,
   address: Address,
   block: Option<BlockId>,
) -> Result<Bytes, anyhow::Error>
where
   P: Provider<Ethereum> + Clone + 'static,
{
   let block = block.unwrap_or(BlockId::latest());
   let code = client.get_code_at(address).block_id(block).await?;
   Ok(code)
}

pub async fn get_nonce<P>(client: P, address: Address) -> Result<u64, anyhow::Error>
where
   P: Provider<Ethereum> + Clone + 'static,
{
   let nonce = client.get_transaction_count(address).await?;
   Ok(nonce)
}

/// EIP-1186 account and storage proof for the given slots
///
/// If `block` is None, the latest block is used
pub async fn get_storage_proof<P>(
   client: P,
   address: Address,
   slots: Vec<StorageKey>,
   block: Option<BlockId>,
) -> Result<EIP1186AccountProofResponse, anyhow::Error>
where
   P: Provider<Ethereum> + Clone + 'static,
{
   let block = block.unwrap_or(BlockId::latest());
   let proof = client.get_proof(address, slots).block_id(block).await?;
   Ok(proof)
}
