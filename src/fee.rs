use alloy_network::Ethereum;
use alloy_primitives::U256;
use alloy_provider::Provider;
use alloy_rpc_types::BlockId;
use anyhow::anyhow;

/// Fallback miner tip of 1 gwei when the node suggests nothing usable
pub const DEFAULT_MINER_TIP: u64 = 1_000_000_000;

#[derive(Debug, Clone)]
pub struct BaseFee {
   pub current: u64,
   pub next: u64,
}

impl Default for BaseFee {
   fn default() -> Self {
      Self {
         current: 1,
         next: 1,
      }
   }
}

impl BaseFee {
   pub fn new(current: u64, next: u64) -> Self {
      Self { current, next }
   }
}

/// Base fee of the latest block plus the projected fee for the next one
pub async fn get_base_fee<P>(client: P) -> Result<BaseFee, anyhow::Error>
where
   P: Provider<Ethereum> + Clone + 'static,
{
   let block = client.get_block(BlockId::latest()).await?;

   let block = if let Some(block) = block {
      block
   } else {
      return Err(anyhow!("Latest block not found"));
   };

   if let Some(base_fee) = block.header.base_fee_per_gas {
      let next = calculate_next_block_base_fee(
         block.header.gas_used,
         block.header.gas_limit,
         base_fee,
      );
      return Ok(BaseFee::new(base_fee, next));
   }

   // Node without EIP-1559 headers, treat the gas price as a flat fee
   let gas_price = client.get_gas_price().await?;
   let fee: u64 = gas_price.try_into()?;
   Ok(BaseFee::new(fee, fee))
}

/// Miner tip suggested by the node, falling back to 1 gwei on bad data
pub async fn suggested_miner_tip<P>(client: P) -> Result<U256, anyhow::Error>
where
   P: Provider<Ethereum> + Clone + 'static,
{
   let tip = client.get_max_priority_fee_per_gas().await?;
   let tip = U256::from(tip);

   if tip.is_zero() {
      tracing::trace!(target: "kratos::fee", "Node suggested a zero tip, using the default");
      return Ok(U256::from(DEFAULT_MINER_TIP));
   }

   Ok(tip)
}

/// Projected base fee for the block after one with the given usage
pub fn calculate_next_block_base_fee(gas_used: u64, gas_limit: u64, base_fee: u64) -> u64 {
   let gas_target = gas_limit / 2;
   if gas_target == 0 || gas_used == gas_target {
      return base_fee;
   }

   if gas_used > gas_target {
      let delta = gas_used - gas_target;
      let increase = (base_fee as u128 * delta as u128) / (gas_target as u128 * 8);
      base_fee.saturating_add(increase.max(1) as u64)
   } else {
      let delta = gas_target - gas_used;
      let decrease = (base_fee as u128 * delta as u128) / (gas_target as u128 * 8);
      base_fee.saturating_sub(decrease as u64)
   }
}

/// Fee cap with a 10% tolerance over tip plus base fee
pub fn max_fee_per_gas(miner_tip: U256, base_fee: u64) -> U256 {
   let fee = miner_tip + U256::from(base_fee);
   fee * U256::from(110) / U256::from(100)
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn next_base_fee_at_target() {
      let fee = calculate_next_block_base_fee(15_000_000, 30_000_000, 1_000_000_000);
      assert_eq!(fee, 1_000_000_000);
   }

   #[test]
   fn next_base_fee_full_block() {
      // full block raises the fee by 12.5%
      let fee = calculate_next_block_base_fee(30_000_000, 30_000_000, 1_000_000_000);
      assert_eq!(fee, 1_125_000_000);
   }

   #[test]
   fn next_base_fee_empty_block() {
      // empty block lowers the fee by 12.5%
      let fee = calculate_next_block_base_fee(0, 30_000_000, 1_000_000_000);
      assert_eq!(fee, 875_000_000);
   }

   #[test]
   fn next_base_fee_degenerate_limit() {
      let fee = calculate_next_block_base_fee(0, 1, 42);
      assert_eq!(fee, 42);
   }

   #[test]
   fn max_fee_tolerance() {
      let tip = U256::from(1_000_000_000u64);
      let max_fee = max_fee_per_gas(tip, 9_000_000_000);
      assert_eq!(max_fee, U256::from(11_000_000_000u64));
   }
}
