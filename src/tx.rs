use crate::chain::ChainId;
use crate::fee;
use crate::signer::SecureSigner;

use alloy_eips::eip7702::SignedAuthorization;
use alloy_network::{Ethereum, TransactionBuilder, TransactionBuilder7702};
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::Provider;
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};
use anyhow::anyhow;

use std::time::Duration;

/// Max seconds to wait for a submitted transaction to confirm
pub const TIMEOUT_FOR_SENDING_TX: u64 = 60;

#[derive(Clone)]
pub struct TxParams {
   pub signer: SecureSigner,
   pub transact_to: Address,
   pub nonce: u64,
   pub value: U256,
   pub chain: ChainId,
   pub miner_tip: U256,
   pub base_fee: u64,
   pub call_data: Bytes,
   pub gas_limit: u64,
   pub authorization_list: Vec<SignedAuthorization>,
}

impl TxParams {
   pub fn new(
      signer: SecureSigner,
      transact_to: Address,
      nonce: u64,
      value: U256,
      chain: ChainId,
      miner_tip: U256,
      base_fee: u64,
      call_data: Bytes,
      gas_limit: u64,
      authorization_list: Vec<SignedAuthorization>,
   ) -> Self {
      Self {
         signer,
         transact_to,
         nonce,
         value,
         chain,
         miner_tip,
         base_fee,
         call_data,
         gas_limit,
         authorization_list,
      }
   }

   pub fn max_fee_per_gas(&self) -> U256 {
      fee::max_fee_per_gas(self.miner_tip, self.base_fee)
   }

   /// Worst case gas cost at the fee cap
   pub fn gas_cost(&self) -> U256 {
      U256::from(self.gas_limit) * self.max_fee_per_gas()
   }

   /// Gas cost plus the value carried by the transaction
   pub fn total_cost(&self) -> U256 {
      self.gas_cost() + self.value
   }

   pub fn sufficient_balance(&self, balance: U256) -> Result<(), anyhow::Error> {
      let cost = self.total_cost();
      let coin = self.chain.coin_symbol();

      if balance < cost {
         return Err(anyhow!(
            "Insufficient balance, need at least {} {} (wei) but the account holds {} {} (wei)",
            cost,
            coin,
            balance,
            coin
         ));
      }

      Ok(())
   }
}

/// Build the envelope with the signer's wallet, submit it and wait for
/// the receipt.
pub async fn send_tx<P>(client: P, params: TxParams) -> Result<TransactionReceipt, anyhow::Error>
where
   P: Provider<Ethereum> + Clone + 'static,
{
   let tx = make_tx_request(params.clone());
   let wallet = params.signer.to_wallet();
   let tx_envelope = tx.build(&wallet).await?;
   drop(wallet);

   let time = std::time::Instant::now();
   let receipt = client
      .send_tx_envelope(tx_envelope)
      .await?
      .with_timeout(Some(Duration::from_secs(TIMEOUT_FOR_SENDING_TX)))
      .get_receipt()
      .await?;

   tracing::info!(
      target: "kratos::tx",
      "Tx {} confirmed in {:.2}s",
      receipt.transaction_hash,
      time.elapsed().as_secs_f32()
   );

   Ok(receipt)
}

pub fn make_tx_request(params: TxParams) -> TransactionRequest {
   let mut tx = TransactionRequest::default()
      .with_from(params.signer.address())
      .with_to(params.transact_to)
      .with_chain_id(params.chain.id())
      .with_value(params.value)
      .with_nonce(params.nonce)
      .with_input(params.call_data.clone())
      .with_gas_limit(params.gas_limit)
      .with_max_priority_fee_per_gas(params.miner_tip.to::<u128>())
      .max_fee_per_gas(params.max_fee_per_gas().to::<u128>());

   if !params.authorization_list.is_empty() {
      tx.set_authorization_list(params.authorization_list);
   }

   tx
}
