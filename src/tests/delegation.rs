#[cfg(test)]
mod tests {
   use crate::balance::{eth_balance, get_nonce};
   use crate::config::HarnessConfig;
   use crate::delegation::sign_authorization;
   use crate::fee::{get_base_fee, suggested_miner_tip};
   use crate::multicall;
   use crate::trace::setup_tracing;
   use crate::tx::{TxParams, send_tx};

   use alloy_primitives::U256;
   use alloy_rpc_types::BlockId;

   // enough for the delegation plus two value-bearing sub calls
   const BATCH_GAS_LIMIT: u64 = 400_000;

   #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
   #[ignore = "needs a local mainnet fork on http://127.0.0.1:8545, run with --test-threads=1"]
   async fn batched_transfer_with_self_executed_delegation() {
      setup_tracing();

      let config = HarnessConfig::mainnet_fork();
      let chain = config.chain;
      let client = config.connect().await.unwrap();

      let alice = config.alice().unwrap();
      let bob = config.bob().unwrap();
      eprintln!("Alice: {}", alice.address());
      eprintln!("Bob: {}", bob.address());

      let alice_balance_before = eth_balance(client.clone(), alice.address(), None).await.unwrap();
      let bob_balance_before = eth_balance(client.clone(), bob.address(), None).await.unwrap();
      eprintln!("Alice Balance Before: {}", alice_balance_before);
      eprintln!("Bob Balance Before: {}", bob_balance_before);

      // 1 wei and 2 wei to Bob, fanned out in one transaction
      let calls = vec![
         multicall::value_transfer_call(bob.address(), U256::from(1)),
         multicall::value_transfer_call(bob.address(), U256::from(2)),
      ];
      let value = multicall::total_value(&calls);
      let call_data = multicall::encode_aggregate3_value(calls);

      // Alice executes on her own account, the tx itself burns one nonce
      let nonce = get_nonce(client.clone(), alice.address()).await.unwrap();
      let authorization =
         sign_authorization(&alice, chain.id(), config.multicall, nonce, None).unwrap();

      let base_fee = get_base_fee(client.clone()).await.unwrap();
      let miner_tip = suggested_miner_tip(client.clone()).await.unwrap();

      let params = TxParams::new(
         alice.clone(),
         alice.address(),
         nonce,
         value,
         chain,
         miner_tip,
         base_fee.next,
         call_data,
         BATCH_GAS_LIMIT,
         vec![authorization],
      );
      params.sufficient_balance(alice_balance_before).unwrap();

      let receipt = send_tx(client.clone(), params).await.unwrap();
      assert!(receipt.status(), "batched transfer reverted");
      assert!(!receipt.transaction_hash.is_zero());
      eprintln!("Tx Hash: {}", receipt.transaction_hash);
      eprintln!("Gas Used: {}", receipt.gas_used);

      let block = BlockId::number(receipt.block_number.unwrap());
      let alice_balance_after =
         eth_balance(client.clone(), alice.address(), Some(block)).await.unwrap();
      let bob_balance_after =
         eth_balance(client.clone(), bob.address(), Some(block)).await.unwrap();
      eprintln!("Alice Balance After: {}", alice_balance_after);
      eprintln!("Bob Balance After: {}", bob_balance_after);

      // Alice paid the 3 wei and the gas
      assert!(alice_balance_after < alice_balance_before);
      assert_eq!(bob_balance_after - bob_balance_before, U256::from(3));
   }

   #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
   #[ignore = "needs a local mainnet fork on http://127.0.0.1:8545, run with --test-threads=1"]
   async fn batched_transfer_with_third_party_executor() {
      setup_tracing();

      let config = HarnessConfig::mainnet_fork();
      let chain = config.chain;
      let client = config.connect().await.unwrap();

      let alice = config.alice().unwrap();
      let bob = config.bob().unwrap();
      eprintln!("Alice: {}", alice.address());
      eprintln!("Bob: {}", bob.address());

      let alice_balance_before = eth_balance(client.clone(), alice.address(), None).await.unwrap();
      let bob_balance_before = eth_balance(client.clone(), bob.address(), None).await.unwrap();
      eprintln!("Alice Balance Before: {}", alice_balance_before);
      eprintln!("Bob Balance Before: {}", bob_balance_before);

      let calls = vec![
         multicall::value_transfer_call(bob.address(), U256::from(1)),
         multicall::value_transfer_call(bob.address(), U256::from(2)),
      ];
      let value = multicall::total_value(&calls);
      let call_data = multicall::encode_aggregate3_value(calls);

      // Alice only signs, Bob submits, so her account nonce stays as is
      let alice_nonce = get_nonce(client.clone(), alice.address()).await.unwrap();
      let authorization = sign_authorization(
         &alice,
         chain.id(),
         config.multicall,
         alice_nonce,
         Some(bob.address()),
      )
      .unwrap();

      let bob_nonce = get_nonce(client.clone(), bob.address()).await.unwrap();
      let base_fee = get_base_fee(client.clone()).await.unwrap();
      let miner_tip = suggested_miner_tip(client.clone()).await.unwrap();

      let params = TxParams::new(
         bob.clone(),
         alice.address(),
         bob_nonce,
         value,
         chain,
         miner_tip,
         base_fee.next,
         call_data,
         BATCH_GAS_LIMIT,
         vec![authorization],
      );
      params.sufficient_balance(bob_balance_before).unwrap();

      let receipt = send_tx(client.clone(), params).await.unwrap();
      assert!(receipt.status(), "batched transfer reverted");
      assert!(!receipt.transaction_hash.is_zero());
      eprintln!("Tx Hash: {}", receipt.transaction_hash);
      eprintln!("Gas Used: {}", receipt.gas_used);

      let block = BlockId::number(receipt.block_number.unwrap());
      let alice_balance_after =
         eth_balance(client.clone(), alice.address(), Some(block)).await.unwrap();
      let bob_balance_after =
         eth_balance(client.clone(), bob.address(), Some(block)).await.unwrap();
      eprintln!("Alice Balance After: {}", alice_balance_after);
      eprintln!("Bob Balance After: {}", bob_balance_after);

      // the 3 wei flow in and straight back out of Alice's account
      assert_eq!(alice_balance_after, alice_balance_before);

      // Bob is both payer and beneficiary here, only the direction is fixed
      assert!(bob_balance_after < bob_balance_before);
   }
}
