use crate::chain::ChainId;
use alloy_primitives::{Address, Bytes, U256, address};
use alloy_sol_types::{SolCall, sol};
use anyhow::anyhow;

sol! {
   contract IMulticall3 {
      #[derive(Debug)]
      struct Call3Value {
         address target;
         bool allowFailure;
         uint256 value;
         bytes callData;
      }

      #[derive(Debug)]
      struct Result {
         bool success;
         bytes returnData;
      }

      function aggregate3Value(Call3Value[] calldata calls) external payable returns (Result[] memory returnData);
   }
}

/// The canonical Multicall3 deployment, same address on every supported chain
pub fn multicall3(chain_id: u64) -> Result<Address, anyhow::Error> {
   let chain = ChainId::new(chain_id)?;
   match chain {
      ChainId::Ethereum(_) => Ok(address!("cA11bde05977b3631167028862bE2a173976CA11")),
      ChainId::Sepolia(_) => Ok(address!("cA11bde05977b3631167028862bE2a173976CA11")),
      ChainId::Anvil(_) => Ok(address!("cA11bde05977b3631167028862bE2a173976CA11")),
   }
}

/// A batched call entry that just forwards native value to the target
pub fn value_transfer_call(recipient: Address, amount: U256) -> IMulticall3::Call3Value {
   IMulticall3::Call3Value {
      target: recipient,
      allowFailure: false,
      value: amount,
      callData: Bytes::default(),
   }
}

/// The contract reverts unless msg.value matches the sum of all call values
pub fn total_value(calls: &[IMulticall3::Call3Value]) -> U256 {
   calls.iter().fold(U256::ZERO, |acc, call| acc + call.value)
}

// ** ABI Encode Functions

pub fn encode_aggregate3_value(calls: Vec<IMulticall3::Call3Value>) -> Bytes {
   let c = IMulticall3::aggregate3ValueCall { calls };
   Bytes::from(c.abi_encode())
}

// ** ABI Decode Functions

pub fn decode_aggregate3_value(bytes: &Bytes) -> Result<Vec<IMulticall3::Result>, anyhow::Error> {
   let res = IMulticall3::aggregate3ValueCall::abi_decode_returns(bytes)
      .map_err(|e| anyhow!("Failed to decode aggregate3Value returns: {:?}", e))?;
   Ok(res)
}
