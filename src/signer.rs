use alloy_network::EthereumWallet;
use alloy_primitives::{Address, hex};
use alloy_signer_local::PrivateKeySigner;
use secure_types::{SecureArray, SecureString, Zeroize};
use serde::{Deserialize, Serialize};

use std::str::FromStr;

/// Private key kept in locked memory, handed out only as short-lived signers
#[derive(Clone, Serialize, Deserialize)]
pub struct SecureSigner {
   address: Address,
   data: SecureArray<u8, 32>,
}

impl SecureSigner {
   pub fn random() -> Self {
      let signer = PrivateKeySigner::random();
      Self::from(signer)
   }

   /// Parse a hex-encoded 32-byte private key, with or without the 0x prefix
   pub fn from_key_str(key: &str) -> Result<Self, anyhow::Error> {
      let signer = PrivateKeySigner::from_str(key.trim())?;
      Ok(Self::from(signer))
   }

   /// Return the signer's key in a SecureString
   pub fn key_string(&self) -> SecureString {
      let signer = self.to_signer();
      let mut key = signer.to_bytes();
      let string = hex::encode(&key);
      key.zeroize();
      SecureString::from(string)
   }

   /// Securely erase the signer's key from memory
   pub fn erase(&mut self) {
      self.data.erase();
   }

   pub fn is_erased(&self) -> bool {
      self
         .data
         .unlock(|slice| slice.iter().all(|byte| *byte == 0))
   }

   pub fn address(&self) -> Address {
      self.address
   }

   pub fn to_signer(&self) -> PrivateKeySigner {
      self
         .data
         .unlock(|bytes| PrivateKeySigner::from_slice(bytes).unwrap())
   }

   pub fn to_wallet(&self) -> EthereumWallet {
      EthereumWallet::from(self.to_signer())
   }
}

impl From<PrivateKeySigner> for SecureSigner {
   fn from(value: PrivateKeySigner) -> Self {
      let address = value.address();
      let mut key_bytes = value.to_bytes();
      let data = SecureArray::from_slice(key_bytes.as_ref()).unwrap();
      key_bytes.zeroize();
      erase_signer(value);

      SecureSigner { address, data }
   }
}

pub fn erase_signer(mut signer: PrivateKeySigner) {
   unsafe {
      let ptr: *mut PrivateKeySigner = &mut signer;
      let bytes: &mut [u8] = core::slice::from_raw_parts_mut(ptr as *mut u8, core::mem::size_of::<PrivateKeySigner>());
      bytes.zeroize();
   }
}
