use crate::signer::SecureSigner;
use alloy_eips::eip7702::{Authorization, SignedAuthorization};
use alloy_primitives::{Address, Bytes, U256};
use alloy_signer::SignerSync;

/// Code prefix the execution layer installs at a delegated account
pub const DELEGATION_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];

/// Designator length, prefix plus the delegate address
pub const DESIGNATOR_LEN: usize = 23;

/// Sign an authorization naming `delegate` as the code source for the
/// signer's own account.
///
/// `executor` is the account expected to submit the transaction that
/// carries this authorization. When the signer submits it itself the
/// transaction consumes one nonce before the authorization is checked,
/// so the committed nonce must be `account_nonce + 1`. A third-party
/// executor leaves the signer's nonce untouched.
pub fn sign_authorization(
   signer: &SecureSigner,
   chain_id: u64,
   delegate: Address,
   account_nonce: u64,
   executor: Option<Address>,
) -> Result<SignedAuthorization, anyhow::Error> {
   let auth_nonce = match executor {
      Some(executor) if executor != signer.address() => account_nonce,
      _ => account_nonce + 1,
   };

   let auth = Authorization {
      chain_id: U256::from(chain_id),
      address: delegate,
      nonce: auth_nonce,
   };

   let signature = signer.to_signer().sign_hash_sync(&auth.signature_hash())?;
   tracing::trace!(
      target: "kratos::delegation",
      "Signed authorization: {} -> {} (nonce {})",
      signer.address(),
      delegate,
      auth_nonce
   );

   Ok(auth.into_signed(signature))
}

/// Authorization that removes any delegation from the signer's account
pub fn clear_authorization(
   signer: &SecureSigner,
   chain_id: u64,
   account_nonce: u64,
   executor: Option<Address>,
) -> Result<SignedAuthorization, anyhow::Error> {
   sign_authorization(signer, chain_id, Address::ZERO, account_nonce, executor)
}

pub fn is_delegated(code: &Bytes) -> bool {
   delegated_to(code).is_some()
}

/// Parse the delegate address out of a delegation designator
pub fn delegated_to(code: &Bytes) -> Option<Address> {
   if code.len() != DESIGNATOR_LEN || !code.starts_with(&DELEGATION_PREFIX) {
      return None;
   }
   Some(Address::from_slice(&code[3..]))
}
