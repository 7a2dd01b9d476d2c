use crate::{ecosystem::params::OPERATION_DOMAIN, nonce::ChannelNonce};
use alloc::vec::Vec;
use codec::{Decode, DecodeWithMemTracking, Encode};
use scale_info::TypeInfo;

/// Unit of work flowing through validate-then-execute.
///
/// Never stored: it lives for one `handle_operation` call.
#[derive(Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo)]
pub struct PendingOperation<AccountId, Signature, Payload> {
  /// Account the operation acts for
  pub account: AccountId,
  /// Channel-encoded nonce
  pub nonce: ChannelNonce,
  /// Executor module the payload is addressed to
  pub call_target: AccountId,
  /// Selector followed by the encoded arguments
  pub call_payload: Payload,
  pub signature: Signature,
  /// Delegate the signature is claimed to come from
  pub claimed_signer: AccountId,
}

impl<AccountId: Encode, Signature, Payload: Encode> PendingOperation<AccountId, Signature, Payload> {
  /// Bytes a delegate signs, once hashed by the runtime hasher.
  ///
  /// Covers everything but the signature and the claimed signer; swapping the
  /// claimed signer makes verification fail instead.
  pub fn signing_payload(&self) -> Vec<u8> {
    (
      OPERATION_DOMAIN,
      &self.account,
      &self.nonce,
      &self.call_target,
      &self.call_payload,
    )
      .encode()
  }
}
