//! Channel-encoded nonces.
//!
//! A nonce is a 32-byte word: the high 24 bytes are the channel key, the low 8 bytes
//! the sequence inside that channel.
//!
//! ```text
//! [ 20 bytes: validator prefix ][ 4 bytes: lane ][ 8 bytes: sequence ]
//! ```
//!
//! The validator prefix is the validator module's encoded address, truncated or
//! right-padded with zeros. Lane 0 is the canonical channel of a validator, so the
//! default key is exactly the validator address right-padded to 24 bytes.

use crate::ecosystem::params::CHANNEL_VALIDATOR_BYTES;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Identifier of an independent replay-protection sequence.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct ChannelKey {
  /// Address prefix of the validator module owning the channel
  pub validator: [u8; CHANNEL_VALIDATOR_BYTES],
  /// Sub-channel of the validator, zero for the canonical channel
  pub lane: u32,
}

impl ChannelKey {
  /// Canonical channel of a validator module.
  pub fn for_module<AccountId: Encode>(module: &AccountId) -> Self {
    Self::with_lane(module, 0)
  }

  pub fn with_lane<AccountId: Encode>(module: &AccountId, lane: u32) -> Self {
    Self {
      validator: Self::validator_prefix(module),
      lane,
    }
  }

  /// Whether the channel is owned by `module`, whatever its lane.
  pub fn belongs_to<AccountId: Encode>(&self, module: &AccountId) -> bool {
    self.validator == Self::validator_prefix(module)
  }

  pub fn to_bytes(&self) -> [u8; 24] {
    let mut out = [0u8; 24];
    out[..CHANNEL_VALIDATOR_BYTES].copy_from_slice(&self.validator);
    out[CHANNEL_VALIDATOR_BYTES..].copy_from_slice(&self.lane.to_be_bytes());
    out
  }

  pub fn from_bytes(bytes: [u8; 24]) -> Self {
    let mut validator = [0u8; CHANNEL_VALIDATOR_BYTES];
    validator.copy_from_slice(&bytes[..CHANNEL_VALIDATOR_BYTES]);
    let mut lane = [0u8; 4];
    lane.copy_from_slice(&bytes[CHANNEL_VALIDATOR_BYTES..]);
    Self {
      validator,
      lane: u32::from_be_bytes(lane),
    }
  }

  fn validator_prefix<AccountId: Encode>(module: &AccountId) -> [u8; CHANNEL_VALIDATOR_BYTES] {
    let mut prefix = [0u8; CHANNEL_VALIDATOR_BYTES];
    module.using_encoded(|bytes| {
      let len = bytes.len().min(CHANNEL_VALIDATOR_BYTES);
      prefix[..len].copy_from_slice(&bytes[..len]);
    });
    prefix
  }
}

/// A nonce as presented by an operation: channel plus expected sequence.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct ChannelNonce {
  pub key: ChannelKey,
  pub sequence: u64,
}

impl ChannelNonce {
  pub fn new(key: ChannelKey, sequence: u64) -> Self {
    Self { key, sequence }
  }

  /// Big-endian `key ‖ sequence`, the 256-bit nonce of ERC-4337.
  pub fn pack(&self) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[..24].copy_from_slice(&self.key.to_bytes());
    out[24..].copy_from_slice(&self.sequence.to_be_bytes());
    out
  }

  pub fn unpack(word: [u8; 32]) -> Self {
    let mut key = [0u8; 24];
    key.copy_from_slice(&word[..24]);
    let mut sequence = [0u8; 8];
    sequence.copy_from_slice(&word[24..]);
    Self {
      key: ChannelKey::from_bytes(key),
      sequence: u64::from_be_bytes(sequence),
    }
  }
}
