//! Ecosystem Constants for session-key smart accounts
//!
//! Pallet identifiers used to derive module addresses, plus the fixed parameters
//! shared by the validator, the orchestrator and the executors.

use crate::modules::Selector;
use hex_literal::hex;

/// Pallet identifiers for deriving module accounts.
///
/// A module's account doubles as its address: session scopes name it as the
/// call target, and validator addresses seed the nonce channel keys.
pub mod pallet_ids {
  /// Session key validator module
  pub const SESSION_KEYS_PALLET_ID: &[u8; 8] = b"py/sesky";

  /// Auto-swap (DCA) executor module
  pub const AUTO_SWAP_PALLET_ID: &[u8; 8] = b"py/atswp";

  /// Dispatch orchestrator / module registry
  pub const SMART_ACCOUNT_PALLET_ID: &[u8; 8] = b"py/smacc";
}

pub mod params {
  use super::*;

  /// Domain tag prefixed to every operation before hashing.
  ///
  /// Signatures produced for another protocol over the same bytes never verify here.
  pub const OPERATION_DOMAIN: &[u8] = b"smart-account/op/v1";

  /// Maximum call payload carried by a pending operation (selector + arguments).
  pub const MAX_CALL_PAYLOAD: u32 = 256;

  /// Width of the validator prefix inside a channel key.
  pub const CHANNEL_VALIDATOR_BYTES: usize = 20;

  /// `autoSwap(AssetId,Balance)`
  ///
  /// First four bytes of `blake2_256(b"autoSwap(AssetId,Balance)")`.
  pub const AUTO_SWAP_SELECTOR: Selector = hex!("c7524143");
}
