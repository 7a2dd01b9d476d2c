//! Adapter traits for the auto-swap pallet
//!
//! The exchange itself lives outside this pallet; the runtime plugs a router in
//! through [`SwapRouter`].

use frame::prelude::*;

/// Swap primitive exposed by a routing target.
///
/// The router debits `amount_in` of `asset_in` from `who` and credits the output
/// to `who`. The pallet bounds what a router may move; a router that pulls more or
/// less than `amount_in` fails the execution guard.
pub trait SwapRouter<AccountId, AssetId, Balance> {
  fn swap(
    who: &AccountId,
    route: &AccountId,
    asset_in: AssetId,
    amount_in: Balance,
    asset_out: AssetId,
  ) -> Result<Balance, DispatchError>;
}

/// No router configured: every swap fails.
impl<AccountId, AssetId, Balance> SwapRouter<AccountId, AssetId, Balance> for () {
  fn swap(_: &AccountId, _: &AccountId, _: AssetId, _: Balance, _: AssetId) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("no swap router configured"))
  }
}
