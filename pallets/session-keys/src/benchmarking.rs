#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::params::AUTO_SWAP_SELECTOR;

#[benchmarks]
mod benches {
  use super::*;

  const WINDOW: u64 = 1_000_000;

  #[benchmark]
  fn enable_session_key() {
    let owner: T::AccountId = whitelisted_caller();
    let delegate: T::AccountId = account("delegate", 0, 0);
    let target = Pallet::<T>::account_id();
    let now = Pallet::<T>::now();

    #[extrinsic_call]
    enable_session_key(
      RawOrigin::Signed(owner.clone()),
      delegate.clone(),
      target,
      AUTO_SWAP_SELECTOR,
      now,
      now.saturating_add(WINDOW),
    );

    assert!(Pallet::<T>::is_usable(&owner, &delegate));
  }

  #[benchmark]
  fn revoke_session_key() {
    let owner: T::AccountId = whitelisted_caller();
    let delegate: T::AccountId = account("delegate", 0, 0);
    let now = Pallet::<T>::now();
    Pallet::<T>::enable_session_key(
      RawOrigin::Signed(owner.clone()).into(),
      delegate.clone(),
      Pallet::<T>::account_id(),
      AUTO_SWAP_SELECTOR,
      now,
      now.saturating_add(WINDOW),
    )
    .expect("enable failed");

    #[extrinsic_call]
    revoke_session_key(RawOrigin::Signed(owner.clone()), delegate.clone());

    assert!(!Pallet::<T>::is_usable(&owner, &delegate));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
