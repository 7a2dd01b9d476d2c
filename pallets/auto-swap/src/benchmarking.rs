#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn create_config() {
    let caller: T::AccountId = whitelisted_caller();
    let source = T::BenchmarkHelper::asset(1);
    let destination = T::BenchmarkHelper::asset(2);
    let min_trigger: BalanceOf<T> = 10u32.into();

    #[extrinsic_call]
    create_config(
      RawOrigin::Signed(caller.clone()),
      source,
      destination,
      min_trigger,
      Some(caller.clone()),
    );

    assert!(StrategyConfigs::<T>::contains_key(&caller, source));
  }

  #[benchmark]
  fn remove_config() {
    let caller: T::AccountId = whitelisted_caller();
    let source = T::BenchmarkHelper::asset(1);
    let destination = T::BenchmarkHelper::asset(2);
    Pallet::<T>::create_config(
      RawOrigin::Signed(caller.clone()).into(),
      source,
      destination,
      10u32.into(),
      None,
    )
    .expect("config setup failed");

    #[extrinsic_call]
    remove_config(RawOrigin::Signed(caller.clone()), source, destination);

    assert!(!StrategyConfigs::<T>::contains_key(&caller, source));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
