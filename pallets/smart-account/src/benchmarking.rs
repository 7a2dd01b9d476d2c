#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;
use primitives::ModuleType;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn install_module() {
    let caller: T::AccountId = whitelisted_caller();
    let module = T::BenchmarkHelper::validator();

    #[extrinsic_call]
    install_module(
      RawOrigin::Signed(caller.clone()),
      ModuleType::Validator,
      module.clone(),
    );

    assert!(Pallet::<T>::has_module(&caller, &module, ModuleType::Validator));
  }

  #[benchmark]
  fn uninstall_module() {
    let caller: T::AccountId = whitelisted_caller();
    let module = T::BenchmarkHelper::executor();
    Pallet::<T>::install_module(
      RawOrigin::Signed(caller.clone()).into(),
      ModuleType::Executor,
      module.clone(),
    )
    .expect("install failed");

    #[extrinsic_call]
    uninstall_module(
      RawOrigin::Signed(caller.clone()),
      ModuleType::Executor,
      module.clone(),
    );

    assert!(!InstalledModules::<T>::contains_key(&caller, &module));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
