#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn install_module() -> Weight;
	fn uninstall_module() -> Weight;
	fn handle_operation() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn install_module() -> Weight {
		Weight::from_parts(17_000_000, 1650)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn uninstall_module() -> Weight {
		Weight::from_parts(16_000_000, 1650)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	/// Orchestration only; validator and executor weight is added by `ModuleWeight`
	fn handle_operation() -> Weight {
		Weight::from_parts(30_000_000, 3300)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

impl WeightInfo for () {
	fn install_module() -> Weight {
		Weight::from_parts(17_000_000, 1650)
			.saturating_add(RocksDbWeight::get().reads(1))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
	fn uninstall_module() -> Weight {
		Weight::from_parts(16_000_000, 1650)
			.saturating_add(RocksDbWeight::get().reads(1))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
	fn handle_operation() -> Weight {
		Weight::from_parts(30_000_000, 3300)
			.saturating_add(RocksDbWeight::get().reads(3))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
}
