#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn enable_session_key() -> Weight;
	fn revoke_session_key() -> Weight;
	fn validate_operation() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn enable_session_key() -> Weight {
		Weight::from_parts(18_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn revoke_session_key() -> Weight {
		Weight::from_parts(14_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn validate_operation() -> Weight {
		Weight::from_parts(45_000_000, 1600)
			.saturating_add(T::DbWeight::get().reads(2))
	}
}

impl WeightInfo for () {
	fn enable_session_key() -> Weight {
		Weight::from_parts(18_000_000, 1600)
			.saturating_add(RocksDbWeight::get().reads(2))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
	fn revoke_session_key() -> Weight {
		Weight::from_parts(14_000_000, 1600)
			.saturating_add(RocksDbWeight::get().reads(1))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
	fn validate_operation() -> Weight {
		Weight::from_parts(45_000_000, 1600)
			.saturating_add(RocksDbWeight::get().reads(2))
	}
}
