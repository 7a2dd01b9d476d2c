//! Auto Swap Pallet
//!
//! Executor module converting an asset an account received into the destination
//! asset of the account's strategy.
//!
//! ## Strategy configs
//! An owner keeps at most one strategy per source asset. Execution resolves the
//! config by `(account, source_asset)`, so creating a config for a source that
//! already has one replaces it, whatever its destination.
//!
//! ## Execution
//! Only reachable as the call target of a validated operation. The payload is
//! `AUTO_SWAP_SELECTOR ‖ SCALE(source_asset, amount_received)`, and the amount must
//! equal the account's whole source balance. The swap is delegated to the router;
//! afterwards the source balance must have dropped by exactly that amount.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
pub use adapters::SwapRouter;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::auto-swap";

#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AssetId> {
  fn asset(seed: u32) -> AssetId;
}

#[cfg(feature = "runtime-benchmarks")]
impl<AssetId: From<u32>> BenchmarkHelper<AssetId> for () {
  fn asset(seed: u32) -> AssetId {
    seed.into()
  }
}

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, SwapRouter, WeightInfo};
  use alloc::vec::Vec;
  use codec::DecodeAll;
  use frame::deps::{
    frame_support::{PalletId, traits::fungibles::Inspect},
    sp_runtime::traits::{AccountIdConversion, CheckedSub},
  };
  use frame::prelude::*;
  use primitives::{CallExecutor, params::AUTO_SWAP_SELECTOR, selector_of};

  /// Strategy of one (owner, source asset) pair.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
  )]
  pub struct StrategyConfig<AccountId, AssetId, Balance> {
    pub destination_asset: AssetId,
    /// Smallest amount worth converting
    pub min_trigger_amount: Balance,
    /// Router override, `None` for the protocol default
    pub routing_target: Option<AccountId>,
  }

  pub type StrategyConfigOf<T> =
    StrategyConfig<<T as frame_system::Config>::AccountId, AssetIdOf<T>, BalanceOf<T>>;

  #[pallet::config]
  pub trait Config: frame_system::Config {
    type AssetId: Parameter + Member + Copy + MaybeSerializeDeserialize + MaxEncodedLen;

    type Balance: Parameter
      + Member
      + AtLeast32BitUnsigned
      + Default
      + Copy
      + MaybeSerializeDeserialize
      + MaxEncodedLen;

    /// Balance source the amount argument and the execution guard are checked against
    type Assets: Inspect<Self::AccountId, AssetId = Self::AssetId, Balance = Self::Balance>;
    /// Exchange the conversion is delegated to
    type Router: SwapRouter<Self::AccountId, Self::AssetId, Self::Balance>;
    /// Routing target used when a config has no override
    #[pallet::constant]
    type DefaultRoute: Get<Self::AccountId>;
    /// Pallet ID for module address derivation
    #[pallet::constant]
    type PalletId: Get<PalletId>;
    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AssetId>;
  }

  pub type BalanceOf<T> = <T as Config>::Balance;
  pub type AssetIdOf<T> = <T as Config>::AssetId;

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Strategy configs keyed by (owner, source asset)
  #[pallet::storage]
  #[pallet::getter(fn strategy_configs)]
  pub type StrategyConfigs<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    Blake2_128Concat,
    AssetIdOf<T>,
    StrategyConfigOf<T>,
    OptionQuery,
  >;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A strategy was stored for a source asset without one
    ConfigCreated {
      owner: T::AccountId,
      source_asset: AssetIdOf<T>,
      destination_asset: AssetIdOf<T>,
      min_trigger_amount: BalanceOf<T>,
      routing_target: Option<T::AccountId>,
    },
    /// A strategy replaced the previous one of its source asset
    ConfigUpdated {
      owner: T::AccountId,
      source_asset: AssetIdOf<T>,
      destination_asset: AssetIdOf<T>,
      min_trigger_amount: BalanceOf<T>,
      routing_target: Option<T::AccountId>,
    },
    ConfigRemoved {
      owner: T::AccountId,
      source_asset: AssetIdOf<T>,
      destination_asset: AssetIdOf<T>,
    },
    /// Conversion executed on behalf of an account
    SwapCompleted {
      account: T::AccountId,
      source_asset: AssetIdOf<T>,
      destination_asset: AssetIdOf<T>,
      amount_in: BalanceOf<T>,
      amount_out: BalanceOf<T>,
      route: T::AccountId,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// No strategy for the account and asset pair
    NoConfig,
    /// Amount differs from the account's balance of the source asset
    AmountMismatch,
    /// Amount is below the strategy's trigger threshold
    BelowTriggerAmount,
    /// Router moved a different amount than it was allowed to
    SwapGuardViolated,
    /// Payload does not start with a selector of this module
    UnknownSelector,
    /// Payload arguments do not decode
    MalformedPayload,
    /// Source and destination assets are the same
    SameAsset,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Store the strategy of `source_asset` for the signing account.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create_config())]
    pub fn create_config(
      origin: OriginFor<T>,
      source_asset: AssetIdOf<T>,
      destination_asset: AssetIdOf<T>,
      min_trigger_amount: BalanceOf<T>,
      routing_target: Option<T::AccountId>,
    ) -> DispatchResult {
      let owner = ensure_signed(origin)?;
      ensure!(source_asset != destination_asset, Error::<T>::SameAsset);

      let replaced = StrategyConfigs::<T>::contains_key(&owner, source_asset);
      StrategyConfigs::<T>::insert(
        &owner,
        source_asset,
        StrategyConfig {
          destination_asset,
          min_trigger_amount,
          routing_target: routing_target.clone(),
        },
      );

      if replaced {
        Self::deposit_event(Event::ConfigUpdated {
          owner,
          source_asset,
          destination_asset,
          min_trigger_amount,
          routing_target,
        });
      } else {
        Self::deposit_event(Event::ConfigCreated {
          owner,
          source_asset,
          destination_asset,
          min_trigger_amount,
          routing_target,
        });
      }

      Ok(())
    }

    /// Drop the strategy converting `source_asset` into `destination_asset`.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::remove_config())]
    pub fn remove_config(
      origin: OriginFor<T>,
      source_asset: AssetIdOf<T>,
      destination_asset: AssetIdOf<T>,
    ) -> DispatchResult {
      let owner = ensure_signed(origin)?;

      let config = StrategyConfigs::<T>::get(&owner, source_asset).ok_or(Error::<T>::NoConfig)?;
      ensure!(
        config.destination_asset == destination_asset,
        Error::<T>::NoConfig
      );
      StrategyConfigs::<T>::remove(&owner, source_asset);

      Self::deposit_event(Event::ConfigRemoved {
        owner,
        source_asset,
        destination_asset,
      });

      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Module address, the call target operations name
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    pub fn config_of(owner: &T::AccountId, source_asset: AssetIdOf<T>) -> Option<StrategyConfigOf<T>> {
      StrategyConfigs::<T>::get(owner, source_asset)
    }

    /// Call payload of `autoSwap(source_asset, amount)`.
    pub fn auto_swap_payload(source_asset: AssetIdOf<T>, amount: BalanceOf<T>) -> Vec<u8> {
      let mut payload = AUTO_SWAP_SELECTOR.to_vec();
      (source_asset, amount).encode_to(&mut payload);
      payload
    }

    /// Decode an execution payload into its `(source_asset, amount)` arguments.
    pub fn decode_payload(payload: &[u8]) -> Result<(AssetIdOf<T>, BalanceOf<T>), Error<T>> {
      ensure!(
        selector_of(payload) == Some(AUTO_SWAP_SELECTOR),
        Error::<T>::UnknownSelector
      );
      <(AssetIdOf<T>, BalanceOf<T>)>::decode_all(&mut &payload[AUTO_SWAP_SELECTOR.len()..])
        .map_err(|_| Error::<T>::MalformedPayload)
    }

    /// Convert the whole `amount` of `source_asset` held by `account`.
    ///
    /// Returns the amount of destination asset credited.
    pub fn do_auto_swap(
      account: &T::AccountId,
      source_asset: AssetIdOf<T>,
      amount: BalanceOf<T>,
    ) -> Result<BalanceOf<T>, DispatchError> {
      let config = StrategyConfigs::<T>::get(account, source_asset).ok_or(Error::<T>::NoConfig)?;

      ensure!(
        amount >= config.min_trigger_amount,
        Error::<T>::BelowTriggerAmount
      );

      let before = T::Assets::balance(source_asset, account);
      ensure!(amount == before, Error::<T>::AmountMismatch);

      let route = config.routing_target.unwrap_or_else(T::DefaultRoute::get);
      let amount_out = T::Router::swap(
        account,
        &route,
        source_asset,
        amount,
        config.destination_asset,
      )?;

      let after = T::Assets::balance(source_asset, account);
      ensure!(
        before.checked_sub(&after) == Some(amount),
        Error::<T>::SwapGuardViolated
      );

      log::info!(
        target: LOG_TARGET,
        "auto swap {:?} -> {:?}: {:?} in, {:?} out",
        source_asset,
        config.destination_asset,
        amount,
        amount_out
      );

      Self::deposit_event(Event::SwapCompleted {
        account: account.clone(),
        source_asset,
        destination_asset: config.destination_asset,
        amount_in: amount,
        amount_out,
        route,
      });

      Ok(amount_out)
    }
  }

  impl<T: Config> CallExecutor<T::AccountId> for Pallet<T> {
    fn is_module(module: &T::AccountId) -> bool {
      *module == Self::account_id()
    }

    fn execute(account: &T::AccountId, _target: &T::AccountId, payload: &[u8]) -> DispatchResult {
      let (source_asset, amount) = Self::decode_payload(payload)?;
      Self::do_auto_swap(account, source_asset, amount).map(|_| ())
    }
  }
}
