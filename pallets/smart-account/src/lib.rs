//! Smart Account Pallet
//!
//! Entry point of delegated operations and registry of the modules each account
//! opts into.
//!
//! ## Flow
//! A relayer submits a [`PendingOperationOf`] through `handle_operation`:
//!
//! 1. the channel key of the nonce names the validator module;
//! 2. that validator must be installed on the account, and must accept;
//! 3. the call target must be an installed executor;
//! 4. the nonce channel is advanced;
//! 5. the executor runs inside its own storage layer.
//!
//! Steps 1 to 3 only read, so a rejection there leaves no trace. Once the nonce is
//! consumed it stays consumed: an executor failure rolls back the executor's writes,
//! emits `OperationFailed` and the extrinsic still succeeds.
//!
//! ## Nonce channels
//! One strictly sequential counter per `(account, ChannelKey)`. A presented nonce
//! must equal the counter, so both replays and gaps are rejected.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::smart-account";

#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  /// A module the configured validator set answers for
  fn validator() -> AccountId;
  /// A module the configured executor set answers for
  fn executor() -> AccountId;
}

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, WeightInfo};
  use frame::deps::frame_support::storage::with_storage_layer;
  use frame::prelude::*;
  use primitives::{
    CallExecutor, ChannelKey, ChannelNonce, ModuleType, OperationValidator, PendingOperation,
  };

  pub type CallPayloadOf<T> = BoundedVec<u8, <T as Config>::MaxCallPayload>;

  pub type PendingOperationOf<T> = PendingOperation<
    <T as frame_system::Config>::AccountId,
    <T as Config>::Signature,
    CallPayloadOf<T>,
  >;

  /// Outcome of an operation that got past the nonce channel.
  #[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
  pub struct ExecutionReceipt<AccountId> {
    pub account: AccountId,
    pub nonce: ChannelNonce,
    pub success: bool,
    /// Executor error, the nonce is burnt regardless
    pub error: Option<DispatchError>,
  }

  #[pallet::config]
  pub trait Config: frame_system::Config {
    /// Signature carried by operations, checked by the validators
    type Signature: Parameter;
    /// Upper bound of an operation's call payload
    #[pallet::constant]
    type MaxCallPayload: Get<u32> + 'static;
    /// Validator modules accounts can install
    type Validators: OperationValidator<Self::AccountId, PendingOperationOf<Self>>;
    /// Executor modules accounts can install
    type Executors: CallExecutor<Self::AccountId>;
    /// Worst-case weight of one validation plus one execution by the mounted modules
    type ModuleWeight: Get<Weight>;
    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Capability table: modules installed per account
  #[pallet::storage]
  #[pallet::getter(fn installed_modules)]
  pub type InstalledModules<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    Blake2_128Concat,
    T::AccountId,
    ModuleType,
    OptionQuery,
  >;

  /// Next expected sequence per (account, channel)
  ///
  /// Channels start at zero on first use and are never removed.
  #[pallet::storage]
  pub type NonceChannels<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    Blake2_128Concat,
    ChannelKey,
    u64,
    ValueQuery,
  >;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    ModuleInstalled {
      account: T::AccountId,
      module_type: ModuleType,
      module: T::AccountId,
    },
    ModuleUninstalled {
      account: T::AccountId,
      module_type: ModuleType,
      module: T::AccountId,
    },
    /// Operation validated, nonce consumed and call executed
    OperationExecuted {
      account: T::AccountId,
      nonce: ChannelNonce,
      call_target: T::AccountId,
      relayer: T::AccountId,
    },
    /// Nonce consumed but the executor failed; its writes were discarded
    OperationFailed {
      account: T::AccountId,
      nonce: ChannelNonce,
      call_target: T::AccountId,
      relayer: T::AccountId,
      error: DispatchError,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Presented nonce differs from the channel's next sequence
    ReplayOrGap,
    /// No configured validator owns the nonce channel
    UnknownValidator,
    /// Module is not installed on the account as the given type
    ModuleNotInstalled,
    /// Call target is not an executor installed on the account
    ExecutorNotInstalled,
    /// No configured module of the given type has this address
    UnknownModule,
    /// Module is already installed on the account
    ModuleAlreadyInstalled,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Install a validator or executor on the signing account.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::install_module())]
    pub fn install_module(
      origin: OriginFor<T>,
      module_type: ModuleType,
      module: T::AccountId,
    ) -> DispatchResult {
      let account = ensure_signed(origin)?;

      let known = match module_type {
        ModuleType::Validator => T::Validators::is_module(&module),
        ModuleType::Executor => T::Executors::is_module(&module),
      };
      ensure!(known, Error::<T>::UnknownModule);
      ensure!(
        !InstalledModules::<T>::contains_key(&account, &module),
        Error::<T>::ModuleAlreadyInstalled
      );

      InstalledModules::<T>::insert(&account, &module, module_type);

      log::info!(
        target: LOG_TARGET,
        "{:?} module installed",
        module_type
      );

      Self::deposit_event(Event::ModuleInstalled {
        account,
        module_type,
        module,
      });

      Ok(())
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::uninstall_module())]
    pub fn uninstall_module(
      origin: OriginFor<T>,
      module_type: ModuleType,
      module: T::AccountId,
    ) -> DispatchResult {
      let account = ensure_signed(origin)?;

      ensure!(
        Self::has_module(&account, &module, module_type),
        Error::<T>::ModuleNotInstalled
      );
      InstalledModules::<T>::remove(&account, &module);

      Self::deposit_event(Event::ModuleUninstalled {
        account,
        module_type,
        module,
      });

      Ok(())
    }

    /// Validate, sequence and execute a delegated operation.
    ///
    /// Any signed origin may relay; authority comes from the operation itself.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::handle_operation().saturating_add(T::ModuleWeight::get()))]
    pub fn handle_operation(origin: OriginFor<T>, op: PendingOperationOf<T>) -> DispatchResult {
      let relayer = ensure_signed(origin)?;
      Self::do_handle(relayer, op).map(|_| ())
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn has_module(account: &T::AccountId, module: &T::AccountId, module_type: ModuleType) -> bool {
      InstalledModules::<T>::get(account, module) == Some(module_type)
    }

    /// Next nonce `account` must present on channel `key`.
    pub fn nonce_of(account: &T::AccountId, key: ChannelKey) -> ChannelNonce {
      ChannelNonce::new(key, NonceChannels::<T>::get(account, key))
    }

    /// Advance channel `key` of `account` if `presented` is its next sequence.
    pub fn consume_nonce(account: &T::AccountId, key: ChannelKey, presented: u64) -> DispatchResult {
      NonceChannels::<T>::try_mutate(account, key, |current| -> DispatchResult {
        ensure!(*current == presented, Error::<T>::ReplayOrGap);
        *current = presented.checked_add(1).ok_or(Error::<T>::ReplayOrGap)?;
        Ok(())
      })
    }

    /// Run the admission gates, then the executor.
    ///
    /// `Err` means the operation was rejected and nothing was written. `Ok` means
    /// the nonce was consumed; the receipt tells whether the call succeeded.
    pub fn do_handle(
      relayer: T::AccountId,
      op: PendingOperationOf<T>,
    ) -> Result<ExecutionReceipt<T::AccountId>, DispatchError> {
      let key = op.nonce.key;

      let validator = T::Validators::module_for(&key).ok_or(Error::<T>::UnknownValidator)?;
      ensure!(
        Self::has_module(&op.account, &validator, ModuleType::Validator),
        Error::<T>::ModuleNotInstalled
      );

      T::Validators::validate(&key, &op)?;

      ensure!(
        T::Executors::is_module(&op.call_target)
          && Self::has_module(&op.account, &op.call_target, ModuleType::Executor),
        Error::<T>::ExecutorNotInstalled
      );

      Self::consume_nonce(&op.account, key, op.nonce.sequence)?;

      let outcome = with_storage_layer(|| {
        T::Executors::execute(&op.account, &op.call_target, &op.call_payload)
      });

      let PendingOperation {
        account,
        nonce,
        call_target,
        ..
      } = op;

      match outcome {
        Ok(()) => {
          Self::deposit_event(Event::OperationExecuted {
            account: account.clone(),
            nonce,
            call_target,
            relayer,
          });
          Ok(ExecutionReceipt {
            account,
            nonce,
            success: true,
            error: None,
          })
        }
        Err(error) => {
          log::debug!(
            target: LOG_TARGET,
            "execution failed after nonce {} was consumed: {:?}",
            nonce.sequence,
            error
          );
          Self::deposit_event(Event::OperationFailed {
            account: account.clone(),
            nonce,
            call_target,
            relayer,
            error,
          });
          Ok(ExecutionReceipt {
            account,
            nonce,
            success: false,
            error: Some(error),
          })
        }
      }
    }
  }
}
