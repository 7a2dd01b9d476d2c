//! Session Keys Pallet
//!
//! Validator module scoping delegated signing keys of an account.
//!
//! A session key is bound to one call shape: a target module, a function selector and
//! an inclusive `[valid_after, valid_until]` window in unix seconds. Operations signed
//! by the key are accepted only when they match that scope exactly.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::session-keys";

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, WeightInfo};
  use frame::deps::{
    frame_support::{PalletId, traits::UnixTime},
    sp_runtime::traits::{AccountIdConversion, Hash, IdentifyAccount, Verify},
  };
  use frame::prelude::*;
  use primitives::{ChannelKey, OperationValidator, PendingOperation, Selector, selector_of};

  /// Authorized call shape of one delegate key.
  ///
  /// Never deleted: revocation clears `active`, expiry is derived from the clock.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
  )]
  pub struct SessionScope<AccountId> {
    pub target: AccountId,
    pub selector: Selector,
    pub valid_after: u64,
    pub valid_until: u64,
    pub active: bool,
  }

  impl<AccountId> SessionScope<AccountId> {
    pub fn is_expired_at(&self, now: u64) -> bool {
      now > self.valid_until
    }

    pub fn is_live_at(&self, now: u64) -> bool {
      self.active && self.valid_after <= now && !self.is_expired_at(now)
    }
  }

  #[pallet::config]
  pub trait Config: frame_system::Config {
    /// Signature scheme delegates sign operations with
    type Signature: Verify<Signer = Self::SigningPublicKey> + Parameter;
    /// Public key of a delegate, identifying its account
    type SigningPublicKey: IdentifyAccount<AccountId = Self::AccountId>;
    /// Wall clock the validity windows are checked against
    type UnixTime: UnixTime;
    /// Pallet ID for module address derivation
    #[pallet::constant]
    type PalletId: Get<PalletId>;
    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Scope records keyed by (owner account, delegate key)
  #[pallet::storage]
  #[pallet::getter(fn session_scopes)]
  pub type SessionScopes<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    Blake2_128Concat,
    T::AccountId,
    SessionScope<T::AccountId>,
    OptionQuery,
  >;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A delegate key was granted a scope
    SessionKeyEnabled {
      owner: T::AccountId,
      delegate: T::AccountId,
      target: T::AccountId,
      selector: Selector,
      valid_after: u64,
      valid_until: u64,
    },
    /// A delegate key was deactivated by its owner
    SessionKeyRevoked {
      owner: T::AccountId,
      delegate: T::AccountId,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Signature does not verify for the claimed signer
    BadSignature,
    /// No active scope for the signer on this account
    NoScope,
    /// Validity window has elapsed
    Expired,
    /// Validity window has not started
    NotYetValid,
    /// Call target differs from the scoped target
    TargetMismatch,
    /// Call payload selector differs from the scoped selector
    SelectorMismatch,
    /// `valid_after` must be strictly before `valid_until`
    InvalidValidityWindow,
    /// The delegate already holds an active, unexpired scope
    ScopeAlreadyActive,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Grant `delegate` a scope on the signing account.
    ///
    /// Overwrites an inactive or expired record (re-enable); an active scope is
    /// immutable until revoked or expired.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::enable_session_key())]
    pub fn enable_session_key(
      origin: OriginFor<T>,
      delegate: T::AccountId,
      target: T::AccountId,
      selector: Selector,
      valid_after: u64,
      valid_until: u64,
    ) -> DispatchResult {
      let owner = ensure_signed(origin)?;

      ensure!(
        valid_after < valid_until,
        Error::<T>::InvalidValidityWindow
      );

      let now = Self::now();
      if let Some(existing) = SessionScopes::<T>::get(&owner, &delegate) {
        ensure!(
          !existing.active || existing.is_expired_at(now),
          Error::<T>::ScopeAlreadyActive
        );
      }

      SessionScopes::<T>::insert(
        &owner,
        &delegate,
        SessionScope {
          target: target.clone(),
          selector,
          valid_after,
          valid_until,
          active: true,
        },
      );

      log::info!(
        target: LOG_TARGET,
        "session key enabled until {}",
        valid_until
      );

      Self::deposit_event(Event::SessionKeyEnabled {
        owner,
        delegate,
        target,
        selector,
        valid_after,
        valid_until,
      });

      Ok(())
    }

    /// Deactivate the scope of `delegate` on the signing account.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::revoke_session_key())]
    pub fn revoke_session_key(origin: OriginFor<T>, delegate: T::AccountId) -> DispatchResult {
      let owner = ensure_signed(origin)?;

      SessionScopes::<T>::try_mutate(&owner, &delegate, |maybe_scope| -> DispatchResult {
        let scope = maybe_scope
          .as_mut()
          .filter(|scope| scope.active)
          .ok_or(Error::<T>::NoScope)?;
        scope.active = false;
        Ok(())
      })?;

      Self::deposit_event(Event::SessionKeyRevoked { owner, delegate });

      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Module address, used as channel owner and validator identity
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    pub fn now() -> u64 {
      T::UnixTime::now().as_secs()
    }

    pub fn scope_of(
      owner: &T::AccountId,
      delegate: &T::AccountId,
    ) -> Option<SessionScope<T::AccountId>> {
      SessionScopes::<T>::get(owner, delegate)
    }

    /// Whether `delegate` could sign for `owner` right now.
    pub fn is_usable(owner: &T::AccountId, delegate: &T::AccountId) -> bool {
      Self::scope_of(owner, delegate).is_some_and(|scope| scope.is_live_at(Self::now()))
    }

    /// Canonical hash a delegate signs.
    pub fn operation_hash<P: Encode>(
      op: &PendingOperation<T::AccountId, T::Signature, P>,
    ) -> T::Hash {
      T::Hashing::hash(&op.signing_payload())
    }

    /// Run the admission checks in order; reads only.
    ///
    /// 1. signature over the operation hash
    /// 2. active scope for (account, signer)
    /// 3. validity window
    /// 4. call target
    /// 5. payload selector
    pub fn check_operation<P: Encode + AsRef<[u8]>>(
      op: &PendingOperation<T::AccountId, T::Signature, P>,
    ) -> Result<(), Error<T>> {
      let hash = Self::operation_hash(op);
      ensure!(
        op.signature.verify(hash.as_ref(), &op.claimed_signer),
        Error::<T>::BadSignature
      );

      let scope = SessionScopes::<T>::get(&op.account, &op.claimed_signer)
        .filter(|scope| scope.active)
        .ok_or(Error::<T>::NoScope)?;

      let now = Self::now();
      ensure!(now >= scope.valid_after, Error::<T>::NotYetValid);
      ensure!(!scope.is_expired_at(now), Error::<T>::Expired);

      ensure!(
        op.call_target == scope.target,
        Error::<T>::TargetMismatch
      );

      ensure!(
        selector_of(op.call_payload.as_ref()) == Some(scope.selector),
        Error::<T>::SelectorMismatch
      );

      Ok(())
    }
  }

  impl<T: Config, P: Encode + AsRef<[u8]>>
    OperationValidator<T::AccountId, PendingOperation<T::AccountId, T::Signature, P>>
    for Pallet<T>
  {
    fn module_for(key: &ChannelKey) -> Option<T::AccountId> {
      let module = Self::account_id();
      key.belongs_to(&module).then_some(module)
    }

    fn is_module(module: &T::AccountId) -> bool {
      *module == Self::account_id()
    }

    fn validate(
      _key: &ChannelKey,
      op: &PendingOperation<T::AccountId, T::Signature, P>,
    ) -> DispatchResult {
      Self::check_operation(op).map_err(|err| {
        log::debug!(
          target: LOG_TARGET,
          "operation rejected: {:?}",
          err
        );
        err.into()
      })
    }
  }
}
