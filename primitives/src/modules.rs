//! Module taxonomy and the seams between the orchestrator and its modules.
//!
//! Validators and executors are pallets the runtime mounts; the orchestrator only
//! sees them through [`OperationValidator`] and [`CallExecutor`], and an account
//! opts into each one through its capability table.

use crate::nonce::ChannelKey;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use polkadot_sdk::sp_runtime::{DispatchError, DispatchResult};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// 4-byte function discriminator leading every call payload.
pub type Selector = [u8; 4];

/// First four bytes of `payload`, if there are that many.
pub fn selector_of(payload: &[u8]) -> Option<Selector> {
  payload.get(..4)?.try_into().ok()
}

/// Capability classes an account can install (ERC-7579 types 1 and 2).
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum ModuleType {
  /// Authorizes operations and owns nonce channels
  Validator,
  /// Target of validated calls
  Executor,
}

/// A set of validator modules, addressed through the channel key of a nonce.
///
/// `validate` must be a pure read: the orchestrator relies on a rejection leaving
/// every storage item untouched.
pub trait OperationValidator<AccountId, Op> {
  /// Module that owns the channel `key`, if any in this set does.
  fn module_for(key: &ChannelKey) -> Option<AccountId>;

  /// Whether `module` is a validator of this set.
  fn is_module(module: &AccountId) -> bool;

  /// Check `op` with the validator owning `key`.
  fn validate(key: &ChannelKey, op: &Op) -> DispatchResult;
}

impl<AccountId, Op> OperationValidator<AccountId, Op> for () {
  fn module_for(_: &ChannelKey) -> Option<AccountId> {
    None
  }

  fn is_module(_: &AccountId) -> bool {
    false
  }

  fn validate(_: &ChannelKey, _: &Op) -> DispatchResult {
    Err(DispatchError::Other("no validator configured"))
  }
}

macro_rules! impl_validator_tuple {
  ($first:ident, $($rest:ident),+) => {
    impl<AccountId, Op, $first, $($rest),+> OperationValidator<AccountId, Op> for ($first, $($rest),+)
    where
      $first: OperationValidator<AccountId, Op>,
      $($rest: OperationValidator<AccountId, Op>),+
    {
      fn module_for(key: &ChannelKey) -> Option<AccountId> {
        $first::module_for(key)$(.or_else(|| $rest::module_for(key)))+
      }

      fn is_module(module: &AccountId) -> bool {
        $first::is_module(module) $(|| $rest::is_module(module))+
      }

      fn validate(key: &ChannelKey, op: &Op) -> DispatchResult {
        if $first::module_for(key).is_some() {
          return $first::validate(key, op);
        }
        <($($rest,)+) as OperationValidator<AccountId, Op>>::validate(key, op)
      }
    }
  };
}

impl<AccountId, Op, A: OperationValidator<AccountId, Op>> OperationValidator<AccountId, Op>
  for (A,)
{
  fn module_for(key: &ChannelKey) -> Option<AccountId> {
    A::module_for(key)
  }

  fn is_module(module: &AccountId) -> bool {
    A::is_module(module)
  }

  fn validate(key: &ChannelKey, op: &Op) -> DispatchResult {
    A::validate(key, op)
  }
}

impl_validator_tuple!(A, B);
impl_validator_tuple!(A, B, C);

/// A set of executor modules, addressed by the call target of an operation.
pub trait CallExecutor<AccountId> {
  /// Whether `module` is an executor of this set.
  fn is_module(module: &AccountId) -> bool;

  /// Run `payload` against `target` on behalf of `account`.
  ///
  /// Only ever reached once the operation has been validated and its nonce
  /// consumed.
  fn execute(account: &AccountId, target: &AccountId, payload: &[u8]) -> DispatchResult;
}

impl<AccountId> CallExecutor<AccountId> for () {
  fn is_module(_: &AccountId) -> bool {
    false
  }

  fn execute(_: &AccountId, _: &AccountId, _: &[u8]) -> DispatchResult {
    Err(DispatchError::Other("no executor configured"))
  }
}

impl<AccountId, A, B> CallExecutor<AccountId> for (A, B)
where
  A: CallExecutor<AccountId>,
  B: CallExecutor<AccountId>,
{
  fn is_module(module: &AccountId) -> bool {
    A::is_module(module) || B::is_module(module)
  }

  fn execute(account: &AccountId, target: &AccountId, payload: &[u8]) -> DispatchResult {
    if A::is_module(target) {
      A::execute(account, target, payload)
    } else {
      B::execute(account, target, payload)
    }
  }
}
