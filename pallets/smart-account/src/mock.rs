extern crate alloc;

use crate as pallet_smart_account;
use alloc::vec::Vec;
use polkadot_sdk::frame_support::traits::fungibles::Mutate;
use polkadot_sdk::frame_support::traits::tokens::{Fortitude, Precision, Preservation};
use polkadot_sdk::frame_support::{
  BoundedVec, PalletId, assert_ok, construct_runtime, derive_impl,
  traits::{ConstU32, ConstU64, ConstU128, Get},
  weights::Weight,
};
use polkadot_sdk::frame_system;
use polkadot_sdk::pallet_timestamp;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  testing::{TestSignature, UintAuthorityId},
  traits::IdentityLookup,
};
use primitives::{
  CallExecutor, ChannelKey, ChannelNonce, ModuleType, OperationValidator, PendingOperation,
  params::{AUTO_SWAP_SELECTOR, MAX_CALL_PAYLOAD},
};
use std::cell::RefCell;

pub type AccountId = u64;
pub type AssetId = u32;
pub type Balance = u128;
pub type TestOperation = crate::PendingOperationOf<Test>;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const RELAYER: AccountId = 3;
pub const SESSION_KEY: AccountId = 10;
pub const OTHER_KEY: AccountId = 11;
pub const DEFAULT_ROUTE: AccountId = 900;
/// Address of [`OpenValidator`]
pub const OPEN_VALIDATOR: AccountId = 700;
/// Address of [`Recorder`]
pub const RECORDER: AccountId = 800;

pub const TOKEN_A: AssetId = 1;
pub const TOKEN_B: AssetId = 2;
pub const TOKEN_C: AssetId = 3;

/// Unix seconds the mock clock starts at
pub const START: u64 = 1_700_000_000;

thread_local! {
    pub static OPEN_VALIDATOR_ACCEPTS: RefCell<bool> = const { RefCell::new(true) };
    pub static RECORDED: RefCell<Vec<(AccountId, Vec<u8>)>> = const { RefCell::new(Vec::new()) };
}

pub fn set_open_validator_accepts(accepts: bool) {
  OPEN_VALIDATOR_ACCEPTS.with(|a| *a.borrow_mut() = accepts);
}

pub fn recorded() -> Vec<(AccountId, Vec<u8>)> {
  RECORDED.with(|r| r.borrow().clone())
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Timestamp: pallet_timestamp,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    SessionKeys: pallet_session_keys,
    AutoSwap: pallet_auto_swap,
    SmartAccount: pallet_smart_account,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<Balance>;
}

impl pallet_timestamp::Config for Test {
  type Moment = u64;
  type OnTimestampSet = ();
  type MinimumPeriod = ConstU64<1>;
  type WeightInfo = ();
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = Balance;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = Balance;
  type AssetId = AssetId;
  type AssetIdParameter = AssetId;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  type ReserveData = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = ();
}

pub struct SessionKeysPalletId;
impl Get<PalletId> for SessionKeysPalletId {
  fn get() -> PalletId {
    PalletId(*primitives::pallet_ids::SESSION_KEYS_PALLET_ID)
  }
}

impl pallet_session_keys::Config for Test {
  type Signature = TestSignature;
  type SigningPublicKey = UintAuthorityId;
  type UnixTime = Timestamp;
  type PalletId = SessionKeysPalletId;
  type WeightInfo = ();
}

/// Burns the input and mints twice as much of the output.
pub struct MockRouter;
impl pallet_auto_swap::SwapRouter<AccountId, AssetId, Balance> for MockRouter {
  fn swap(
    who: &AccountId,
    _route: &AccountId,
    asset_in: AssetId,
    amount_in: Balance,
    asset_out: AssetId,
  ) -> Result<Balance, DispatchError> {
    <Assets as Mutate<AccountId>>::burn_from(
      asset_in,
      who,
      amount_in,
      Preservation::Expendable,
      Precision::Exact,
      Fortitude::Polite,
    )?;
    let amount_out = amount_in.saturating_mul(2);
    <Assets as Mutate<AccountId>>::mint_into(asset_out, who, amount_out)?;
    Ok(amount_out)
  }
}

pub struct AutoSwapPalletId;
impl Get<PalletId> for AutoSwapPalletId {
  fn get() -> PalletId {
    PalletId(*primitives::pallet_ids::AUTO_SWAP_PALLET_ID)
  }
}

impl pallet_auto_swap::Config for Test {
  type AssetId = AssetId;
  type Balance = Balance;
  type Assets = Assets;
  type Router = MockRouter;
  type DefaultRoute = ConstU64<DEFAULT_ROUTE>;
  type PalletId = AutoSwapPalletId;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = ();
}

/// Second validator: owns the channels of `OPEN_VALIDATOR` and accepts or rejects
/// everything at once.
pub struct OpenValidator;
impl OperationValidator<AccountId, TestOperation> for OpenValidator {
  fn module_for(key: &ChannelKey) -> Option<AccountId> {
    key.belongs_to(&OPEN_VALIDATOR).then_some(OPEN_VALIDATOR)
  }

  fn is_module(module: &AccountId) -> bool {
    *module == OPEN_VALIDATOR
  }

  fn validate(_: &ChannelKey, _: &TestOperation) -> DispatchResult {
    if OPEN_VALIDATOR_ACCEPTS.with(|a| *a.borrow()) {
      Ok(())
    } else {
      Err(DispatchError::Other("open validator closed"))
    }
  }
}

/// Second executor: mints 5 of `TOKEN_C` to the account, then fails on an empty
/// payload or records the call.
pub struct Recorder;
impl CallExecutor<AccountId> for Recorder {
  fn is_module(module: &AccountId) -> bool {
    *module == RECORDER
  }

  fn execute(account: &AccountId, _target: &AccountId, payload: &[u8]) -> DispatchResult {
    <Assets as Mutate<AccountId>>::mint_into(TOKEN_C, account, 5)?;
    if payload.is_empty() {
      return Err(DispatchError::Other("nothing to record"));
    }
    RECORDED.with(|r| r.borrow_mut().push((*account, payload.to_vec())));
    Ok(())
  }
}

pub struct ModuleWeight;
impl Get<Weight> for ModuleWeight {
  fn get() -> Weight {
    <() as pallet_session_keys::WeightInfo>::validate_operation()
      .saturating_add(<() as pallet_auto_swap::WeightInfo>::auto_swap())
  }
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;
#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<AccountId> for MockBenchmarkHelper {
  fn validator() -> AccountId {
    SessionKeys::account_id()
  }

  fn executor() -> AccountId {
    AutoSwap::account_id()
  }
}

impl pallet_smart_account::Config for Test {
  type Signature = TestSignature;
  type MaxCallPayload = ConstU32<MAX_CALL_PAYLOAD>;
  type Validators = (SessionKeys, OpenValidator);
  type Executors = (AutoSwap, Recorder);
  type ModuleWeight = ModuleWeight;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

pub fn set_now(secs: u64) {
  Timestamp::set_timestamp(secs * 1_000);
}

pub fn session_channel() -> ChannelKey {
  ChannelKey::for_module(&SessionKeys::account_id())
}

pub fn bounded(payload: Vec<u8>) -> crate::CallPayloadOf<Test> {
  BoundedVec::try_from(payload).expect("payload within bound")
}

/// Operation addressed to `target`, signed by `signer`.
pub fn signed_op(
  account: AccountId,
  signer: AccountId,
  nonce: ChannelNonce,
  target: AccountId,
  payload: Vec<u8>,
) -> TestOperation {
  let mut op = PendingOperation {
    account,
    nonce,
    call_target: target,
    call_payload: bounded(payload),
    signature: TestSignature(signer, Vec::new()),
    claimed_signer: signer,
  };
  op.signature = TestSignature(signer, SessionKeys::operation_hash(&op).as_ref().to_vec());
  op
}

/// `autoSwap(source, amount)` by the session key on the canonical channel.
pub fn auto_swap_op(account: AccountId, sequence: u64, source: AssetId, amount: Balance) -> TestOperation {
  signed_op(
    account,
    SESSION_KEY,
    ChannelNonce::new(session_channel(), sequence),
    AutoSwap::account_id(),
    AutoSwap::auto_swap_payload(source, amount),
  )
}

/// Account set up as in a fresh deployment: both modules installed, session key
/// scoped to `autoSwap` on the executor for 100 seconds, strategy A to B.
pub fn setup_account(account: AccountId) {
  let origin = RuntimeOrigin::signed(account);
  assert_ok!(SmartAccount::install_module(
    origin.clone(),
    ModuleType::Validator,
    SessionKeys::account_id(),
  ));
  assert_ok!(SmartAccount::install_module(
    origin.clone(),
    ModuleType::Executor,
    AutoSwap::account_id(),
  ));
  assert_ok!(SessionKeys::enable_session_key(
    origin.clone(),
    SESSION_KEY,
    AutoSwap::account_id(),
    AUTO_SWAP_SELECTOR,
    START,
    START + 100,
  ));
  assert_ok!(AutoSwap::create_config(origin, TOKEN_A, TOKEN_B, 10, None));
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: alloc::vec![
      (TOKEN_A, BOB, true, 1),
      (TOKEN_B, BOB, true, 1),
      (TOKEN_C, BOB, true, 1),
    ],
    metadata: alloc::vec![],
    accounts: alloc::vec![(TOKEN_A, ALICE, 20), (TOKEN_A, BOB, 50)],
    reserves: alloc::vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  OPEN_VALIDATOR_ACCEPTS.with(|a| *a.borrow_mut() = true);
  RECORDED.with(|r| r.borrow_mut().clear());

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| {
    System::set_block_number(1);
    set_now(START);
  });
  ext
}
