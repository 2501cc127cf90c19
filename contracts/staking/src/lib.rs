#![no_std]

pub mod accrual;
pub mod events;
pub mod settlement;
pub mod tiers;

mod guard;
mod ledger;

use soroban_sdk::{
    contract, contractimpl, symbol_short, token, Address, Env, String, Symbol, Vec,
};

pub use ledger::StakeRecord;
pub use tiers::Tier;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const ADMIN: Symbol = symbol_short!("ADMIN");
const TOKEN: Symbol = symbol_short!("TOKEN");
const FEE_SINK: Symbol = symbol_short!("FEE_SINK");
const TIERS: Symbol = symbol_short!("TIERS");
const EPOCH_DURATION: Symbol = symbol_short!("EPOCH_DUR");
const LOCK_EPOCHS: Symbol = symbol_short!("LOCK_EPS");
const FEE_PERCENT: Symbol = symbol_short!("FEE_PCT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidCollaboratorIdentity = 3,
    InvalidConfig = 4,
    BelowMinimumThreshold = 5,
    InsufficientBalance = 6,
    TransferFailed = 7,
    NoActiveStake = 8,
    /// An amount passed classification without meeting the floor. Should be
    /// unreachable given the upstream minimum check; observing it means an
    /// invariant was violated, not that the caller did anything wrong.
    NoMatchingTier = 9,
    Unauthorized = 10,
    ReentrantCall = 11,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TierStakingContract;

#[contractimpl]
impl TierStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `token`          – SAC address of the staked token.
    /// * `expected_token` – the token identity the deployer expects the
    ///                      ledger to be wired to; a mismatch aborts.
    /// * `fee_sink`       – account receiving early-unstake fees.
    /// * `tiers`          – classification table, ascending by threshold.
    /// * `epoch_duration` – seconds per score-accrual epoch.
    /// * `lock_epochs`    – minimum lock, in whole epochs.
    /// * `fee_percent`    – early-unstake fee, 0–100.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        expected_token: Address,
        fee_sink: Address,
        tiers: Vec<Tier>,
        epoch_duration: u64,
        lock_epochs: u64,
        fee_percent: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if token != expected_token {
            return Err(ContractError::InvalidCollaboratorIdentity);
        }
        if !tiers::validate(&tiers) || epoch_duration == 0 || fee_percent > 100 {
            return Err(ContractError::InvalidConfig);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&FEE_SINK, &fee_sink);
        env.storage().instance().set(&TIERS, &tiers);
        env.storage().instance().set(&EPOCH_DURATION, &epoch_duration);
        env.storage().instance().set(&LOCK_EPOCHS, &lock_epochs);
        env.storage().instance().set(&FEE_PERCENT, &fee_percent);

        events::publish_initialized(
            &env,
            admin,
            token,
            fee_sink,
            epoch_duration,
            lock_epochs,
            fee_percent,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Open a stake for `account`, or top up the open one.
    ///
    /// A fresh stake records the clock and the tier its amount classifies
    /// into; both are fixed for the stake's whole life. Top-ups only grow
    /// the amount — they never restart the lock timer and never re-tier,
    /// even when the new total crosses a higher threshold.
    pub fn stake(env: Env, account: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        if !guard::enter(&env) {
            return Err(ContractError::ReentrantCall);
        }
        let result = Self::stake_in_lock(&env, &account, amount);
        guard::exit(&env);
        result
    }

    fn stake_in_lock(env: &Env, account: &Address, amount: i128) -> Result<(), ContractError> {
        let tiers = Self::tier_table(env)?;
        if amount < tiers::minimum(&tiers) {
            return Err(ContractError::BelowMinimumThreshold);
        }

        let client = token::Client::new(env, &Self::token_address(env)?);
        if client.balance(account) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        let mut record = ledger::get_stake(env, account);
        if record.is_active() {
            record.amount = record.amount.saturating_add(amount);
        } else {
            let tier = tiers::classify(&tiers, amount).ok_or(ContractError::NoMatchingTier)?;
            let now = env.ledger().timestamp();
            record = StakeRecord {
                amount,
                start_time: now,
                initial_tier: tier,
                last_update_time: now,
            };
        }

        // Pull the principal into the contract, then commit the record.
        if client
            .try_transfer(account, &env.current_contract_address(), &amount)
            .is_err()
        {
            return Err(ContractError::TransferFailed);
        }
        ledger::put_stake(env, account, &record);

        events::publish_staked(env, account.clone(), amount);

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Close `account`'s stake: settle score accrual, split the principal
    /// into payout and early-exit fee, and return the payout.
    ///
    /// Before the lock matures the fee (`amount × fee_percent / 100`,
    /// truncating) goes to the fee sink; at or after maturity the full
    /// principal comes back. Either transfer failing aborts the whole call,
    /// so the split is never applied partially.
    pub fn unstake(env: Env, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        if !guard::enter(&env) {
            return Err(ContractError::ReentrantCall);
        }
        let result = Self::unstake_in_lock(&env, &account);
        guard::exit(&env);

        let (payout, receipt_score) = result?;
        events::publish_unstaked(&env, account, payout, receipt_score);
        Ok(())
    }

    fn unstake_in_lock(env: &Env, account: &Address) -> Result<(i128, u64), ContractError> {
        let record = ledger::get_stake(env, account);
        if !record.is_active() {
            return Err(ContractError::NoActiveStake);
        }

        let tiers = Self::tier_table(env)?;
        let receipt_score = Self::settle_score(env, account, &tiers);

        let now = env.ledger().timestamp();
        let elapsed = now.saturating_sub(record.start_time);
        let split = settlement::split(
            record.amount,
            elapsed,
            Self::lock_duration_seconds(env),
            Self::fee_percent_value(env),
        );

        // Close the record before moving any funds.
        ledger::clear_stake(env, account);

        let client = token::Client::new(env, &Self::token_address(env)?);
        let this = env.current_contract_address();
        if split.fee > 0
            && client
                .try_transfer(&this, &Self::fee_sink_address(env)?, &split.fee)
                .is_err()
        {
            return Err(ContractError::TransferFailed);
        }
        if client.try_transfer(&this, account, &split.payout).is_err() {
            return Err(ContractError::TransferFailed);
        }

        Ok((split.payout, receipt_score))
    }

    // ── Admin overrides ─────────────────────────────────────────────────────

    /// Force-close `account`'s stake on its behalf. Same accrue-then-settle
    /// path as [`Self::unstake`], but admin-gated and observable through a
    /// distinct event.
    pub fn force_unstake(env: Env, admin: Address, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        if !guard::enter(&env) {
            return Err(ContractError::ReentrantCall);
        }
        let result = Self::unstake_in_lock(&env, &account);
        guard::exit(&env);

        let (payout, receipt_score) = result?;
        events::publish_forcibly_unstaked(&env, account, payout, receipt_score);
        Ok(())
    }

    /// Zero `account`'s receipt score, whether or not a stake is open.
    ///
    /// Pending whole epochs are folded into the checkpoint first, so a
    /// query immediately after the reset reads 0 rather than re-crediting
    /// epochs that completed before it.
    pub fn reset_receipt_score(
        env: Env,
        admin: Address,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        if !guard::enter(&env) {
            return Err(ContractError::ReentrantCall);
        }

        let tiers = Self::tier_table(&env)?;
        Self::settle_score(&env, &account, &tiers);
        ledger::set_score(&env, &account, 0);

        guard::exit(&env);
        events::publish_receipt_score_reset(&env, account);
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// The account's receipt score as of this instant: the settled score
    /// plus whatever whole epochs would be credited right now. Mutates
    /// nothing.
    pub fn receipt_score(env: Env, account: Address) -> u64 {
        let stored = ledger::get_score(&env, &account);
        let record = ledger::get_stake(&env, &account);
        if !record.is_active() {
            return stored;
        }
        let tiers: Vec<Tier> = match env.storage().instance().get(&TIERS) {
            Some(tiers) => tiers,
            None => return stored,
        };
        let periods = accrual::completed_epochs(
            env.ledger().timestamp(),
            record.last_update_time,
            Self::epoch_duration_seconds(&env),
        );
        let rate = tiers.get_unchecked(record.initial_tier).epoch_score;
        stored.saturating_add(accrual::accrued_score(rate, periods))
    }

    /// Label of the tier the account's *current* staked amount falls in.
    ///
    /// Display only: unlike the stake's fixed `initial_tier`, this follows
    /// top-ups across tier boundaries.
    pub fn current_category(env: Env, account: Address) -> Result<String, ContractError> {
        let record = ledger::get_stake(&env, &account);
        if !record.is_active() {
            return Err(ContractError::NoActiveStake);
        }
        let tiers = Self::tier_table(&env)?;
        let idx = tiers::classify(&tiers, record.amount).ok_or(ContractError::NoMatchingTier)?;
        Ok(tiers.get_unchecked(idx).label)
    }

    /// The account's stake record; the zero record when none is open.
    pub fn get_stake(env: Env, account: Address) -> StakeRecord {
        ledger::get_stake(&env, &account)
    }

    pub fn get_tiers(env: Env) -> Result<Vec<Tier>, ContractError> {
        Self::tier_table(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        Self::token_address(&env)
    }

    pub fn get_fee_sink(env: Env) -> Result<Address, ContractError> {
        Self::fee_sink_address(&env)
    }

    /// Seconds per score-accrual epoch.
    pub fn get_epoch_duration(env: Env) -> u64 {
        Self::epoch_duration_seconds(&env)
    }

    /// The minimum lock in seconds (epoch duration × lock epochs).
    pub fn get_lock_duration(env: Env) -> u64 {
        Self::lock_duration_seconds(&env)
    }

    pub fn get_fee_percent(env: Env) -> u32 {
        Self::fee_percent_value(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored administrator.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Credit every whole epoch completed since the stake's checkpoint and
    /// advance the checkpoint by exactly that many epochs. Returns the
    /// settled score. No-op for an account with no open stake.
    fn settle_score(env: &Env, account: &Address, tiers: &Vec<Tier>) -> u64 {
        let mut record = ledger::get_stake(env, account);
        let score = ledger::get_score(env, account);
        if !record.is_active() {
            return score;
        }

        let epoch_duration = Self::epoch_duration_seconds(env);
        let periods = accrual::completed_epochs(
            env.ledger().timestamp(),
            record.last_update_time,
            epoch_duration,
        );
        if periods == 0 {
            return score;
        }

        let rate = tiers.get_unchecked(record.initial_tier).epoch_score;
        let settled = score.saturating_add(accrual::accrued_score(rate, periods));
        record.last_update_time =
            accrual::advance_checkpoint(record.last_update_time, periods, epoch_duration);

        ledger::put_stake(env, account, &record);
        ledger::set_score(env, account, settled);
        settled
    }

    fn tier_table(env: &Env) -> Result<Vec<Tier>, ContractError> {
        env.storage()
            .instance()
            .get(&TIERS)
            .ok_or(ContractError::NotInitialized)
    }

    fn token_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn fee_sink_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&FEE_SINK)
            .ok_or(ContractError::NotInitialized)
    }

    fn epoch_duration_seconds(env: &Env) -> u64 {
        env.storage().instance().get(&EPOCH_DURATION).unwrap_or(0)
    }

    fn lock_duration_seconds(env: &Env) -> u64 {
        let lock_epochs: u64 = env.storage().instance().get(&LOCK_EPOCHS).unwrap_or(0);
        Self::epoch_duration_seconds(env).saturating_mul(lock_epochs)
    }

    fn fee_percent_value(env: &Env) -> u32 {
        env.storage().instance().get(&FEE_PERCENT).unwrap_or(0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
