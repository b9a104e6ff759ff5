#![no_std]

pub mod events;

use common::ownable;
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE_TOKEN: Symbol = symbol_short!("NAT_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const REWARD_RATE: Symbol = symbol_short!("RWD_RATE");
const MATURITY_PERIOD: Symbol = symbol_short!("MAT_PER");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const TOTAL_WITHDRAWALS: Symbol = symbol_short!("TOT_WDR");
const TOTAL_REWARDS_CLAIMED: Symbol = symbol_short!("TOT_CLM");

// Per-account persistent storage uses a tuple key:  (prefix, account_address)
const STAKE_REC: Symbol = symbol_short!("STK_REC");

// TTL extension window for per-account records (ledgers).
const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidConfig = 4,
    ZeroAmount = 5,
    AlreadyStaked = 6,
    NoStake = 7,
    AlreadyClaimed = 8,
    AlreadyWithdrawn = 9,
    NotMatured = 10,
    RewardTransferFailed = 11,
    NativeTransferFailed = 12,
    EmergencyTransferFailed = 13,
    InvalidRate = 14,
    InvalidPeriod = 15,
    InvalidTokenAddress = 16,
    InvalidNewOwner = 17,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// One account's stake position, as stored and as returned by
/// `get_stake_details`. An account that never staked reads as the all-zero
/// record.
///
/// `amount` and `start_time` are written once and never change; `withdrawn`
/// and `claimed` each move false→true at most once. Records are never
/// deleted, so the full audit history of an account survives its exit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    pub amount: i128,
    pub start_time: u64,
    pub withdrawn: bool,
    pub claimed: bool,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakeEscrowContract;

#[contractimpl]
impl StakeEscrowContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `native_token`    – SAC address of the asset users stake.
    /// * `reward_token`    – SAC address of the asset paid out as rewards.
    /// * `reward_rate`     – flat multiplier: reward = staked × rate.
    /// * `maturity_period` – seconds a stake must age before claim/withdraw.
    pub fn initialize(
        env: Env,
        owner: Address,
        native_token: Address,
        reward_token: Address,
        reward_rate: i128,
        maturity_period: u64,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_rate <= 0 {
            return Err(ContractError::InvalidConfig);
        }
        if maturity_period == 0 {
            return Err(ContractError::InvalidConfig);
        }
        // Addresses cannot be null on this platform; the expressible
        // misconfiguration is the reward asset aliasing the staked asset.
        if reward_token == native_token {
            return Err(ContractError::InvalidConfig);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&NATIVE_TOKEN, &native_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&REWARD_RATE, &reward_rate);
        env.storage()
            .instance()
            .set(&MATURITY_PERIOD, &maturity_period);
        // The three counters start at zero; unwrap_or(0) on read handles
        // absent keys, so no explicit init is needed.

        ownable::set_owner(&env, &owner);

        events::publish_initialized(
            &env,
            owner,
            native_token,
            reward_token,
            reward_rate,
            maturity_period,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the native asset as a new stake.
    ///
    /// Each address may stake exactly once in its lifetime: the guard checks
    /// `amount > 0` on the stored record and nothing ever resets it, so an
    /// account that has withdrawn (or emergency-exited) can never re-enter.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        // The only re-entry guard is `amount > 0`; nothing ever resets it.
        if Self::load_record(&env, &staker).is_some_and(|r| r.amount > 0) {
            return Err(ContractError::AlreadyStaked);
        }

        let now = env.ledger().timestamp();
        let record = StakeRecord {
            amount,
            start_time: now,
            withdrawn: false,
            claimed: false,
        };
        Self::store_record(&env, &staker, &record);

        let new_total = Self::bump_counter(&env, &TOTAL_STAKED, amount);

        // Pull the stake into escrow. The ledger's own storage is fully
        // written before this external call, so a reentrant `stake` from the
        // token contract hits the AlreadyStaked guard. A failed transfer
        // traps and rolls the whole invocation back.
        let native_token: Address = env
            .storage()
            .instance()
            .get(&NATIVE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        token::Client::new(&env, &native_token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_staked(&env, staker, amount, new_total);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out the reward for a matured stake.
    ///
    /// The reward is `amount × reward_rate` at the *current* rate — nothing
    /// is snapshotted at stake time, so a rate change between stake and
    /// claim changes the payout. Likewise the maturity check uses the
    /// current period. Claiming is independent of withdrawing the principal.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut record = Self::load_record(&env, &staker)
            .filter(|r| r.amount > 0)
            .ok_or(ContractError::NoStake)?;
        if record.claimed {
            return Err(ContractError::AlreadyClaimed);
        }
        Self::require_matured(&env, &record)?;

        let reward_rate: i128 = env.storage().instance().get(&REWARD_RATE).unwrap_or(0);
        let reward = record.amount.saturating_mul(reward_rate);

        // Flip the guard flag before the external call so a reentrant claim
        // is rejected by the AlreadyClaimed check above.
        record.claimed = true;
        Self::store_record(&env, &staker, &record);
        Self::bump_counter(&env, &TOTAL_REWARDS_CLAIMED, reward);

        let reward_token: Address = env
            .storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let paid = token::Client::new(&env, &reward_token).try_transfer(
            &env.current_contract_address(),
            &staker,
            &reward,
        );
        if paid.is_err() {
            // The error return fails the invocation frame, reverting the
            // flag flip and the counter bump along with it.
            return Err(ContractError::RewardTransferFailed);
        }

        events::publish_claimed(&env, staker, reward);

        Ok(reward)
    }

    // ── Withdrawal ──────────────────────────────────────────────────────────

    /// Return the staked principal after maturity.
    pub fn withdraw(env: Env, staker: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut record = Self::load_record(&env, &staker)
            .filter(|r| r.amount > 0)
            .ok_or(ContractError::NoStake)?;
        if record.withdrawn {
            return Err(ContractError::AlreadyWithdrawn);
        }
        Self::require_matured(&env, &record)?;

        record.withdrawn = true;
        Self::store_record(&env, &staker, &record);
        Self::bump_counter(&env, &TOTAL_WITHDRAWALS, record.amount);

        let native_token: Address = env
            .storage()
            .instance()
            .get(&NATIVE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let paid = token::Client::new(&env, &native_token).try_transfer(
            &env.current_contract_address(),
            &staker,
            &record.amount,
        );
        if paid.is_err() {
            return Err(ContractError::NativeTransferFailed);
        }

        events::publish_withdrawn(&env, staker, record.amount);

        Ok(())
    }

    /// Return the principal before maturity, forfeiting the reward.
    ///
    /// No maturity check; sets both flags so a later `claim_rewards` fails
    /// with `AlreadyClaimed` and a later `withdraw` with `AlreadyWithdrawn`.
    pub fn emergency_withdraw(env: Env, staker: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut record = Self::load_record(&env, &staker)
            .filter(|r| r.amount > 0)
            .ok_or(ContractError::NoStake)?;
        if record.withdrawn {
            return Err(ContractError::AlreadyWithdrawn);
        }

        record.withdrawn = true;
        record.claimed = true;
        Self::store_record(&env, &staker, &record);
        Self::bump_counter(&env, &TOTAL_WITHDRAWALS, record.amount);

        let native_token: Address = env
            .storage()
            .instance()
            .get(&NATIVE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let paid = token::Client::new(&env, &native_token).try_transfer(
            &env.current_contract_address(),
            &staker,
            &record.amount,
        );
        if paid.is_err() {
            return Err(ContractError::EmergencyTransferFailed);
        }

        events::publish_emergency_withdraw(&env, staker, record.amount);

        Ok(())
    }

    // ── Owner functions ─────────────────────────────────────────────────────

    /// Update the reward multiplier. Applies to every stake, including ones
    /// already past maturity but not yet claimed.
    pub fn update_reward_rate(
        env: Env,
        caller: Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if new_rate <= 0 {
            return Err(ContractError::InvalidRate);
        }

        env.storage().instance().set(&REWARD_RATE, &new_rate);

        events::publish_reward_rate_updated(&env, new_rate);

        Ok(())
    }

    /// Update the maturity period. Takes effect immediately for all
    /// in-flight stakes — shortening it can unlock existing stakes at once.
    pub fn update_maturity_period(
        env: Env,
        caller: Address,
        new_period: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if new_period == 0 {
            return Err(ContractError::InvalidPeriod);
        }

        env.storage().instance().set(&MATURITY_PERIOD, &new_period);

        events::publish_maturity_period_updated(&env, new_period);

        Ok(())
    }

    /// Point reward payouts at a different token contract.
    pub fn update_reward_token(
        env: Env,
        caller: Address,
        new_token: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let native_token: Address = env
            .storage()
            .instance()
            .get(&NATIVE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        if new_token == native_token {
            return Err(ContractError::InvalidTokenAddress);
        }

        env.storage().instance().set(&REWARD_TOKEN, &new_token);

        events::publish_reward_token_updated(&env, new_token);

        Ok(())
    }

    /// Hand the owner capability to another address in one step.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if new_owner == caller {
            return Err(ContractError::InvalidNewOwner);
        }

        // require_owner above guarantees the previous owner exists.
        let previous = ownable::transfer(&env, &new_owner).ok_or(ContractError::NotInitialized)?;

        events::publish_ownership_transferred(&env, previous, new_owner);

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Cumulative amount ever staked. Never decremented on withdrawal.
    pub fn get_total_staked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    /// Cumulative principal paid back out (normal and emergency paths).
    pub fn get_total_withdrawals(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&TOTAL_WITHDRAWALS)
            .unwrap_or(0)
    }

    /// Cumulative rewards paid out.
    pub fn get_total_rewards_claimed(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&TOTAL_REWARDS_CLAIMED)
            .unwrap_or(0)
    }

    /// Return an account's stake record, or the all-zero record if the
    /// account never staked.
    pub fn get_stake_details(env: Env, account: Address) -> StakeRecord {
        Self::load_record(&env, &account).unwrap_or(StakeRecord {
            amount: 0,
            start_time: 0,
            withdrawn: false,
            claimed: false,
        })
    }

    pub fn get_reward_rate(env: Env) -> i128 {
        env.storage().instance().get(&REWARD_RATE).unwrap_or(0)
    }

    /// Current maturity period in seconds.
    pub fn get_maturity_period(env: Env) -> u64 {
        env.storage().instance().get(&MATURITY_PERIOD).unwrap_or(0)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_native_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&NATIVE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownable::owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` does not hold the owner capability.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !ownable::is_owner(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: revert while the stake is younger than the current maturity
    /// period. Evaluated against the period as configured now, not as it
    /// was when the stake was created.
    fn require_matured(env: &Env, record: &StakeRecord) -> Result<(), ContractError> {
        let period: u64 = env.storage().instance().get(&MATURITY_PERIOD).unwrap_or(0);
        let matures_at = record.start_time.saturating_add(period);
        if env.ledger().timestamp() < matures_at {
            return Err(ContractError::NotMatured);
        }
        Ok(())
    }

    fn record_key(account: &Address) -> (Symbol, Address) {
        (STAKE_REC, account.clone())
    }

    fn load_record(env: &Env, account: &Address) -> Option<StakeRecord> {
        let key = Self::record_key(account);
        let record: Option<StakeRecord> = env.storage().persistent().get(&key);
        if record.is_some() {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
        record
    }

    fn store_record(env: &Env, account: &Address, record: &StakeRecord) {
        let key = Self::record_key(account);
        env.storage().persistent().set(&key, record);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    /// Add `delta` to a cumulative instance counter, returning the new value.
    fn bump_counter(env: &Env, key: &Symbol, delta: i128) -> i128 {
        let previous: i128 = env.storage().instance().get(key).unwrap_or(0);
        let new_value = previous.saturating_add(delta);
        env.storage().instance().set(key, &new_value);
        new_value
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
