use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// cw20 token held in custody
    pub token: Addr,
    /// Smallest accepted deposit (inclusive)
    pub min_deposit: Uint128,
    /// Largest accepted deposit (inclusive)
    pub max_deposit: Uint128,
    /// Seconds between interest accruals
    pub annual_period: u64,
    /// Interest paid per period, as numerator / denominator
    pub rate_numerator: u64,
    pub rate_denominator: u64,
}

#[cw_serde]
#[derive(Default)]
pub struct Account {
    /// Amount custodied for the user
    pub balance: Uint128,
    /// Last deposit or accrual (seconds), 0 before any deposit
    pub last_accrual_time: u64,
}

/// Ledger configuration
pub const CONFIG: Item<Config> = Item::new("config");

/// Accounts by depositor. Absent entry == zero account.
pub const ACCOUNTS: Map<&Addr, Account> = Map::new("accounts");

/// Sum of every account balance
pub const TOTAL_DEPOSITED: Item<Uint128> = Item::new("total_deposited");

pub fn load_account(storage: &dyn Storage, user: &Addr) -> StdResult<Account> {
    Ok(ACCOUNTS.may_load(storage, user)?.unwrap_or_default())
}

/// Store an account, dropping it once the balance is gone.
pub fn save_account(storage: &mut dyn Storage, user: &Addr, account: &Account) -> StdResult<()> {
    if account.balance.is_zero() {
        ACCOUNTS.remove(storage, user);
        Ok(())
    } else {
        ACCOUNTS.save(storage, user, account)
    }
}
