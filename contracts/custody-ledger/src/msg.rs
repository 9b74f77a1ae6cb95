use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// cw20 token the ledger takes custody of
    pub token: String,
    pub min_deposit: Option<Uint128>,
    pub max_deposit: Option<Uint128>,
    /// Seconds in one accrual period (defaults to 365 days)
    pub annual_period: Option<u64>,
    pub rate_numerator: Option<u64>,
    pub rate_denominator: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pull `amount` from the sender (needs a prior cw20 allowance)
    Deposit { amount: Uint128 },
    /// Debit the sender and pay `amount` out to `recipient`
    Withdraw { amount: Uint128, recipient: String },
    /// Pay the sender one period of interest from the pool
    AccrueInterest {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get ledger configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Get a user's deposited balance
    #[returns(BalanceResponse)]
    Balance { user: String },

    /// Get the sum of all balances
    #[returns(TotalDepositedResponse)]
    TotalDeposited {},

    /// Get a user's last accrual timestamp
    #[returns(LastAccrualTimeResponse)]
    LastAccrualTime { user: String },

    /// Get a user's full account
    #[returns(AccountResponse)]
    Account { user: String },

    /// Check whether interest can be accrued
    #[returns(AccrualStatusResponse)]
    AccrualStatus { user: String },

    /// List accounts in address order
    #[returns(AccountsResponse)]
    Accounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub token: Addr,
    pub min_deposit: Uint128,
    pub max_deposit: Uint128,
    pub annual_period: u64,
    pub rate_numerator: u64,
    pub rate_denominator: u64,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct TotalDepositedResponse {
    pub total_deposited: Uint128,
}

#[cw_serde]
pub struct LastAccrualTimeResponse {
    pub last_accrual_time: u64,
}

#[cw_serde]
pub struct AccountResponse {
    pub user: Addr,
    pub balance: Uint128,
    pub last_accrual_time: u64,
}

#[cw_serde]
pub struct AccrualStatusResponse {
    pub due: bool,
    /// Interest the next accrual would pay at the current balance
    pub pending_interest: Uint128,
    /// None when the user has no deposit
    pub next_accrual_time: Option<u64>,
    pub time_remaining: Option<u64>,
}

#[cw_serde]
pub struct AccountsResponse {
    pub accounts: Vec<AccountResponse>,
}
