use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Reply,
    Response, StdResult, SubMsgResult, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use shared::{apply_rate, period_elapsed};

use crate::custody::{reply_operation, Custody, INTEREST_PUSH_REPLY_ID, WITHDRAW_PUSH_REPLY_ID};
use crate::error::ContractError;
use crate::msg::{
    AccountResponse, AccountsResponse, AccrualStatusResponse, BalanceResponse, ConfigResponse,
    ExecuteMsg, InstantiateMsg, LastAccrualTimeResponse, QueryMsg, TotalDepositedResponse,
};
use crate::state::{
    load_account, save_account, Account, Config, ACCOUNTS, CONFIG, TOTAL_DEPOSITED,
};

const CONTRACT_NAME: &str = "crates.io:custody-ledger";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const ONE_TOKEN: u128 = 1_000_000_000_000_000_000; // 18 decimals

pub const MIN_DEPOSIT_AMOUNT: Uint128 = Uint128::new(ONE_TOKEN);
pub const MAX_DEPOSIT_AMOUNT: Uint128 = Uint128::new(10_000_000 * ONE_TOKEN);
pub const ANNUAL_PERIOD: u64 = 31_536_000; // 365 days
pub const INTEREST_RATE_NUMERATOR: u64 = 100;
pub const INTEREST_RATE_DENOMINATOR: u64 = 1000;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        token: deps.api.addr_validate(&msg.token)?,
        min_deposit: msg.min_deposit.unwrap_or(MIN_DEPOSIT_AMOUNT),
        max_deposit: msg.max_deposit.unwrap_or(MAX_DEPOSIT_AMOUNT),
        annual_period: msg.annual_period.unwrap_or(ANNUAL_PERIOD),
        rate_numerator: msg.rate_numerator.unwrap_or(INTEREST_RATE_NUMERATOR),
        rate_denominator: msg.rate_denominator.unwrap_or(INTEREST_RATE_DENOMINATOR),
    };
    validate_config(&config)?;

    CONFIG.save(deps.storage, &config)?;
    TOTAL_DEPOSITED.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("token", config.token)
        .add_attribute("min_deposit", config.min_deposit)
        .add_attribute("max_deposit", config.max_deposit)
        .add_attribute("annual_period", config.annual_period.to_string())
        .add_attribute(
            "rate",
            format!("{}/{}", config.rate_numerator, config.rate_denominator),
        ))
}

fn validate_config(config: &Config) -> Result<(), ContractError> {
    let reason = if config.min_deposit.is_zero() {
        "min_deposit must be greater than zero"
    } else if config.min_deposit > config.max_deposit {
        "min_deposit exceeds max_deposit"
    } else if config.annual_period == 0 {
        "annual_period must be greater than zero"
    } else if config.rate_denominator == 0 {
        "rate_denominator must be greater than zero"
    } else {
        return Ok(());
    };

    Err(ContractError::InvalidConfig {
        reason: reason.to_string(),
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Deposit { amount } => execute_deposit(deps, env, info, amount),
        ExecuteMsg::Withdraw { amount, recipient } => {
            execute_withdraw(deps, info, amount, recipient)
        }
        ExecuteMsg::AccrueInterest {} => execute_accrue_interest(deps, env, info),
    }
}

pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if amount < config.min_deposit || amount > config.max_deposit {
        return Err(ContractError::InvalidAmount {});
    }

    // Depositing restarts the accrual clock
    let mut account = load_account(deps.storage, &info.sender)?;
    account.balance = account.balance.checked_add(amount)?;
    account.last_accrual_time = env.block.time.seconds();
    save_account(deps.storage, &info.sender, &account)?;

    let total = TOTAL_DEPOSITED.update(deps.storage, |total| -> Result<_, ContractError> {
        Ok(total.checked_add(amount)?)
    })?;

    let pull = Custody::new(config.token).pull(&info.sender, &env.contract.address, amount)?;

    Ok(Response::new()
        .add_submessage(pull)
        .add_attribute("method", "deposit")
        .add_attribute("user", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", account.balance)
        .add_attribute("total_deposited", total)
        .add_attribute("last_accrual_time", account.last_accrual_time.to_string()))
}

pub fn execute_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
    recipient: String,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let mut account = load_account(deps.storage, &info.sender)?;
    if amount > account.balance {
        return Err(ContractError::InsufficientBalance {});
    }

    let recipient_addr = deps.api.addr_validate(&recipient)?;
    let config = CONFIG.load(deps.storage)?;

    account.balance = account.balance.checked_sub(amount)?;
    save_account(deps.storage, &info.sender, &account)?;

    let total = TOTAL_DEPOSITED.update(deps.storage, |total| -> Result<_, ContractError> {
        Ok(total.checked_sub(amount)?)
    })?;

    let push = Custody::new(config.token).push(&recipient_addr, amount, WITHDRAW_PUSH_REPLY_ID)?;

    Ok(Response::new()
        .add_submessage(push)
        .add_attribute("method", "withdraw")
        .add_attribute("user", info.sender)
        .add_attribute("recipient", recipient_addr)
        .add_attribute("amount", amount)
        .add_attribute("balance", account.balance)
        .add_attribute("total_deposited", total))
}

pub fn execute_accrue_interest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut account = load_account(deps.storage, &info.sender)?;
    let now = env.block.time.seconds();

    if account.balance.is_zero()
        || !period_elapsed(now, account.last_accrual_time, config.annual_period)
    {
        return Err(ContractError::AccrualNotDue {});
    }

    let interest = apply_rate(
        account.balance,
        config.rate_numerator,
        config.rate_denominator,
    )?;

    // Exactly one period is consumed per accrual
    account.last_accrual_time += config.annual_period;
    save_account(deps.storage, &info.sender, &account)?;

    let mut response = Response::new();
    if !interest.is_zero() {
        let custody = Custody::new(config.token);
        response = response.add_submessage(custody.push(
            &info.sender,
            interest,
            INTEREST_PUSH_REPLY_ID,
        )?);
    }

    Ok(response
        .add_attribute("method", "accrue_interest")
        .add_attribute("user", info.sender)
        .add_attribute("interest", interest)
        .add_attribute("balance", account.balance)
        .add_attribute("last_accrual_time", account.last_accrual_time.to_string()))
}

/// Custody transfers only reply on error. Failing here reverts the whole transaction.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let operation = reply_operation(msg.id).ok_or(ContractError::UnknownReplyId { id: msg.id })?;

    match msg.result {
        SubMsgResult::Err(reason) => Err(ContractError::TransferFailed {
            reason: format!("{operation}: {reason}"),
        }),
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("method", "reply")
            .add_attribute("operation", operation)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Balance { user } => to_json_binary(&query_balance(deps, user)?),
        QueryMsg::TotalDeposited {} => to_json_binary(&query_total_deposited(deps)?),
        QueryMsg::LastAccrualTime { user } => {
            to_json_binary(&query_last_accrual_time(deps, user)?)
        }
        QueryMsg::Account { user } => to_json_binary(&query_account(deps, user)?),
        QueryMsg::AccrualStatus { user } => {
            to_json_binary(&query_accrual_status(deps, env, user)?)
        }
        QueryMsg::Accounts { start_after, limit } => {
            to_json_binary(&query_accounts(deps, start_after, limit)?)
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        token: config.token,
        min_deposit: config.min_deposit,
        max_deposit: config.max_deposit,
        annual_period: config.annual_period,
        rate_numerator: config.rate_numerator,
        rate_denominator: config.rate_denominator,
    })
}

fn query_balance(deps: Deps, user: String) -> StdResult<BalanceResponse> {
    let user_addr = deps.api.addr_validate(&user)?;
    let account = load_account(deps.storage, &user_addr)?;
    Ok(BalanceResponse {
        balance: account.balance,
    })
}

fn query_total_deposited(deps: Deps) -> StdResult<TotalDepositedResponse> {
    let total_deposited = TOTAL_DEPOSITED.load(deps.storage)?;
    Ok(TotalDepositedResponse { total_deposited })
}

fn query_last_accrual_time(deps: Deps, user: String) -> StdResult<LastAccrualTimeResponse> {
    let user_addr = deps.api.addr_validate(&user)?;
    let account = load_account(deps.storage, &user_addr)?;
    Ok(LastAccrualTimeResponse {
        last_accrual_time: account.last_accrual_time,
    })
}

fn query_account(deps: Deps, user: String) -> StdResult<AccountResponse> {
    let user_addr = deps.api.addr_validate(&user)?;
    let account = load_account(deps.storage, &user_addr)?;
    Ok(account_to_response(user_addr, account))
}

fn query_accrual_status(deps: Deps, env: Env, user: String) -> StdResult<AccrualStatusResponse> {
    let user_addr = deps.api.addr_validate(&user)?;
    let config = CONFIG.load(deps.storage)?;
    let account = load_account(deps.storage, &user_addr)?;

    if account.balance.is_zero() {
        return Ok(AccrualStatusResponse {
            due: false,
            pending_interest: Uint128::zero(),
            next_accrual_time: None,
            time_remaining: None,
        });
    }

    let now = env.block.time.seconds();
    let pending_interest = apply_rate(
        account.balance,
        config.rate_numerator,
        config.rate_denominator,
    )?;

    Ok(AccrualStatusResponse {
        due: period_elapsed(now, account.last_accrual_time, config.annual_period),
        pending_interest,
        next_accrual_time: Some(
            account
                .last_accrual_time
                .saturating_add(config.annual_period),
        ),
        time_remaining: shared::time_remaining(
            now,
            account.last_accrual_time,
            config.annual_period,
        ),
    })
}

fn query_accounts(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AccountsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(|addr| Bound::exclusive(addr));

    let accounts = ACCOUNTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(user, account)| account_to_response(user, account)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AccountsResponse { accounts })
}

fn account_to_response(user: Addr, account: Account) -> AccountResponse {
    AccountResponse {
        user,
        balance: account.balance,
        last_accrual_time: account.last_accrual_time,
    }
}
