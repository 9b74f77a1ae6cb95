//! Transfer requests to the cw20 token that backs the ledger.
//!
//! Every request is a `reply_on_error` sub-message, so a rejected transfer
//! comes back through `reply` and fails the whole transaction.

use cosmwasm_std::{to_json_binary, Addr, StdResult, SubMsg, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

pub const DEPOSIT_PULL_REPLY_ID: u64 = 1;
pub const WITHDRAW_PUSH_REPLY_ID: u64 = 2;
pub const INTEREST_PUSH_REPLY_ID: u64 = 3;

pub struct Custody {
    token: Addr,
}

impl Custody {
    pub fn new(token: Addr) -> Self {
        Custody { token }
    }

    /// Move `amount` from `from` into the pool. Spends the allowance `from` granted the pool.
    pub fn pull(&self, from: &Addr, pool: &Addr, amount: Uint128) -> StdResult<SubMsg> {
        self.transfer(
            Cw20ExecuteMsg::TransferFrom {
                owner: from.to_string(),
                recipient: pool.to_string(),
                amount,
            },
            DEPOSIT_PULL_REPLY_ID,
        )
    }

    /// Pay `amount` out of the pool to `to`
    pub fn push(&self, to: &Addr, amount: Uint128, reply_id: u64) -> StdResult<SubMsg> {
        self.transfer(
            Cw20ExecuteMsg::Transfer {
                recipient: to.to_string(),
                amount,
            },
            reply_id,
        )
    }

    fn transfer(&self, msg: Cw20ExecuteMsg, reply_id: u64) -> StdResult<SubMsg> {
        let msg = WasmMsg::Execute {
            contract_addr: self.token.to_string(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        };
        Ok(SubMsg::reply_on_error(msg, reply_id))
    }
}

/// Name of the operation a reply id belongs to
pub fn reply_operation(id: u64) -> Option<&'static str> {
    match id {
        DEPOSIT_PULL_REPLY_ID => Some("deposit"),
        WITHDRAW_PUSH_REPLY_ID => Some("withdraw"),
        INTEREST_PUSH_REPLY_ID => Some("accrue_interest"),
        _ => None,
    }
}
