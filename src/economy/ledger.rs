/// In-process economy collaborator.
///
/// Default implementation of the credit-adjustment interface the arena
/// dispatches to after a resolved match. Accounts are provisioned by the
/// surrounding application; the arena itself only ever sends deltas and never
/// observes the outcome — success and failure are logged here and go no
/// further.
use actix::prelude::*;
use log::{info, warn};
use std::collections::HashMap;
use thiserror::Error;

/// Adjust an account balance by a signed delta.
#[derive(Message, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
pub struct AdjustCredits {
    pub username: String,
    pub delta: i64,
}

/// Provision an account with an opening balance.
#[derive(Message)]
#[rtype(result = "()")]
pub struct OpenAccount {
    pub username: String,
    pub balance: u64,
}

/// Look up the current balance of an account.
#[derive(Message)]
#[rtype(result = "Option<u64>")]
pub struct GetBalance {
    pub username: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("no economy account matches display name '{0}'")]
    UnknownAccount(String),
}

/// Credit ledger actor. Balances are unsigned and clamp at zero on debit.
#[derive(Default)]
pub struct CreditLedger {
    accounts: HashMap<String, u64>,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display names resolve to accounts case-insensitively.
    fn resolve(username: &str) -> String {
        username.to_lowercase()
    }

    fn open(&mut self, username: &str, balance: u64) {
        self.accounts.insert(Self::resolve(username), balance);
    }

    fn balance(&self, username: &str) -> Option<u64> {
        self.accounts.get(&Self::resolve(username)).copied()
    }

    fn adjust(&mut self, username: &str, delta: i64) -> Result<u64, LedgerError> {
        let balance = self
            .accounts
            .get_mut(&Self::resolve(username))
            .ok_or_else(|| LedgerError::UnknownAccount(username.to_string()))?;
        // Debits saturate at zero; a balance is never negative.
        *balance = if delta >= 0 {
            balance.saturating_add(delta as u64)
        } else {
            balance.saturating_sub(delta.unsigned_abs())
        };
        Ok(*balance)
    }
}

impl Actor for CreditLedger {
    type Context = Context<Self>;
}

impl Handler<AdjustCredits> for CreditLedger {
    type Result = ();

    /// Applies an adjustment. Failures are logged and never surface back to the
    /// match protocol.
    fn handle(&mut self, msg: AdjustCredits, _ctx: &mut Self::Context) -> Self::Result {
        match self.adjust(&msg.username, msg.delta) {
            Ok(balance) => info!(
                "[Credits] {} adjusted by {} (balance {})",
                msg.username, msg.delta, balance
            ),
            Err(e) => warn!(
                "[Credits] Adjustment of {} for {} failed: {}",
                msg.delta, msg.username, e
            ),
        }
    }
}

impl Handler<OpenAccount> for CreditLedger {
    type Result = ();

    fn handle(&mut self, msg: OpenAccount, _ctx: &mut Self::Context) -> Self::Result {
        self.open(&msg.username, msg.balance);
    }
}

impl Handler<GetBalance> for CreditLedger {
    type Result = MessageResult<GetBalance>;

    fn handle(&mut self, msg: GetBalance, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.balance(&msg.username))
    }
}
