use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use banksim_core::{AccountId, Aggregate, AggregateRoot, DomainError, Money, Rate};
use banksim_events::Event;

/// Secret attached to an account.
///
/// Stored and compared as plain text: this is a local single-user simulation,
/// not an authentication system. `Debug` never prints the secret.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Aggregate root: Account.
///
/// Balance and history are only ever changed by `apply`; every applied event
/// except `AccountOpened` appends exactly one history line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    credential: Credential,
    balance: Money,
    history: Vec<String>,
    version: u64,
    opened: bool,
}

impl Account {
    /// Create an empty, not-yet-opened account.
    pub fn empty(id: AccountId) -> Self {
        Self {
            id,
            credential: Credential::default(),
            balance: Money::ZERO,
            history: Vec::new(),
            version: 0,
            opened: false,
        }
    }

    pub fn id_typed(&self) -> &AccountId {
        &self.id
    }

    pub fn owner(&self) -> &str {
        self.id.as_str()
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    pub fn verify_credential(&self, candidate: &str) -> bool {
        self.is_open() && self.credential.matches(candidate)
    }
}

impl AggregateRoot for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenAccount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAccount {
    pub account_id: AccountId,
    pub credential: Credential,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub account_id: AccountId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Withdraw.
///
/// An uncovered withdrawal is not an error at this level: it is decided into a
/// `WithdrawalRejected` event so the attempt lands in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub account_id: AccountId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SendTransfer (debit leg of a transfer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransfer {
    pub account_id: AccountId,
    pub to: AccountId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReceiveTransfer (credit leg of a transfer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveTransfer {
    pub account_id: AccountId,
    pub from: AccountId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AccrueInterest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrueInterest {
    pub account_id: AccountId,
    pub rate: Rate,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCommand {
    OpenAccount(OpenAccount),
    Deposit(Deposit),
    Withdraw(Withdraw),
    SendTransfer(SendTransfer),
    ReceiveTransfer(ReceiveTransfer),
    AccrueInterest(AccrueInterest),
}

impl AccountCommand {
    pub fn account_id(&self) -> &AccountId {
        match self {
            AccountCommand::OpenAccount(c) => &c.account_id,
            AccountCommand::Deposit(c) => &c.account_id,
            AccountCommand::Withdraw(c) => &c.account_id,
            AccountCommand::SendTransfer(c) => &c.account_id,
            AccountCommand::ReceiveTransfer(c) => &c.account_id,
            AccountCommand::AccrueInterest(c) => &c.account_id,
        }
    }
}

/// Event: AccountOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOpened {
    pub account_id: AccountId,
    pub credential: Credential,
    pub occurred_at: DateTime<Utc>,
}

/// Event: Deposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub account_id: AccountId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: Withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawn {
    pub account_id: AccountId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: WithdrawalRejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRejected {
    pub account_id: AccountId,
    pub amount: Money,
    pub available: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TransferSent (narrative entry on the sender).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSent {
    pub account_id: AccountId,
    pub to: AccountId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TransferReceived (narrative entry on the receiver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceived {
    pub account_id: AccountId,
    pub from: AccountId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InterestAccrued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestAccrued {
    pub account_id: AccountId,
    pub rate: Rate,
    /// Amount credited (negative for a negative rate).
    pub interest: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    AccountOpened(AccountOpened),
    Deposited(Deposited),
    Withdrawn(Withdrawn),
    WithdrawalRejected(WithdrawalRejected),
    TransferSent(TransferSent),
    TransferReceived(TransferReceived),
    InterestAccrued(InterestAccrued),
}

impl AccountEvent {
    /// The line this event contributes to the account history, if any.
    pub fn history_line(&self) -> Option<String> {
        match self {
            AccountEvent::AccountOpened(_) => None,
            AccountEvent::Deposited(e) => Some(format!("Deposit: {}", e.amount)),
            AccountEvent::Withdrawn(e) => Some(format!("Withdrawal: {}", e.amount)),
            AccountEvent::WithdrawalRejected(e) => {
                Some(format!("Failed withdrawal attempt: {}", e.amount))
            }
            AccountEvent::TransferSent(e) => {
                Some(format!("Transferred: {} to {}", e.amount, e.to))
            }
            AccountEvent::TransferReceived(e) => {
                Some(format!("Received: {} from {}", e.amount, e.from))
            }
            AccountEvent::InterestAccrued(e) => {
                Some(format!("Interest added at rate {}%", e.rate))
            }
        }
    }
}

impl Event for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountOpened(_) => "banking.account.opened",
            AccountEvent::Deposited(_) => "banking.account.deposited",
            AccountEvent::Withdrawn(_) => "banking.account.withdrawn",
            AccountEvent::WithdrawalRejected(_) => "banking.account.withdrawal_rejected",
            AccountEvent::TransferSent(_) => "banking.account.transfer_sent",
            AccountEvent::TransferReceived(_) => "banking.account.transfer_received",
            AccountEvent::InterestAccrued(_) => "banking.account.interest_accrued",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AccountEvent::AccountOpened(e) => e.occurred_at,
            AccountEvent::Deposited(e) => e.occurred_at,
            AccountEvent::Withdrawn(e) => e.occurred_at,
            AccountEvent::WithdrawalRejected(e) => e.occurred_at,
            AccountEvent::TransferSent(e) => e.occurred_at,
            AccountEvent::TransferReceived(e) => e.occurred_at,
            AccountEvent::InterestAccrued(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Account {
    type Command = AccountCommand;
    type Event = AccountEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            AccountEvent::AccountOpened(e) => {
                self.id = e.account_id.clone();
                self.credential = e.credential.clone();
                self.balance = Money::ZERO;
                self.history.clear();
                self.opened = true;
            }
            AccountEvent::Deposited(e) => {
                self.balance = self.balance.saturating_add(e.amount);
            }
            AccountEvent::Withdrawn(e) => {
                self.balance = self.balance.saturating_sub(e.amount);
            }
            AccountEvent::WithdrawalRejected(_) => {}
            AccountEvent::TransferSent(_) => {}
            AccountEvent::TransferReceived(_) => {}
            AccountEvent::InterestAccrued(e) => {
                self.balance = self.balance.saturating_add(e.interest);
            }
        }

        if let Some(line) = event.history_line() {
            self.history.push(line);
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AccountCommand::OpenAccount(cmd) => self.handle_open(cmd),
            AccountCommand::Deposit(cmd) => self.handle_deposit(cmd),
            AccountCommand::Withdraw(cmd) => self.handle_withdraw(cmd),
            AccountCommand::SendTransfer(cmd) => self.handle_send(cmd),
            AccountCommand::ReceiveTransfer(cmd) => self.handle_receive(cmd),
            AccountCommand::AccrueInterest(cmd) => self.handle_interest(cmd),
        }
    }
}

impl Account {
    fn ensure_open(&self, account_id: &AccountId) -> Result<(), DomainError> {
        if !self.is_open() {
            return Err(DomainError::unknown_account(self.id.as_str()));
        }
        if &self.id != account_id {
            return Err(DomainError::invariant("account_id mismatch"));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenAccount) -> Result<Vec<AccountEvent>, DomainError> {
        if self.is_open() {
            return Err(DomainError::duplicate_account(self.id.as_str()));
        }
        Ok(vec![AccountEvent::AccountOpened(AccountOpened {
            account_id: cmd.account_id.clone(),
            credential: cmd.credential.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deposit(&self, cmd: &Deposit) -> Result<Vec<AccountEvent>, DomainError> {
        self.ensure_open(&cmd.account_id)?;
        self.balance.checked_add(cmd.amount)?;
        Ok(vec![AccountEvent::Deposited(Deposited {
            account_id: cmd.account_id.clone(),
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_withdraw(&self, cmd: &Withdraw) -> Result<Vec<AccountEvent>, DomainError> {
        self.ensure_open(&cmd.account_id)?;

        if cmd.amount > self.balance {
            return Ok(vec![AccountEvent::WithdrawalRejected(WithdrawalRejected {
                account_id: cmd.account_id.clone(),
                amount: cmd.amount,
                available: self.balance,
                occurred_at: cmd.occurred_at,
            })]);
        }
        self.balance.checked_sub(cmd.amount)?;

        Ok(vec![AccountEvent::Withdrawn(Withdrawn {
            account_id: cmd.account_id.clone(),
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_send(&self, cmd: &SendTransfer) -> Result<Vec<AccountEvent>, DomainError> {
        self.ensure_open(&cmd.account_id)?;

        if cmd.amount > self.balance {
            return Err(DomainError::insufficient_funds(
                self.id.as_str(),
                cmd.amount,
                self.balance,
            ));
        }
        // A negative amount passes the sufficiency check and credits the sender.
        self.balance.checked_sub(cmd.amount)?;

        Ok(vec![
            AccountEvent::Withdrawn(Withdrawn {
                account_id: cmd.account_id.clone(),
                amount: cmd.amount,
                occurred_at: cmd.occurred_at,
            }),
            AccountEvent::TransferSent(TransferSent {
                account_id: cmd.account_id.clone(),
                to: cmd.to.clone(),
                amount: cmd.amount,
                occurred_at: cmd.occurred_at,
            }),
        ])
    }

    fn handle_receive(&self, cmd: &ReceiveTransfer) -> Result<Vec<AccountEvent>, DomainError> {
        self.ensure_open(&cmd.account_id)?;
        self.balance.checked_add(cmd.amount)?;

        Ok(vec![
            AccountEvent::Deposited(Deposited {
                account_id: cmd.account_id.clone(),
                amount: cmd.amount,
                occurred_at: cmd.occurred_at,
            }),
            AccountEvent::TransferReceived(TransferReceived {
                account_id: cmd.account_id.clone(),
                from: cmd.from.clone(),
                amount: cmd.amount,
                occurred_at: cmd.occurred_at,
            }),
        ])
    }

    fn handle_interest(&self, cmd: &AccrueInterest) -> Result<Vec<AccountEvent>, DomainError> {
        self.ensure_open(&cmd.account_id)?;
        let interest = self.balance.interest(cmd.rate)?;
        self.balance.checked_add(interest)?;

        Ok(vec![AccountEvent::InterestAccrued(InterestAccrued {
            account_id: cmd.account_id.clone(),
            rate: cmd.rate,
            interest,
            occurred_at: cmd.occurred_at,
        })])
    }
}
