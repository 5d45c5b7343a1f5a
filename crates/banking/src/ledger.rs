use std::collections::HashMap;

use chrono::Utc;

use banksim_core::{AccountId, Aggregate, AggregateRoot, DomainError, DomainResult, Money, Rate};
use banksim_events::Event;

use crate::account::{
    Account, AccountCommand, AccountEvent, AccrueInterest, Credential, Deposit, OpenAccount,
    ReceiveTransfer, SendTransfer, Withdraw,
};
use crate::config::{DuplicatePolicy, LedgerConfig};
use crate::operation::{Operation, Outcome, Script};

/// In-memory collection of all accounts, keyed by owner.
///
/// The ledger is the only owner of `Account` values; callers address accounts
/// by owner name and get copies of balances or borrowed history back. All
/// mutation goes through `&mut self`, so a single thread of control drives it.
#[derive(Debug, Clone, Default)]
pub struct AccountLedger {
    config: LedgerConfig,
    accounts: HashMap<AccountId, Account>,
    /// Owners in creation order.
    order: Vec<AccountId>,
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Open a new account with a zero balance and empty history.
    ///
    /// Blank owners are rejected with `InvalidId`. An existing owner is either
    /// refused or replaced depending on `LedgerConfig::duplicate_accounts`; a
    /// replaced account keeps its place in `owners()`.
    pub fn create_account(&mut self, owner: &str, credential: &str) -> DomainResult<AccountId> {
        let account_id = AccountId::new(owner)?;
        let replacing = self.accounts.contains_key(owner);

        if replacing && self.config.duplicate_accounts == DuplicatePolicy::Reject {
            tracing::warn!(owner, "refusing to create duplicate account");
            return Err(DomainError::duplicate_account(owner));
        }

        let credential = Credential::new(credential);
        let empty_credential = credential.is_empty();

        let mut account = Account::empty(account_id.clone());
        let events = account.handle(&AccountCommand::OpenAccount(OpenAccount {
            account_id: account_id.clone(),
            credential,
            occurred_at: Utc::now(),
        }))?;
        apply_events(&mut account, &events);

        if replacing {
            tracing::warn!(owner, "replacing existing account; prior balance and history dropped");
        } else {
            self.order.push(account_id.clone());
        }
        self.accounts.insert(account_id.clone(), account);

        tracing::info!(owner, empty_credential, "account created");
        Ok(account_id)
    }

    /// Plain equality check against the stored credential. Unknown owners
    /// yield `false`.
    pub fn verify_credential(&self, owner: &str, candidate: &str) -> bool {
        self.accounts
            .get(owner)
            .is_some_and(|account| account.verify_credential(candidate))
    }

    /// Credit `amount` and return the new balance.
    pub fn deposit(&mut self, owner: &str, amount: Money) -> DomainResult<Money> {
        let account_id = self.require(owner)?.id_typed().clone();
        self.check_amount(amount)?;

        self.dispatch(AccountCommand::Deposit(Deposit {
            account_id,
            amount,
            occurred_at: Utc::now(),
        }))?;
        self.balance_of(owner)
    }

    /// Debit `amount` if the balance covers it and return the new balance.
    ///
    /// An uncovered withdrawal leaves the balance alone, records a failed
    /// attempt in the history and returns `InsufficientFunds`.
    pub fn withdraw(&mut self, owner: &str, amount: Money) -> DomainResult<Money> {
        let account_id = self.require(owner)?.id_typed().clone();
        self.check_amount(amount)?;

        let events = self.dispatch(AccountCommand::Withdraw(Withdraw {
            account_id,
            amount,
            occurred_at: Utc::now(),
        }))?;

        if let [AccountEvent::WithdrawalRejected(rejected)] = events.as_slice() {
            tracing::warn!(
                owner,
                requested = %rejected.amount,
                available = %rejected.available,
                "withdrawal rejected"
            );
            return Err(DomainError::insufficient_funds(
                owner,
                rejected.amount,
                rejected.available,
            ));
        }

        self.balance_of(owner)
    }

    /// Move `amount` from one account to another.
    ///
    /// Returns `Ok(false)` without touching either account when the sender's
    /// balance does not cover the amount. Both legs are decided before either
    /// is applied, so the transfer lands entirely or not at all.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Money) -> DomainResult<bool> {
        let from_id = self.require(from)?.id_typed().clone();
        let to_id = self.require(to)?.id_typed().clone();
        self.check_amount(amount)?;

        let occurred_at = Utc::now();

        let send = AccountCommand::SendTransfer(SendTransfer {
            account_id: from_id.clone(),
            to: to_id.clone(),
            amount,
            occurred_at,
        });
        let decision = self.require(from)?.handle(&send);
        let sent = match decision {
            Ok(events) => events,
            Err(DomainError::InsufficientFunds {
                requested,
                available,
                ..
            }) => {
                tracing::warn!(from, to, %requested, %available, "transfer rejected");
                if self.config.log_failed_transfers {
                    self.dispatch(AccountCommand::Withdraw(Withdraw {
                        account_id: from_id,
                        amount,
                        occurred_at,
                    }))?;
                }
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        // Decided against the receiver's pre-transfer state, which for a
        // self-transfer is the sender before the debit.
        let receive = AccountCommand::ReceiveTransfer(ReceiveTransfer {
            account_id: to_id,
            from: from_id,
            amount,
            occurred_at,
        });
        let received = self.require(to)?.handle(&receive)?;

        apply_events(self.require_mut(from)?, &sent);
        apply_events(self.require_mut(to)?, &received);

        tracing::info!(from, to, %amount, "transfer completed");
        Ok(true)
    }

    /// Add `balance * rate / 100` to the balance.
    pub fn accrue_interest(&mut self, owner: &str, rate: Rate) -> DomainResult<()> {
        let account_id = self.require(owner)?.id_typed().clone();

        self.dispatch(AccountCommand::AccrueInterest(AccrueInterest {
            account_id,
            rate,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    pub fn balance_of(&self, owner: &str) -> DomainResult<Money> {
        Ok(self.require(owner)?.balance())
    }

    pub fn history_of(&self, owner: &str) -> DomainResult<&[String]> {
        Ok(self.require(owner)?.history())
    }

    /// History as one newline-separated block, oldest entry first.
    pub fn history_text(&self, owner: &str) -> DomainResult<String> {
        Ok(self.history_of(owner)?.join("\n"))
    }

    /// Owners in the order their accounts were created.
    pub fn owners(&self) -> impl Iterator<Item = &AccountId> + '_ {
        self.order.iter()
    }

    pub fn account(&self, owner: &str) -> Option<&Account> {
        self.accounts.get(owner)
    }

    pub fn contains(&self, owner: &str) -> bool {
        self.accounts.contains_key(owner)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Run one scripted operation.
    ///
    /// Insufficient funds comes back as an `Outcome`; every other failure is
    /// returned as an error.
    pub fn execute(&mut self, op: &Operation) -> DomainResult<Outcome> {
        match op {
            Operation::CreateAccount { owner, credential } => {
                let account_id = self.create_account(owner, credential)?;
                Ok(Outcome::Created { account_id })
            }
            Operation::Deposit { owner, amount } => {
                let balance = self.deposit(owner, *amount)?;
                Ok(Outcome::Balance { balance })
            }
            Operation::Withdraw { owner, amount } => match self.withdraw(owner, *amount) {
                Ok(balance) => Ok(Outcome::Balance { balance }),
                Err(DomainError::InsufficientFunds {
                    requested,
                    available,
                    ..
                }) => Ok(Outcome::InsufficientFunds {
                    requested,
                    available,
                }),
                Err(e) => Err(e),
            },
            Operation::Transfer { from, to, amount } => {
                let completed = self.transfer(from, to, *amount)?;
                Ok(Outcome::Transferred { completed })
            }
            Operation::AccrueInterest { owner, rate } => {
                self.accrue_interest(owner, *rate)?;
                let balance = self.balance_of(owner)?;
                Ok(Outcome::InterestAccrued { balance })
            }
        }
    }

    /// Run a whole script, stopping at the first error.
    pub fn replay<'a, I>(&mut self, ops: I) -> DomainResult<Vec<Outcome>>
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        ops.into_iter().map(|op| self.execute(op)).collect()
    }

    /// Replay a recorded script on a fresh ledger configured the way the
    /// recording one was.
    pub fn from_script(script: &Script) -> DomainResult<(Self, Vec<Outcome>)> {
        let mut ledger = Self::with_config(script.config);
        let outcomes = ledger.replay(&script.ops)?;
        Ok((ledger, outcomes))
    }
}

impl AccountLedger {
    fn require(&self, owner: &str) -> DomainResult<&Account> {
        self.accounts
            .get(owner)
            .ok_or_else(|| DomainError::unknown_account(owner))
    }

    fn require_mut(&mut self, owner: &str) -> DomainResult<&mut Account> {
        self.accounts
            .get_mut(owner)
            .ok_or_else(|| DomainError::unknown_account(owner))
    }

    fn check_amount(&self, amount: Money) -> DomainResult<()> {
        if self.config.strict_amounts && !amount.is_positive() {
            return Err(DomainError::invalid_amount(format!(
                "amount must be positive, got {amount}"
            )));
        }
        Ok(())
    }

    fn dispatch(&mut self, command: AccountCommand) -> DomainResult<Vec<AccountEvent>> {
        let account = self.require_mut(command.account_id().as_str())?;
        let events = account.handle(&command)?;
        apply_events(account, &events);
        Ok(events)
    }
}

fn apply_events(account: &mut Account, events: &[AccountEvent]) {
    for event in events {
        account.apply(event);
        tracing::debug!(
            owner = account.owner(),
            event_type = event.event_type(),
            version = account.version(),
            "applied account event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn alice_and_bob() -> AccountLedger {
        let mut ledger = AccountLedger::new();
        ledger.create_account("Alice", "pw1").unwrap();
        ledger.create_account("Bob", "pw2").unwrap();
        ledger
    }

    #[test]
    fn new_account_has_zero_balance_and_no_history() {
        let ledger = alice_and_bob();
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::ZERO);
        assert!(ledger.history_of("Alice").unwrap().is_empty());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn blank_owner_is_rejected() {
        let mut ledger = AccountLedger::new();
        let err = ledger.create_account("  ", "pw").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn empty_credential_is_permitted() {
        let mut ledger = AccountLedger::new();
        ledger.create_account("Carol", "").unwrap();
        assert!(ledger.verify_credential("Carol", ""));
        assert!(!ledger.verify_credential("Carol", "x"));
    }

    #[test]
    fn duplicate_owner_is_refused_by_default() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(10)).unwrap();

        let err = ledger.create_account("Alice", "other").unwrap_err();
        assert_eq!(err, DomainError::DuplicateAccount("Alice".into()));
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::from(10));
        assert!(ledger.verify_credential("Alice", "pw1"));
    }

    #[test]
    fn duplicate_owner_replaces_when_configured() {
        let mut ledger = AccountLedger::with_config(LedgerConfig {
            duplicate_accounts: DuplicatePolicy::Replace,
            ..LedgerConfig::default()
        });
        ledger.create_account("Alice", "pw1").unwrap();
        ledger.create_account("Bob", "pw2").unwrap();
        ledger.deposit("Alice", Money::from(10)).unwrap();

        ledger.create_account("Alice", "new").unwrap();

        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::ZERO);
        assert!(ledger.history_of("Alice").unwrap().is_empty());
        assert!(ledger.verify_credential("Alice", "new"));
        let owners: Vec<&str> = ledger.owners().map(AccountId::as_str).collect();
        assert_eq!(owners, ["Alice", "Bob"]);
    }

    #[test]
    fn unknown_owner_is_reported_by_every_operation() {
        let mut ledger = alice_and_bob();
        let unknown = DomainError::UnknownAccount("Ghost".into());

        assert_eq!(ledger.deposit("Ghost", Money::from(1)).unwrap_err(), unknown);
        assert_eq!(ledger.withdraw("Ghost", Money::from(1)).unwrap_err(), unknown);
        assert_eq!(
            ledger.transfer("Ghost", "Bob", Money::from(1)).unwrap_err(),
            unknown
        );
        assert_eq!(
            ledger.transfer("Alice", "Ghost", Money::from(1)).unwrap_err(),
            unknown
        );
        assert_eq!(ledger.accrue_interest("Ghost", Rate::from(1)).unwrap_err(), unknown);
        assert_eq!(ledger.balance_of("Ghost").unwrap_err(), unknown);
        assert_eq!(ledger.history_of("Ghost").unwrap_err(), unknown);
        assert!(!ledger.verify_credential("Ghost", "x"));
    }

    #[test]
    fn transfer_to_unknown_account_leaves_sender_untouched() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(100)).unwrap();

        assert!(ledger.transfer("Alice", "Ghost", Money::from(50)).is_err());
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::from(100));
        assert_eq!(ledger.history_of("Alice").unwrap().len(), 1);
    }

    #[test]
    fn negative_deposit_decreases_balance() {
        let mut ledger = alice_and_bob();
        let balance = ledger.deposit("Alice", Money::from(-5)).unwrap();
        assert_eq!(balance, Money::from(-5));
        assert_eq!(ledger.history_of("Alice").unwrap(), ["Deposit: -5"]);
    }

    #[test]
    fn withdrawing_the_exact_balance_succeeds() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(30)).unwrap();
        assert_eq!(ledger.withdraw("Alice", Money::from(30)).unwrap(), Money::ZERO);
    }

    #[test]
    fn failed_withdrawal_is_logged_once() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Bob", Money::from(50)).unwrap();

        let err = ledger.withdraw("Bob", Money::from(1000)).unwrap_err();
        assert_eq!(
            err,
            DomainError::insufficient_funds("Bob", Money::from(1000), Money::from(50))
        );
        assert_eq!(ledger.balance_of("Bob").unwrap(), Money::from(50));
        assert_eq!(
            ledger.history_of("Bob").unwrap(),
            ["Deposit: 50", "Failed withdrawal attempt: 1000"]
        );
    }

    #[test]
    fn transfer_writes_two_lines_per_account() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(100)).unwrap();

        assert!(ledger.transfer("Alice", "Bob", Money::from(50)).unwrap());
        assert_eq!(
            ledger.history_of("Alice").unwrap(),
            ["Deposit: 100", "Withdrawal: 50", "Transferred: 50 to Bob"]
        );
        assert_eq!(
            ledger.history_of("Bob").unwrap(),
            ["Deposit: 50", "Received: 50 from Alice"]
        );
    }

    #[test]
    fn failed_transfer_changes_nothing_by_default() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(10)).unwrap();

        assert!(!ledger.transfer("Alice", "Bob", Money::from(11)).unwrap());
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::from(10));
        assert_eq!(ledger.balance_of("Bob").unwrap(), Money::ZERO);
        assert_eq!(ledger.history_of("Alice").unwrap().len(), 1);
        assert!(ledger.history_of("Bob").unwrap().is_empty());
    }

    #[test]
    fn failed_transfer_is_logged_when_configured() {
        let mut ledger = AccountLedger::with_config(LedgerConfig {
            log_failed_transfers: true,
            ..LedgerConfig::default()
        });
        ledger.create_account("Alice", "pw1").unwrap();
        ledger.create_account("Bob", "pw2").unwrap();

        assert!(!ledger.transfer("Alice", "Bob", Money::from(5)).unwrap());
        assert_eq!(
            ledger.history_of("Alice").unwrap(),
            ["Failed withdrawal attempt: 5"]
        );
        assert!(ledger.history_of("Bob").unwrap().is_empty());
    }

    #[test]
    fn self_transfer_keeps_balance_and_logs_four_lines() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(40)).unwrap();

        assert!(ledger.transfer("Alice", "Alice", Money::from(40)).unwrap());
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::from(40));
        assert_eq!(
            ledger.history_of("Alice").unwrap(),
            [
                "Deposit: 40",
                "Withdrawal: 40",
                "Transferred: 40 to Alice",
                "Deposit: 40",
                "Received: 40 from Alice",
            ]
        );
    }

    #[test]
    fn strict_amounts_reject_non_positive_values() {
        let mut ledger = AccountLedger::with_config(LedgerConfig {
            strict_amounts: true,
            ..LedgerConfig::default()
        });
        ledger.create_account("Alice", "pw1").unwrap();
        ledger.create_account("Bob", "pw2").unwrap();

        for result in [
            ledger.deposit("Alice", Money::ZERO),
            ledger.deposit("Alice", Money::from(-1)),
            ledger.withdraw("Alice", Money::from(-1)),
        ] {
            assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
        }
        assert!(matches!(
            ledger.transfer("Alice", "Bob", Money::from(-1)),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(ledger.history_of("Alice").unwrap().is_empty());

        ledger.deposit("Alice", Money::from(100)).unwrap();
        ledger.accrue_interest("Alice", Rate::from(-10)).unwrap();
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::from(90));
    }

    #[test]
    fn interest_on_zero_balance_stays_zero() {
        let mut ledger = alice_and_bob();
        ledger.accrue_interest("Alice", Rate::from(10)).unwrap();
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::ZERO);
        assert_eq!(
            ledger.history_of("Alice").unwrap(),
            ["Interest added at rate 10%"]
        );
    }

    #[test]
    fn interest_applies_to_current_balance() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(100)).unwrap();
        ledger.accrue_interest("Alice", Rate::from(10)).unwrap();
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::new(dec!(110.0)));
        ledger.accrue_interest("Alice", Rate::from(10)).unwrap();
        assert_eq!(ledger.balance_of("Alice").unwrap(), Money::from(121));
    }

    #[test]
    fn owners_are_listed_in_creation_order() {
        let mut ledger = AccountLedger::new();
        for owner in ["Zoe", "Adam", "Mia"] {
            ledger.create_account(owner, "pw").unwrap();
        }
        let owners: Vec<String> = ledger.owners().map(ToString::to_string).collect();
        assert_eq!(owners, ["Zoe", "Adam", "Mia"]);
        assert!(ledger.contains("Mia"));
        assert!(!ledger.contains("mia"));
    }

    #[test]
    fn history_text_joins_lines() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(1)).unwrap();
        ledger.deposit("Alice", Money::from(2)).unwrap();
        assert_eq!(ledger.history_text("Alice").unwrap(), "Deposit: 1\nDeposit: 2");
    }

    #[test]
    fn account_version_counts_applied_events() {
        let mut ledger = alice_and_bob();
        ledger.deposit("Alice", Money::from(100)).unwrap();
        ledger.transfer("Alice", "Bob", Money::from(10)).unwrap();
        // opened + deposit + withdrawal + narrative
        assert_eq!(ledger.account("Alice").unwrap().version(), 4);
    }

    #[test]
    fn execute_reports_insufficient_funds_as_outcome() {
        let mut ledger = alice_and_bob();
        let outcome = ledger
            .execute(&Operation::Withdraw {
                owner: "Bob".into(),
                amount: Money::from(5),
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::InsufficientFunds {
                requested: Money::from(5),
                available: Money::ZERO,
            }
        );
    }

    #[test]
    fn from_script_uses_the_recorded_config() {
        let mut script = Script::new(LedgerConfig {
            duplicate_accounts: DuplicatePolicy::Replace,
            log_failed_transfers: true,
            ..LedgerConfig::default()
        });
        for op in [
            Operation::CreateAccount {
                owner: "Alice".into(),
                credential: "pw1".into(),
            },
            Operation::CreateAccount {
                owner: "Bob".into(),
                credential: "pw2".into(),
            },
            Operation::CreateAccount {
                owner: "Bob".into(),
                credential: "pw3".into(),
            },
            Operation::Transfer {
                from: "Alice".into(),
                to: "Bob".into(),
                amount: Money::from(10),
            },
        ] {
            script.push(op);
        }

        assert_eq!(
            AccountLedger::new().replay(&script.ops).unwrap_err(),
            DomainError::DuplicateAccount("Bob".into())
        );

        let (ledger, outcomes) = AccountLedger::from_script(&script).unwrap();
        assert_eq!(ledger.config(), &script.config);
        assert_eq!(outcomes[3], Outcome::Transferred { completed: false });
        assert!(ledger.verify_credential("Bob", "pw3"));
        assert_eq!(
            ledger.history_of("Alice").unwrap(),
            ["Failed withdrawal attempt: 10"]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: deposit adds exactly the amount, whatever its sign.
        #[test]
        fn deposit_adds_amount(
            start in -1_000_000i64..1_000_000i64,
            cents in -1_000_000i64..1_000_000i64,
        ) {
            let mut ledger = alice_and_bob();
            ledger.deposit("Alice", Money::from(start)).unwrap();

            let amount = Money::new(rust_decimal::Decimal::new(cents, 2));
            let balance = ledger.deposit("Alice", amount).unwrap();

            prop_assert_eq!(balance, Money::from(start).checked_add(amount).unwrap());
        }

        /// Property: a covered withdrawal debits exactly the amount; an
        /// uncovered one leaves the balance alone. Either way one line is added.
        #[test]
        fn withdraw_debits_or_records_failure(
            start in 0i64..1_000_000i64,
            amount in 0i64..2_000_000i64,
        ) {
            let mut ledger = alice_and_bob();
            ledger.deposit("Alice", Money::from(start)).unwrap();
            let before = ledger.history_of("Alice").unwrap().len();

            let result = ledger.withdraw("Alice", Money::from(amount));

            prop_assert_eq!(ledger.history_of("Alice").unwrap().len(), before + 1);
            if amount <= start {
                prop_assert_eq!(result.unwrap(), Money::from(start - amount));
                prop_assert_eq!(ledger.balance_of("Alice").unwrap(), Money::from(start - amount));
            } else {
                prop_assert_eq!(
                    result.unwrap_err(),
                    DomainError::insufficient_funds("Alice", Money::from(amount), Money::from(start))
                );
                prop_assert_eq!(ledger.balance_of("Alice").unwrap(), Money::from(start));
                let expected = format!("Failed withdrawal attempt: {amount}");
                prop_assert_eq!(
                    ledger.history_of("Alice").unwrap().last().map(String::as_str),
                    Some(expected.as_str())
                );
            }
        }

        /// Property: transfers never create or destroy money, and each
        /// completed transfer adds two lines to both sides.
        #[test]
        fn transfers_conserve_total(
            seed in 0i64..10_000i64,
            moves in prop::collection::vec((any::<bool>(), 0i64..5_000i64), 1..20)
        ) {
            let mut ledger = alice_and_bob();
            ledger.deposit("Alice", Money::from(seed)).unwrap();
            let total = Money::from(seed);

            for (alice_pays, amount) in moves {
                let (from, to) = if alice_pays { ("Alice", "Bob") } else { ("Bob", "Alice") };
                let from_len = ledger.history_of(from).unwrap().len();
                let to_len = ledger.history_of(to).unwrap().len();
                let covered = Money::from(amount) <= ledger.balance_of(from).unwrap();

                let completed = ledger.transfer(from, to, Money::from(amount)).unwrap();
                prop_assert_eq!(completed, covered);

                let grown = if completed { 2 } else { 0 };
                prop_assert_eq!(ledger.history_of(from).unwrap().len(), from_len + grown);
                prop_assert_eq!(ledger.history_of(to).unwrap().len(), to_len + grown);

                let sum = ledger
                    .balance_of("Alice")
                    .unwrap()
                    .checked_add(ledger.balance_of("Bob").unwrap())
                    .unwrap();
                prop_assert_eq!(sum, total);
            }
        }
    }
}
