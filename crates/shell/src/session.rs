use banksim_banking::{AccountLedger, Operation, Outcome, Script};
use banksim_core::{AccountId, DomainError};

use crate::command::{Command, HELP};
use crate::error::{ShellError, ShellResult};

/// What the front-end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Interactive session state: the ledger, the currently selected account and
/// the operations executed so far.
#[derive(Debug, Default)]
pub struct Session {
    ledger: AccountLedger,
    selected: Option<AccountId>,
    script: Script,
}

impl Session {
    pub fn new(ledger: AccountLedger) -> Self {
        let script = Script::new(*ledger.config());
        Self {
            ledger,
            selected: None,
            script,
        }
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    pub fn selected(&self) -> Option<&AccountId> {
        self.selected.as_ref()
    }

    /// The ledger config plus the operations that changed the ledger, in
    /// execution order.
    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn handle(&mut self, command: Command) -> ShellResult<Reply> {
        let text = match command {
            Command::Create { owner, password } => {
                if password.is_empty() {
                    return Err(ShellError::EmptyPassword);
                }
                let outcome = self.execute(Operation::CreateAccount {
                    owner,
                    credential: password,
                })?;
                if let Outcome::Created { account_id } = outcome {
                    self.selected = Some(account_id);
                }
                self.render_selected()?
            }
            Command::Select { owner } => {
                let account = self
                    .ledger
                    .account(&owner)
                    .ok_or_else(|| DomainError::unknown_account(owner.as_str()))?;
                self.selected = Some(account.id_typed().clone());
                self.render_selected()?
            }
            Command::Accounts => self.render_accounts(),
            Command::Deposit { amount } => {
                let owner = self.selected_owner()?;
                self.execute(Operation::Deposit { owner, amount })?;
                self.render_selected()?
            }
            Command::Withdraw { amount } => {
                let owner = self.selected_owner()?;
                self.execute(Operation::Withdraw { owner, amount })?;
                self.render_selected()?
            }
            Command::Transfer { to, amount } => {
                let from = self.selected_owner()?;
                match self.execute(Operation::Transfer { from, to, amount })? {
                    Outcome::Transferred { completed: false } => {
                        "Insufficient balance to transfer!".to_string()
                    }
                    _ => self.render_selected()?,
                }
            }
            Command::Interest { rate } => {
                let owner = self.selected_owner()?;
                self.execute(Operation::AccrueInterest { owner, rate })?;
                self.render_selected()?
            }
            Command::Balance => {
                let owner = self.selected_owner()?;
                format!("Balance: {}€", self.ledger.balance_of(&owner)?)
            }
            Command::History => {
                let owner = self.selected_owner()?;
                self.ledger.history_text(&owner)?
            }
            Command::Verify { owner, password } => {
                if self.ledger.verify_credential(&owner, &password) {
                    format!("Password accepted for {owner}.")
                } else {
                    "Password rejected.".to_string()
                }
            }
            Command::Script => self.script().to_json()?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };

        Ok(Reply::Text(text))
    }

    fn execute(&mut self, op: Operation) -> ShellResult<Outcome> {
        let outcome = self.ledger.execute(&op)?;
        tracing::debug!(owner = op.owner(), ?outcome, "operation executed");
        self.script.push(op);
        Ok(outcome)
    }

    fn selected_owner(&self) -> ShellResult<String> {
        self.selected
            .as_ref()
            .map(|id| id.to_string())
            .ok_or(ShellError::NoAccountSelected)
    }

    /// Balance line followed by the full history.
    fn render_selected(&self) -> ShellResult<String> {
        let owner = self.selected_owner()?;
        let balance = self.ledger.balance_of(&owner)?;
        let history = self.ledger.history_text(&owner)?;

        let mut out = format!("[{owner}] Balance: {balance}€");
        if !history.is_empty() {
            out.push('\n');
            out.push_str(&history);
        }
        Ok(out)
    }

    fn render_accounts(&self) -> String {
        if self.ledger.is_empty() {
            return "No accounts yet.".to_string();
        }
        self.ledger
            .owners()
            .map(|owner| {
                let marker = if self.selected.as_ref() == Some(owner) { "*" } else { " " };
                format!("{marker} {owner}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
