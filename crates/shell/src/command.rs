use banksim_core::{Money, Rate};

use crate::error::{ShellError, ShellResult};

pub const HELP: &str = "\
commands:
  create <owner> <password>   open an account and select it
  select <owner>              switch the selected account
  accounts                    list owners in creation order
  deposit <amount>            credit the selected account
  withdraw <amount>           debit the selected account
  transfer <to> <amount>      move money from the selected account
  interest <rate>             add interest at <rate> percent
  balance                     show the selected account
  history                     show the selected account's history
  verify <owner> <password>   check an account password
  script                      print this session as a replayable JSON script
  help                        show this text
  quit                        leave the simulator";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { owner: String, password: String },
    Select { owner: String },
    Accounts,
    Deposit { amount: Money },
    Withdraw { amount: Money },
    Transfer { to: String, amount: Money },
    Interest { rate: Rate },
    Balance,
    History,
    Verify { owner: String, password: String },
    Script,
    Help,
    Quit,
}

impl Command {
    /// Parse a line of input. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> ShellResult<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("create", [owner, password]) => Command::Create {
                owner: owner.to_string(),
                password: password.to_string(),
            },
            ("create", [_owner]) => return Err(ShellError::EmptyPassword),
            ("create", _) => return Err(ShellError::Usage("create <owner> <password>")),

            ("select", [owner]) => Command::Select {
                owner: owner.to_string(),
            },
            ("select", _) => return Err(ShellError::Usage("select <owner>")),

            ("accounts", []) => Command::Accounts,

            ("deposit", [amount]) => Command::Deposit {
                amount: parse_amount(amount)?,
            },
            ("deposit", _) => return Err(ShellError::Usage("deposit <amount>")),

            ("withdraw", [amount]) => Command::Withdraw {
                amount: parse_amount(amount)?,
            },
            ("withdraw", _) => return Err(ShellError::Usage("withdraw <amount>")),

            ("transfer", [to, amount]) => Command::Transfer {
                to: to.to_string(),
                amount: parse_amount(amount)?,
            },
            ("transfer", _) => return Err(ShellError::Usage("transfer <to> <amount>")),

            ("interest", [rate]) => Command::Interest {
                rate: rate
                    .parse()
                    .map_err(|_| ShellError::InvalidAmount(rate.to_string()))?,
            },
            ("interest", _) => return Err(ShellError::Usage("interest <rate>")),

            ("balance", []) => Command::Balance,
            ("history", []) => Command::History,

            ("verify", [owner, password]) => Command::Verify {
                owner: owner.to_string(),
                password: password.to_string(),
            },
            ("verify", _) => return Err(ShellError::Usage("verify <owner> <password>")),

            ("script", []) => Command::Script,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,

            _ => return Err(ShellError::UnknownCommand(line.trim().to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_amount(raw: &str) -> ShellResult<Money> {
    raw.parse()
        .map_err(|_| ShellError::InvalidAmount(raw.to_string()))
}
