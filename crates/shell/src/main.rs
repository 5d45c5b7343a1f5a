use std::io::{self, BufRead, Write};

use anyhow::Context;

use banksim_banking::{AccountLedger, LedgerConfig};
use banksim_shell::{Command, Reply, Session};

fn main() -> anyhow::Result<()> {
    banksim_observability::init();

    let config = LedgerConfig::from_env().context("invalid ledger configuration")?;
    tracing::info!(?config, "starting bank simulator");

    let mut session = Session::new(AccountLedger::with_config(config));
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "Bank simulator. Type `help` for commands.")?;

    let mut line = String::new();
    loop {
        write!(stdout, "bank> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("failed to read input")? == 0 {
            break;
        }

        let reply = Command::parse(&line).and_then(|command| match command {
            Some(command) => session.handle(command).map(Some),
            None => Ok(None),
        });

        match reply {
            Ok(Some(Reply::Text(text))) => writeln!(stdout, "{text}")?,
            Ok(Some(Reply::Quit)) => break,
            Ok(None) => {}
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
    }

    tracing::info!(
        accounts = session.ledger().len(),
        operations = session.script().len(),
        "session ended; state discarded"
    );
    Ok(())
}
