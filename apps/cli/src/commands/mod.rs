mod backup;
mod budget;
mod goals;
mod journal;
mod money;
mod profile;

use std::io::{self, BufRead, Write};

use anyhow::bail;
use chrono::{DateTime, NaiveDateTime, Utc};
use tarushiru_core::money::MonthKey;
use tarushiru_core::session::LoginOutcome;

use crate::config::Config;
use crate::main_lib::{authenticate, open_controller};
use crate::opt::{Cli, Commands};

pub(crate) async fn exec(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let path = cli.data.clone().unwrap_or_else(|| config.data_path.clone());
    let mut vc = open_controller(&path);
    let password = cli.password.as_deref();

    if let Commands::Login(login) = &cli.command {
        return match vc.login(&login.email, password.unwrap_or_default())? {
            LoginOutcome::Created => {
                println!("Welcome, {}. Your profile was created.", display_name(&vc));
                Ok(())
            }
            LoginOutcome::Authenticated => {
                println!("Welcome back, {}.", display_name(&vc));
                Ok(())
            }
        };
    }

    authenticate(&mut vc, password)?;

    match cli.command {
        Commands::Login(_) => Ok(()),
        Commands::Journal(cmd) => journal::run(&mut vc, config, cmd).await,
        Commands::Goals(cmd) => goals::run(&mut vc, config, cmd).await,
        Commands::Money(cmd) => money::run(&mut vc, config, cmd).await,
        Commands::Budget(cmd) => budget::run(&mut vc, cmd),
        Commands::Profile(cmd) => profile::run(&mut vc, config, cmd).await,
        Commands::Backup(cmd) => backup::run(&mut vc, cmd),
        Commands::Reset(confirm) => backup::reset(&mut vc, confirm.yes),
    }
}

fn display_name(vc: &tarushiru_core::ViewController) -> String {
    vc.data()
        .user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_default()
}

/// Asks on stdin unless `yes` is set.
pub(crate) fn confirm(question: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub(crate) fn month_or_current(month: Option<&str>) -> anyhow::Result<MonthKey> {
    match month {
        Some(m) => Ok(MonthKey::parse(m)?),
        None => Ok(MonthKey::current()),
    }
}

/// RFC 3339, or `YYYY-MM-DDTHH:MM` taken as UTC.
pub(crate) fn parse_datetime(input: &str) -> anyhow::Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
        Ok(naive) => Ok(naive.and_utc()),
        Err(_) => bail!("Invalid date '{}', expected RFC 3339 or YYYY-MM-DDTHH:MM", input),
    }
}

/// Thousands separators for display.
pub(crate) fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-¥{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}
