//! Check a login against the site database

use std::io::{self, BufRead};

use anyhow::Context;

use brightminds::config::Config;
use brightminds::core::services::IdentityResolver;
use brightminds::output::{LoginResult, OutputMode};

/// Environment variable holding the password when stdin is not used
const PASSWORD_ENV: &str = "BRIGHTMINDS_PASSWORD";

/// Resolve `identifier` and a password the way the site's login form does
///
/// A rejected login is a normal result, not an error.
pub fn login(
    config: &Config,
    identifier: &str,
    password_stdin: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let password = read_password(password_stdin)?;

    let store = super::open_store(config)?;
    let hasher = config.hasher();
    let account = IdentityResolver::new(&store, &hasher)
        .allow_inactive(config.auth.allow_inactive)
        .resolve(identifier, &password)?;

    LoginResult {
        identifier: identifier.to_string(),
        authenticated: account.is_some(),
        account,
    }
    .render(mode);
    Ok(())
}

fn read_password(from_stdin: bool) -> anyhow::Result<String> {
    if from_stdin {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).context("failed to read password from stdin")?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    std::env::var(PASSWORD_ENV)
        .with_context(|| format!("no password given: use --password-stdin or set {PASSWORD_ENV}"))
}
