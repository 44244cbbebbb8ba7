//! Hosting CLI authentication
//!
//! Token-based login for `gh`. The token comes from the environment and is
//! piped into `gh auth login` only when the CLI is not already
//! authenticated; an already-authenticated CLI is a no-op.

use crate::error::{Error, Result};
use crate::exec::Cmd;
use std::env;

/// Environment variables consulted for a token; the first one set wins.
pub const TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Outcome of the pre-run authentication check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// `gh` already had valid credentials
    AlreadyAuthenticated,
    /// A token login was performed
    LoggedIn,
    /// No token in the environment; operations proceed unauthenticated
    NoToken,
}

/// Read a hosting token from the environment.
pub fn token_from_env() -> Option<String> {
    TOKEN_VARS
        .iter()
        .find_map(|var| env::var(var).ok().filter(|token| !token.is_empty()))
}

/// Ensure `gh` is authenticated when a token is available.
///
/// Absence of a token is not fatal: downstream `gh` calls surface the CLI's
/// own authentication error if credentials turn out to be required.
pub async fn ensure_hosting_auth() -> Result<AuthStatus> {
    let Some(token) = token_from_env() else {
        return Ok(AuthStatus::NoToken);
    };

    let status = Cmd::new("gh")
        .args(["auth", "status"])
        .unchecked()
        .run()
        .await?;
    if status.success() {
        return Ok(AuthStatus::AlreadyAuthenticated);
    }

    Cmd::new("gh")
        .args(["auth", "login", "--with-token"])
        .input(token)
        .run()
        .await
        .map_err(|err| Error::Auth(format!("token login failed: {err}")))?;
    Ok(AuthStatus::LoggedIn)
}
