//! Auth command - test and manage authentication

use crate::cli::style::{Stylize, check};
use anstream::println;
use anyhow::Result;
use bidsync::auth::{AuthStatus, ensure_hosting_auth, token_from_env};

/// Run the auth test command
async fn run_auth_test() -> Result<()> {
    println!("Testing GitHub authentication...");
    match ensure_hosting_auth().await? {
        AuthStatus::AlreadyAuthenticated => {
            println!("{} gh is already authenticated", check());
        }
        AuthStatus::LoggedIn => {
            println!("{} logged in with a token from the environment", check());
        }
        AuthStatus::NoToken => {
            println!(
                "{}",
                "No token found; set GH_TOKEN or GITHUB_TOKEN, or run `gh auth login`".warn()
            );
        }
    }
    if token_from_env().is_some() {
        println!("Token source: environment");
    }
    Ok(())
}

/// Run the auth setup command (show instructions)
fn run_auth_setup() {
    println!("GitHub Authentication Setup");
    println!("===========================");
    println!();
    println!("Option 1: GitHub CLI (recommended)");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set GH_TOKEN or GITHUB_TOKEN");
    println!("  bidsync pipes the token into `gh auth login --with-token`");
    println!("  only when gh is not already authenticated");
}

/// Wrapper for auth commands
pub async fn run_auth(action: &str) -> Result<()> {
    match action {
        "test" => run_auth_test().await,
        "setup" => {
            run_auth_setup();
            Ok(())
        }
        _ => {
            println!("Unknown action: {action}. Use 'test' or 'setup'.");
            Ok(())
        }
    }
}
