// src/bin/issue_token.rs
//! Mint a bearer token for an operator or a test client.
//!
//! ```text
//! BISCUIT_ROOT_PRIVATE_KEY=... cargo run --bin issue_token -- --user-id 1 --name Ada --role admin
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use stockroom::{
    application::{dto::TokenSubject, ports::security::TokenManager},
    domain::user::{Role, UserId},
    infrastructure::security::token::BiscuitTokenManager,
};

#[derive(Debug, Parser)]
#[command(name = "issue_token", about = "Issue a Biscuit bearer token")]
struct Args {
    /// Hex-encoded Ed25519 root private key.
    #[arg(long, env = "BISCUIT_ROOT_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    #[arg(long)]
    user_id: i64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// `admin` or `customer`.
    #[arg(long, default_value = "customer")]
    role: Role,

    /// Token lifetime in seconds.
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = 3600)]
    ttl: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let manager = BiscuitTokenManager::new(&args.private_key, Duration::from_secs(args.ttl))
        .context("invalid root private key")?;
    let subject = TokenSubject {
        user_id: UserId::new(args.user_id).context("user id must be positive")?,
        name: args.name,
        email: args.email,
        role: args.role,
    };

    let issued = manager.issue(subject).await.context("failed to issue token")?;
    println!("{}", issued.token);
    eprintln!("expires at {}", issued.expires_at.to_rfc3339());
    Ok(())
}
