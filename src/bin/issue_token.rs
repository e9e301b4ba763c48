use chrono::Duration;
use clap::Parser;

use business_stats_api::auth::{Role, TokenIssuer};
use business_stats_api::config::AppConfig;

#[derive(Parser)]
#[command(name = "issue-token")]
#[command(about = "Mint compact role tokens signed with JWT_SECRET_KEY")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Role to embed (e.g. admin, user); prints an admin and a user token when omitted")]
    role: Option<String>,

    #[arg(long, help = "Token lifetime in hours; defaults to SECURITY_JWT_EXPIRY_HOURS, or no expiry")]
    expires_in_hours: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    // Fails fast when JWT_SECRET_KEY is missing
    let issuer = TokenIssuer::new(config.security.jwt_secret.as_deref())?;

    let ttl = cli
        .expires_in_hours
        .or_else(|| config.security.jwt_expiry_hours.and_then(|h| i64::try_from(h).ok()))
        .map(Duration::hours);

    match cli.role {
        Some(role) => println!("{}", issuer.issue(&Role::new(role), ttl)?),
        None => {
            println!("Admin Token: {}", issuer.issue(&Role::admin(), ttl)?);
            println!("User Token: {}", issuer.issue(&Role::user(), ttl)?);
        }
    }

    Ok(())
}
