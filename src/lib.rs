use anyhow::{Context, Result};
use clap::{ArgMatches, Command};

use config::EnrichmentConfig;
use profile::ProfileEnricher;
use types::TokenGrantEvent;

pub mod cmd;
pub mod config;
pub mod error;
pub mod log;
pub mod login;
pub mod profile;
pub mod provider;
pub mod sdk;
pub mod types;

pub use error::LoginError;
pub use login::{GoogleLogin, LoginOptions, LoginTrigger};
pub use provider::{GoogleOAuthProvider, ProviderContext};
pub use sdk::GoogleIdentitySdk;

pub async fn run(raw_input: Vec<String>) -> Result<String> {
    tracing::info!("Running CLI with input: {:?}", raw_input);
    let matches = get_matches(cmd::cmd(), raw_input)?;

    match matches.subcommand() {
        Some((cmd::SCOPE_CMD, matches)) => {
            let scope = matches
                .get_one::<String>(cmd::SCOPE_ARG)
                .map(String::as_str)
                .unwrap_or_default();
            Ok(config::effective_scope(scope))
        }
        Some((cmd::USERINFO_CMD, matches)) => {
            let access_token = matches
                .get_one::<String>(cmd::ACCESS_TOKEN_OPTION)
                .context("missing --access-token")?;
            let mut enrichment = EnrichmentConfig::from_env()?;
            if let Some(ms) = matches.get_one::<u64>(cmd::TIMEOUT_OPTION) {
                enrichment.timeout = std::time::Duration::from_millis(*ms);
            }
            let enricher = ProfileEnricher::google(&enrichment)?;
            let payload = enricher
                .enrich(TokenGrantEvent::with_access_token(access_token.clone()))
                .await;
            Ok(serde_json::to_string_pretty(&payload)?)
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

pub fn get_matches(cmd: Command, input: Vec<String>) -> Result<ArgMatches> {
    Ok(cmd.try_get_matches_from(input)?)
}
