use std::collections::HashMap;

use crate::{
    error::{config::ConfigError, AppError},
    model::catalog::RoleCatalog,
};

/// Default per-guild limit of weekly auto events.
const DEFAULT_MAX_AUTO_EVENTS: u64 = 5;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Maximum number of auto events a guild may register.
    pub max_auto_events: u64,

    /// Custom emoji id per reaction name, read from `EMOTE_<NAME>`.
    pub emote_ids: HashMap<String, u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            max_auto_events: match std::env::var("MAX_AUTO_EVENTS") {
                Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
                    name: "MAX_AUTO_EVENTS".to_string(),
                    value,
                })?,
                Err(_) => DEFAULT_MAX_AUTO_EVENTS,
            },
            emote_ids: emote_ids_from_env(),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads `EMOTE_<NAME>` for every reaction name. Missing or malformed ids are skipped;
/// the catalog reports them as unresolved.
fn emote_ids_from_env() -> HashMap<String, u64> {
    RoleCatalog::reaction_names()
        .filter_map(|name| {
            let var = format!("EMOTE_{}", name.to_uppercase());
            let value = std::env::var(&var).ok()?;
            match value.trim().parse::<u64>() {
                Ok(id) => Some((name.to_string(), id)),
                Err(_) => {
                    tracing::warn!("Ignoring {}: '{}' is not an emoji id", var, value);
                    None
                }
            }
        })
        .collect()
}
