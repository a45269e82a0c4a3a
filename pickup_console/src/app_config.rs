use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use pickup_teams::known_players::KnownPlayers;
use pickup_teams::rules::SessionRules;


// Everything in the file is optional: missing fields take the values of the weekly pelada.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: SessionRules,
    pub known_players: KnownPlayers,
    pub currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            rules: SessionRules::pelada(),
            known_players: KnownPlayers::pelada(),
            currency: "R$".to_owned(),
        }
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    Ok(serde_yaml::from_str(contents)?)
}

pub fn read_config_file(path: &Path) -> anyhow::Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Reading config file '{}'", path.display()))?;
    parse_config(&contents).with_context(|| format!("Parsing config file '{}'", path.display()))
}
