//! Client configuration from environment variables.
use std::env;
use std::path::PathBuf;

/// Console client configuration.
///
/// Environment variables (a `.env` file is read first):
/// - `BATTLE_SEED` - RNG seed (default: random)
/// - `BATTLE_ENCOUNTER` - encounter or region id (default: `thug_ambush`)
/// - `BATTLE_PARTY` - comma-separated preset ids (default: `hero`)
/// - `BATTLE_CONTENT_DIR` - data directory overriding built-in content
/// - `BATTLE_LOG_DIR` - log root (default: platform cache dir)
/// - `BATTLE_SESSION_ID` - log subdirectory name (default: `session_<unix secs>`)
/// - `BATTLE_AUTOPILOT` - `1`/`true` lets the party act without input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub seed: Option<u64>,
    pub encounter: String,
    pub party: Vec<String>,
    pub content_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub autopilot: bool,
}

impl ClientConfig {
    pub const DEFAULT_ENCOUNTER: &'static str = "thug_ambush";
    pub const DEFAULT_PARTY: &'static str = "hero";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let party = read("BATTLE_PARTY")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .filter(|ids| !ids.is_empty())
            .unwrap_or_else(|| vec![Self::DEFAULT_PARTY.to_owned()]);

        Self {
            seed: read("BATTLE_SEED").and_then(|raw| raw.trim().parse().ok()),
            encounter: read("BATTLE_ENCOUNTER")
                .map(|raw| raw.trim().to_owned())
                .unwrap_or_else(|| Self::DEFAULT_ENCOUNTER.to_owned()),
            party,
            content_dir: read("BATTLE_CONTENT_DIR").map(PathBuf::from),
            log_dir: read("BATTLE_LOG_DIR").map(PathBuf::from),
            session_id: read("BATTLE_SESSION_ID"),
            autopilot: read("BATTLE_AUTOPILOT")
                .is_some_and(|raw| matches!(raw.trim(), "1" | "true" | "yes")),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.encounter, "thug_ambush");
        assert_eq!(config.party, vec!["hero".to_string()]);
        assert!(!config.autopilot);
    }

    #[test]
    fn party_list_is_split_and_trimmed() {
        let config = config(&[("BATTLE_PARTY", " hero , archer,,")]);
        assert_eq!(config.party, vec!["hero".to_string(), "archer".to_string()]);
    }

    #[test]
    fn unparsable_seed_is_ignored() {
        assert_eq!(config(&[("BATTLE_SEED", "abc")]).seed, None);
        assert_eq!(config(&[("BATTLE_SEED", "42")]).seed, Some(42));
    }

    #[test]
    fn blank_values_fall_back() {
        let config = config(&[("BATTLE_ENCOUNTER", "  "), ("BATTLE_AUTOPILOT", "true")]);
        assert_eq!(config.encounter, "thug_ambush");
        assert!(config.autopilot);
    }
}
