//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BattleConfig`] from TOML files.
///
/// Missing tables and keys fall back to the engine defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse battle config TOML: {}", e))?;

        if config.growth.exp_curve_percent == 0 {
            anyhow::bail!("growth.exp_curve_percent must be at least 1");
        }
        if config.enemy.power_strike_gate > 100 {
            anyhow::bail!(
                "enemy.power_strike_gate is {} but a d100 roll never exceeds 100",
                config.enemy.power_strike_gate
            );
        }

        Ok(config)
    }
}
