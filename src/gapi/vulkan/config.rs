use anyhow::{anyhow, Context};
use log::LevelFilter;
use std::str::FromStr;

pub(crate) const VALIDATION_ENABLED: bool = cfg!(feature = "validation");

/// Environment variable holding the index of the GPU to bind.
pub const DEVICE_INDEX_VAR: &str = "FORGE_DEVICE_INDEX";
/// Environment variable holding the default log level.
pub const LOG_LEVEL_VAR: &str = "FORGE_LOG";
/// Environment variable holding the application name reported to the driver.
pub const APP_NAME_VAR: &str = "FORGE_APP_NAME";

/// Runtime settings of the device initialization.
#[derive(Clone, Debug, PartialEq)]
pub struct ForgeConfig {
    /// Requested physical device slot. Out of range values fall back to 0.
    pub device_index: u32,
    pub log_level: LevelFilter,
    pub application_name: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            log_level: LevelFilter::Debug,
            application_name: String::from("device_forge"),
        }
    }
}

impl ForgeConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source, unset keys keep their
    /// default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(index) = lookup(DEVICE_INDEX_VAR) {
            config.device_index = index
                .trim()
                .parse()
                .with_context(|| format!("{DEVICE_INDEX_VAR} must be a device index, got `{index}`"))?;
        }
        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            config.log_level = LevelFilter::from_str(level.trim())
                .map_err(|_| anyhow!("{LOG_LEVEL_VAR} must be a log level, got `{level}`"))?;
        }
        if let Some(name) = lookup(APP_NAME_VAR).filter(|n| !n.is_empty()) {
            config.application_name = name;
        }
        Ok(config)
    }
}
