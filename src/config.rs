pub mod authconfig;
pub mod behaviourconfig;
pub mod keybindings;
pub mod keyparser;
pub mod localkeybinds;
pub mod pathconfig;
pub mod serviceconfig;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{
    authconfig::AuthConfig, behaviourconfig::BehaviourConfig, localkeybinds::LocalKeyBinds,
    pathconfig::PathConfig, serviceconfig::ServiceConfig,
};

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub behaviour: BehaviourConfig,
    #[serde(default)]
    pub keybindings: LocalKeyBinds,
}

impl Config {
    /// The configuration bundled with the binary.
    pub fn preset() -> Result<Self, config::ConfigError> {
        json5::from_str(CONFIG).map_err(|e| config::ConfigError::Message(e.to_string()))
    }

    pub fn new(paths: &PathConfig) -> Result<Self, config::ConfigError> {
        let default_config = Self::preset()?;
        let Some(config_dir) = &paths.config else {
            debug!("Config files disabled, using preset");
            return Ok(default_config);
        };

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true;
            }
        }

        if !found_config {
            warn!(
                "No configuration file found in {:?}, using preset",
                config_dir
            );
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // Add user keybinds on top of the default keybinds
        cfg.keybindings.merge_defaults(&default_config.keybindings);

        Ok(cfg)
    }
}
