use clap::Parser;

use crate::config::pathconfig::PathConfig;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Specifies the *directory* of the config to load. This directory is expected to contain
    /// files like "config.json5".
    #[arg(short, long)]
    pub config: Option<String>,

    /// Specifies the *directory* the log file is written to.
    #[arg(short, long)]
    pub data: Option<String>,

    /// Do not use any config other than the preset. Incompatible with --config.
    #[arg(long, default_value_t = false)]
    pub no_config: bool,

    /// Token used to talk to the import API. Takes priority over the config.
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,
}

impl Cli {
    pub fn is_valid(&self) -> Option<String> {
        if self.config.is_some() && self.no_config {
            return Some("Incompatible flags set: --config and --no-config".to_string());
        };
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Some("--tick-rate must be a positive number".to_string());
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Some("--frame-rate must be a positive number".to_string());
        }
        None
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();

    let config_dir_path = PathConfig::get_config_dir().display().to_string();
    let data_dir_path = PathConfig::get_data_dir().display().to_string();

    format!(
        "\
{}

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}",
        env!("CARGO_PKG_VERSION")
    )
}
