use std::{env, path::PathBuf};

use directories::ProjectDirs;
use lazy_static::lazy_static;

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

pub enum PathType {
    /// Use the default location
    Default,
    /// Use the given location
    Custom(String),
    /// Do not use any location at all
    None,
}

impl PathType {
    pub fn from_args(path: Option<String>, disabled: bool) -> Self {
        if disabled {
            PathType::None
        } else if let Some(p) = path {
            PathType::Custom(p)
        } else {
            PathType::Default
        }
    }
}

pub struct PathConfig {
    pub data: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Path priority:
/// 1. Path specified via --data or --config
/// 2. Environment variable set via SPOTIMPORT_DATA or SPOTIMPORT_CONFIG
/// 3. XDG paths
/// 4. ./.data and ./.config
impl PathConfig {
    pub fn get_data_dir() -> PathBuf {
        if let Some(s) = DATA_FOLDER.clone() {
            s
        } else if let Some(proj_dirs) = Self::project_directory() {
            proj_dirs.data_local_dir().to_path_buf()
        } else {
            PathBuf::from(".").join(".data")
        }
    }

    pub fn get_config_dir() -> PathBuf {
        if let Some(s) = CONFIG_FOLDER.clone() {
            s
        } else if let Some(proj_dirs) = Self::project_directory() {
            proj_dirs.config_local_dir().to_path_buf()
        } else {
            PathBuf::from(".").join(".config")
        }
    }

    fn project_directory() -> Option<ProjectDirs> {
        ProjectDirs::from("ch", "skew", env!("CARGO_PKG_NAME"))
    }

    fn resolve(path: PathType, default: fn() -> PathBuf) -> Option<PathBuf> {
        match path {
            PathType::Default => Some(default()),
            PathType::Custom(p) => Some(PathBuf::from(p)),
            PathType::None => None,
        }
    }

    pub fn new(data: PathType, config: PathType) -> Self {
        Self {
            data: Self::resolve(data, Self::get_data_dir),
            config: Self::resolve(config, Self::get_config_dir),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self::new(PathType::Default, PathType::Default)
    }
}
