//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the first standard location,
    /// falling back to defaults.
    ///
    /// An explicit path that does not exist is an error; missing standard
    /// locations are not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let report = schema.validate();
        if !report.is_valid() {
            return Err(Error::new(ErrorCode::ConfigValidationError, report.summary())
                .with_context(describe(config_path.as_deref())));
        }

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

fn describe(path: Option<&Path>) -> String {
    path.map_or_else(
        || "built-in defaults".to_string(),
        |p| format!("config file {}", p.display()),
    )
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = [
        ".retrievix.toml",
        "retrievix.toml",
        ".config/retrievix.toml",
    ]
    .into_iter()
    .map(PathBuf::from);

    let user = dirs::config_dir().map(|d| d.join("retrievix").join("config.toml"));

    local.chain(user).find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("reading config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("parsing config file {}", path.display()))
        .with_suggestion("Check the file against the [matching], [browse], [store] and [api] sections")
}
