use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use phonedb_core::domain::validate_phone_number;
use phonedb_core::CoreError;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonedb";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_DATABASE_NAME: &str = "phone";
pub use phonedb_store::db::DEFAULT_BUSY_TIMEOUT_MS;

pub const DEFAULT_SEED_NUMBERS: [&str; 8] = [
    "1234567890",
    "123 456 7891",
    "(123) 456 7892",
    "(123) 456-7893",
    "123-456-7894",
    "123-456-7890",
    "1234567892",
    "(123)456-7892",
];

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
}

/// Where the phone table lives and how the connection behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Explicit database file. When unset the file is `<name>.sqlite3` in the data dir.
    pub path: Option<PathBuf>,
    pub name: String,
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            name: DEFAULT_DATABASE_NAME.to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub numbers: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            numbers: DEFAULT_SEED_NUMBERS
                .iter()
                .map(|number| number.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid database name: {0:?}")]
    InvalidDatabaseName(String),
    #[error("invalid database path: {0}")]
    InvalidDatabasePath(PathBuf),
    #[error("invalid seed number {number:?}: {source}")]
    InvalidSeedNumber {
        number: String,
        #[source]
        source: CoreError,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database: Option<DatabaseFile>,
    seed: Option<SeedFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatabaseFile {
    path: Option<PathBuf>,
    name: Option<String>,
    busy_timeout_ms: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedFile {
    numbers: Option<Vec<String>>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(database) = parsed.database {
        if let Some(path) = database.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidDatabasePath(path));
            }
            config.database.path = Some(path);
        }
        if let Some(name) = database.name {
            config.database.name = validate_database_name(&name)?;
        }
        if let Some(timeout) = database.busy_timeout_ms {
            config.database.busy_timeout_ms = timeout;
        }
    }

    if let Some(seed) = parsed.seed {
        if let Some(numbers) = seed.numbers {
            for number in &numbers {
                validate_phone_number(number).map_err(|source| {
                    ConfigError::InvalidSeedNumber {
                        number: number.clone(),
                        source,
                    }
                })?;
            }
            config.seed.numbers = numbers;
        }
    }

    Ok(config)
}

// The name becomes a file name in the data dir.
fn validate_database_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if !valid {
        return Err(ConfigError::InvalidDatabaseName(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        load, load_at_path, merge_config, AppConfig, ConfigError, ConfigFile, DatabaseFile,
        SeedFile, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DATABASE_NAME, DEFAULT_SEED_NUMBERS,
    };
    use phonedb_store::StoreOptions;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_builtin_seed_and_name() {
        let merged = merge_config(ConfigFile {
            database: None,
            seed: None,
        })
        .expect("merge");
        assert_eq!(merged.database.name, DEFAULT_DATABASE_NAME);
        assert_eq!(merged.database.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert!(merged.database.path.is_none());
        assert_eq!(merged.seed.numbers.len(), DEFAULT_SEED_NUMBERS.len());
        assert_eq!(merged.seed.numbers[3], "(123) 456-7893");
    }

    #[test]
    fn default_busy_timeout_matches_store_default() {
        let config = AppConfig::default();
        assert_eq!(
            config.database.busy_timeout_ms,
            StoreOptions::default().busy_timeout_ms
        );
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            database: Some(DatabaseFile {
                path: Some(PathBuf::from("/tmp/phones.sqlite3")),
                name: Some(" contacts ".to_string()),
                busy_timeout_ms: Some(500),
            }),
            seed: Some(SeedFile {
                numbers: Some(vec!["555-0100".to_string()]),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(
            merged.database.path.as_deref(),
            Some(std::path::Path::new("/tmp/phones.sqlite3"))
        );
        assert_eq!(merged.database.name, "contacts");
        assert_eq!(merged.database.busy_timeout_ms, 500);
        assert_eq!(merged.seed.numbers, vec!["555-0100".to_string()]);
    }

    #[test]
    fn merge_config_rejects_unsafe_database_name() {
        let parsed = ConfigFile {
            database: Some(DatabaseFile {
                path: None,
                name: Some("../escape".to_string()),
                busy_timeout_ms: None,
            }),
            seed: None,
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDatabaseName(_)));
    }

    #[test]
    fn merge_config_rejects_oversized_seed_number() {
        let parsed = ConfigFile {
            database: None,
            seed: Some(SeedFile {
                numbers: Some(vec!["9".repeat(300)]),
            }),
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeedNumber { .. }));
    }

    #[test]
    fn empty_seed_list_is_kept() {
        let parsed = ConfigFile {
            database: None,
            seed: Some(SeedFile {
                numbers: Some(Vec::new()),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert!(merged.seed.numbers.is_empty());
    }

    #[test]
    fn load_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[database]\nname = \"phone_test\"\n[seed]\nnumbers = [\"(123) 456-7893\"]\n",
        )
        .expect("write config");

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.database.name, "phone_test");
        assert_eq!(config.seed.numbers, vec!["(123) 456-7893".to_string()]);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[database]\nhost = \"localhost\"\n").expect("write config");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
