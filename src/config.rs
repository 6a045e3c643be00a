use crate::accent::ReplacementTable;
use log::{debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_true")]
    pub use_default_replacements: bool,
    /// Extra entries, applied after the built-in table in file order.
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub socket_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_default_replacements: true,
            replacements: Vec::new(),
            socket_path: None,
        }
    }
}

impl Config {
    /// Built-in entries (unless disabled) followed by the configured ones.
    pub fn replacement_table(&self) -> ReplacementTable {
        let mut table = if self.use_default_replacements {
            ReplacementTable::builtin().clone()
        } else {
            ReplacementTable::default()
        };

        for r in &self.replacements {
            if r.from.trim().is_empty() {
                warn!("skipping replacement with empty key (to={:?})", r.to);
                continue;
            }
            table.extend([(r.from.as_str(), r.to.as_str())]);
        }
        table
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("german-accent.toml")
}

fn default_true() -> bool {
    true
}

/// Read a config file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load_config_from`], but a broken file is logged and replaced by the defaults.
pub fn load_config_or_default(path: &Path) -> Config {
    load_config_from(path).unwrap_or_else(|e| {
        warn!("{e}");
        Config::default()
    })
}

/// Apply a `GERMAN_ACCENT_SOCKET` value. Empty values are ignored.
pub fn apply_socket_override(config: &mut Config, socket: Option<String>) {
    if let Some(path) = socket.filter(|p| !p.is_empty()) {
        config.socket_path = Some(PathBuf::from(path));
    }
}

pub fn load_config() -> Config {
    let mut config = load_config_or_default(&config_path());
    apply_socket_override(&mut config, std::env::var("GERMAN_ACCENT_SOCKET").ok());

    debug!(
        "use_default_replacements={} extra_replacements={}",
        config.use_default_replacements,
        config.replacements.len()
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.use_default_replacements);
    }

    #[test]
    fn test_parse_replacements_in_order() {
        let file = write_config(
            r#"
socket_path = "/run/user/1000/accent.sock"

[[replacements]]
from = "ship"
to = "schiff"

[[replacements]]
from = "Star"
to = "stern"
"#,
        );
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(
            config.socket_path,
            Some(PathBuf::from("/run/user/1000/accent.sock"))
        );
        assert_eq!(config.replacements.len(), 2);
        assert_eq!(config.replacements[0].from, "ship");

        let table = config.replacement_table();
        let tail: Vec<_> = table.iter().skip(table.len() - 2).collect();
        assert_eq!(tail, vec![("ship", "schiff"), ("star", "stern")]);
        assert_eq!(table.accentuate("the ship is a star"), "Ze schiff ist a stern");
    }

    #[test]
    fn test_disable_default_replacements() {
        let file = write_config(
            r#"
use_default_replacements = false

[[replacements]]
from = ""
to = "nothing"

[[replacements]]
from = "cheese"
to = "fromage"
"#,
        );
        let table = load_config_from(file.path()).unwrap().replacement_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.accentuate("yes cheese"), "yes fromage");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let file = write_config("use_default_replacements = \"maybe\"");
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let file = write_config("[[replacements]]\nfrom = 1");
        assert_eq!(load_config_or_default(file.path()), Config::default());

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config_or_default(dir.path()), Config::default());
    }

    #[test]
    fn test_socket_override() {
        let mut config = Config::default();
        apply_socket_override(&mut config, None);
        assert_eq!(config.socket_path, None);

        apply_socket_override(&mut config, Some("/run/accent.sock".into()));
        assert_eq!(config.socket_path, Some(PathBuf::from("/run/accent.sock")));

        apply_socket_override(&mut config, Some(String::new()));
        assert_eq!(config.socket_path, Some(PathBuf::from("/run/accent.sock")));
    }
}
