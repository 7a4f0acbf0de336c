use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::{ConfigError, TraversalPolicy};

/// Environment variable naming an additional configuration file.
pub const CONFIG_ENV_VAR: &str = "GCP_CONFIG";

/// File name of the per-user configuration file inside `$HOME`.
pub const HOME_CONFIG_NAME: &str = ".gcp.toml";

/// One configuration document.
///
/// Every key is optional. Pattern keys accept either a string array or one
/// comma-separated string:
///
/// ```toml
/// exclude = [".git", "target"]
/// exclude_compression = "*.iso, *.png"
/// compress = true
/// concurrency = 4
/// on_traversal_error = "skip"
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Patterns reinstating excluded paths.
    #[serde(deserialize_with = "pattern_list")]
    pub include: Option<Vec<String>>,
    /// Patterns excluding paths (and whole directories).
    #[serde(deserialize_with = "pattern_list")]
    pub exclude: Option<Vec<String>>,
    /// Patterns of files stored without compression.
    #[serde(deserialize_with = "pattern_list")]
    pub exclude_compression: Option<Vec<String>>,
    /// Patterns of files stored without encryption.
    #[serde(deserialize_with = "pattern_list")]
    pub exclude_encryption: Option<Vec<String>>,
    /// Global compression switch.
    pub compress: Option<bool>,
    /// Global encryption switch.
    pub encrypt: Option<bool>,
    /// Worker count.
    pub concurrency: Option<usize>,
    /// Directory receiving temporary output.
    pub temp_dir: Option<PathBuf>,
    /// Upper bound of a chunk in bytes.
    pub max_chunk_size: Option<u64>,
    /// Handling of traversal errors.
    pub on_traversal_error: Option<TraversalPolicy>,
}

impl ConfigFile {
    /// Parses a TOML document; `path` is only used in error messages.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Reads and parses the document at `path`. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_optional(path)?.ok_or_else(|| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })
    }

    /// Reads and parses the document at `path`, returning `None` when the file
    /// does not exist.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        debug!("loaded configuration from {}", path.display());
        Self::from_toml_str(&text, path).map(Some)
    }

    /// Overlays `later` onto `self`: every key set in `later` replaces the
    /// value held here.
    pub fn merge(&mut self, later: Self) {
        fn take<T>(slot: &mut Option<T>, later: Option<T>) {
            if later.is_some() {
                *slot = later;
            }
        }

        take(&mut self.include, later.include);
        take(&mut self.exclude, later.exclude);
        take(&mut self.exclude_compression, later.exclude_compression);
        take(&mut self.exclude_encryption, later.exclude_encryption);
        take(&mut self.compress, later.compress);
        take(&mut self.encrypt, later.encrypt);
        take(&mut self.concurrency, later.concurrency);
        take(&mut self.temp_dir, later.temp_dir);
        take(&mut self.max_chunk_size, later.max_chunk_size);
        take(&mut self.on_traversal_error, later.on_traversal_error);
    }
}

/// Splits a comma-separated pattern string, trimming entries and dropping
/// empty ones.
///
/// ```
/// assert_eq!(settings::split_patterns(" *.iso, ,*.png"), vec!["*.iso", "*.png"]);
/// ```
#[must_use]
pub fn split_patterns(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

fn pattern_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }

    let patterns = match Raw::deserialize(deserializer)? {
        Raw::List(items) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect(),
        Raw::Joined(text) => split_patterns(&text),
    };
    Ok(Some(patterns))
}

/// The configuration documents consulted for one run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigSources {
    /// File named by [`CONFIG_ENV_VAR`]; must exist when set.
    pub env: Option<PathBuf>,
    /// Per-user file; skipped when absent.
    pub home: Option<PathBuf>,
    /// File named on the command line; must exist when set.
    pub explicit: Option<PathBuf>,
}

impl ConfigSources {
    /// Resolves the environment and home documents from the process
    /// environment.
    #[must_use]
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        let env = env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let home = env::var_os("HOME")
            .filter(|value| !value.is_empty())
            .map(|home| PathBuf::from(home).join(HOME_CONFIG_NAME));
        Self {
            env,
            home,
            explicit,
        }
    }

    /// Loads and merges the documents in precedence order.
    pub fn load(&self) -> Result<ConfigFile, ConfigError> {
        let mut merged = ConfigFile::default();
        if let Some(path) = &self.env {
            merged.merge(ConfigFile::load(path)?);
        }
        if let Some(path) = &self.home
            && let Some(file) = ConfigFile::load_optional(path)?
        {
            merged.merge(file);
        }
        if let Some(path) = &self.explicit {
            merged.merge(ConfigFile::load(path)?);
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ConfigFile {
        ConfigFile::from_toml_str(text, Path::new("test.toml")).expect("valid document")
    }

    #[test]
    fn empty_document_sets_nothing() {
        assert_eq!(parse(""), ConfigFile::default());
    }

    #[test]
    fn arrays_and_joined_strings_are_equivalent() {
        let listed = parse(r#"exclude_compression = ["*.iso", " *.png "]"#);
        let joined = parse(r#"exclude_compression = "*.iso,*.png,""#);
        assert_eq!(listed, joined);
        assert_eq!(
            listed.exclude_compression,
            Some(vec!["*.iso".to_owned(), "*.png".to_owned()])
        );
    }

    #[test]
    fn scalar_keys_parse() {
        let file = parse(
            r#"
            compress = false
            encrypt = true
            concurrency = 3
            temp_dir = "/var/tmp"
            max_chunk_size = 1024
            on_traversal_error = "skip"
            "#,
        );
        assert_eq!(file.compress, Some(false));
        assert_eq!(file.encrypt, Some(true));
        assert_eq!(file.concurrency, Some(3));
        assert_eq!(file.temp_dir, Some(PathBuf::from("/var/tmp")));
        assert_eq!(file.max_chunk_size, Some(1024));
        assert_eq!(file.on_traversal_error, Some(TraversalPolicy::Skip));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = ConfigFile::from_toml_str("compresion = true", Path::new("typo.toml"))
            .expect_err("unknown key");
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("typo.toml"));
    }

    #[test]
    fn later_documents_win_key_by_key() {
        let mut base = parse("exclude = [\".git\"]\nconcurrency = 2");
        base.merge(parse("concurrency = 8"));
        assert_eq!(base.exclude, Some(vec![".git".to_owned()]));
        assert_eq!(base.concurrency, Some(8));
    }

    #[test]
    fn empty_list_replaces_earlier_list() {
        let mut base = parse("exclude_encryption = [\"*.iso\"]");
        base.merge(parse("exclude_encryption = []"));
        assert_eq!(base.exclude_encryption, Some(Vec::new()));
    }
}
