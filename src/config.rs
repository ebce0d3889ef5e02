use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::classifier::{Classifier, SectionRule};
use crate::domain::registry::RepoRegistry;
use crate::error::{AppError, AppResult};

pub const CONFIG_ENV_VAR: &str = "CHANGELOG_CONFIG";
const CONFIG_DIR_NAME: &str = "changelog";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_TRIAGE_SECTION: &str = "---triage---";
pub const DEFAULT_DEPRECATION_NOTICE: &str = "For more information on the list of deprecated flags and APIs, have a look at\nhttps://docs.docker.com/engine/deprecated/ where you can find the target removal dates";

pub fn default_repositories() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("cli".to_string(), "docker/cli".to_string()),
        ("engine".to_string(), "moby/moby".to_string()),
    ])
}

/// Keyword rules in evaluation order. Later rules override earlier ones.
pub fn default_section_rules() -> Vec<SectionRule> {
    vec![
        SectionRule::new(&["build"], "builder"),
        SectionRule::new(&["flag", "compose", "stack"], "client"),
        SectionRule::new(&["log"], "logging"),
        SectionRule::new(&["network"], "networking"),
        SectionRule::new(&["swarm"], "swarm mode"),
        SectionRule::new(&["deprecation"], "deprecation"),
        SectionRule::new(&["devmapper", "aufs"], "runtime"),
        SectionRule::new(&["lcow", "windows", "microsoft"], "runtime"),
    ]
}

fn default_triage_section() -> String {
    DEFAULT_TRIAGE_SECTION.to_string()
}

fn default_deprecation_notice() -> String {
    DEFAULT_DEPRECATION_NOTICE.to_string()
}

/// On-disk configuration. Fields left out of the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_repositories")]
    pub repositories: BTreeMap<String, String>,
    #[serde(default = "default_section_rules")]
    pub sections: Vec<SectionRule>,
    #[serde(default = "default_triage_section")]
    pub triage_section: String,
    #[serde(default = "default_deprecation_notice")]
    pub deprecation_notice: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repositories: default_repositories(),
            sections: default_section_rules(),
            triage_section: default_triage_section(),
            deprecation_notice: default_deprecation_notice(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `explicit`, or from the user config
    /// directory when no path is given.
    ///
    /// Only the user config file may be absent; an explicitly named file that
    /// does not exist is an error.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = config_file_path()?;
                if path.exists() {
                    Self::read(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn read(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AppError::Configuration(format!("cannot read {}: {err}", path.display()))
        })?;
        let config = Self::parse(&contents).map_err(|err| {
            AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn registry(&self) -> RepoRegistry {
        RepoRegistry::new(self.repositories.clone())
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.sections.clone(), self.triage_section.clone())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("cannot determine the user config directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::parse(r#"{ "repositories": { "compose": "docker/compose" } }"#)
            .unwrap();
        assert_eq!(config.repositories.len(), 1);
        assert_eq!(
            config.registry().repository("compose"),
            Some("docker/compose")
        );
        assert_eq!(config.sections, default_section_rules());
        assert_eq!(config.triage_section, DEFAULT_TRIAGE_SECTION);
        assert_eq!(config.deprecation_notice, DEFAULT_DEPRECATION_NOTICE);
    }

    #[test]
    fn empty_object_is_default_config() {
        assert_eq!(AppConfig::parse("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_custom_section_rules() {
        let config = AppConfig::parse(
            r#"{ "sections": [ { "keywords": ["docs"], "section": "documentation" } ], "triage_section": "other" }"#,
        )
        .unwrap();
        let classifier = config.classifier();
        assert_eq!(classifier.classify("Update docs").section, "documentation");
        assert_eq!(classifier.classify("Add build cache").section, "other");
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::read(&path).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn saves_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            triage_section: "needs-sorting".to_string(),
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::read(&path).unwrap(), config);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(dir.path().join("missing.json").as_path())).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn default_registry_covers_cli_and_engine() {
        let registry = AppConfig::default().registry();
        assert_eq!(registry.repository("cli"), Some("docker/cli"));
        assert_eq!(registry.repository("engine"), Some("moby/moby"));
    }
}
