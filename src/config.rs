use crate::error::{HerdOpsError, Result};
use crate::logic::alerts::AlertPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub herd_name: String,
    pub snapshot_path: Option<PathBuf>,
    pub output: OutputFormat,
    pub alerts: AlertPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Load the config from `config_override` or the standard locations.
    ///
    /// An explicit path must exist. When no file is found in the standard
    /// locations, defaults are returned.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(HerdOpsError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| HerdOpsError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::info!(path = %path.display(), herd = %config.herd_name, "Loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| HerdOpsError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in the working directory, then the user config dir.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("herdops").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Replace `${VAR}` placeholders with environment values. Unset variables
    /// are left untouched.
    fn substitute_env_vars(content: &str) -> String {
        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return content.to_string(),
        };

        re.replace_all(content, |caps: &regex_lite::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
    }

    /// Snapshot path from the CLI, then the config file, then `HERDOPS_SNAPSHOT`.
    pub fn snapshot_path(&self, cli_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.clone());
        }
        if let Some(ref path) = self.snapshot_path {
            return Ok(path.clone());
        }
        if let Ok(path) = std::env::var("HERDOPS_SNAPSHOT") {
            return Ok(PathBuf::from(path));
        }
        Err(HerdOpsError::Config(
            "No herd snapshot configured. Pass --snapshot or set snapshot_path".into(),
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            herd_name: "Main Herd".into(),
            snapshot_path: None,
            output: OutputFormat::Text,
            alerts: AlertPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config.herd_name, "Main Herd");
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.alerts, AlertPolicy::default());
    }

    #[test]
    fn partial_alert_policy_keeps_other_defaults() {
        let config = Config::parse(
            "herd_name: Finca Norte\noutput: json\nalerts:\n  vaccination_window_days: 45\n",
        )
        .unwrap();
        assert_eq!(config.herd_name, "Finca Norte");
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.alerts.vaccination_window_days, 45);
        assert_eq!(
            config.alerts.birth_window_days,
            AlertPolicy::default().birth_window_days
        );
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("HERDOPS_TEST_SNAPSHOT_DIR", "/srv/herd");
        let config =
            Config::parse("snapshot_path: ${HERDOPS_TEST_SNAPSHOT_DIR}/herd.yaml\n").unwrap();
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/srv/herd/herd.yaml")));
    }

    #[test]
    fn unset_env_var_is_left_in_place() {
        let out = Config::substitute_env_vars("path: ${HERDOPS_TEST_NEVER_SET}");
        assert_eq!(out, "path: ${HERDOPS_TEST_NEVER_SET}");
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        let result = Config::parse("output: [not, a, format]");
        assert!(matches!(result, Err(HerdOpsError::Config(_))));
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let result = Config::load(Some(PathBuf::from("/nonexistent/herdops.yaml")));
        assert!(matches!(result, Err(HerdOpsError::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "herd_name: Test Herd\nsnapshot_path: herd.json").unwrap();

        let config = Config::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.herd_name, "Test Herd");
        assert_eq!(config.snapshot_path, Some(PathBuf::from("herd.json")));
    }

    #[test]
    fn cli_snapshot_overrides_config() {
        let config = Config {
            snapshot_path: Some(PathBuf::from("from-config.yaml")),
            ..Default::default()
        };
        let cli = PathBuf::from("from-cli.yaml");
        assert_eq!(config.snapshot_path(Some(&cli)).unwrap(), cli);
        assert_eq!(
            config.snapshot_path(None).unwrap(),
            PathBuf::from("from-config.yaml")
        );
    }
}
