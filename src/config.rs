use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.depscan/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub maven: MavenConfig,
    pub commands: CommandsConfig,
}

/// Maven tool settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MavenConfig {
    /// Maven binary tried after `$MAVEN_BINARY` and before plain `mvn`.
    pub binary: Option<String>,
    /// Java binary tried after `$JAVA_BINARY` and before plain `java`.
    pub java_binary: Option<String>,
    /// Arguments of the build step.
    pub build_args: Vec<String>,
}

impl Default for MavenConfig {
    fn default() -> Self {
        Self {
            binary: None,
            java_binary: None,
            build_args: vec![
                "install".to_string(),
                "-DskipTests".to_string(),
                "-Drat.skip=true".to_string(),
            ],
        }
    }
}

/// External command execution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Wall-clock limit per command in seconds; `0` waits forever.
    pub timeout_secs: u64,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self { timeout_secs: 1800 }
    }
}

impl CommandsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.depscan/config.toml`
/// 3. `~/.config/depscan/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".depscan").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("depscan").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// Binary candidates in probe order: environment override, configured path, conventional name.
/// Unset or blank overrides are left out.
pub fn binary_candidates(env_var: &str, configured: Option<&str>, conventional: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Ok(value) = std::env::var(env_var) {
        if !value.trim().is_empty() {
            candidates.push(value);
        }
    }
    if let Some(configured) = configured.filter(|c| !c.trim().is_empty()) {
        candidates.push(configured.to_string());
    }
    candidates.push(conventional.to_string());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.maven.build_args, vec!["install", "-DskipTests", "-Drat.skip=true"]);
        assert_eq!(cfg.commands.timeout(), Some(Duration::from_secs(1800)));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("[maven]\nbinary = \"/opt/maven/bin/mvn\"\n").unwrap();
        assert_eq!(cfg.maven.binary.as_deref(), Some("/opt/maven/bin/mvn"));
        assert_eq!(cfg.maven.build_args.len(), 3);
        assert_eq!(cfg.commands.timeout_secs, 1800);
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let cfg: Config = toml::from_str("[commands]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(cfg.commands.timeout(), None);
    }

    #[test]
    fn test_project_config_is_found() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".depscan")).unwrap();
        std::fs::write(
            tmp.path().join(".depscan/config.toml"),
            "[maven]\nbuild_args = [\"verify\"]\n",
        )
        .unwrap();

        let cfg = load_config(tmp.path(), None).unwrap();
        assert_eq!(cfg.maven.build_args, vec!["verify"]);
    }

    #[test]
    fn test_override_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(load_config(tmp.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_binary_candidates_order() {
        let candidates = binary_candidates(
            "DEPSCAN_TEST_UNSET_BINARY",
            Some("/opt/mvn"),
            "mvn",
        );
        assert_eq!(candidates, vec!["/opt/mvn", "mvn"]);
    }

    #[test]
    fn test_env_override_is_tried_first() {
        std::env::set_var("DEPSCAN_TEST_SET_BINARY", "/usr/local/bin/mvn4");
        let candidates = binary_candidates("DEPSCAN_TEST_SET_BINARY", Some("/opt/mvn"), "mvn");
        std::env::remove_var("DEPSCAN_TEST_SET_BINARY");

        assert_eq!(candidates, vec!["/usr/local/bin/mvn4", "/opt/mvn", "mvn"]);
    }

    #[test]
    fn test_blank_env_override_is_skipped() {
        std::env::set_var("DEPSCAN_TEST_BLANK_BINARY", "");
        let candidates = binary_candidates("DEPSCAN_TEST_BLANK_BINARY", None, "java");
        std::env::remove_var("DEPSCAN_TEST_BLANK_BINARY");

        assert_eq!(candidates, vec!["java"]);
    }
}
