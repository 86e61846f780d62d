//! Site configuration for job hosts.
//!
//! This module defines [`SiteConfig`], the YAML file describing where the
//! engine executable lives and how suite directories are laid out on each job
//! host. It implements [`HostConfig`] and [`RemoteLayout`] for the writer.
//!
//! # File Format
//!
//! ```yaml
//! cylc_executable: cylc
//! run_directory_root: $HOME/cylc-run
//!
//! hosts:
//!   hpc1:
//!     cylc_executable: /opt/cylc/bin/cylc
//!     global_init_script: |
//!       module load cylc
//!   "hpc*":
//!     work_directory_root: /scratch/$USER/cylc-run
//! ```
//!
//! Top-level settings are defaults for every host. Entries under `hosts` are
//! keyed by exact host name or glob pattern; an exact match wins, otherwise
//! the first matching pattern in file order is used.

use crate::error::{JobScriptError, Result};
use crate::host::{HostConfig, HostItem, RemoteLayout};
use globset::Glob;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Host name assumed when a job has no explicit host.
pub const LOCALHOST: &str = "localhost";

/// Default engine executable.
pub const DEFAULT_CYLC_EXECUTABLE: &str = "cylc";

/// Default suite run directory root.
pub const DEFAULT_RUN_DIRECTORY_ROOT: &str = "$HOME/cylc-run";

/// Settings that may be given globally or per host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Engine executable on the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cylc_executable: Option<String>,

    /// Shell source prepended to every job on the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_init_script: Option<String>,

    /// Root under which suite run directories live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_directory_root: Option<String>,

    /// Root under which suite work directories live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_directory_root: Option<String>,
}

/// Site configuration, usually loaded from a YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Defaults for every host.
    #[serde(flatten)]
    pub defaults: HostSettings,

    /// Per-host overrides keyed by name or glob pattern.
    pub hosts: IndexMap<String, HostSettings>,
}

impl SiteConfig {
    /// Load site config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            JobScriptError::UserError(format!(
                "failed to read site config '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse site config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SiteConfig = serde_yaml::from_str(yaml).map_err(|e| {
            JobScriptError::UserError(format!("failed to parse site config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - host keys must be valid glob patterns
    /// - `cylc_executable`, where given, must be non-empty
    pub fn validate(&self) -> Result<()> {
        for (pattern, settings) in &self.hosts {
            Glob::new(pattern).map_err(|e| {
                JobScriptError::UserError(format!(
                    "config validation failed: invalid host pattern '{}': {}",
                    pattern, e
                ))
            })?;
            check_executable(&settings.cylc_executable, pattern)?;
        }
        check_executable(&self.defaults.cylc_executable, "defaults")?;
        Ok(())
    }

    /// Host entry applying to `host`, if any.
    fn host_settings(&self, host: Option<&str>) -> Option<&HostSettings> {
        let host = host.filter(|h| !h.is_empty()).unwrap_or(LOCALHOST);
        if let Some(settings) = self.hosts.get(host) {
            return Some(settings);
        }
        self.hosts.iter().find_map(|(pattern, settings)| {
            let matcher = Glob::new(pattern).ok()?.compile_matcher();
            matcher.is_match(host).then_some(settings)
        })
    }

    /// Resolve one setting: host entry first, then top-level default.
    fn resolve<F>(&self, host: Option<&str>, field: F) -> Option<String>
    where
        F: Fn(&HostSettings) -> &Option<String>,
    {
        self.host_settings(host)
            .and_then(|settings| field(settings).clone())
            .or_else(|| field(&self.defaults).clone())
    }

    fn run_root(&self, host: Option<&str>) -> String {
        self.resolve(host, |s| &s.run_directory_root)
            .unwrap_or_else(|| DEFAULT_RUN_DIRECTORY_ROOT.to_string())
    }
}

fn check_executable(value: &Option<String>, section: &str) -> Result<()> {
    if let Some(exe) = value
        && exe.trim().is_empty()
    {
        return Err(JobScriptError::UserError(format!(
            "config validation failed: cylc_executable for '{}' must be non-empty",
            section
        )));
    }
    Ok(())
}

fn join_suite(root: &str, suite: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), suite)
}

impl HostConfig for SiteConfig {
    fn lookup(&self, item: HostItem, host: Option<&str>) -> Option<String> {
        match item {
            HostItem::CylcExecutable => Some(
                self.resolve(host, |s| &s.cylc_executable)
                    .unwrap_or_else(|| DEFAULT_CYLC_EXECUTABLE.to_string()),
            ),
            HostItem::GlobalInitScript => self.resolve(host, |s| &s.global_init_script),
        }
    }
}

impl RemoteLayout for SiteConfig {
    fn run_dir(&self, host: Option<&str>, suite: &str) -> String {
        join_suite(&self.run_root(host), suite)
    }

    fn work_dir(&self, host: Option<&str>, suite: &str) -> String {
        let root = self
            .resolve(host, |s| &s.work_directory_root)
            .unwrap_or_else(|| self.run_root(host));
        join_suite(&root, suite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SITE_YAML: &str = r#"
cylc_executable: cylc
global_init_script: "export SITE=1"

hosts:
  hpc1:
    cylc_executable: /opt/cylc/bin/cylc
    run_directory_root: /data/cylc-run
  "hpc*":
    global_init_script: "module load cylc"
    work_directory_root: /scratch/cylc-run/
"#;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(
            config.lookup(HostItem::CylcExecutable, None).as_deref(),
            Some("cylc")
        );
        assert_eq!(config.lookup(HostItem::GlobalInitScript, None), None);
        assert_eq!(config.run_dir(None, "farm"), "$HOME/cylc-run/farm");
        assert_eq!(config.work_dir(None, "farm"), "$HOME/cylc-run/farm");
    }

    #[test]
    fn test_exact_host_wins_over_pattern() {
        let config = SiteConfig::from_yaml(SITE_YAML).unwrap();

        assert_eq!(
            config
                .lookup(HostItem::CylcExecutable, Some("hpc1"))
                .as_deref(),
            Some("/opt/cylc/bin/cylc")
        );
        // hpc1 has no global init script of its own, so the default applies.
        assert_eq!(
            config
                .lookup(HostItem::GlobalInitScript, Some("hpc1"))
                .as_deref(),
            Some("export SITE=1")
        );
        assert_eq!(config.run_dir(Some("hpc1"), "farm"), "/data/cylc-run/farm");
        assert_eq!(config.work_dir(Some("hpc1"), "farm"), "/data/cylc-run/farm");
    }

    #[test]
    fn test_glob_pattern_host() {
        let config = SiteConfig::from_yaml(SITE_YAML).unwrap();

        assert_eq!(
            config
                .lookup(HostItem::GlobalInitScript, Some("hpc2"))
                .as_deref(),
            Some("module load cylc")
        );
        assert_eq!(
            config
                .lookup(HostItem::CylcExecutable, Some("hpc2"))
                .as_deref(),
            Some("cylc")
        );
        assert_eq!(config.run_dir(Some("hpc2"), "farm"), "$HOME/cylc-run/farm");
        assert_eq!(config.work_dir(Some("hpc2"), "farm"), "/scratch/cylc-run/farm");
    }

    #[test]
    fn test_missing_host_means_localhost() {
        let yaml = "hosts:\n  localhost:\n    cylc_executable: /usr/local/bin/cylc\n";
        let config = SiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(
            config.lookup(HostItem::CylcExecutable, None).as_deref(),
            Some("/usr/local/bin/cylc")
        );
        assert_eq!(
            config.lookup(HostItem::CylcExecutable, Some("")).as_deref(),
            Some("/usr/local/bin/cylc")
        );
    }

    #[test]
    fn test_invalid_host_pattern_rejected() {
        let yaml = "hosts:\n  \"hpc[\":\n    cylc_executable: cylc\n";
        let err = SiteConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("invalid host pattern"));
    }

    #[test]
    fn test_empty_executable_rejected() {
        let err = SiteConfig::from_yaml("cylc_executable: \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("must be non-empty"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("site.yaml");
        std::fs::write(&path, SITE_YAML).unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.hosts.len(), 2);
        assert_eq!(config.hosts.keys().next().map(String::as_str), Some("hpc1"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = SiteConfig::load(temp_dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, JobScriptError::UserError(_)));
    }
}
