//! Collaborator interfaces consumed by the script writer.
//!
//! The writer never reads global configuration or process state directly.
//! Host-scoped settings, remote directory layout and environment access are
//! passed in as trait objects so callers (and tests) choose the source.

use std::collections::BTreeMap;

/// Host-scoped configuration items the writer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostItem {
    /// Path (or name) of the engine executable on the job host.
    CylcExecutable,
    /// Shell source run before anything else in every job on the host.
    GlobalInitScript,
}

impl std::fmt::Display for HostItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostItem::CylcExecutable => write!(f, "cylc executable"),
            HostItem::GlobalInitScript => write!(f, "global init-script"),
        }
    }
}

/// Resolves host-scoped configuration.
pub trait HostConfig {
    /// Look up `item` for `host` (`None` is the suite host).
    fn lookup(&self, item: HostItem, host: Option<&str>) -> Option<String>;
}

/// Resolves suite directories on a job host.
pub trait RemoteLayout {
    /// Suite run directory on `host`.
    fn run_dir(&self, host: Option<&str>, suite: &str) -> String;

    /// Suite work directory root on `host`.
    fn work_dir(&self, host: Option<&str>, suite: &str) -> String;
}

/// Read access to environment variables of the invoking process.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment(pub BTreeMap<String, String>);

impl StaticEnvironment {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Environment for StaticEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}
