//! Task-job description model.
//!
//! A [`TaskJob`] is everything the job preparation stage knows about one
//! submission of one task: identity, execution target, batch directives,
//! lifecycle hooks and environment. The script writer only reads it.
//!
//! # Description File Format
//!
//! Descriptions are YAML (or JSON) mappings:
//!
//! ```text
//! suite_name: farm_noises
//! task_id: baa.1
//! job_d: 1/baa/01
//! batch_system_name: loadleveler
//! execution_time_limit: 60
//! directives:
//!   class: parallel
//!   node: 2
//! environment:
//!   DATA: ~/data
//! script: run-model
//! ```
//!
//! Mapping order is significant: directives and environment variables are
//! emitted in the order they appear.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub mod hooks;
mod io;
mod scalar;

pub use hooks::{LifecycleHooks, ScriptHook};

/// Name of the batch system used when a description does not name one.
pub const DEFAULT_BATCH_SYSTEM: &str = "background";

/// A complete task-job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskJob {
    // =========================================================================
    // Identity
    // =========================================================================
    /// Suite (workflow) name.
    #[serde(default)]
    pub suite_name: String,

    /// Task identifier, e.g. `baa.1`.
    #[serde(default)]
    pub task_id: String,

    /// Job log directory relative to the suite log root, e.g. `1/baa/01`.
    #[serde(default)]
    pub job_d: String,

    /// Ancestor namespaces, root first.
    #[serde(default)]
    pub namespace_hierarchy: Vec<String>,

    /// Tasks this job waited on.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Try (attempt) number, starting at 1.
    #[serde(default = "default_try_num")]
    pub try_num: u32,

    // =========================================================================
    // Execution target
    // =========================================================================
    /// Batch system name, e.g. `background`, `pbs`, `loadleveler`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_system_name: Option<String>,

    /// Template of the submission command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_submit_command_template: Option<String>,

    /// Execution time limit, normally in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_limit: Option<ExecutionTimeLimit>,

    /// Job host; `None` means the suite host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Job owner on the job host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Suite definition directory as seen from the job host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_suite_d: Option<String>,

    /// Task work directory base relative to the suite work root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_d: Option<String>,

    /// Unique id of the running suite instance.
    #[serde(default)]
    pub uuid_str: String,

    // =========================================================================
    // Batch directives, hooks and environment
    // =========================================================================
    /// User directives in declaration order.
    #[serde(default, deserialize_with = "scalar::string_map")]
    pub directives: IndexMap<String, String>,

    /// Lifecycle hook bodies.
    #[serde(flatten)]
    pub hooks: LifecycleHooks,

    /// User runtime environment in declaration order.
    #[serde(default, deserialize_with = "scalar::string_map")]
    pub environment: IndexMap<String, String>,

    /// Parameter environment templates: variable name to `%(param)s` template.
    #[serde(default, deserialize_with = "scalar::string_map")]
    pub param_env_tmpl: IndexMap<String, String>,

    /// Parameter values of a parameterised task.
    #[serde(default, deserialize_with = "scalar::string_map")]
    pub param_var: IndexMap<String, String>,

    // =========================================================================
    // Output
    // =========================================================================
    /// Log files the job is expected to produce.
    #[serde(default)]
    pub logfiles: Vec<String>,

    /// Path of the job file on the job host; log paths derive from it.
    #[serde(default)]
    pub job_file_path: String,
}

fn default_try_num() -> u32 {
    1
}

impl Default for TaskJob {
    fn default() -> Self {
        Self {
            suite_name: String::new(),
            task_id: String::new(),
            job_d: String::new(),
            namespace_hierarchy: Vec::new(),
            dependencies: Vec::new(),
            try_num: default_try_num(),
            batch_system_name: None,
            batch_submit_command_template: None,
            execution_time_limit: None,
            host: None,
            owner: None,
            remote_suite_d: None,
            work_d: None,
            uuid_str: String::new(),
            directives: IndexMap::new(),
            hooks: LifecycleHooks::default(),
            environment: IndexMap::new(),
            param_env_tmpl: IndexMap::new(),
            param_var: IndexMap::new(),
            logfiles: Vec::new(),
            job_file_path: String::new(),
        }
    }
}

impl TaskJob {
    /// Batch system name, falling back to [`DEFAULT_BATCH_SYSTEM`].
    pub fn batch_system(&self) -> &str {
        self.batch_system_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_BATCH_SYSTEM)
    }

    /// Work directory base for the task, if the description sets one.
    ///
    /// The job runtime derives its own default when this is absent.
    pub fn work_dir_base(&self) -> Option<&str> {
        self.work_d.as_deref().filter(|w| !w.is_empty())
    }
}

/// Execution time limit as supplied by the description.
///
/// The header shows the raw text; batch directives need it in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExecutionTimeLimit(String);

impl ExecutionTimeLimit {
    /// Largest limit converted to seconds. Handlers add margins to it, so it
    /// stays far below `u64::MAX`.
    pub const MAX_SECONDS: u64 = u32::MAX as u64;

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whole seconds, or `None` unless the text is a number in
    /// `1..=MAX_SECONDS`.
    pub fn seconds(&self) -> Option<u64> {
        let secs: f64 = self.0.trim().parse().ok()?;
        if secs.is_finite() && (1.0..=Self::MAX_SECONDS as f64).contains(&secs) {
            Some(secs.floor() as u64)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ExecutionTimeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExecutionTimeLimit {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for ExecutionTimeLimit {
    fn from(secs: u64) -> Self {
        Self::new(secs.to_string())
    }
}

impl<'de> Deserialize<'de> for ExecutionTimeLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        scalar::Scalar::deserialize(deserializer).map(|s| Self(s.into_text()))
    }
}
