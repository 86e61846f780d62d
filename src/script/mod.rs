//! Job script generation.
//!
//! [`JobScriptWriter`] assembles a job script from a [`TaskJob`] by running
//! the section writers in a fixed order:
//!
//! 1. header
//! 2. prelude
//! 3. directives
//! 4. global init script
//! 5. suite environment and task environment (one `cylc_env` function)
//! 6. user runtime environment
//! 7. lifecycle hooks
//! 8. epilogue
//!
//! Each section writer only reads the description and its collaborators,
//! so they can be exercised one at a time. Users may rely on the order, so
//! it must not change.

use crate::config::WriterConfig;
use crate::error::{JobScriptError, Result};
use crate::fs;
use crate::host::{Environment, HostConfig, RemoteLayout};
use crate::job::TaskJob;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

pub mod directives;
pub mod environment;
pub mod epilogue;
pub mod global_init;
pub mod header;
pub mod hooks;
pub mod prelude;


pub use directives::write_directives;
pub use environment::{
    CYLC_ENV_FUNCTION, encode_namespace_hierarchy, write_suite_environment,
    write_task_environment, write_user_environment,
};
pub use epilogue::write_epilogue;
pub use global_init::write_global_init_script;
pub use header::write_header;
pub use hooks::write_hooks;
pub use prelude::{resolve_executable, write_prelude};

/// Writes task job scripts.
///
/// Collaborators are borrowed for the writer's lifetime; the writer holds no
/// other state between calls, so one writer may serve many jobs.
pub struct JobScriptWriter<'a> {
    host_config: &'a dyn HostConfig,
    layout: &'a dyn RemoteLayout,
    environment: &'a dyn Environment,
    config: WriterConfig,
    suite_env: BTreeMap<String, String>,
}

impl<'a> JobScriptWriter<'a> {
    pub fn new(
        host_config: &'a dyn HostConfig,
        layout: &'a dyn RemoteLayout,
        environment: &'a dyn Environment,
        config: WriterConfig,
    ) -> Self {
        Self {
            host_config,
            layout,
            environment,
            config,
            suite_env: BTreeMap::new(),
        }
    }

    /// Replace the static suite variables exported into every job.
    pub fn set_suite_env<I, K, V>(&mut self, suite_env: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.suite_env = suite_env
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Render the complete job script text.
    pub fn render(&self, job: &TaskJob) -> Result<String> {
        let run_dir = self.layout.run_dir(job.host.as_deref(), &job.suite_name);
        let mut out = String::new();

        write_header(&mut out, job);
        write_prelude(&mut out, job, self.host_config, &self.config)?;
        write_directives(&mut out, job);
        write_global_init_script(&mut out, job, self.host_config);

        out.push_str(&format!("\n\n{}() {{", CYLC_ENV_FUNCTION));
        write_suite_environment(
            &mut out,
            job,
            self.layout,
            self.environment,
            &self.suite_env,
        );
        write_task_environment(&mut out, job)?;
        out.push_str("\n}");

        write_user_environment(&mut out, job);
        write_hooks(&mut out, job);
        write_epilogue(&mut out, job, &run_dir);

        debug!(task = %job.task_id, bytes = out.len(), "rendered job script");
        Ok(out)
    }

    /// Render and atomically write the job script to `destination`.
    ///
    /// Nothing touches the disk if rendering fails. If writing, the optional
    /// syntax check or the final rename fails, the destination is left as it
    /// was.
    pub fn write(&self, destination: &Path, job: &TaskJob) -> Result<()> {
        let content = self.render(job)?;

        let temp_path = fs::write_temp(destination, content.as_bytes())?;
        if self.config.check_syntax
            && let Err(e) = check_syntax(&temp_path)
        {
            fs::discard(&temp_path);
            return Err(e);
        }
        fs::commit(&temp_path, destination)?;

        debug!(path = %destination.display(), "wrote job script");
        Ok(())
    }
}

/// Run `bash -n` on a script file.
pub fn check_syntax(path: &Path) -> Result<()> {
    let output = Command::new("/bin/bash")
        .arg("-n")
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| JobScriptError::SyntaxCheck(format!("failed to run /bin/bash: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(JobScriptError::SyntaxCheck(stderr.trim().to_string()));
    }
    Ok(())
}
