//! Suite, task and user runtime environment sections.
//!
//! Suite and task variables live together in the `cylc_env` function; the
//! writers here only produce the lines inside it. User variables get their
//! own `user_env` function.

use crate::error::{JobScriptError, Result};
use crate::host::{Environment, RemoteLayout};
use crate::job::TaskJob;
use crate::quote::quote_value;
use crate::template::render_template;
use std::collections::BTreeMap;

pub const CYLC_ENV_FUNCTION: &str = "cylc__job__inst__cylc_env";
pub const USER_ENV_FUNCTION: &str = "cylc__job__inst__user_env";

/// Variable read from the invoking process for the local suite path.
pub const LOCAL_SUITE_DEF_PATH_VAR: &str = "CYLC_SUITE_DEF_PATH";

/// Prefix of the per-parameter exports.
pub const PARAM_VAR_PREFIX: &str = "CYLC_TASK_PARAM_";

/// Variables the suite section always sets itself.
const HOST_SPECIFIC_SUITE_VARS: &[&str] = &[
    "CYLC_SUITE_RUN_DIR",
    "CYLC_SUITE_WORK_DIR_ROOT",
    "CYLC_SUITE_DEF_PATH",
    "CYLC_SUITE_DEF_PATH_ON_SUITE_HOST",
    "CYLC_SUITE_UUID",
];

fn push_export(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("\n    export {}={}", name, quote_value(value)));
}

/// Write the suite-scoped exports.
///
/// `suite_env` holds writer-wide static variables; they come first, sorted
/// by name, unless they clash with a host-specific variable set here.
pub fn write_suite_environment(
    out: &mut String,
    job: &TaskJob,
    layout: &dyn RemoteLayout,
    environment: &dyn Environment,
    suite_env: &BTreeMap<String, String>,
) {
    let host = job.host.as_deref();
    out.push_str("\n    # CYLC SUITE ENVIRONMENT:");
    for (name, value) in suite_env {
        if !HOST_SPECIFIC_SUITE_VARS.contains(&name.as_str()) {
            push_export(out, name, value);
        }
    }

    let run_dir = layout.run_dir(host, &job.suite_name);
    push_export(out, "CYLC_SUITE_RUN_DIR", &run_dir);
    let work_dir = layout.work_dir(host, &job.suite_name);
    if work_dir != run_dir {
        push_export(out, "CYLC_SUITE_WORK_DIR_ROOT", &work_dir);
    }
    let def_path = job
        .remote_suite_d
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(&run_dir);
    push_export(out, "CYLC_SUITE_DEF_PATH", def_path);
    let local_def_path = environment.var(LOCAL_SUITE_DEF_PATH_VAR).unwrap_or_default();
    push_export(out, "CYLC_SUITE_DEF_PATH_ON_SUITE_HOST", &local_def_path);
    push_export(out, "CYLC_SUITE_UUID", &job.uuid_str);
}

/// Encode the namespace hierarchy for `CYLC_TASK_NAMESPACE_HIERARCHY`.
///
/// Names are space-joined and then every character of the result is
/// space-separated again: `[root, baa]` becomes `r o o t   b a a`.
pub fn encode_namespace_hierarchy(hierarchy: &[String]) -> String {
    let joined = hierarchy.join(" ");
    let chars: Vec<String> = joined.chars().map(String::from).collect();
    chars.join(" ")
}

/// Write the task-scoped exports and, when set, the work directory base.
///
/// Fails only if a parameter environment template cannot be rendered.
pub fn write_task_environment(out: &mut String, job: &TaskJob) -> Result<()> {
    out.push_str("\n\n    # CYLC TASK ENVIRONMENT:");
    push_export(out, "CYLC_TASK_JOB", &job.job_d);
    push_export(
        out,
        "CYLC_TASK_NAMESPACE_HIERARCHY",
        &encode_namespace_hierarchy(&job.namespace_hierarchy),
    );
    push_export(out, "CYLC_TASK_DEPENDENCIES", &job.dependencies.join(" "));
    out.push_str(&format!("\n    export CYLC_TASK_TRY_NUMBER={}", job.try_num));

    for (name, template) in &job.param_env_tmpl {
        let value = render_template(template, &job.param_var).map_err(|e| {
            JobScriptError::InvalidTemplate(format!("{}: {}", name, e))
        })?;
        push_export(out, name, &value);
    }
    for (key, value) in &job.param_var {
        push_export(out, &format!("{}{}", PARAM_VAR_PREFIX, key), value);
    }

    if let Some(work_dir_base) = job.work_dir_base() {
        out.push_str(&format!(
            "\n    CYLC_TASK_WORK_DIR_BASE={}",
            quote_value(work_dir_base)
        ));
    }
    Ok(())
}

/// Write the user runtime environment function.
///
/// All names are exported in one declaration before any is assigned, so
/// values may refer to each other. Omitted when there are no variables.
pub fn write_user_environment(out: &mut String, job: &TaskJob) {
    if job.environment.is_empty() {
        return;
    }
    out.push_str(&format!("\n\n{}() {{", USER_ENV_FUNCTION));
    out.push_str("\n    # TASK RUNTIME ENVIRONMENT:");
    let names: Vec<&str> = job.environment.keys().map(String::as_str).collect();
    out.push_str(&format!("\n    export {}", names.join(" ")));
    for (name, value) in &job.environment {
        out.push_str(&format!("\n    {}={}", name, quote_value(value)));
    }
    out.push_str("\n}");
}
