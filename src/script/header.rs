//! Job script header.

use crate::job::TaskJob;

/// Comment prefixes that submission tooling parses back out of job files.
pub const LINE_PREFIX_JOB_LOG_DIR: &str = "# Job log directory: ";
pub const LINE_PREFIX_BATCH_SYS_NAME: &str = "# Job submit method: ";
pub const LINE_PREFIX_BATCH_SUBMIT_CMD_TMPL: &str = "# Job submit command template: ";
pub const LINE_PREFIX_EXECUTION_TIME_LIMIT: &str = "# Execution time limit: ";

/// Write the shebang, banner and one comment line per known metadata field.
///
/// Empty or absent fields are skipped.
pub fn write_header(out: &mut String, job: &TaskJob) {
    out.push_str("#!/bin/bash -l\n");
    out.push_str("#\n# ++++ THIS IS A CYLC TASK JOB SCRIPT ++++");

    let time_limit = job.execution_time_limit.as_ref().map(|l| l.as_str());
    let fields = [
        ("# Suite: ", Some(job.suite_name.as_str())),
        ("# Task: ", Some(job.task_id.as_str())),
        (LINE_PREFIX_JOB_LOG_DIR, Some(job.job_d.as_str())),
        (LINE_PREFIX_BATCH_SYS_NAME, job.batch_system_name.as_deref()),
        (
            LINE_PREFIX_BATCH_SUBMIT_CMD_TMPL,
            job.batch_submit_command_template.as_deref(),
        ),
        (LINE_PREFIX_EXECUTION_TIME_LIMIT, time_limit),
    ];
    for (prefix, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            out.push('\n');
            out.push_str(prefix);
            out.push_str(value);
        }
    }
}
