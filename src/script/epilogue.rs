//! Job script epilogue.

use crate::job::TaskJob;

/// Marks the end of a completely written job file.
pub const LINE_PREFIX_EOF: &str = "#EOF: ";

/// Shared job runtime, relative to the suite run directory.
pub const JOB_RUNTIME_PATH: &str = ".service/etc/job.sh";

/// Source the job runtime, call its entry point, and mark end of file.
pub fn write_epilogue(out: &mut String, job: &TaskJob, run_dir: &str) {
    out.push_str(&format!(
        "\n\n. \"{}/{}\"\ncylc__job__main",
        run_dir, JOB_RUNTIME_PATH
    ));
    out.push_str(&format!("\n\n{}{}\n", LINE_PREFIX_EOF, job.job_d));
}
