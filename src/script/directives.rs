//! Batch system directives.

use crate::batch;
use crate::job::TaskJob;

/// Write the directive block, or nothing for directive-less batch systems.
pub fn write_directives(out: &mut String, job: &TaskJob) {
    let lines = batch::for_job(job).format_directives(job);
    if lines.is_empty() {
        return;
    }
    out.push_str("\n\n# DIRECTIVES:");
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
}
