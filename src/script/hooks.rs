//! Lifecycle hook functions.

use crate::job::TaskJob;

/// Write one shell function per present hook, in lifecycle order.
///
/// Bodies are copied verbatim.
pub fn write_hooks(out: &mut String, job: &TaskJob) {
    for (hook, body) in job.hooks.present() {
        out.push_str(&format!("\n\n{}() {{\n", hook.function_name()));
        out.push_str(&format!("# {}:\n{}\n}}", hook.label(), body));
    }
}
