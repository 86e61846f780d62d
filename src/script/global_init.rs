//! Host-level global init script.

use crate::host::{HostConfig, HostItem};
use crate::job::TaskJob;

pub const GLOBAL_INIT_FUNCTION: &str = "cylc__job__inst__global_init_script";

/// Wrap the host's global init script in a shell function.
///
/// Omitted entirely when the host has none.
pub fn write_global_init_script(out: &mut String, job: &TaskJob, host_config: &dyn HostConfig) {
    let Some(script) = host_config
        .lookup(HostItem::GlobalInitScript, job.host.as_deref())
        .filter(|s| !s.is_empty())
    else {
        return;
    };
    out.push_str(&format!("\n\n{}() {{", GLOBAL_INIT_FUNCTION));
    out.push_str("\n# GLOBAL-INIT-SCRIPT:\n");
    out.push_str(&script);
    out.push_str("\n}");
}
