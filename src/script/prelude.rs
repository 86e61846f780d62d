//! Job script prelude: trap signal sets, engine version and executable path.

use crate::batch;
use crate::config::WriterConfig;
use crate::error::{JobScriptError, Result};
use crate::host::{HostConfig, HostItem};
use crate::job::TaskJob;
use crate::quote::quote_value;
use std::path::Path;

/// Resolve the engine executable for the job host and check it is plausible.
///
/// The host setting must be a single shell word whose file name is exactly
/// the configured executable name (`cylc`). Anything else, such as
/// `cylc-testing` or `cylc --debug`, is rejected.
pub fn resolve_executable(
    job: &TaskJob,
    host_config: &dyn HostConfig,
    config: &WriterConfig,
) -> Result<String> {
    let raw = host_config
        .lookup(HostItem::CylcExecutable, job.host.as_deref())
        .unwrap_or_else(|| config.executable_name.clone());

    let words = shell_words::split(&raw)
        .map_err(|_| JobScriptError::InvalidExecutable(raw.clone()))?;
    let [exe] = words.as_slice() else {
        return Err(JobScriptError::InvalidExecutable(raw));
    };

    let file_name = Path::new(exe).file_name().and_then(|name| name.to_str());
    if file_name != Some(config.executable_name.as_str()) {
        return Err(JobScriptError::InvalidExecutable(raw));
    }
    Ok(exe.clone())
}

/// Write the prelude.
///
/// Fails with [`JobScriptError::InvalidExecutable`] before writing anything
/// if the executable lookup does not pass [`resolve_executable`].
pub fn write_prelude(
    out: &mut String,
    job: &TaskJob,
    host_config: &dyn HostConfig,
    config: &WriterConfig,
) -> Result<()> {
    let exe = resolve_executable(job, host_config, config)?;
    let handler = batch::for_job(job);

    out.push_str(&format!(
        "\nCYLC_FAIL_SIGNALS='{}'",
        handler.fail_signals().join(" ")
    ));
    if let Some(signal) = handler.vacation_signal() {
        out.push_str(&format!("\nCYLC_VACATION_SIGNALS='{}'", signal));
    }
    if config.debug {
        out.push_str("\nexport CYLC_DEBUG=true");
    }
    out.push_str(&format!("\nexport CYLC_VERSION='{}'", config.version));

    let bin_dir = Path::new(&exe)
        .parent()
        .and_then(|dir| dir.to_str())
        .filter(|dir| !dir.is_empty());
    if let Some(dir) = bin_dir {
        out.push_str(&format!(
            "\nexport PATH={}",
            quote_value(&format!("{}:$PATH", dir))
        ));
    }
    Ok(())
}
