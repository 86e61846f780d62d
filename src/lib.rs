//! Jobscript: task job script generation for cylc-style workflow engines.
//!
//! A [`TaskJob`] description is turned into a self-contained POSIX shell
//! script that the workflow's runtime library (`.service/etc/job.sh`)
//! executes on the job host. Host lookups, run directory layout and the
//! invoking process environment are supplied through the traits in
//! [`host`], so the writer itself holds no global state.
//!
//! ```no_run
//! use jobscript::{JobScriptWriter, ProcessEnvironment, SiteConfig, TaskJob, WriterConfig};
//! use std::path::Path;
//!
//! # fn main() -> jobscript::Result<()> {
//! let site = SiteConfig::default();
//! let env = ProcessEnvironment;
//! let writer = JobScriptWriter::new(&site, &site, &env, WriterConfig::default());
//!
//! let job = TaskJob::load("job.yaml")?;
//! writer.write(Path::new("log/job/1/baa/01/job"), &job)?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod host;
pub mod job;
pub mod quote;
pub mod script;
pub mod site;
pub mod template;

pub use config::WriterConfig;
pub use error::{JobScriptError, Result};
pub use host::{Environment, HostConfig, HostItem, ProcessEnvironment, RemoteLayout};
pub use job::TaskJob;
pub use script::JobScriptWriter;
pub use site::SiteConfig;
