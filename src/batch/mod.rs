//! Batch system handlers.
//!
//! Each supported batch system knows how to turn a [`TaskJob`] into its own
//! directive lines and which signals the job should trap. Batch systems
//! without a directive syntax (`background`, `at`) produce no directives.

use crate::job::TaskJob;
use indexmap::IndexMap;
use tracing::warn;

mod background;
mod loadleveler;
mod lsf;
mod pbs;
mod sge;
mod slurm;

pub use background::{At, Background};
pub use loadleveler::LoadLeveler;
pub use lsf::Lsf;
pub use pbs::Pbs;
pub use sge::Sge;
pub use slurm::Slurm;

/// Signals trapped as job failure unless a handler says otherwise.
pub const DEFAULT_FAIL_SIGNALS: &[&str] = &["EXIT", "ERR", "TERM", "XCPU"];

/// Behaviour of one batch system.
pub trait BatchSystem: Send + Sync {
    /// Name used in task-job descriptions.
    fn name(&self) -> &'static str;

    /// Signals the job traps as failure.
    fn fail_signals(&self) -> &'static [&'static str] {
        DEFAULT_FAIL_SIGNALS
    }

    /// Signal the batch system sends when it vacates (requeues) a job.
    fn vacation_signal(&self) -> Option<&'static str> {
        None
    }

    /// Directive lines, fully prefixed, in emission order.
    fn format_directives(&self, _job: &TaskJob) -> Vec<String> {
        Vec::new()
    }
}

static HANDLERS: &[&dyn BatchSystem] = &[
    &Background,
    &At,
    &LoadLeveler,
    &Pbs,
    &Slurm,
    &Lsf,
    &Sge,
];

/// Find a handler by name.
pub fn lookup(name: &str) -> Option<&'static dyn BatchSystem> {
    HANDLERS.iter().copied().find(|handler| handler.name() == name)
}

/// Handler for a job; unknown names fall back to `background`.
pub fn for_job(job: &TaskJob) -> &'static dyn BatchSystem {
    let name = job.batch_system();
    lookup(name).unwrap_or_else(|| {
        warn!(batch_system = name, "unknown batch system, writing no directives");
        &Background
    })
}

/// Job file path as used in log-file directives, with `$HOME/` removed.
///
/// Batch systems resolve relative output paths against the home directory
/// and do not expand `$HOME` themselves.
pub(crate) fn job_file_stem(job: &TaskJob) -> String {
    job.job_file_path.replace("$HOME/", "")
}

/// Overlay the user's directives on the synthetic ones.
///
/// A user directive with the same name replaces the synthetic value in place;
/// new names are appended in declaration order.
pub(crate) fn merge_user_directives(
    mut directives: IndexMap<String, String>,
    job: &TaskJob,
) -> IndexMap<String, String> {
    for (key, value) in &job.directives {
        directives.insert(key.clone(), value.clone());
    }
    directives
}

/// `key=value` when the key contains a space (`-l walltime`), `key value`
/// otherwise, bare `key` for an empty value.
pub(crate) fn format_option_line(prefix: &str, key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{}{}", prefix, key)
    } else if key.contains(' ') {
        format!("{}{}={}", prefix, key, value)
    } else {
        format!("{}{} {}", prefix, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_handlers() {
        for name in ["background", "at", "loadleveler", "pbs", "slurm", "lsf", "sge"] {
            let handler = lookup(name).unwrap();
            assert_eq!(handler.name(), name);
        }
        assert!(lookup("condor").is_none());
    }

    #[test]
    fn test_unknown_batch_system_falls_back_to_background() {
        let job = TaskJob {
            batch_system_name: Some("condor".to_string()),
            ..Default::default()
        };
        let handler = for_job(&job);
        assert_eq!(handler.name(), "background");
        assert!(handler.format_directives(&job).is_empty());
    }

    #[test]
    fn test_missing_batch_system_is_background() {
        assert_eq!(for_job(&TaskJob::default()).name(), "background");
    }

    #[test]
    fn test_job_file_stem_strips_home() {
        let job = TaskJob {
            job_file_path: "$HOME/cylc-run/s/log/job/1/t/01/job".to_string(),
            ..Default::default()
        };
        assert_eq!(job_file_stem(&job), "cylc-run/s/log/job/1/t/01/job");
    }

    #[test]
    fn test_user_directive_overrides_in_place() {
        let mut synthetic = IndexMap::new();
        synthetic.insert("-N".to_string(), "name".to_string());
        synthetic.insert("-o".to_string(), "out".to_string());

        let mut job = TaskJob::default();
        job.directives.insert("-q".to_string(), "express".to_string());
        job.directives.insert("-N".to_string(), "custom".to_string());

        let merged = merge_user_directives(synthetic, &job);
        let pairs: Vec<(&str, &str)> = merged
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("-N", "custom"), ("-o", "out"), ("-q", "express")]);
    }

    #[test]
    fn test_format_option_line() {
        assert_eq!(format_option_line("#PBS ", "-q", "long"), "#PBS -q long");
        assert_eq!(
            format_option_line("#PBS ", "-l walltime", "60"),
            "#PBS -l walltime=60"
        );
        assert_eq!(format_option_line("#PBS ", "-V", ""), "#PBS -V");
    }
}
