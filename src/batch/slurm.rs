//! Slurm.

use super::{BatchSystem, job_file_stem, merge_user_directives};
use crate::job::TaskJob;
use indexmap::IndexMap;

const DIRECTIVE_PREFIX: &str = "#SBATCH ";

/// Slurm sends TERM before KILL on time-out; the job should not treat it as
/// its own failure trap.
const FAIL_SIGNALS: &[&str] = &["EXIT", "ERR", "XCPU"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Slurm;

impl BatchSystem for Slurm {
    fn name(&self) -> &'static str {
        "slurm"
    }

    fn fail_signals(&self) -> &'static [&'static str] {
        FAIL_SIGNALS
    }

    fn format_directives(&self, job: &TaskJob) -> Vec<String> {
        let stem = job_file_stem(job);
        let mut directives = IndexMap::new();
        directives.insert(
            "--job-name".to_string(),
            format!("{}.{}", job.task_id, job.suite_name),
        );
        directives.insert("--output".to_string(), format!("{}.out", stem));
        directives.insert("--error".to_string(), format!("{}.err", stem));
        if let Some(secs) = job.execution_time_limit.as_ref().and_then(|l| l.seconds()) {
            directives.insert(
                "--time".to_string(),
                format!("{}:{:02}", secs / 60, secs % 60),
            );
        }

        merge_user_directives(directives, job)
            .into_iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    format!("{}{}", DIRECTIVE_PREFIX, key)
                } else {
                    format!("{}{}={}", DIRECTIVE_PREFIX, key, value)
                }
            })
            .collect()
    }
}
