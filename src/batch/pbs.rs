//! PBS and derivatives (Torque, PBS Pro).

use super::{BatchSystem, format_option_line, job_file_stem, merge_user_directives};
use crate::job::TaskJob;
use indexmap::IndexMap;

const DIRECTIVE_PREFIX: &str = "#PBS ";

/// Longest job name PBS accepts.
const JOB_NAME_LEN_MAX: usize = 236;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pbs;

impl BatchSystem for Pbs {
    fn name(&self) -> &'static str {
        "pbs"
    }

    fn format_directives(&self, job: &TaskJob) -> Vec<String> {
        let stem = job_file_stem(job);
        let job_name: String = format!("{}.{}", job.task_id, job.suite_name)
            .chars()
            .take(JOB_NAME_LEN_MAX)
            .collect();

        let mut directives = IndexMap::new();
        directives.insert("-N".to_string(), job_name);
        directives.insert("-o".to_string(), format!("{}.out", stem));
        directives.insert("-e".to_string(), format!("{}.err", stem));
        if let Some(secs) = job.execution_time_limit.as_ref().and_then(|l| l.seconds()) {
            directives.insert("-l walltime".to_string(), secs.to_string());
        }

        merge_user_directives(directives, job)
            .iter()
            .map(|(key, value)| format_option_line(DIRECTIVE_PREFIX, key, value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_directives() {
        let mut job = TaskJob {
            suite_name: "farm".to_string(),
            task_id: "baa.1".to_string(),
            job_file_path: "$HOME/cylc-run/farm/log/job/1/baa/01/job".to_string(),
            execution_time_limit: Some(180u64.into()),
            ..Default::default()
        };
        job.directives.insert("-q".to_string(), "long".to_string());
        job.directives
            .insert("-l select".to_string(), "2:ncpus=4".to_string());
        job.directives.insert("-V".to_string(), String::new());

        assert_eq!(
            Pbs.format_directives(&job),
            vec![
                "#PBS -N baa.1.farm",
                "#PBS -o cylc-run/farm/log/job/1/baa/01/job.out",
                "#PBS -e cylc-run/farm/log/job/1/baa/01/job.err",
                "#PBS -l walltime=180",
                "#PBS -q long",
                "#PBS -l select=2:ncpus=4",
                "#PBS -V",
            ]
        );
    }

    #[test]
    fn test_long_job_name_truncated() {
        let job = TaskJob {
            suite_name: "s".repeat(300),
            task_id: "t".to_string(),
            ..Default::default()
        };
        let lines = Pbs.format_directives(&job);
        assert_eq!(lines[0].len(), DIRECTIVE_PREFIX.len() + 3 + JOB_NAME_LEN_MAX);
    }
}
