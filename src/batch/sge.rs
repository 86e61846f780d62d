//! Sun/Oracle/Son of Grid Engine.

use super::{BatchSystem, format_option_line, job_file_stem, merge_user_directives};
use crate::job::TaskJob;
use indexmap::IndexMap;

const DIRECTIVE_PREFIX: &str = "#$ ";

#[derive(Debug, Clone, Copy, Default)]
pub struct Sge;

impl BatchSystem for Sge {
    fn name(&self) -> &'static str {
        "sge"
    }

    fn format_directives(&self, job: &TaskJob) -> Vec<String> {
        let stem = job_file_stem(job);
        let mut directives = IndexMap::new();
        directives.insert(
            "-N".to_string(),
            format!("{}.{}", job.task_id, job.suite_name),
        );
        directives.insert("-o".to_string(), format!("{}.out", stem));
        directives.insert("-e".to_string(), format!("{}.err", stem));
        if let Some(secs) = job.execution_time_limit.as_ref().and_then(|l| l.seconds()) {
            directives.insert(
                "-l h_rt".to_string(),
                format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60),
            );
        }

        merge_user_directives(directives, job)
            .iter()
            .map(|(key, value)| format_option_line(DIRECTIVE_PREFIX, key, value))
            .collect()
    }
}
