//! IBM Spectrum LSF.

use super::{BatchSystem, format_option_line, job_file_stem, merge_user_directives};
use crate::job::TaskJob;
use indexmap::IndexMap;

const DIRECTIVE_PREFIX: &str = "#BSUB ";

#[derive(Debug, Clone, Copy, Default)]
pub struct Lsf;

impl BatchSystem for Lsf {
    fn name(&self) -> &'static str {
        "lsf"
    }

    fn format_directives(&self, job: &TaskJob) -> Vec<String> {
        let stem = job_file_stem(job);
        let mut directives = IndexMap::new();
        directives.insert(
            "-J".to_string(),
            format!("{}.{}", job.task_id, job.suite_name),
        );
        directives.insert("-o".to_string(), format!("{}.out", stem));
        directives.insert("-e".to_string(), format!("{}.err", stem));
        if let Some(secs) = job.execution_time_limit.as_ref().and_then(|l| l.seconds()) {
            // -W takes whole minutes; round up so the limit is never shortened.
            directives.insert("-W".to_string(), secs.div_ceil(60).to_string());
        }

        merge_user_directives(directives, job)
            .iter()
            .map(|(key, value)| format_option_line(DIRECTIVE_PREFIX, key, value))
            .collect()
    }
}
